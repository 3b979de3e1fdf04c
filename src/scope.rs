//! Tenant scope resolved by the authorization collaborator.

use serde::{Deserialize, Serialize};

/// Which records a caller may see.
///
/// The engine trusts this value completely; resolving it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantScope {
    /// Globally privileged caller; sees every record.
    #[default]
    Global,
    /// Caller restricted to one tenant.
    Tenant(String),
}

impl TenantScope {
    /// Scope restricted to `tenant`.
    pub fn tenant<S: Into<String>>(tenant: S) -> Self {
        TenantScope::Tenant(tenant.into())
    }

    /// Scope from an optional tenant identifier; `None` means global.
    pub fn from_tenant_id(tenant: Option<String>) -> Self {
        tenant.map_or(TenantScope::Global, TenantScope::Tenant)
    }

    /// The tenant identifier, if scoped.
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            TenantScope::Global => None,
            TenantScope::Tenant(id) => Some(id.as_str()),
        }
    }

    /// Whether the caller is unscoped.
    pub fn is_global(&self) -> bool {
        matches!(self, TenantScope::Global)
    }
}
