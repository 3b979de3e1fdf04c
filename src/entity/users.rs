//! User listing: full name, username and email search plus account-state filters.

use crate::entity::{SearchField, SearchableEntity, SortSpec};
use crate::error::Result;
use crate::filter::{FilterDefinition, FilterKind};

/// Display name.
pub const FULL_NAME: &str = "full_name";
/// Login name.
pub const USERNAME: &str = "username";
/// Primary email address.
pub const EMAIL: &str = "email";
/// Permalink of the user's institution; also the tenant attribute.
pub const INSTITUTION: &str = "institution";
/// Global administrator; read by the `admin` filter.
pub const SUPERUSER: &str = "superuser";
/// Account approved by an administrator.
pub const APPROVED: &str = "approved";
/// Disabled accounts are hidden from scoped searches.
pub const DISABLED: &str = "disabled";
/// Allowed to record meetings.
pub const CAN_RECORD: &str = "can_record";
/// Administers their institution.
pub const INSTITUTION_ADMIN: &str = "institution_admin";
/// Has a local password login.
pub const LOGIN_LOCAL: &str = "login_local";
/// Has an LDAP login.
pub const LOGIN_LDAP: &str = "login_ldap";
/// Has a federated (Shibboleth) login.
pub const LOGIN_SHIB: &str = "login_shib";

/// Build the users entity.
///
/// Tenant-scoped callers never see disabled accounts.
pub fn definition() -> Result<SearchableEntity> {
    SearchableEntity::builder("users")
        .field(SearchField::new(FULL_NAME))
        .field(SearchField::new(USERNAME))
        .field(SearchField::new(EMAIL))
        .filter(FilterDefinition::new("admin", SUPERUSER, FilterKind::TriState))
        .filter(FilterDefinition::tri_state(APPROVED))
        .filter(FilterDefinition::tri_state(DISABLED))
        .filter(FilterDefinition::tri_state(CAN_RECORD))
        .filter(FilterDefinition::new(
            "institutional_admin",
            INSTITUTION_ADMIN,
            FilterKind::TriState,
        ))
        .filter(FilterDefinition::new(
            "login_method_local",
            LOGIN_LOCAL,
            FilterKind::TriState,
        ))
        .filter(FilterDefinition::new(
            "login_method_ldap",
            LOGIN_LDAP,
            FilterKind::TriState,
        ))
        .filter(FilterDefinition::new(
            "login_method_shib",
            LOGIN_SHIB,
            FilterKind::TriState,
        ))
        .filter(FilterDefinition::new(
            "institutions",
            INSTITUTION,
            FilterKind::AnyOf,
        ))
        .tenant_attribute(INSTITUTION)
        .scoped_exclusion(DISABLED)
        .sort(SortSpec::ascending(FULL_NAME))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition() {
        let entity = definition().unwrap();
        let fields: Vec<_> = entity.fields().iter().map(SearchField::attribute).collect();
        assert_eq!(fields, vec![FULL_NAME, USERNAME, EMAIL]);
        assert_eq!(entity.filters().resolve("admin").unwrap().attribute(), SUPERUSER);
        assert_eq!(
            entity.filters().resolve("institutions").unwrap().kind(),
            FilterKind::AnyOf
        );
        assert_eq!(entity.filters().len(), 9);
        assert_eq!(entity.scoped_exclusion(), Some(DISABLED));
    }
}
