//! Storage collaborators.
//!
//! The engine never owns records. A [`CandidateSource`] enumerates the candidates
//! of an entity as lightweight [`Candidate`] projections, and a [`RecordLoader`]
//! turns ranked identifiers back into full records once a page is known.
//!
//! Collaborator failures are reported as [`BoxError`] and wrapped by the engine in
//! [`crate::error::SearchError::Storage`] without modification.

pub mod memory;

use std::fmt::Debug;

use ahash::AHashMap;

use crate::candidate::{Candidate, CandidateId};
use crate::entity::SearchableEntity;
use crate::error::BoxError;
use crate::scope::TenantScope;

pub use self::memory::MemorySource;

/// Enumerates the candidates of an entity.
pub trait CandidateSource: Send + Sync + Debug {
    /// Return the candidates of `entity`.
    ///
    /// `scope` may be used to narrow the read, but the engine applies the tenant
    /// clause itself, so returning out-of-scope candidates is harmless.
    fn candidates(
        &self,
        entity: &SearchableEntity,
        scope: &TenantScope,
    ) -> std::result::Result<Vec<Candidate>, BoxError>;
}

/// Resolves candidate identifiers to full records.
pub trait RecordLoader<T>: Send + Sync {
    /// Load the records for `ids`. Identifiers that no longer resolve may be
    /// omitted from the returned map.
    fn load(
        &self,
        entity: &SearchableEntity,
        ids: &[CandidateId],
    ) -> std::result::Result<AHashMap<CandidateId, T>, BoxError>;
}
