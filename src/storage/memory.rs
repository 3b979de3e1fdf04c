//! In-memory candidate source for tests and small fixed datasets.

use ahash::{AHashMap, AHashSet};

use crate::candidate::{Candidate, CandidateId};
use crate::entity::SearchableEntity;
use crate::error::BoxError;
use crate::scope::TenantScope;
use crate::storage::{CandidateSource, RecordLoader};

/// Candidates held in memory, keyed by entity name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entities: AHashMap<String, Vec<Candidate>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate to an entity.
    pub fn insert<S: Into<String>>(&mut self, entity: S, candidate: Candidate) {
        self.entities.entry(entity.into()).or_default().push(candidate);
    }

    /// Add many candidates to an entity.
    pub fn extend<S, I>(&mut self, entity: S, candidates: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = Candidate>,
    {
        self.entities
            .entry(entity.into())
            .or_default()
            .extend(candidates);
    }

    /// Builder form of [`MemorySource::extend`].
    pub fn with_candidates<S, I>(mut self, entity: S, candidates: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = Candidate>,
    {
        self.extend(entity, candidates);
        self
    }

    /// Number of candidates held for an entity.
    pub fn count(&self, entity: &str) -> usize {
        self.entities.get(entity).map_or(0, Vec::len)
    }

    /// Whether no candidates are held at all.
    pub fn is_empty(&self) -> bool {
        self.entities.values().all(Vec::is_empty)
    }
}

impl CandidateSource for MemorySource {
    fn candidates(
        &self,
        entity: &SearchableEntity,
        _scope: &TenantScope,
    ) -> std::result::Result<Vec<Candidate>, BoxError> {
        Ok(self.entities.get(entity.name()).cloned().unwrap_or_default())
    }
}

impl RecordLoader<Candidate> for MemorySource {
    fn load(
        &self,
        entity: &SearchableEntity,
        ids: &[CandidateId],
    ) -> std::result::Result<AHashMap<CandidateId, Candidate>, BoxError> {
        let Some(candidates) = self.entities.get(entity.name()) else {
            return Ok(AHashMap::new());
        };
        let wanted: AHashSet<CandidateId> = ids.iter().copied().collect();
        Ok(candidates
            .iter()
            .filter(|c| wanted.contains(&c.id()))
            .map(|c| (c.id(), c.clone()))
            .collect())
    }
}
