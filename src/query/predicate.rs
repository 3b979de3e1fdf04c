//! Predicate builder.
//!
//! Combines the tenant scope, the request's filters and the query terms into one
//! [`Predicate`] evaluated per candidate. Clauses are conjunctive and ordered:
//! tenant scope first, then filters, then terms, so scoping can only narrow the
//! candidate set before anything else runs.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::candidate::Candidate;
use crate::entity::SearchableEntity;
use crate::error::Result;
use crate::filter::{BoundFilter, FilterValue};
use crate::query::MatchMode;
use crate::query::matching::{HitMatrix, TermSet};
use crate::scope::TenantScope;

/// One conjunct of a predicate.
#[derive(Debug, Clone)]
pub enum Clause<'a> {
    /// Candidate must belong to `tenant`, and must not have `excluded` set.
    Tenant {
        attribute: &'a str,
        tenant: &'a str,
        excluded: Option<&'a str>,
    },
    /// Candidate must satisfy a registered filter.
    Filter(BoundFilter<'a>),
    /// Candidate must match the query terms under `mode`.
    Terms { mode: MatchMode },
}

impl Clause<'_> {
    fn admits(&self, candidate: &Candidate) -> bool {
        match self {
            Clause::Tenant {
                attribute,
                tenant,
                excluded,
            } => {
                candidate.text(attribute) == Some(*tenant)
                    && excluded.is_none_or(|flag| candidate.flag(flag) != Some(true))
            }
            Clause::Filter(filter) => filter.matches(candidate),
            // Evaluated against the hit matrix in `Predicate::evaluate`.
            Clause::Terms { .. } => true,
        }
    }
}

/// A compiled predicate for one search call.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    entity: &'a SearchableEntity,
    terms: TermSet,
    clauses: Vec<Clause<'a>>,
}

impl<'a> Predicate<'a> {
    /// The entity this predicate was built for.
    pub fn entity(&self) -> &'a SearchableEntity {
        self.entity
    }

    /// The folded query terms.
    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    /// The clauses in evaluation order.
    pub fn clauses(&self) -> &[Clause<'a>] {
        &self.clauses
    }

    /// Evaluate the predicate.
    ///
    /// Returns the term/field hit matrix for admitted candidates so the scorer does
    /// not have to match again, and `None` for rejected ones.
    pub fn evaluate(&self, candidate: &Candidate) -> Option<HitMatrix> {
        let mut mode = None;
        for clause in &self.clauses {
            if let Clause::Terms { mode: m } = clause {
                mode = Some(*m);
            } else if !clause.admits(candidate) {
                return None;
            }
        }

        let hits = self.terms.hits(candidate, self.entity.fields());
        let admitted = match mode {
            None => true,
            Some(MatchMode::All) => hits.matched_terms() == hits.term_count(),
            Some(MatchMode::Any) => hits.matched_terms() > 0,
        };
        admitted.then_some(hits)
    }

    /// Whether the candidate passes every clause.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        self.evaluate(candidate).is_some()
    }
}

/// Builder for [`Predicate`].
#[derive(Debug)]
pub struct PredicateBuilder<'a> {
    entity: &'a SearchableEntity,
    terms: TermSet,
    mode: MatchMode,
    filters: Option<&'a BTreeMap<String, FilterValue>>,
    scope: Option<&'a TenantScope>,
}

impl<'a> PredicateBuilder<'a> {
    /// Start a predicate for an entity. With nothing else set it admits everything.
    pub fn new(entity: &'a SearchableEntity) -> Self {
        PredicateBuilder {
            entity,
            terms: TermSet::default(),
            mode: MatchMode::All,
            filters: None,
            scope: None,
        }
    }

    /// Set the folded query terms.
    pub fn terms(mut self, terms: TermSet) -> Self {
        self.terms = terms;
        self
    }

    /// Set how terms combine.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the request's filter values.
    pub fn filters(mut self, filters: &'a BTreeMap<String, FilterValue>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Set the tenant scope.
    pub fn scope(mut self, scope: &'a TenantScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Resolve filters against the entity's registry and compile the clauses.
    ///
    /// Fails on unknown filter names. A value of the wrong shape leaves its filter
    /// unapplied.
    pub fn build(self) -> Result<Predicate<'a>> {
        let entity = self.entity;
        let mut clauses = Vec::new();

        if let Some(tenant) = self.scope.and_then(TenantScope::tenant_id) {
            match entity.tenant_attribute() {
                Some(attribute) => clauses.push(Clause::Tenant {
                    attribute,
                    tenant,
                    excluded: entity.scoped_exclusion(),
                }),
                None => trace!(entity = entity.name(), "entity has no tenancy, scope ignored"),
            }
        }

        for (name, value) in self.filters.into_iter().flatten() {
            let definition = entity
                .filters()
                .resolve(name)
                .inspect_err(|err| warn!(entity = entity.name(), filter = %name, %err, "rejected filter"))?;
            match definition.bind(value) {
                Ok(Some(bound)) => clauses.push(Clause::Filter(bound)),
                Ok(None) => trace!(entity = entity.name(), filter = %name, "filter unset"),
                Err(err) => {
                    warn!(entity = entity.name(), filter = %name, %err, "ignoring filter value")
                }
            }
        }

        if !self.terms.is_empty() {
            clauses.push(Clause::Terms { mode: self.mode });
        }

        Ok(Predicate {
            entity,
            terms: self.terms,
            clauses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::error::SearchError;
    use crate::query::matching::CasePolicy;
    use crate::query::normalizer::QueryTerms;

    fn terms(q: &str) -> TermSet {
        TermSet::new(&QueryTerms::new(q), CasePolicy::Insensitive)
    }

    fn user(id: u64, username: &str) -> Candidate {
        Candidate::builder(id)
            .text("username", username)
            .text("institution", "ufrgs")
            .build()
    }

    #[test]
    fn test_empty_predicate_admits_all() {
        let users = EntityKind::Users.definition().unwrap();
        let predicate = PredicateBuilder::new(&users).build().unwrap();
        assert!(predicate.clauses().is_empty());
        assert!(predicate.matches(&Candidate::new(1)));
    }

    #[test]
    fn test_all_terms_required() {
        let users = EntityKind::Users.definition().unwrap();
        let predicate = PredicateBuilder::new(&users)
            .terms(terms("el mag"))
            .build()
            .unwrap();

        assert!(predicate.matches(&user(1, "el-magron")));
        assert!(!predicate.matches(&user(2, "el-debilitado")));
    }

    #[test]
    fn test_any_term_suffices() {
        let users = EntityKind::Users.definition().unwrap();
        let predicate = PredicateBuilder::new(&users)
            .terms(terms("el re"))
            .match_mode(MatchMode::Any)
            .build()
            .unwrap();

        assert!(predicate.matches(&user(1, "el-magron")));
        assert!(predicate.matches(&user(2, "remembrador")));
        assert!(!predicate.matches(&user(3, "outsider")));
    }

    #[test]
    fn test_term_matches_any_field() {
        let users = EntityKind::Users.definition().unwrap();
        let predicate = PredicateBuilder::new(&users)
            .terms(terms("second"))
            .build()
            .unwrap();

        let by_email = Candidate::builder(1).text("email", "my@secondary.org").build();
        let by_name = Candidate::builder(2).text("full_name", "Second").build();
        let neither = Candidate::builder(3)
            .text("full_name", "First")
            .text("email", "first@here.com")
            .build();
        assert!(predicate.matches(&by_email));
        assert!(predicate.matches(&by_name));
        assert!(!predicate.matches(&neither));
    }

    #[test]
    fn test_tenant_scope_with_exclusion() {
        let users = EntityKind::Users.definition().unwrap();
        let scope = TenantScope::tenant("ufrgs");
        let predicate = PredicateBuilder::new(&users).scope(&scope).build().unwrap();

        assert!(predicate.matches(&user(1, "inside")));
        let other = Candidate::builder(2).text("institution", "usp").build();
        assert!(!predicate.matches(&other));
        let disabled = Candidate::builder(3)
            .text("institution", "ufrgs")
            .flag("disabled", true)
            .build();
        assert!(!predicate.matches(&disabled));
        assert!(!predicate.matches(&Candidate::new(4)));
    }

    #[test]
    fn test_scope_ignored_without_tenancy() {
        let institutions = EntityKind::Institutions.definition().unwrap();
        let scope = TenantScope::tenant("ufrgs");
        let predicate = PredicateBuilder::new(&institutions)
            .scope(&scope)
            .build()
            .unwrap();
        assert!(predicate.clauses().is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let users = EntityKind::Users.definition().unwrap();
        let mut filters = BTreeMap::new();
        filters.insert("admin".to_string(), FilterValue::Flag(false));
        filters.insert("approved".to_string(), FilterValue::Flag(true));
        let predicate = PredicateBuilder::new(&users)
            .filters(&filters)
            .build()
            .unwrap();
        assert_eq!(predicate.clauses().len(), 2);

        let approved = Candidate::builder(1).flag("approved", true).build();
        let admin = Candidate::builder(2)
            .flag("approved", true)
            .flag("superuser", true)
            .build();
        let pending = Candidate::builder(3).flag("approved", false).build();
        assert!(predicate.matches(&approved));
        assert!(!predicate.matches(&admin));
        assert!(!predicate.matches(&pending));
    }

    #[test]
    fn test_unknown_filter_is_error() {
        let spaces = EntityKind::Spaces.definition().unwrap();
        let mut filters = BTreeMap::new();
        filters.insert("can_record".to_string(), FilterValue::Flag(true));
        let err = PredicateBuilder::new(&spaces)
            .filters(&filters)
            .build()
            .unwrap_err();
        assert!(matches!(err, SearchError::UnknownFilter { .. }));
    }

    #[test]
    fn test_wrongly_shaped_value_is_unset() {
        let spaces = EntityKind::Spaces.definition().unwrap();
        let mut filters = BTreeMap::new();
        filters.insert("approved".to_string(), FilterValue::from(&["yes"][..]));
        filters.insert("tag".to_string(), FilterValue::Flag(true));
        filters.insert("disabled".to_string(), FilterValue::Text("maybe".into()));
        let predicate = PredicateBuilder::new(&spaces)
            .filters(&filters)
            .build()
            .unwrap();

        assert!(predicate.clauses().is_empty());
        assert!(predicate.matches(&Candidate::builder(1).flag("approved", false).build()));
    }

    #[test]
    fn test_clause_order() {
        let spaces = EntityKind::Spaces.definition().unwrap();
        let scope = TenantScope::tenant("ufrgs");
        let mut filters = BTreeMap::new();
        filters.insert("approved".to_string(), FilterValue::Flag(true));
        let predicate = PredicateBuilder::new(&spaces)
            .terms(terms("sec"))
            .filters(&filters)
            .scope(&scope)
            .build()
            .unwrap();

        let clauses = predicate.clauses();
        assert!(matches!(clauses[0], Clause::Tenant { .. }));
        assert!(matches!(clauses[1], Clause::Filter(_)));
        assert!(matches!(clauses[2], Clause::Terms { mode: MatchMode::All }));
    }
}
