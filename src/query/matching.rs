//! Substring matching of query terms against candidate fields.
//!
//! Both the predicate (inclusion) and the scorer (ranking) go through [`TermSet`],
//! so a single call always applies one case policy to every term and every field.

use std::borrow::Cow;

use crate::candidate::Candidate;
use crate::entity::SearchField;
use crate::query::normalizer::QueryTerms;

/// Case policy applied to terms and field values within one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasePolicy {
    /// Compare bytes as given.
    Sensitive,
    /// Compare after lowercasing both sides.
    #[default]
    Insensitive,
}

impl CasePolicy {
    /// Policy for a `case_sensitive` configuration flag.
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            CasePolicy::Sensitive
        } else {
            CasePolicy::Insensitive
        }
    }

    /// Fold a string according to this policy.
    pub fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            CasePolicy::Sensitive => Cow::Borrowed(text),
            CasePolicy::Insensitive => Cow::Owned(text.to_lowercase()),
        }
    }
}

/// The query terms of one call, folded once under the call's case policy.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<String>,
    policy: CasePolicy,
}

impl TermSet {
    /// Fold the terms of a query.
    pub fn new(terms: &QueryTerms<'_>, policy: CasePolicy) -> Self {
        TermSet {
            terms: terms.iter().map(|t| policy.fold(t).into_owned()).collect(),
            policy,
        }
    }

    /// The folded terms in query order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The case policy in effect.
    pub fn policy(&self) -> CasePolicy {
        self.policy
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute which fields of `candidate` contain which terms.
    ///
    /// Each field value is folded once; absent fields and non-text values match nothing.
    pub fn hits(&self, candidate: &Candidate, fields: &[SearchField]) -> HitMatrix {
        let mut matrix = HitMatrix::new(self.terms.len(), fields.len());
        if self.terms.is_empty() {
            return matrix;
        }

        for (f, field) in fields.iter().enumerate() {
            let Some(value) = candidate.attribute(field.attribute()) else {
                continue;
            };
            let folded: Vec<Cow<'_, str>> = value.texts().map(|t| self.policy.fold(t)).collect();
            if folded.is_empty() {
                continue;
            }
            for (t, term) in self.terms.iter().enumerate() {
                if folded.iter().any(|text| text.contains(term.as_str())) {
                    matrix.set(t, f);
                }
            }
        }

        matrix
    }
}

/// Term-by-field containment for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitMatrix {
    terms: usize,
    fields: usize,
    cells: Vec<bool>,
}

impl HitMatrix {
    fn new(terms: usize, fields: usize) -> Self {
        HitMatrix {
            terms,
            fields,
            cells: vec![false; terms * fields],
        }
    }

    fn set(&mut self, term: usize, field: usize) {
        self.cells[term * self.fields + field] = true;
    }

    /// Whether field `field` contains term `term`.
    pub fn get(&self, term: usize, field: usize) -> bool {
        self.cells[term * self.fields + field]
    }

    /// Whether term `term` is contained in at least one field.
    pub fn term_matched(&self, term: usize) -> bool {
        (0..self.fields).any(|f| self.get(term, f))
    }

    /// Number of terms contained in at least one field.
    pub fn matched_terms(&self) -> usize {
        (0..self.terms).filter(|&t| self.term_matched(t)).count()
    }

    /// Indices of the fields that contain term `term`.
    pub fn fields_for_term(&self, term: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.fields).filter(move |&f| self.get(term, f))
    }

    /// Number of terms.
    pub fn term_count(&self) -> usize {
        self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<SearchField> {
        vec![
            SearchField::new("name"),
            SearchField::new("description"),
            SearchField::new("tags"),
        ]
    }

    #[test]
    fn test_case_policy_fold() {
        assert_eq!(CasePolicy::Insensitive.fold("ABBA"), "abba");
        assert_eq!(CasePolicy::Sensitive.fold("ABBA"), "ABBA");
        assert_eq!(CasePolicy::from_case_sensitive(true), CasePolicy::Sensitive);
        assert_eq!(CasePolicy::default(), CasePolicy::Insensitive);
    }

    #[test]
    fn test_hits_substring_insensitive() {
        let candidate = Candidate::builder(1)
            .text("name", "Never Say Abba")
            .text("description", "tribute band")
            .list("tags", ["music", "abbey road"])
            .build();
        let terms = TermSet::new(&QueryTerms::new("ABB band"), CasePolicy::Insensitive);
        let hits = terms.hits(&candidate, &fields());

        assert!(hits.get(0, 0));
        assert!(!hits.get(0, 1));
        assert!(hits.get(0, 2));
        assert!(hits.get(1, 1));
        assert_eq!(hits.fields_for_term(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(hits.matched_terms(), 2);
    }

    #[test]
    fn test_hits_case_sensitive() {
        let candidate = Candidate::builder(1).text("name", "Never Say Abba").build();
        let terms = TermSet::new(&QueryTerms::new("ABBA Abba"), CasePolicy::Sensitive);
        let hits = terms.hits(&candidate, &fields());

        assert!(!hits.term_matched(0));
        assert!(hits.term_matched(1));
    }

    #[test]
    fn test_absent_and_non_text_fields_never_match() {
        let candidate = Candidate::builder(1).flag("description", true).build();
        let terms = TermSet::new(&QueryTerms::new("true"), CasePolicy::Insensitive);
        let hits = terms.hits(&candidate, &fields());
        assert_eq!(hits.matched_terms(), 0);
    }

    #[test]
    fn test_no_terms() {
        let candidate = Candidate::builder(1).text("name", "anything").build();
        let terms = TermSet::new(&QueryTerms::parse(None), CasePolicy::Insensitive);
        assert!(terms.is_empty());
        assert_eq!(terms.hits(&candidate, &fields()).term_count(), 0);
    }
}
