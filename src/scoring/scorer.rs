//! Scorers turning term/field hits into a relevance score.

use std::fmt::Debug;

use crate::entity::SearchField;
use crate::query::matching::HitMatrix;

/// Trait for relevance scorers.
pub trait Scorer: Send + Sync + Debug {
    /// Score a candidate from its hit matrix over `fields`.
    fn score(&self, hits: &HitMatrix, fields: &[SearchField]) -> u32;

    /// Scorer name, for logs.
    fn name(&self) -> &'static str;
}

/// Counts every (term, scored field) pair where the field contains the term.
///
/// A term found in three fields therefore outweighs two terms found in one field
/// each.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchCountScorer;

impl MatchCountScorer {
    /// Create a new scorer.
    pub fn new() -> Self {
        MatchCountScorer
    }
}

impl Scorer for MatchCountScorer {
    fn score(&self, hits: &HitMatrix, fields: &[SearchField]) -> u32 {
        let mut score = 0;
        for term in 0..hits.term_count() {
            score += hits
                .fields_for_term(term)
                .filter(|&f| fields[f].is_scored())
                .count() as u32;
        }
        score
    }

    fn name(&self) -> &'static str {
        "match_count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::query::matching::{CasePolicy, TermSet};
    use crate::query::normalizer::QueryTerms;

    fn recording_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("name"),
            SearchField::new("description"),
            SearchField::new("recordid"),
            SearchField::new("room_name"),
        ]
    }

    fn score(query: &str, candidate: &Candidate, fields: &[SearchField]) -> u32 {
        let terms = TermSet::new(&QueryTerms::new(query), CasePolicy::Insensitive);
        MatchCountScorer::new().score(&terms.hits(candidate, fields), fields)
    }

    #[test]
    fn test_counts_term_field_pairs() {
        let fields = recording_fields();
        let both = Candidate::builder(1)
            .text("name", "Second records created")
            .text("room_name", "records room")
            .build();
        let one = Candidate::builder(2).text("name", "First records created").build();

        assert_eq!(score("second records", &both, &fields), 3);
        assert_eq!(score("second records", &one, &fields), 1);
    }

    #[test]
    fn test_one_term_many_fields_beats_two_terms_one_field() {
        let fields = recording_fields();
        let wide = Candidate::builder(1)
            .text("name", "alpha")
            .text("description", "alpha")
            .text("room_name", "alpha")
            .build();
        let narrow = Candidate::builder(2)
            .text("name", "alpha")
            .text("description", "beta")
            .build();

        assert_eq!(score("alpha beta", &wide, &fields), 3);
        assert_eq!(score("alpha beta", &narrow, &fields), 2);
    }

    #[test]
    fn test_unscored_fields_ignored() {
        let fields = vec![SearchField::new("name"), SearchField::new("email").unscored()];
        let candidate = Candidate::builder(1)
            .text("name", "second")
            .text("email", "second@there.com")
            .build();
        assert_eq!(score("second", &candidate, &fields), 1);
    }

    #[test]
    fn test_no_terms_scores_zero() {
        let fields = recording_fields();
        let candidate = Candidate::builder(1).text("name", "anything").build();
        assert_eq!(score("   ", &candidate, &fields), 0);
        assert_eq!(MatchCountScorer.name(), "match_count");
    }
}
