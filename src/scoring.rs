//! Relevance scoring and deterministic ordering.
//!
//! The relevance score of a candidate is the number of (term, field) pairs where
//! the field contains the term. Results are ordered by score descending, then by the
//! entity's secondary sort key, then by candidate id, which makes the order total.

pub mod explanation;
pub mod ordering;
pub mod scorer;

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateId;

pub use self::explanation::{ScoreExplanation, TermExplanation};
pub use self::ordering::{SortValue, compare_ranked, sort_ranked};
pub use self::scorer::{MatchCountScorer, Scorer};

/// A candidate that passed the predicate, with its score and tie-break key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Record identifier.
    pub id: CandidateId,
    /// Relevance score; 0 when the query had no terms.
    pub score: u32,
    /// Secondary sort key.
    pub sort_key: SortValue,
    /// Score breakdown, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ScoreExplanation>,
}

impl RankedResult {
    /// Create a result without an explanation.
    pub fn new(id: CandidateId, score: u32, sort_key: SortValue) -> Self {
        RankedResult {
            id,
            score,
            sort_key,
            explanation: None,
        }
    }

    /// Attach an explanation.
    pub fn with_explanation(mut self, explanation: ScoreExplanation) -> Self {
        self.explanation = Some(explanation);
        self
    }
}
