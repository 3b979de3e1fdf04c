//! Query side of the engine: term normalization, term matching and predicates.

pub mod matching;
pub mod normalizer;
pub mod predicate;

use serde::{Deserialize, Serialize};

pub use self::matching::{CasePolicy, TermSet};
pub use self::normalizer::{QueryTerms, Terms};
pub use self::predicate::{Clause, Predicate, PredicateBuilder};

/// How multiple query terms combine when deciding whether a candidate is included.
///
/// Scoring is identical in both modes; only inclusion differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every term must match at least one searchable field.
    #[default]
    All,
    /// At least one term must match at least one searchable field.
    Any,
}
