//! Score explanations.

use serde::{Deserialize, Serialize};

use crate::entity::SearchField;
use crate::query::matching::{CasePolicy, HitMatrix, TermSet};

/// Which fields contained one query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermExplanation {
    /// The term as matched (after case folding).
    pub term: String,
    /// Names of the scored fields that contained it.
    pub fields: Vec<String>,
}

/// Breakdown of a relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreExplanation {
    /// The total score, as computed by the engine's scorer.
    pub score: u32,
    /// Whether terms and fields were compared without case folding.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Per-term contributions in query order.
    pub terms: Vec<TermExplanation>,
}

impl ScoreExplanation {
    /// Explain a candidate's hits under the `score` the scorer assigned them.
    ///
    /// The per-term breakdown lists the scored fields each term was found in; how
    /// those hits became `score` is up to the scorer.
    pub fn from_hits(
        terms: &TermSet,
        hits: &HitMatrix,
        fields: &[SearchField],
        score: u32,
    ) -> Self {
        let case_sensitive = terms.policy() == CasePolicy::Sensitive;
        let terms: Vec<TermExplanation> = terms
            .terms()
            .iter()
            .enumerate()
            .map(|(t, term)| TermExplanation {
                term: term.clone(),
                fields: hits
                    .fields_for_term(t)
                    .filter(|&f| fields[f].is_scored())
                    .map(|f| fields[f].name().to_string())
                    .collect(),
            })
            .collect();

        ScoreExplanation {
            score,
            case_sensitive,
            terms,
        }
    }

    /// One-line human readable form, e.g. `3 = second[name] + records[name, room_name]`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .terms
            .iter()
            .filter(|t| !t.fields.is_empty())
            .map(|t| format!("{}[{}]", t.term, t.fields.join(", ")))
            .collect();
        if parts.is_empty() {
            format!("{}", self.score)
        } else {
            format!("{} = {}", self.score, parts.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::query::normalizer::QueryTerms;
    use crate::scoring::{MatchCountScorer, Scorer};

    #[test]
    fn test_from_hits() {
        let fields = vec![
            SearchField::new("name"),
            SearchField::new("description"),
            SearchField::new("room_name"),
        ];
        let candidate = Candidate::builder(1)
            .text("name", "Second records created")
            .text("room_name", "Records room")
            .build();
        let terms = TermSet::new(&QueryTerms::new("Second records"), CasePolicy::Insensitive);
        let hits = terms.hits(&candidate, &fields);

        let score = MatchCountScorer::new().score(&hits, &fields);
        let explanation = ScoreExplanation::from_hits(&terms, &hits, &fields, score);
        assert_eq!(explanation.score, 3);
        assert!(!explanation.case_sensitive);
        assert_eq!(explanation.terms[0].term, "second");
        assert_eq!(explanation.terms[0].fields, vec!["name"]);
        assert_eq!(explanation.terms[1].fields, vec!["name", "room_name"]);
        assert_eq!(
            explanation.summary(),
            "3 = second[name] + records[name, room_name]"
        );
    }

    #[test]
    fn test_summary_without_matches() {
        let explanation = ScoreExplanation {
            score: 0,
            case_sensitive: false,
            terms: Vec::new(),
        };
        assert_eq!(explanation.summary(), "0");
    }

    #[test]
    fn test_score_is_taken_as_given() {
        let fields = vec![SearchField::new("name")];
        let candidate = Candidate::builder(1).text("name", "Second").build();
        let terms = TermSet::new(&QueryTerms::new("Sec"), CasePolicy::Sensitive);
        let hits = terms.hits(&candidate, &fields);

        let explanation = ScoreExplanation::from_hits(&terms, &hits, &fields, 7);
        assert_eq!(explanation.score, 7);
        assert!(explanation.case_sensitive);
        assert_eq!(explanation.summary(), "7 = Sec[name]");
    }
}
