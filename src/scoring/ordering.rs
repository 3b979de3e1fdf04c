//! Total ordering of ranked results.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::AttributeValue;
use crate::entity::SortDirection;
use crate::scoring::RankedResult;

/// A candidate's secondary sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SortValue {
    /// The candidate has no value for the sort attribute. Always ordered last.
    Missing,
    /// `false` orders before `true`.
    Flag(bool),
    /// Numeric order.
    Integer(i64),
    /// Chronological order.
    Time(DateTime<Utc>),
    /// Case-insensitive order, ties broken by the raw text.
    Text(String),
}

impl SortValue {
    /// Project an attribute into a sort key. Lists sort by their first element.
    pub fn from_attribute(value: Option<&AttributeValue>) -> Self {
        match value {
            None => SortValue::Missing,
            Some(AttributeValue::Text(s)) => SortValue::Text(s.clone()),
            Some(AttributeValue::Flag(b)) => SortValue::Flag(*b),
            Some(AttributeValue::Integer(i)) => SortValue::Integer(*i),
            Some(AttributeValue::Time(t)) => SortValue::Time(*t),
            Some(AttributeValue::List(items)) => items
                .first()
                .map_or(SortValue::Missing, |s| SortValue::Text(s.clone())),
        }
    }

    /// Whether the key is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Flag(_) => 1,
            SortValue::Integer(_) => 2,
            SortValue::Time(_) => 3,
            SortValue::Text(_) => 4,
        }
    }

    /// Compare two present keys in ascending order.
    ///
    /// Text compares case-insensitively first and falls back to the raw bytes, so
    /// "alice" and "Alice" are adjacent but still strictly ordered.
    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Flag(a), SortValue::Flag(b)) => a.cmp(b),
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => {
                let folded = a
                    .chars()
                    .flat_map(char::to_lowercase)
                    .cmp(b.chars().flat_map(char::to_lowercase));
                folded.then_with(|| a.cmp(b))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Compare two keys in `direction`. Missing keys go last either way.
    pub fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match direction {
                SortDirection::Ascending => self.cmp_present(other),
                SortDirection::Descending => other.cmp_present(self),
            },
        }
    }
}

/// Order two results: score descending, then sort key in `direction`, then id
/// ascending.
pub fn compare_ranked(a: &RankedResult, b: &RankedResult, direction: SortDirection) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.sort_key.compare(&b.sort_key, direction))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort results in place. Ids are unique, so the order is total and an unstable
/// sort gives the same result as a stable one.
pub fn sort_ranked(results: &mut [RankedResult], direction: SortDirection, parallel: bool) {
    if parallel {
        results.par_sort_unstable_by(|a, b| compare_ranked(a, b, direction));
    } else {
        results.sort_unstable_by(|a, b| compare_ranked(a, b, direction));
    }
}
