//! Query normalization.
//!
//! Splits a raw query string into terms on runs of whitespace. No case folding and
//! no stemming happen here; the case policy is applied once per call by
//! [`crate::query::TermSet`].

use std::iter::FusedIterator;
use std::str::SplitWhitespace;

/// The terms of a raw query string.
///
/// This is a view over the borrowed input: iterating is lazy and can be restarted
/// any number of times without side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryTerms<'a> {
    raw: &'a str,
}

impl<'a> QueryTerms<'a> {
    /// Terms of a raw string.
    pub fn new(raw: &'a str) -> Self {
        QueryTerms { raw }
    }

    /// Terms of an optional raw string; `None` yields no terms.
    pub fn parse(raw: Option<&'a str>) -> Self {
        QueryTerms::new(raw.unwrap_or_default())
    }

    /// Iterate over the terms.
    pub fn iter(&self) -> Terms<'a> {
        Terms {
            inner: self.raw.split_whitespace(),
        }
    }

    /// Whether the query has no terms (absent or blank input).
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &QueryTerms<'a> {
    type Item = &'a str;
    type IntoIter = Terms<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over normalized query terms.
#[derive(Debug, Clone)]
pub struct Terms<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Iterator for Terms<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl FusedIterator for Terms<'_> {}
