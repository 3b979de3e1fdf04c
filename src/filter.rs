//! Attribute filters.
//!
//! Each entity registers a finite set of named filters in a [`FilterRegistry`].
//! A request supplies values for some of them; every supplied filter must hold for a
//! candidate to be included (filters are conjunctive).
//!
//! Three kinds exist:
//!
//! - [`FilterKind::TriState`]: `true` selects candidates whose flag is set to true;
//!   `false` selects candidates whose flag is false *or unset*.
//! - [`FilterKind::AllOf`]: the candidate's list attribute must contain every
//!   requested value (tags).
//! - [`FilterKind::AnyOf`]: the candidate's attribute must equal one of the requested
//!   values (membership in a set of institutions).

pub mod registry;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::candidate::Candidate;
use crate::error::{Result, SearchError};

pub use self::registry::FilterRegistry;

/// The shape and semantics of a registered filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Boolean attribute where unset counts as false.
    TriState,
    /// List attribute that must contain every requested value.
    AllOf,
    /// Attribute that must equal one of the requested values.
    AnyOf,
}

impl FilterKind {
    /// Human readable description of the value this kind expects.
    pub fn expected(&self) -> &'static str {
        match self {
            FilterKind::TriState => "a boolean value",
            FilterKind::AllOf | FilterKind::AnyOf => "a list of values",
        }
    }
}

/// A value supplied for a filter in a request.
///
/// Deserialization never fails on a well-formed document: strings are kept raw
/// and parsed against the filter kind at bind time, and anything else that is not
/// a boolean or a list of strings becomes [`FilterValue::Unset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Value for a tri-state filter.
    Flag(bool),
    /// Values for a list filter.
    Values(Vec<String>),
    /// A raw parameter, parsed the same way as a query string value.
    Text(String),
    /// The filter is not applied.
    Unset,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFilterValue {
    Flag(bool),
    Values(Vec<String>),
    Text(String),
    Integer(i64),
    Other(IgnoredAny),
}

impl From<RawFilterValue> for FilterValue {
    fn from(raw: RawFilterValue) -> Self {
        match raw {
            RawFilterValue::Flag(flag) => FilterValue::Flag(flag),
            RawFilterValue::Values(values) => FilterValue::Values(values),
            RawFilterValue::Text(text) => FilterValue::Text(text),
            RawFilterValue::Integer(1) => FilterValue::Flag(true),
            RawFilterValue::Integer(0) => FilterValue::Flag(false),
            RawFilterValue::Integer(_) | RawFilterValue::Other(_) => FilterValue::Unset,
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawFilterValue::deserialize(deserializer).map(FilterValue::from)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Values(values)
    }
}

impl From<&[&str]> for FilterValue {
    fn from(values: &[&str]) -> Self {
        FilterValue::Values(values.iter().map(|v| v.to_string()).collect())
    }
}

/// A named filter bound to the candidate attribute it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    name: String,
    attribute: String,
    kind: FilterKind,
}

impl FilterDefinition {
    /// Create a filter definition.
    pub fn new<N: Into<String>, A: Into<String>>(name: N, attribute: A, kind: FilterKind) -> Self {
        FilterDefinition {
            name: name.into(),
            attribute: attribute.into(),
            kind,
        }
    }

    /// A tri-state filter whose name is also its attribute.
    pub fn tri_state<N: Into<String>>(name: N) -> Self {
        let name = name.into();
        FilterDefinition::new(name.clone(), name, FilterKind::TriState)
    }

    /// The request-facing filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The candidate attribute read by this filter.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The filter kind.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Parse a raw request parameter into a value.
    ///
    /// Returns `None` when the parameter means "not applied": anything other than a
    /// recognizable boolean for tri-state filters, or an empty list.
    pub fn parse_param(&self, raw: &str) -> Option<FilterValue> {
        match self.kind {
            FilterKind::TriState => parse_flag(raw).map(FilterValue::Flag),
            FilterKind::AllOf | FilterKind::AnyOf => {
                let values: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect();
                (!values.is_empty()).then_some(FilterValue::Values(values))
            }
        }
    }

    /// Bind a request value to this definition.
    ///
    /// Returns `Ok(None)` when the value leaves the filter unapplied: [`FilterValue::Unset`],
    /// an empty list, or raw text [`parse_param`](Self::parse_param) does not accept.
    /// A flag given to a list filter, or a list given to a tri-state filter, is a
    /// [`SearchError::FilterValueMismatch`].
    pub fn bind(&self, value: &FilterValue) -> Result<Option<BoundFilter<'_>>> {
        let value = match (self.kind, value) {
            (_, FilterValue::Unset) => return Ok(None),
            (_, FilterValue::Text(raw)) => match self.parse_param(raw) {
                Some(parsed) => parsed,
                None => return Ok(None),
            },
            (FilterKind::AllOf | FilterKind::AnyOf, FilterValue::Values(values))
                if values.is_empty() =>
            {
                return Ok(None);
            }
            (FilterKind::TriState, FilterValue::Flag(_))
            | (FilterKind::AllOf | FilterKind::AnyOf, FilterValue::Values(_)) => value.clone(),
            _ => {
                return Err(SearchError::filter_value_mismatch(
                    &self.name,
                    self.kind.expected(),
                ));
            }
        };
        Ok(Some(BoundFilter {
            definition: self,
            value,
        }))
    }
}

/// A filter definition together with the value a request supplied for it.
#[derive(Debug, Clone)]
pub struct BoundFilter<'a> {
    definition: &'a FilterDefinition,
    value: FilterValue,
}

impl<'a> BoundFilter<'a> {
    /// The filter definition.
    pub fn definition(&self) -> &'a FilterDefinition {
        self.definition
    }

    /// The value the filter tests for.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Evaluate the filter against a candidate.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let attribute = self.definition.attribute();
        match (self.definition.kind, &self.value) {
            (FilterKind::TriState, FilterValue::Flag(wanted)) => {
                let is_true = candidate.flag(attribute) == Some(true);
                is_true == *wanted
            }
            (FilterKind::AllOf, FilterValue::Values(wanted)) => {
                let Some(value) = candidate.attribute(attribute) else {
                    return false;
                };
                wanted.iter().all(|w| {
                    value
                        .texts()
                        .any(|have| have.trim().eq_ignore_ascii_case(w.trim()))
                })
            }
            (FilterKind::AnyOf, FilterValue::Values(wanted)) => {
                let Some(value) = candidate.attribute(attribute) else {
                    return false;
                };
                value.texts().any(|have| wanted.iter().any(|w| w == have))
            }
            // `bind` only produces the pairings above.
            _ => false,
        }
    }
}

/// Parse a raw boolean parameter.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
