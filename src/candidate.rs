//! Candidate records.
//!
//! A [`Candidate`] is the minimal read-only projection of a stored record that the
//! engine needs: an identifier and the named attribute values used for tenant
//! scoping, matching, filtering and secondary ordering. Full entities are never
//! materialized here.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored record.
pub type CandidateId = u64;

/// A single attribute value on a candidate.
///
/// An attribute that is not present on the candidate at all is "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Free text (names, usernames, descriptions).
    Text(String),
    /// Boolean attribute.
    Flag(bool),
    /// Multi-valued text attribute (tags, login methods).
    List(Vec<String>),
    /// Point in time.
    Time(DateTime<Utc>),
    /// Integer attribute.
    Integer(i64),
}

impl AttributeValue {
    /// The value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The value as a flag, if it is a flag value.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a list, if it is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The searchable strings carried by this value.
    ///
    /// Text yields itself, a list yields each element, other kinds yield nothing.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            AttributeValue::Text(s) => std::slice::from_ref(s),
            AttributeValue::List(items) => items.as_slice(),
            _ => &[],
        };
        slice.iter().map(String::as_str)
    }
}

/// A read-only snapshot of a record, valid for one search call.
#[derive(Debug, Clone)]
pub struct Candidate {
    id: CandidateId,
    attributes: AHashMap<String, AttributeValue>,
}

impl Candidate {
    /// Create a candidate with no attributes.
    pub fn new(id: CandidateId) -> Self {
        Candidate {
            id,
            attributes: AHashMap::new(),
        }
    }

    /// Start building a candidate.
    pub fn builder(id: CandidateId) -> CandidateBuilder {
        CandidateBuilder {
            candidate: Candidate::new(id),
        }
    }

    /// The record identifier.
    pub fn id(&self) -> CandidateId {
        self.id
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Set an attribute value, replacing any previous one.
    pub fn set_attribute<S: Into<String>>(&mut self, name: S, value: AttributeValue) {
        self.attributes.insert(name.into(), value);
    }

    /// Flag attribute, `None` when unset or not a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(AttributeValue::as_flag)
    }

    /// Text attribute, `None` when unset or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_text)
    }

    /// Number of attributes carried.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the candidate carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Fluent builder for [`Candidate`].
#[derive(Debug)]
pub struct CandidateBuilder {
    candidate: Candidate,
}

impl CandidateBuilder {
    /// Add a text attribute.
    pub fn text<S: Into<String>, T: Into<String>>(mut self, name: S, value: T) -> Self {
        self.candidate
            .set_attribute(name, AttributeValue::Text(value.into()));
        self
    }

    /// Add a flag attribute.
    pub fn flag<S: Into<String>>(mut self, name: S, value: bool) -> Self {
        self.candidate.set_attribute(name, AttributeValue::Flag(value));
        self
    }

    /// Add a list attribute.
    pub fn list<S, I, T>(mut self, name: S, values: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.candidate
            .set_attribute(name, AttributeValue::List(values));
        self
    }

    /// Add a time attribute.
    pub fn time<S: Into<String>>(mut self, name: S, value: DateTime<Utc>) -> Self {
        self.candidate.set_attribute(name, AttributeValue::Time(value));
        self
    }

    /// Add an integer attribute.
    pub fn integer<S: Into<String>>(mut self, name: S, value: i64) -> Self {
        self.candidate
            .set_attribute(name, AttributeValue::Integer(value));
        self
    }

    /// Finish building.
    pub fn build(self) -> Candidate {
        self.candidate
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_builder() {
        let started = Utc.with_ymd_and_hms(2015, 3, 1, 10, 0, 0).unwrap();
        let candidate = Candidate::builder(7)
            .text("institution", "rnp")
            .text("name", "Weekly sync")
            .flag("published", true)
            .list("tags", ["one tag", "tag"])
            .time("start_time", started)
            .integer("size", 42)
            .build();

        assert_eq!(candidate.id(), 7);
        assert_eq!(candidate.len(), 6);
        assert_eq!(candidate.text("institution"), Some("rnp"));
        assert_eq!(
            candidate.attribute("name").and_then(AttributeValue::as_text),
            Some("Weekly sync")
        );
        assert_eq!(candidate.flag("published"), Some(true));
        assert_eq!(candidate.flag("available"), None);
        assert_eq!(
            candidate.attribute("start_time"),
            Some(&AttributeValue::Time(started))
        );
    }

    #[test]
    fn test_flag_of_other_kind_is_unset() {
        let candidate = Candidate::builder(1).text("disabled", "yes").build();
        assert_eq!(candidate.flag("disabled"), None);
    }

    #[test]
    fn test_texts() {
        let text = AttributeValue::Text("abc".to_string());
        assert_eq!(text.texts().collect::<Vec<_>>(), vec!["abc"]);

        let list = AttributeValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["a", "b"]);

        assert_eq!(AttributeValue::Flag(true).texts().count(), 0);
        assert_eq!(AttributeValue::Integer(3).texts().count(), 0);
    }

    #[test]
    fn test_attribute_value_serde() {
        let value = AttributeValue::Flag(false);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"flag","value":false}"#);
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
