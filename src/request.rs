//! Search requests.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::entity::SearchableEntity;
use crate::error::Result;
use crate::filter::FilterValue;
use crate::query::MatchMode;
use crate::scope::TenantScope;

/// One search call: constructed per call, consumed, discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Raw query string; blank or absent matches everything.
    pub query: Option<String>,
    /// Filter name to value. Names must be registered by the entity.
    pub filters: BTreeMap<String, FilterValue>,
    /// Tenant scope resolved by the authorization collaborator.
    pub scope: TenantScope,
    /// Requested page, 1-based. Values below 1 are treated as 1.
    #[serde(deserialize_with = "deserialize_page")]
    pub page: usize,
    /// Requested page size; `None` uses the engine default.
    #[serde(deserialize_with = "deserialize_page_size")]
    pub page_size: Option<usize>,
    /// Overrides the engine's term match mode.
    pub match_mode: Option<MatchMode>,
    /// Attach score explanations to results.
    pub explain: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchRequest {
            query: None,
            filters: BTreeMap::new(),
            scope: TenantScope::Global,
            page: 1,
            page_size: None,
            match_mode: None,
            explain: false,
        }
    }
}

impl SearchRequest {
    /// A request for the first page of everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from raw key/value parameters.
    ///
    /// Recognized keys are `q`, `page`, `per_page` and every filter the entity
    /// registers. Unparseable page numbers fall back to the first page, unparseable
    /// page sizes to the default, and unparseable filter values leave the filter
    /// unset. Any other key is a configuration error; use
    /// [`from_params_ignoring`](Self::from_params_ignoring) when the parameters also
    /// carry keys meant for someone else.
    pub fn from_params<I, K, V>(entity: &SearchableEntity, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_params_ignoring(entity, params, &[])
    }

    /// Like [`from_params`](Self::from_params), skipping every key in `ignored`.
    ///
    /// ```
    /// use admin_search::entity::EntityKind;
    /// use admin_search::request::SearchRequest;
    ///
    /// let spaces = EntityKind::Spaces.definition().unwrap();
    /// let params = [("q", "second"), ("partial", "true")];
    /// let request = SearchRequest::from_params_ignoring(&spaces, params, &["partial"]).unwrap();
    /// assert_eq!(request.query.as_deref(), Some("second"));
    /// ```
    pub fn from_params_ignoring<I, K, V>(
        entity: &SearchableEntity,
        params: I,
        ignored: &[&str],
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = SearchRequest::new();
        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "q" => request.query = Some(value.to_string()),
                "page" => request.page = parse_page(value).unwrap_or(1),
                "per_page" => request.page_size = parse_page(value),
                name if ignored.contains(&name) => {
                    trace!(entity = entity.name(), param = name, "ignored parameter")
                }
                name => {
                    if let Some(parsed) = entity.filters().parse_param(name, value)? {
                        request.filters.insert(name.to_string(), parsed);
                    }
                }
            }
        }
        Ok(request)
    }

    /// Decode a request from a JSON body. Missing keys take their defaults.
    ///
    /// Out-of-range or unparseable `page` and `page_size` values fall back the same
    /// way [`from_params`](Self::from_params) does, and filter values that fit no
    /// [`FilterValue`] shape leave their filter unset. Only a document that is not
    /// valid JSON, or whose other keys have the wrong type, is an error.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Set the query string.
    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set a filter value.
    pub fn filter<S: Into<String>, V: Into<FilterValue>>(mut self, name: S, value: V) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Set the tenant scope.
    pub fn scope(mut self, scope: TenantScope) -> Self {
        self.scope = scope;
        self
    }

    /// Restrict the request to one tenant.
    pub fn tenant<S: Into<String>>(mut self, tenant: S) -> Self {
        self.scope = TenantScope::tenant(tenant);
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Override the term match mode.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    /// Request score explanations.
    pub fn explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}

/// Parse a positive page number or size.
fn parse_page(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Integer(i64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    fn positive(&self) -> Option<usize> {
        match self {
            RawNumber::Integer(n) => usize::try_from(*n).ok().filter(|n| *n > 0),
            RawNumber::Text(raw) => parse_page(raw),
            RawNumber::Other(_) => None,
        }
    }
}

fn deserialize_page<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.positive().unwrap_or(1))
}

fn deserialize_page_size<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumber::deserialize(deserializer)?.positive())
}
