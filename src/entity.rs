//! Searchable entity definitions.
//!
//! A [`SearchableEntity`] is the declarative wiring an entity kind hands to the
//! generic engine: which attributes are searched, which filters exist, which
//! attribute carries the tenant, and how ties in relevance are broken. The built-in
//! portal entities are available through [`EntityKind`].

pub mod institutions;
pub mod recordings;
pub mod spaces;
pub mod users;

use std::fmt;
use std::str::FromStr;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::filter::{FilterDefinition, FilterRegistry};

/// A field matched against query terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchField {
    name: String,
    attribute: String,
    scored: bool,
}

impl SearchField {
    /// A scored field reading the attribute of the same name.
    pub fn new<S: Into<String>>(attribute: S) -> Self {
        let attribute = attribute.into();
        SearchField {
            name: attribute.clone(),
            attribute,
            scored: true,
        }
    }

    /// Give the field a display name distinct from its attribute.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Exclude the field from relevance scoring; it still decides inclusion.
    pub fn unscored(mut self) -> Self {
        self.scored = false;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate attribute read by this field.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Whether matches in this field count towards the score.
    pub fn is_scored(&self) -> bool {
        self.scored
    }
}

/// Direction of the secondary sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// Secondary sort key used to break relevance ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    attribute: String,
    direction: SortDirection,
}

impl SortSpec {
    /// Sort by `attribute` ascending (alphabetical listings).
    pub fn ascending<S: Into<String>>(attribute: S) -> Self {
        SortSpec {
            attribute: attribute.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Sort by `attribute` descending (most recent first).
    pub fn descending<S: Into<String>>(attribute: S) -> Self {
        SortSpec {
            attribute: attribute.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Attribute holding the sort key.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Declarative wiring of one entity kind into the engine.
#[derive(Debug, Clone)]
pub struct SearchableEntity {
    name: String,
    fields: Vec<SearchField>,
    filters: FilterRegistry,
    tenant_attribute: Option<String>,
    scoped_exclusion: Option<String>,
    sort: SortSpec,
}

impl SearchableEntity {
    /// Start defining an entity.
    pub fn builder<S: Into<String>>(name: S) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Searchable fields in declaration order.
    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Filter registry.
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Attribute naming the tenant, or `None` for entities without tenancy.
    pub fn tenant_attribute(&self) -> Option<&str> {
        self.tenant_attribute.as_deref()
    }

    /// Flag attribute whose set candidates are hidden from tenant-scoped callers.
    pub fn scoped_exclusion(&self) -> Option<&str> {
        self.scoped_exclusion.as_deref()
    }

    /// Secondary sort.
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }
}

/// Builder for [`SearchableEntity`].
#[derive(Debug)]
pub struct EntityBuilder {
    name: String,
    fields: Vec<SearchField>,
    filters: Vec<FilterDefinition>,
    tenant_attribute: Option<String>,
    scoped_exclusion: Option<String>,
    sort: Option<SortSpec>,
}

impl EntityBuilder {
    fn new<S: Into<String>>(name: S) -> Self {
        EntityBuilder {
            name: name.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            tenant_attribute: None,
            scoped_exclusion: None,
            sort: None,
        }
    }

    /// Add a searchable field.
    pub fn field(mut self, field: SearchField) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a filter.
    pub fn filter(mut self, definition: FilterDefinition) -> Self {
        self.filters.push(definition);
        self
    }

    /// Scope this entity by the given tenant attribute.
    pub fn tenant_attribute<S: Into<String>>(mut self, attribute: S) -> Self {
        self.tenant_attribute = Some(attribute.into());
        self
    }

    /// Hide candidates with this flag set from tenant-scoped callers.
    pub fn scoped_exclusion<S: Into<String>>(mut self, attribute: S) -> Self {
        self.scoped_exclusion = Some(attribute.into());
        self
    }

    /// Set the secondary sort.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Validate the wiring and build the entity.
    pub fn build(self) -> Result<SearchableEntity> {
        if self.name.trim().is_empty() {
            return Err(SearchError::definition("entity name is empty"));
        }
        if self.fields.is_empty() {
            return Err(SearchError::definition(format!(
                "entity '{}' has no searchable fields",
                self.name
            )));
        }

        let mut seen = AHashSet::new();
        for field in &self.fields {
            if field.attribute().is_empty() {
                return Err(SearchError::definition(format!(
                    "entity '{}' has a field with no attribute",
                    self.name
                )));
            }
            if !seen.insert(field.attribute()) {
                return Err(SearchError::definition(format!(
                    "entity '{}' searches attribute '{}' twice",
                    self.name,
                    field.attribute()
                )));
            }
        }

        let sort = self.sort.ok_or_else(|| {
            SearchError::definition(format!("entity '{}' has no sort key", self.name))
        })?;
        if sort.attribute().is_empty() {
            return Err(SearchError::definition(format!(
                "entity '{}' sorts by an empty attribute",
                self.name
            )));
        }

        if self.scoped_exclusion.is_some() && self.tenant_attribute.is_none() {
            return Err(SearchError::definition(format!(
                "entity '{}' declares a scoped exclusion but is not tenant scoped",
                self.name
            )));
        }

        let mut filters = FilterRegistry::new(self.name.clone());
        for definition in self.filters {
            filters.register(definition)?;
        }

        Ok(SearchableEntity {
            name: self.name,
            fields: self.fields,
            filters,
            tenant_attribute: self.tenant_attribute,
            scoped_exclusion: self.scoped_exclusion,
            sort,
        })
    }
}

/// The entity kinds the portal searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Portal accounts.
    Users,
    /// Conference spaces.
    Spaces,
    /// Tenants themselves; not tenant scoped.
    Institutions,
    /// Recorded meetings.
    Recordings,
}

impl EntityKind {
    /// All built-in kinds.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Spaces,
        EntityKind::Institutions,
        EntityKind::Recordings,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Spaces => "spaces",
            EntityKind::Institutions => "institutions",
            EntityKind::Recordings => "recordings",
        }
    }

    /// The entity definition for this kind.
    pub fn definition(&self) -> Result<SearchableEntity> {
        match self {
            EntityKind::Users => users::definition(),
            EntityKind::Spaces => spaces::definition(),
            EntityKind::Institutions => institutions::definition(),
            EntityKind::Recordings => recordings::definition(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SearchError::unknown_entity(s))
    }
}
