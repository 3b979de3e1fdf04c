//! Per-entity registry of named filters.

use ahash::AHashMap;

use crate::error::{Result, SearchError};
use crate::filter::{FilterDefinition, FilterValue};

/// The finite set of filters an entity accepts.
///
/// Lookups of unregistered names fail with [`SearchError::UnknownFilter`]; they are
/// never silently ignored.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    entity: String,
    definitions: Vec<FilterDefinition>,
    by_name: AHashMap<String, usize>,
}

impl FilterRegistry {
    /// Create an empty registry for an entity.
    pub fn new<S: Into<String>>(entity: S) -> Self {
        FilterRegistry {
            entity: entity.into(),
            definitions: Vec::new(),
            by_name: AHashMap::new(),
        }
    }

    /// Register a filter. Duplicate names are a definition error.
    pub fn register(&mut self, definition: FilterDefinition) -> Result<()> {
        if self.by_name.contains_key(definition.name()) {
            return Err(SearchError::definition(format!(
                "filter '{}' registered twice for entity '{}'",
                definition.name(),
                self.entity
            )));
        }
        self.by_name
            .insert(definition.name().to_string(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<&FilterDefinition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    /// Look up a filter by name, failing for unregistered names.
    pub fn resolve(&self, name: &str) -> Result<&FilterDefinition> {
        self.get(name)
            .ok_or_else(|| SearchError::unknown_filter(&self.entity, name))
    }

    /// Parse a raw request parameter for the named filter.
    ///
    /// `Ok(None)` means the parameter does not constrain anything.
    pub fn parse_param(&self, name: &str, raw: &str) -> Result<Option<FilterValue>> {
        Ok(self.resolve(name)?.parse_param(raw))
    }

    /// Whether the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered definitions in registration order.
    pub fn definitions(&self) -> &[FilterDefinition] {
        &self.definitions
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(FilterDefinition::name)
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no filters are registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The entity this registry belongs to.
    pub fn entity(&self) -> &str {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKind;

    fn registry() -> FilterRegistry {
        let mut registry = FilterRegistry::new("spaces");
        registry
            .register(FilterDefinition::tri_state("approved"))
            .unwrap();
        registry
            .register(FilterDefinition::new("tag", "tags", FilterKind::AllOf))
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["approved", "tag"]);
        assert_eq!(registry.resolve("tag").unwrap().attribute(), "tags");
        assert!(registry.contains("approved"));
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let registry = registry();
        let err = registry.resolve("colour").unwrap_err();
        match err {
            SearchError::UnknownFilter { entity, filter } => {
                assert_eq!(entity, "spaces");
                assert_eq!(filter, "colour");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(registry.parse_param("colour", "true").is_err());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = registry();
        let err = registry
            .register(FilterDefinition::tri_state("approved"))
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidDefinition(_)));
    }

    #[test]
    fn test_parse_param() {
        let registry = registry();
        assert_eq!(
            registry.parse_param("approved", "true").unwrap(),
            Some(FilterValue::Flag(true))
        );
        assert_eq!(registry.parse_param("approved", "whatever").unwrap(), None);
    }
}
