//! Space listing: name search, approval state and tag filters.

use crate::entity::{SearchField, SearchableEntity, SortSpec};
use crate::error::Result;
use crate::filter::{FilterDefinition, FilterKind};

/// Space name; searched and sorted on.
pub const NAME: &str = "name";
/// Tag list read by the `tag` filter.
pub const TAGS: &str = "tags";
/// Owning institution; the tenant attribute.
pub const INSTITUTION: &str = "institution";
/// Approved by an administrator.
pub const APPROVED: &str = "approved";
/// Disabled spaces are hidden from scoped searches.
pub const DISABLED: &str = "disabled";

/// Build the spaces entity.
pub fn definition() -> Result<SearchableEntity> {
    SearchableEntity::builder("spaces")
        .field(SearchField::new(NAME))
        .filter(FilterDefinition::tri_state(APPROVED))
        .filter(FilterDefinition::tri_state(DISABLED))
        .filter(FilterDefinition::new("tag", TAGS, FilterKind::AllOf))
        .tenant_attribute(INSTITUTION)
        .scoped_exclusion(DISABLED)
        .sort(SortSpec::ascending(NAME))
        .build()
}
