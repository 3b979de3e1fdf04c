//! Institution lookup by name or acronym.

use crate::entity::{SearchField, SearchableEntity, SortSpec};
use crate::error::Result;

/// Full institution name.
pub const NAME: &str = "name";
/// Short name, e.g. `UFRGS`.
pub const ACRONYM: &str = "acronym";

/// Build the institutions entity. Institutions are not tenant scoped.
pub fn definition() -> Result<SearchableEntity> {
    SearchableEntity::builder("institutions")
        .field(SearchField::new(NAME))
        .field(SearchField::new(ACRONYM))
        .sort(SortSpec::ascending(NAME))
        .build()
}
