//! Recording search over the recording and the room it was made in.

use crate::entity::{SearchField, SearchableEntity, SortSpec};
use crate::error::Result;
use crate::filter::{FilterDefinition, FilterKind};

/// Recording title.
pub const NAME: &str = "name";
/// Free text description.
pub const DESCRIPTION: &str = "description";
/// Identifier assigned by the recording server.
pub const RECORD_ID: &str = "recordid";
/// Name of the room the recording belongs to.
pub const ROOM_NAME: &str = "room_name";
/// Institution owning the room (through its space or user).
pub const INSTITUTION: &str = "institution";
/// When the meeting started; the listing sort key.
pub const START_TIME: &str = "start_time";
/// Published on the recording server.
pub const PUBLISHED: &str = "published";
/// Still present on the recording server.
pub const AVAILABLE: &str = "available";
/// Whether at least one playback format exists.
pub const HAS_PLAYBACK: &str = "has_playback";

/// Build the recordings entity, most recent first.
pub fn definition() -> Result<SearchableEntity> {
    SearchableEntity::builder("recordings")
        .field(SearchField::new(NAME))
        .field(SearchField::new(DESCRIPTION))
        .field(SearchField::new(RECORD_ID))
        .field(SearchField::new(ROOM_NAME))
        .filter(FilterDefinition::tri_state(PUBLISHED))
        .filter(FilterDefinition::tri_state(AVAILABLE))
        .filter(FilterDefinition::new("playback", HAS_PLAYBACK, FilterKind::TriState))
        .tenant_attribute(INSTITUTION)
        .sort(SortSpec::descending(START_TIME))
        .build()
}
