//! # Admin Search
//!
//! Weighted multi-field search, filtering and ranking for the administrative
//! listings of a webconferencing portal: users, spaces, institutions and
//! recordings.
//!
//! ## Features
//!
//! - Whitespace-tokenized queries matched as substrings over several fields
//! - Relevance scores counting every (term, field) match
//! - Tri-state, all-of and any-of filters registered per entity
//! - Tenant scoping for institution administrators
//! - Deterministic secondary ordering and pagination
//!
//! ## Example
//!
//! ```
//! use admin_search::prelude::*;
//!
//! # fn main() -> admin_search::error::Result<()> {
//! let source = MemorySource::new().with_candidates(
//!     "spaces",
//!     [
//!         Candidate::builder(1).text("name", "First space created").build(),
//!         Candidate::builder(2).text("name", "Second space created").build(),
//!     ],
//! );
//!
//! let engine = SearchEngine::new(EngineConfig::default())?;
//! let page = engine.search_kind("spaces", &SearchRequest::new().query("sec"), &source)?;
//! assert_eq!(page.total, 1);
//! assert_eq!(page.items[0].id, 2);
//! # Ok(())
//! # }
//! ```

pub mod candidate;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod request;
pub mod scope;
pub mod scoring;
pub mod storage;

pub mod prelude {
    pub use crate::candidate::{AttributeValue, Candidate, CandidateId};
    pub use crate::config::EngineConfig;
    pub use crate::engine::SearchEngine;
    pub use crate::entity::{EntityKind, SearchField, SearchableEntity, SortDirection, SortSpec};
    pub use crate::error::{Result, SearchError};
    pub use crate::filter::{FilterDefinition, FilterKind, FilterValue};
    pub use crate::pagination::Page;
    pub use crate::query::MatchMode;
    pub use crate::request::SearchRequest;
    pub use crate::scope::TenantScope;
    pub use crate::scoring::{RankedResult, ScoreExplanation};
    pub use crate::storage::{CandidateSource, MemorySource, RecordLoader};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
