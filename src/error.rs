//! Error types for the search engine.
//!
//! All failures are represented by the [`SearchError`] enum. Variants fall into
//! three groups:
//!
//! - configuration errors: a facade or caller asked the engine for something it was
//!   never wired to answer (unknown filter, unknown entity, bad definition). These are
//!   programmer errors and are never recovered from at runtime.
//! - collaborator errors: the storage collaborator failed; its error is carried
//!   untouched as the [`std::error::Error::source`].
//! - ambient errors while loading the engine configuration or decoding a request.
//!
//! Malformed *input* (blank queries, out-of-range pages, unparseable filter values)
//! never produces an error; each has a defined fallback.
//!
//! # Examples
//!
//! ```
//! use admin_search::error::{Result, SearchError};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(SearchError::unknown_filter("users", name))
//! }
//!
//! let err = lookup("colour").unwrap_err();
//! assert!(err.is_configuration_error());
//! ```

use std::io;

use thiserror::Error;

/// Boxed error produced by an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A filter name was supplied that the entity never registered.
    #[error("unknown filter '{filter}' for entity '{entity}'")]
    UnknownFilter { entity: String, filter: String },

    /// An entity kind was requested that no adapter exists for.
    #[error("unknown entity kind '{0}'")]
    UnknownEntity(String),

    /// A filter received a value of the wrong shape (flag vs. list). Searches
    /// log it and leave the filter unapplied.
    #[error("filter '{filter}' expects {expected}")]
    FilterValueMismatch {
        filter: String,
        expected: &'static str,
    },

    /// An entity definition is missing required wiring.
    #[error("invalid entity definition: {0}")]
    InvalidDefinition(String),

    /// Engine configuration cannot be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// The storage collaborator failed.
    #[error("storage collaborator failed: {0}")]
    Storage(#[source] BoxError),

    /// I/O errors while reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML parse errors while reading configuration files.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON errors while decoding a serialized request.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`SearchError`].
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create an unknown filter error.
    pub fn unknown_filter<E: Into<String>, F: Into<String>>(entity: E, filter: F) -> Self {
        SearchError::UnknownFilter {
            entity: entity.into(),
            filter: filter.into(),
        }
    }

    /// Create an unknown entity error.
    pub fn unknown_entity<S: Into<String>>(name: S) -> Self {
        SearchError::UnknownEntity(name.into())
    }

    /// Create a filter value mismatch error.
    pub fn filter_value_mismatch<S: Into<String>>(filter: S, expected: &'static str) -> Self {
        SearchError::FilterValueMismatch {
            filter: filter.into(),
            expected,
        }
    }

    /// Create an invalid definition error.
    pub fn definition<S: Into<String>>(msg: S) -> Self {
        SearchError::InvalidDefinition(msg.into())
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SearchError::Config(msg.into())
    }

    /// Wrap a storage collaborator failure.
    pub fn storage<E: Into<BoxError>>(err: E) -> Self {
        SearchError::Storage(err.into())
    }

    /// Whether this error signals a caller/engine wiring mismatch.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SearchError::UnknownFilter { .. }
                | SearchError::UnknownEntity(_)
                | SearchError::InvalidDefinition(_)
                | SearchError::Config(_)
        )
    }
}
