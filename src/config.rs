//! Engine configuration.
//!
//! Configuration is plain data: it is passed explicitly to [`crate::engine::SearchEngine`]
//! and never read from ambient state during a search. It can be built in code or
//! loaded from a TOML file:
//!
//! ```toml
//! default_page_size = 20
//! max_page_size = 100
//! case_sensitive = false
//! match_mode = "all"
//! parallel_threshold = 4096
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::query::MatchMode;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default upper bound on a requested page size.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Configuration for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page size used when a request does not specify one.
    pub default_page_size: usize,

    /// Largest page size a request may ask for; larger requests are clamped.
    pub max_page_size: usize,

    /// Whether terms are matched against fields case-sensitively.
    pub case_sensitive: bool,

    /// How multiple query terms combine for inclusion.
    pub match_mode: MatchMode,

    /// Candidate count from which matching and scoring run on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            case_sensitive: false,
            match_mode: MatchMode::All,
            parallel_threshold: 4096,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check that the page size bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(SearchError::config("max_page_size must be at least 1"));
        }
        if self.default_page_size == 0 {
            return Err(SearchError::config("default_page_size must be at least 1"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(SearchError::config(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Set the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the page size bound.
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the case policy.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the default term match mode.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 100);
        assert!(!config.case_sensitive);
        assert_eq!(config.match_mode, MatchMode::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("match_mode = \"any\"\nmax_page_size = 50\n")
            .unwrap();
        assert_eq!(config.match_mode, MatchMode::Any);
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = EngineConfig::from_toml_str("default_page_size = 30\nmax_page_size = 10\n")
            .unwrap_err();
        assert!(err.is_configuration_error());

        let err = EngineConfig::default()
            .with_max_page_size(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("max_page_size = \"many\"").unwrap_err();
        assert!(matches!(err, SearchError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "case_sensitive = true").unwrap();
        writeln!(file, "parallel_threshold = 10").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert!(config.case_sensitive);
        assert_eq!(config.parallel_threshold, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SearchError::Io(_)));
    }
}
