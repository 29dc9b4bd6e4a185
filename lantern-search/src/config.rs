//! Search client configuration with sensible defaults.
//!
//! [`SearchConfig`] controls where the backend lives, request timeouts,
//! and the cache/featured-result flags forwarded to the backend. Engine
//! and result count are per-call arguments, not configuration: they are
//! part of the session identity a fetch belongs to.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// The backend clamps `num_results` to this inclusive range.
pub const MAX_NUM_RESULTS: u32 = 20;

/// Configuration for the search backend client.
///
/// Use [`Default::default()`] for a local backend, or construct with
/// field overrides. Deserializes from the `[search]` section of the
/// lantern config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the search backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Whether the backend may serve cached results (`use_cache`).
    pub use_cache: bool,
    /// Whether the backend should include featured blocks
    /// (`include_featured`).
    pub include_featured: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_seconds: 30,
            use_cache: true,
            include_featured: true,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `base_url` must be non-empty and start with `http://` or `https://`
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.base_url.trim().is_empty() {
            return Err(SearchError::Config("base_url must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SearchError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Validates a per-call result count against the backend's bounds.
    pub(crate) fn validate_count(count: u32) -> Result<(), SearchError> {
        if count == 0 || count > MAX_NUM_RESULTS {
            return Err(SearchError::Config(format!(
                "num_results must be in 1..={MAX_NUM_RESULTS}, got {count}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.use_cache);
        assert!(config.include_featured);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_base_url_rejected() {
        let config = SearchConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let config = SearchConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn count_bounds_enforced() {
        assert!(SearchConfig::validate_count(0).is_err());
        assert!(SearchConfig::validate_count(1).is_ok());
        assert!(SearchConfig::validate_count(20).is_ok());
        assert!(SearchConfig::validate_count(21).is_err());
    }

    #[test]
    fn config_toml_round_trip() {
        let config = SearchConfig {
            base_url: "https://search.example.com".into(),
            timeout_seconds: 10,
            use_cache: false,
            include_featured: true,
        };
        let toml = toml::to_string(&config).expect("serialize");
        let decoded: SearchConfig = toml::from_str(&toml).expect("deserialize");
        assert_eq!(decoded.base_url, "https://search.example.com");
        assert!(!decoded.use_cache);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let decoded: SearchConfig =
            toml::from_str("base_url = \"https://s.example.com\"").expect("deserialize");
        assert_eq!(decoded.base_url, "https://s.example.com");
        assert_eq!(decoded.timeout_seconds, 30);
    }
}
