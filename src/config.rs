//! Configuration types for lantern.
//!
//! Loaded from a TOML file with every field defaulted, so a partial (or
//! absent) config is always usable. Credentials are deliberately not part
//! of this file — see [`crate::credentials`].

use crate::error::{LanternError, Result};
use lantern_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanternConfig {
    /// Search backend client settings.
    pub search: SearchConfig,
    /// Summarization settings.
    pub summary: SummaryConfig,
    /// Default number of results to request per fetch.
    pub num_results: u32,
}

impl Default for LanternConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            summary: SummaryConfig::default(),
            num_results: 10,
        }
    }
}

/// Summarization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Whether the AI summary panel is enabled at all.
    pub enabled: bool,
    /// Base URL of the OpenAI-compatible completion API, without a
    /// trailing slash (the client appends `/chat/completions`).
    pub api_url: String,
    /// Model identifier to request.
    pub api_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling parameter.
    pub top_p: f32,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Environment variable holding the comma-separated credential list.
    pub credentials_var: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.openai.com/v1".to_owned(),
            api_model: "gpt-4o-mini".to_owned(),
            temperature: 0.3,
            top_p: 1.0,
            max_tokens: 1024,
            timeout_seconds: 60,
            credentials_var: crate::credentials::DEFAULT_CREDENTIALS_VAR.to_owned(),
        }
    }
}

impl SummaryConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(LanternError::Config(
                "summary.api_url must not be empty".into(),
            ));
        }
        if self.api_model.trim().is_empty() {
            return Err(LanternError::Config(
                "summary.api_model must not be empty".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(LanternError::Config(
                "summary.timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(LanternError::Config(
                "summary.max_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl LanternConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a config error if the file cannot be read, is not valid
    /// TOML, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LanternError::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| LanternError::Config(format!("invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.search.validate().map_err(LanternError::Search)?;
        self.summary.validate()?;
        if self.num_results == 0 {
            return Err(LanternError::Config(
                "num_results must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
