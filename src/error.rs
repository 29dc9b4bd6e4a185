//! Error types for the lantern session layer.

use crate::summary::SummaryError;
use lantern_search::SearchError;

/// Top-level error type for the lantern client.
#[derive(Debug, thiserror::Error)]
pub enum LanternError {
    /// Search backend failure.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Summarization failure.
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, LanternError>;
