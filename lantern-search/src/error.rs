//! Error types for the lantern-search crate.
//!
//! All errors carry stable, displayable messages suitable for inline
//! rendering in the affected panel. No credentials or sensitive data
//! appear in error messages.

/// Errors that can occur while talking to the search backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or whitespace-only. Suppressed silently by
    /// callers rather than surfaced to the user.
    #[error("query is empty")]
    EmptyQuery,

    /// The content URL was not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Status text or response excerpt.
        message: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend reported an error in its response envelope.
    #[error("backend error: {0}")]
    Backend(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for lantern-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "query is empty");
    }

    #[test]
    fn display_status() {
        let err = SearchError::Status {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "backend returned status 503: Service Unavailable"
        );
    }

    #[test]
    fn display_decode() {
        let err = SearchError::Decode("missing field `results`".into());
        assert_eq!(err.to_string(), "decode error: missing field `results`");
    }

    #[test]
    fn display_backend() {
        let err = SearchError::Backend("Failed to access search engine".into());
        assert_eq!(
            err.to_string(),
            "backend error: Failed to access search engine"
        );
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 15s limit".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 15s limit");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
