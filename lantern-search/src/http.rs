//! Shared HTTP client construction and transport error mapping.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for backend requests.
///
/// The client carries the configured per-request timeout so a hung
/// backend surfaces as [`SearchError::Timeout`] instead of blocking the
/// session indefinitely.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(concat!("lantern/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Map a reqwest failure to the search error taxonomy.
///
/// Timeouts get their own class so the session can report them
/// distinctly; everything else at the transport level is an HTTP error.
pub(crate) fn classify_transport(context: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{context}: {err}"))
    } else {
        SearchError::Http(format!("{context}: {err}"))
    }
}

/// Turn a non-2xx response into [`SearchError::Status`], keeping a short
/// body excerpt for display.
pub(crate) async fn status_error(response: reqwest::Response) -> SearchError {
    let status = response.status().as_u16();
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => excerpt(body.trim(), 200),
        _ => reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_owned(),
    };
    SearchError::Status { status, message }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}…")
}
