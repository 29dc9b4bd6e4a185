//! On-demand page content fetcher for the backend's `/api/content`
//! endpoint.
//!
//! Invoked only on explicit per-result user action, never as part of the
//! initial query flow. The backend does the extraction; this module
//! validates the URL, decodes the rich content payload, and exposes the
//! readable text.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{ContentEnvelope, ExtractedPage};
use url::Url;

/// Fetch extracted content for one result URL.
///
/// # Errors
///
/// - [`SearchError::InvalidUrl`] if `url` is not an absolute http(s) URL
/// - [`SearchError::Http`] / [`SearchError::Timeout`] on transport failure
/// - [`SearchError::Status`] on a non-2xx response
/// - [`SearchError::Backend`] when the backend could not scrape the page
/// - [`SearchError::Decode`] when the payload is not the expected shape
pub async fn fetch_content(url: &str, config: &SearchConfig) -> Result<ExtractedPage> {
    validate_content_url(url)?;
    config.validate()?;

    tracing::trace!(url, "content request");

    let client = http::build_client(config)?;
    let response = client
        .get(format!("{}/api/content", config.base_url))
        .query(&[("url", url)])
        .send()
        .await
        .map_err(|e| http::classify_transport("content request failed", e))?;

    if !response.status().is_success() {
        return Err(http::status_error(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| http::classify_transport("content response read failed", e))?;

    decode_content(&body)
}

/// The backend only accepts absolute http(s) URLs; reject everything else
/// locally so a malformed URL never leaves the client.
fn validate_content_url(url: &str) -> Result<()> {
    let parsed =
        Url::parse(url).map_err(|e| SearchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SearchError::InvalidUrl(format!(
            "unsupported scheme {other}: {url}"
        ))),
    }
}

/// Decode a content response body into an [`ExtractedPage`].
pub(crate) fn decode_content(body: &str) -> Result<ExtractedPage> {
    let envelope: ContentEnvelope = serde_json::from_str(body)
        .map_err(|e| SearchError::Decode(format!("content response: {e}")))?;

    if let Some(error) = envelope.error {
        return Err(SearchError::Backend(error));
    }

    let content = envelope.content.ok_or_else(|| {
        SearchError::Decode("content response lacks a content object".into())
    })?;

    Ok(ExtractedPage {
        url: content.url,
        title: content.title,
        text: content.content,
        text_blocks: content.text_blocks,
        execution_time: envelope.execution_time,
    })
}
