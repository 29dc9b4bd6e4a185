//! Image result fetcher for the backend's `/api/image-search` endpoint.
//!
//! Same contract shape as the text fetcher, specialized to
//! [`ImageResult`]. Switching a session into image mode triggers exactly
//! one call per (query, engine, count) combination; supersession of
//! in-flight work is the session controller's concern, not this crate's.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::search::bool_param;
use crate::types::{Engine, ImagePage, ImageResult, SearchEnvelope};

/// Fetch one page of image results for `query` from the configured
/// backend.
///
/// # Errors
///
/// Same classes as [`fetch_results`](crate::search::fetch_results).
pub async fn fetch_images(
    query: &str,
    engine: Engine,
    count: u32,
    config: &SearchConfig,
) -> Result<ImagePage> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    SearchConfig::validate_count(count)?;
    config.validate()?;

    tracing::trace!(query, %engine, count, "image search request");

    let client = http::build_client(config)?;
    let count_param = count.to_string();
    let response = client
        .get(format!("{}/api/image-search", config.base_url))
        .query(&[
            ("query", query),
            ("search_engine", engine.param()),
            ("num_results", count_param.as_str()),
            ("use_cache", bool_param(config.use_cache)),
        ])
        .send()
        .await
        .map_err(|e| http::classify_transport("image search request failed", e))?;

    if !response.status().is_success() {
        return Err(http::status_error(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| http::classify_transport("image search response read failed", e))?;

    decode_image_page(&body)
}

/// Decode an image search response body into an [`ImagePage`].
pub(crate) fn decode_image_page(body: &str) -> Result<ImagePage> {
    let envelope: SearchEnvelope<ImageResult> = serde_json::from_str(body)
        .map_err(|e| SearchError::Decode(format!("image search response: {e}")))?;

    let results = match envelope.results {
        Some(results) => results,
        None => {
            if let Some(error) = envelope.error {
                return Err(SearchError::Backend(error));
            }
            return Err(SearchError::Decode(
                "image search response lacks a results array".into(),
            ));
        }
    };

    if let Some(error) = envelope.error {
        if results.is_empty() {
            return Err(SearchError::Backend(error));
        }
        tracing::warn!(error, "backend reported an error alongside image results");
    }

    tracing::debug!(count = results.len(), "image results decoded");

    Ok(ImagePage {
        results,
        total_results: envelope.total_results,
        execution_time: envelope.execution_time,
    })
}
