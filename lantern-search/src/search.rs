//! Text result fetcher for the backend's `/api/search` endpoint.
//!
//! Issues exactly one outbound query per call and reports a
//! result-or-error outcome. Repeated calls with identical arguments are
//! issued freely; the client performs no caching or deduplication.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{Engine, ResultPage, SearchEnvelope, SearchResult};

/// Fetch one page of text results for `query` from the configured backend.
///
/// The result list, total count, and elapsed-time metadata are returned
/// exactly as reported by the backend; ordering is the backend's rank
/// order with no client-side re-sort.
///
/// # Errors
///
/// - [`SearchError::EmptyQuery`] for an empty or whitespace-only query
/// - [`SearchError::Config`] for an out-of-range `count`
/// - [`SearchError::Http`] / [`SearchError::Timeout`] on transport failure
/// - [`SearchError::Status`] on a non-2xx response
/// - [`SearchError::Decode`] when the payload is not the expected shape
/// - [`SearchError::Backend`] when the backend reports an error and has
///   no results to show for it
pub async fn fetch_results(
    query: &str,
    engine: Engine,
    count: u32,
    config: &SearchConfig,
) -> Result<ResultPage> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    SearchConfig::validate_count(count)?;
    config.validate()?;

    tracing::trace!(query, %engine, count, "text search request");

    let client = http::build_client(config)?;
    let count_param = count.to_string();
    let response = client
        .get(format!("{}/api/search", config.base_url))
        .query(&[
            ("query", query),
            ("search_engine", engine.param()),
            ("num_results", count_param.as_str()),
            ("use_cache", bool_param(config.use_cache)),
            ("include_featured", bool_param(config.include_featured)),
        ])
        .send()
        .await
        .map_err(|e| http::classify_transport("search request failed", e))?;

    if !response.status().is_success() {
        return Err(http::status_error(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| http::classify_transport("search response read failed", e))?;

    tracing::trace!(bytes = body.len(), "search response received");

    decode_result_page(&body)
}

pub(crate) fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Decode a search response body into a [`ResultPage`].
///
/// Extracted as a separate function for testability with fixture JSON.
/// A missing results array is a decode failure; an envelope-level error
/// string only fails the fetch when there are no results to show,
/// otherwise partial results win and the error is logged.
pub(crate) fn decode_result_page(body: &str) -> Result<ResultPage> {
    let envelope: SearchEnvelope<SearchResult> = serde_json::from_str(body)
        .map_err(|e| SearchError::Decode(format!("search response: {e}")))?;

    let results = match envelope.results {
        Some(results) => results,
        None => {
            if let Some(error) = envelope.error {
                return Err(SearchError::Backend(error));
            }
            return Err(SearchError::Decode(
                "search response lacks a results array".into(),
            ));
        }
    };

    if let Some(error) = envelope.error {
        if results.is_empty() {
            return Err(SearchError::Backend(error));
        }
        tracing::warn!(error, "backend reported an error alongside results");
    }

    tracing::debug!(count = results.len(), "search results decoded");

    Ok(ResultPage {
        results,
        total_results: envelope.total_results,
        execution_time: envelope.execution_time,
    })
}
