//! Backend administration calls: health check and cache flush.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{CacheCleared, HealthStatus};

/// Ask the backend whether it is alive.
///
/// # Errors
///
/// Transport, status, and decode errors as for the fetchers.
pub async fn healthcheck(config: &SearchConfig) -> Result<HealthStatus> {
    let body = get_text(config, "/api/healthcheck").await?;
    serde_json::from_str(&body)
        .map_err(|e| SearchError::Decode(format!("healthcheck response: {e}")))
}

/// Flush the backend's server-side search cache.
///
/// # Errors
///
/// Transport, status, and decode errors as for the fetchers.
pub async fn clear_cache(config: &SearchConfig) -> Result<CacheCleared> {
    let body = get_text(config, "/api/clear-cache").await?;
    serde_json::from_str(&body)
        .map_err(|e| SearchError::Decode(format!("clear-cache response: {e}")))
}

async fn get_text(config: &SearchConfig, path: &str) -> Result<String> {
    config.validate()?;
    let client = http::build_client(config)?;
    let response = client
        .get(format!("{}{path}", config.base_url))
        .send()
        .await
        .map_err(|e| http::classify_transport("admin request failed", e))?;

    if !response.status().is_success() {
        return Err(http::status_error(response).await);
    }

    response
        .text()
        .await
        .map_err(|e| http::classify_transport("admin response read failed", e))
}
