//! Core types for the search backend wire contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which backend search engine services a query.
///
/// Passed through to the backend as the `search_engine` query parameter;
/// the backend drives the actual engine session server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Google — the backend's primary engine.
    Google,
    /// Bing — the backend's secondary engine.
    Bing,
}

impl Engine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
        }
    }

    /// Returns the wire value for the `search_engine` query parameter.
    pub fn param(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
        }
    }

    /// Returns all available engine variants.
    pub fn all() -> &'static [Engine] {
        &[Self::Google, Self::Bing]
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which kind of results a search session is displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Ranked text results with snippets.
    Text,
    /// Image results with thumbnails.
    Image,
}

impl SearchMode {
    /// Returns the human-readable name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single text search result, exactly as reported by the backend.
///
/// Results are rendered in response order; `position` is the backend's
/// rank, negative for featured blocks the backend surfaces above the
/// organic results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Backend-assigned opaque identifier.
    pub id: String,
    /// The title of the result page.
    pub title: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
    /// The URL of the result.
    pub url: String,
    /// Source label, e.g. `google`, `bing`, or `google_featured`.
    #[serde(default)]
    pub source: String,
    /// Domain of the result URL.
    #[serde(default)]
    pub domain: String,
    /// Rank position as returned by the backend.
    #[serde(default)]
    pub position: i32,
    /// Optional feature bag: review stars, dates, attribution, or a
    /// `type` marker such as `featured_snippet`.
    #[serde(default)]
    pub features: HashMap<String, serde_json::Value>,
}

impl SearchResult {
    /// Whether the backend surfaced this as a featured block rather than
    /// an organic result.
    pub fn is_featured(&self) -> bool {
        self.position < 0
    }
}

/// A single image search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// Backend-assigned opaque identifier.
    pub id: String,
    /// Full-size image URL.
    pub url: String,
    /// Thumbnail URL.
    pub thumbnail_url: String,
    /// Image title.
    #[serde(default)]
    pub title: String,
    /// URL of the page the image was found on.
    #[serde(default)]
    pub source_url: String,
    /// Domain of the source page.
    #[serde(default)]
    pub source_domain: String,
    /// Pixel width, when the backend reports it.
    #[serde(default)]
    pub width: Option<u32>,
    /// Pixel height, when the backend reports it.
    #[serde(default)]
    pub height: Option<u32>,
    /// Alt text extracted from the source page.
    #[serde(default)]
    pub alt_text: String,
    /// Rank position as returned by the backend.
    #[serde(default)]
    pub position: i32,
}

/// Response envelope shared by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchEnvelope<T> {
    #[allow(dead_code)]
    pub query: String,
    pub results: Option<Vec<T>>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default)]
    pub error: Option<String>,
}

/// An ordered page of text results with backend-reported metadata.
#[derive(Debug, Clone)]
pub struct ResultPage {
    /// Results in backend rank order.
    pub results: Vec<SearchResult>,
    /// Total result count as reported by the backend (not recomputed).
    pub total_results: u64,
    /// Backend-side elapsed time in seconds.
    pub execution_time: f64,
}

/// An ordered page of image results with backend-reported metadata.
#[derive(Debug, Clone)]
pub struct ImagePage {
    /// Results in backend rank order.
    pub results: Vec<ImageResult>,
    /// Total result count as reported by the backend.
    pub total_results: u64,
    /// Backend-side elapsed time in seconds.
    pub execution_time: f64,
}

/// Rich page content as extracted by the backend's content endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// The URL that was fetched.
    pub url: String,
    /// Page title.
    #[serde(default)]
    pub title: String,
    /// Extracted readable text.
    #[serde(default)]
    pub content: String,
    /// Raw HTML, when the backend includes it.
    #[serde(default)]
    pub html: String,
    /// Meta tags keyed by name/property.
    #[serde(default)]
    pub meta_tags: HashMap<String, String>,
    /// Outbound links found on the page.
    #[serde(default)]
    pub links: Vec<HashMap<String, String>>,
    /// Images found on the page.
    #[serde(default)]
    pub images: Vec<HashMap<String, String>>,
    /// Substantial text blocks (paragraphs, headings, list items).
    #[serde(default)]
    pub text_blocks: Vec<String>,
}

/// Envelope for the content endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEnvelope {
    #[allow(dead_code)]
    pub url: String,
    pub content: Option<PageContent>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub execution_time: f64,
}

/// Extracted page content held while a content overlay is open.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The URL that was fetched.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Extracted readable text.
    pub text: String,
    /// Substantial text blocks, in document order.
    pub text_blocks: Vec<String>,
    /// Backend-side elapsed time in seconds.
    pub execution_time: f64,
}

/// Backend health report.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Reported status string, `ok` when healthy.
    pub status: String,
    /// Backend clock at report time (Unix seconds).
    pub timestamp: f64,
}

/// Result of a backend cache flush.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheCleared {
    /// Reported status string.
    pub status: String,
    /// Number of cached entries removed.
    pub cleared_items: u64,
}
