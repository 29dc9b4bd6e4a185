//! # lantern-search
//!
//! Typed client for Lantern's search backend.
//!
//! This crate issues single outbound requests against the backend's JSON
//! API — text search, image search, on-demand page content extraction,
//! and a couple of administration calls — and normalizes each response
//! into a result-or-error outcome. It compiles into the lantern binary as
//! a library dependency.
//!
//! ## Design
//!
//! - One fetcher per endpoint, each a single request with no retry,
//!   caching, or deduplication — repeated identical calls are issued
//!   freely
//! - Result order, total counts, and elapsed-time metadata are the
//!   backend's, untouched
//! - Every error becomes a displayable [`SearchError`]; nothing is
//!   swallowed
//! - Supersession of stale in-flight fetches is the session layer's job;
//!   this crate stays request-scoped
//!
//! ## Security
//!
//! - No credentials: the search backend is unauthenticated
//! - Queries are logged at trace level only
//! - Content URLs are validated as absolute http(s) before leaving the
//!   client

pub mod admin;
pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod images;
pub mod search;
pub mod types;

pub use config::SearchConfig;
pub use content::fetch_content;
pub use error::{Result, SearchError};
pub use images::fetch_images;
pub use search::fetch_results;
pub use types::{
    Engine, ExtractedPage, ImagePage, ImageResult, ResultPage, SearchMode, SearchResult,
};
