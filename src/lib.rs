//! # lantern
//!
//! Client-side kernel for a multi-feature search product.
//!
//! Lantern pairs the typed search backend client ([`lantern_search`])
//! with a credential-rotating summarization client and a session
//! controller that decides which in-flight fetch may update visible
//! state. Rendering is plain text, kept strictly separate from the
//! fetch/retry kernel so the kernel stays testable without a UI.
//!
//! ## Architecture
//!
//! - [`session::SearchSession`] — the state machine: query, mode, engine,
//!   and the three view slices (results, summary, content overlay).
//!   Synchronous and runtime-free; callers issue the fetches it requests
//!   and feed outcomes back with their request tokens.
//! - [`summary::SummaryFetcher`] — one summarization per submitted
//!   query, rotating through an ordered credential pool on
//!   rate-limit/auth/invalid failures.
//! - [`transport`] — the seam between retry policy and HTTP: failures
//!   are classified into [`transport::FailureKind`] at the boundary, and
//!   policy never inspects message text.
//! - [`render`] — pure view-state → display-text functions.
//!
//! ## Supersession
//!
//! Every fetch carries a monotonic request token captured at issue time.
//! When an outcome settles, its token is compared to the latest issued
//! token for that state slice; a mismatch means the session identity
//! (query, mode, engine) changed while the fetch was in flight, and the
//! outcome is discarded rather than rendered.

pub mod config;
pub mod credentials;
pub mod error;
pub mod markdown;
pub mod render;
pub mod session;
pub mod summary;
pub mod transport;

pub use config::{LanternConfig, SummaryConfig};
pub use credentials::CredentialPool;
pub use error::{LanternError, Result};
pub use session::{Phase, SearchSession, SessionIdentity, Submission};
pub use summary::{Summary, SummaryError, SummaryFetcher};
pub use transport::{CompletionTransport, FailureKind, HttpCompletionTransport};

// Re-export the search client types the session API exposes.
pub use lantern_search::{Engine, SearchConfig, SearchMode};
