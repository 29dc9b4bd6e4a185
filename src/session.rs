//! Search session controller.
//!
//! Holds the user-visible state of one long-lived search session: the
//! submitted query, the active mode and engine, and the three disjoint
//! view slices (results, summary, content overlay). The controller is
//! synchronous and runtime-free — callers issue the fetches it requests
//! and feed the settled outcomes back in.
//!
//! Every issued fetch carries a monotonic [`RequestToken`]. An outcome is
//! committed only when its token still matches the latest issued token
//! for that slice; anything else was superseded by a newer submission,
//! mode change, or engine change, and is discarded without touching
//! visible state.

use lantern_search::{Engine, ExtractedPage, ImagePage, ResultPage, SearchMode};

use crate::summary::{Summary, SummaryError};

/// Monotonic identity for one issued fetch.
pub type RequestToken = u64;

/// Lifecycle phase of the session.
///
/// `Submitting` always settles into `Displaying`; a failed fetch is a
/// renderable sub-state of the results panel, not a blocked phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No query submitted yet.
    Idle,
    /// A results fetch is in flight for the current identity.
    Submitting,
    /// The latest results fetch has settled (successfully or not).
    Displaying,
}

/// The (query, mode, engine) triple that scopes which in-flight fetch may
/// update visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// The submitted query, trimmed, non-empty.
    pub query: String,
    /// Active search mode.
    pub mode: SearchMode,
    /// Active backend engine.
    pub engine: Engine,
}

/// Fetches the caller must issue after a submission-shaped transition.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Identity the fetches belong to.
    pub identity: SessionIdentity,
    /// Number of results to request.
    pub count: u32,
    /// Token for the results (text or image) fetch.
    pub results_token: RequestToken,
    /// Token for the concurrent summary fetch; present in text mode only.
    pub summary_token: Option<RequestToken>,
}

/// State of the results panel.
#[derive(Debug, Clone)]
pub enum ResultsPanel {
    /// Nothing submitted yet.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// Settled text results (possibly an empty page — "no results").
    Text(ResultPage),
    /// Settled image results.
    Images(ImagePage),
    /// The fetch failed; inline message for this panel only.
    Failed(String),
}

/// State of the AI summary panel.
#[derive(Debug, Clone)]
pub enum SummaryPanel {
    /// Not shown (image mode, or summaries disabled).
    Hidden,
    /// Summarization in flight.
    Pending,
    /// Settled summary.
    Ready(Summary),
    /// Summarization failed; inline message.
    Failed(String),
}

/// State of the content overlay. At most one overlay is open at a time.
#[derive(Debug, Clone)]
pub enum ContentOverlay {
    /// No overlay.
    Closed,
    /// Content fetch in flight for `url`.
    Loading {
        /// The requested page URL.
        url: String,
    },
    /// Extracted content on display.
    Open(ExtractedPage),
    /// The fetch failed; inline message.
    Failed {
        /// The requested page URL.
        url: String,
        /// Displayable failure message.
        message: String,
    },
}

/// The session controller.
#[derive(Debug)]
pub struct SearchSession {
    mode: SearchMode,
    engine: Engine,
    count: u32,
    summaries: bool,
    phase: Phase,
    identity: Option<SessionIdentity>,
    results: ResultsPanel,
    summary: SummaryPanel,
    overlay: ContentOverlay,
    next_token: RequestToken,
    latest_results: Option<RequestToken>,
    latest_summary: Option<RequestToken>,
    latest_content: Option<RequestToken>,
}

impl SearchSession {
    /// Create an idle session.
    pub fn new(mode: SearchMode, engine: Engine, count: u32) -> Self {
        Self {
            mode,
            engine,
            count,
            summaries: true,
            phase: Phase::Idle,
            identity: None,
            results: ResultsPanel::Empty,
            summary: SummaryPanel::Hidden,
            overlay: ContentOverlay::Closed,
            next_token: 0,
            latest_results: None,
            latest_summary: None,
            latest_content: None,
        }
    }

    /// Enable or disable the concurrent summary fetch for text-mode
    /// submissions.
    pub fn with_summaries(mut self, enabled: bool) -> Self {
        self.summaries = enabled;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current session identity, if a query has been submitted.
    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    /// Active mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Active engine.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Results panel state.
    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }

    /// Summary panel state.
    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    /// Content overlay state.
    pub fn overlay(&self) -> &ContentOverlay {
        &self.overlay
    }

    fn issue_token(&mut self) -> RequestToken {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    /// Submit a query.
    ///
    /// Empty or whitespace-only input is a no-op: no fetch is issued and
    /// no transition occurs. Otherwise the prior result list is
    /// discarded, the session enters `Submitting`, and the returned
    /// [`Submission`] tells the caller which fetches to issue. In text
    /// mode a summary fetch runs concurrently with the results fetch.
    pub fn submit(&mut self, raw_query: &str) -> Option<Submission> {
        let query = raw_query.trim();
        if query.is_empty() {
            return None;
        }
        self.start_fetch(query.to_owned())
    }

    /// Change the active mode.
    ///
    /// With a submitted query this discards the current list and
    /// re-fetches under the new identity; while idle it only records the
    /// preference.
    pub fn change_mode(&mut self, mode: SearchMode) -> Option<Submission> {
        if self.mode == mode {
            return None;
        }
        self.mode = mode;
        let query = self.identity.as_ref()?.query.clone();
        self.start_fetch(query)
    }

    /// Change the active engine; same re-fetch semantics as
    /// [`change_mode`](Self::change_mode).
    pub fn change_engine(&mut self, engine: Engine) -> Option<Submission> {
        if self.engine == engine {
            return None;
        }
        self.engine = engine;
        let query = self.identity.as_ref()?.query.clone();
        self.start_fetch(query)
    }

    fn start_fetch(&mut self, query: String) -> Option<Submission> {
        let identity = SessionIdentity {
            query,
            mode: self.mode,
            engine: self.engine,
        };

        let results_token = self.issue_token();
        self.latest_results = Some(results_token);

        let summary_token = match self.mode {
            SearchMode::Text if self.summaries => {
                let token = self.issue_token();
                self.latest_summary = Some(token);
                self.summary = SummaryPanel::Pending;
                Some(token)
            }
            _ => {
                self.latest_summary = None;
                self.summary = SummaryPanel::Hidden;
                None
            }
        };

        self.identity = Some(identity.clone());
        self.phase = Phase::Submitting;
        self.results = ResultsPanel::Loading;

        tracing::debug!(
            query = %identity.query,
            mode = %identity.mode,
            engine = %identity.engine,
            results_token,
            "submission issued"
        );

        Some(Submission {
            identity,
            count: self.count,
            results_token,
            summary_token,
        })
    }

    /// Settle the text results fetch for `token`.
    ///
    /// Returns `true` if the outcome was committed, `false` if it was
    /// stale (superseded by a newer submission) and discarded.
    pub fn settle_results(
        &mut self,
        token: RequestToken,
        outcome: Result<ResultPage, lantern_search::SearchError>,
    ) -> bool {
        if self.latest_results != Some(token) {
            tracing::debug!(token, "stale text results discarded");
            return false;
        }
        self.phase = Phase::Displaying;
        self.results = match outcome {
            Ok(page) => ResultsPanel::Text(page),
            Err(err) => ResultsPanel::Failed(err.to_string()),
        };
        true
    }

    /// Settle the image results fetch for `token`; same semantics as
    /// [`settle_results`](Self::settle_results).
    pub fn settle_images(
        &mut self,
        token: RequestToken,
        outcome: Result<ImagePage, lantern_search::SearchError>,
    ) -> bool {
        if self.latest_results != Some(token) {
            tracing::debug!(token, "stale image results discarded");
            return false;
        }
        self.phase = Phase::Displaying;
        self.results = match outcome {
            Ok(page) => ResultsPanel::Images(page),
            Err(err) => ResultsPanel::Failed(err.to_string()),
        };
        true
    }

    /// Settle the summary fetch for `token`.
    ///
    /// Settling the summary never changes the session phase — the
    /// results fetch owns the `Submitting → Displaying` transition.
    pub fn settle_summary(
        &mut self,
        token: RequestToken,
        outcome: Result<Summary, SummaryError>,
    ) -> bool {
        if self.latest_summary != Some(token) {
            tracing::debug!(token, "stale summary discarded");
            return false;
        }
        self.summary = match outcome {
            Ok(summary) => SummaryPanel::Ready(summary),
            // A blank query never reaches here (submit refuses it), but
            // if it did the panel simply would not render.
            Err(SummaryError::EmptyQuery) => SummaryPanel::Hidden,
            Err(err) => SummaryPanel::Failed(err.to_string()),
        };
        true
    }

    /// Request page content for one result.
    ///
    /// Opening a new content view while one is loading supersedes it;
    /// only the latest requested URL's outcome is ever shown.
    pub fn request_content(&mut self, url: &str) -> Option<RequestToken> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        let token = self.issue_token();
        self.latest_content = Some(token);
        self.overlay = ContentOverlay::Loading {
            url: url.to_owned(),
        };
        Some(token)
    }

    /// Settle a content fetch for `token`.
    pub fn settle_content(
        &mut self,
        token: RequestToken,
        outcome: Result<ExtractedPage, lantern_search::SearchError>,
    ) -> bool {
        if self.latest_content != Some(token) {
            tracing::debug!(token, "stale content discarded");
            return false;
        }
        self.overlay = match outcome {
            Ok(page) => ContentOverlay::Open(page),
            Err(err) => {
                let url = match &self.overlay {
                    ContentOverlay::Loading { url } => url.clone(),
                    _ => String::new(),
                };
                ContentOverlay::Failed {
                    url,
                    message: err.to_string(),
                }
            }
        };
        true
    }

    /// Close the content overlay.
    pub fn close_content(&mut self) {
        self.latest_content = None;
        self.overlay = ContentOverlay::Closed;
    }
}
