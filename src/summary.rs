//! AI summary fetcher with credential rotation.
//!
//! One summarization runs per submitted query. The fetcher builds a fixed
//! instruction payload, issues a completion through a
//! [`CompletionTransport`], and on a rotating failure class waits a short
//! fixed delay and retries with the next credential. The pool index only
//! advances forward; an attempt chain makes at most pool-size requests.

use std::time::Duration;

use crate::credentials::CredentialPool;
use crate::markdown::{self, Span};
use crate::transport::{CompletionTransport, TransportError};

/// Delay between credential rotations.
pub const RETRY_DELAY: Duration = Duration::from_millis(800);

/// System instruction for the summarization request.
///
/// The shape of the output (bold lead + eight supporting sentences) is
/// what the minimal markdown transform and the renderer rely on.
pub const SYSTEM_PROMPT: &str = "You are a research assistant that writes concise, factual \
overviews of search topics. Write in a formal tone. Do not use lists, headings, or hedging \
language. Begin with a single lead sentence wrapped in ** markers, followed by exactly eight \
supporting factual sentences of plain prose.";

/// Build the user message for `query`.
pub fn build_user_prompt(query: &str) -> String {
    format!(
        "Write an overview of the topic \"{query}\". Start with one bolded lead sentence that \
states the essence of the topic, then exactly eight supporting sentences with concrete facts."
    )
}

/// A settled summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Normalized summary text with bold markers removed.
    pub text: String,
    /// Display spans (bold lead plus plain prose).
    pub spans: Vec<Span>,
    /// Index of the credential that produced the completion.
    pub credential_index: usize,
    /// Number of requests made, including the successful one.
    pub attempts: usize,
}

/// Errors that terminate a summarization attempt chain.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// The query was empty or whitespace-only; callers suppress this
    /// silently instead of rendering it.
    #[error("query is empty")]
    EmptyQuery,

    /// Every credential in the pool was tried and rejected.
    #[error("all {attempts} credentials exhausted: {last}")]
    CredentialsExhausted {
        /// Total requests made.
        attempts: usize,
        /// The failure that ended the chain.
        #[source]
        last: TransportError,
    },

    /// A non-rotating failure ended the chain.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Summarization client: a transport plus an ordered credential pool.
pub struct SummaryFetcher<T: CompletionTransport> {
    transport: T,
    pool: CredentialPool,
    retry_delay: Duration,
}

impl<T: CompletionTransport> SummaryFetcher<T> {
    /// Create a fetcher with the standard rotation delay.
    pub fn new(transport: T, pool: CredentialPool) -> Self {
        Self {
            transport,
            pool,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Override the rotation delay (tests use zero).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Summarize `query`, rotating credentials on rate-limit/auth/invalid
    /// failures until success or pool exhaustion.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::EmptyQuery`] for a blank query, before any request
    /// - [`SummaryError::CredentialsExhausted`] after pool-size rotating
    ///   failures
    /// - [`SummaryError::Transport`] on the first non-rotating failure
    pub async fn summarize(&self, query: &str) -> Result<Summary, SummaryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SummaryError::EmptyQuery);
        }

        let user_prompt = build_user_prompt(query);
        let mut index = 0usize;

        loop {
            // Pool construction guarantees at least one key.
            let credential = self
                .pool
                .get(index)
                .ok_or_else(|| SummaryError::Transport(missing_credential(index)))?;

            match self
                .transport
                .complete(credential, SYSTEM_PROMPT, &user_prompt)
                .await
            {
                Ok(raw) => {
                    let spans = markdown::parse_spans(&raw);
                    let text = markdown::spans_to_plain(&spans);
                    tracing::debug!(credential_index = index, "summary ready");
                    return Ok(Summary {
                        text,
                        spans,
                        credential_index: index,
                        attempts: index + 1,
                    });
                }
                Err(err) if err.kind.rotates_credential() => {
                    if index + 1 >= self.pool.len() {
                        tracing::warn!(attempts = index + 1, kind = err.kind.code(), "credential pool exhausted");
                        return Err(SummaryError::CredentialsExhausted {
                            attempts: index + 1,
                            last: err,
                        });
                    }
                    tracing::warn!(
                        credential_index = index,
                        kind = err.kind.code(),
                        "rotating to next credential"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    index += 1;
                }
                Err(err) => {
                    tracing::warn!(kind = err.kind.code(), "summary failed");
                    return Err(SummaryError::Transport(err));
                }
            }
        }
    }
}

fn missing_credential(index: usize) -> TransportError {
    TransportError {
        kind: crate::transport::FailureKind::Provider,
        message: format!("credential pool has no key at index {index}"),
    }
}
