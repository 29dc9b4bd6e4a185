//! Completion API transport with structured failure classification.
//!
//! The transport issues one non-streaming request to an OpenAI-compatible
//! `/chat/completions` endpoint and classifies every failure into a
//! [`FailureKind`] at this boundary. Retry policy lives in the summary
//! fetcher and decides purely on the kind — it never inspects message
//! text.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::SummaryConfig;

/// Stable failure classes for completion requests.
///
/// `RateLimited`, `AuthFailed`, and `InvalidRequest` correspond to the
/// three provider failure signals that historically rotated to the next
/// credential; everything else terminates the attempt chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider rejected the request for rate-limit reasons (429 or a
    /// `rate limit` message).
    RateLimited,
    /// Credential rejected (401/403 or an `authentication` message).
    AuthFailed,
    /// Provider called the request invalid (an `invalid` message).
    InvalidRequest,
    /// The request exceeded the configured timeout.
    Timeout,
    /// Transport-level failure (connection refused, DNS, TLS).
    Network,
    /// The response was not the expected JSON shape.
    Decode,
    /// Any other provider-reported failure.
    Provider,
}

impl FailureKind {
    /// Whether this failure class rotates to the next credential.
    ///
    /// Deliberately narrow: timeouts and transport failures do not
    /// rotate, matching the original behaviour.
    pub fn rotates_credential(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::AuthFailed | Self::InvalidRequest
        )
    }

    /// Stable SCREAMING_SNAKE_CASE code for this class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateLimited => "RATE_LIMITED",
            Self::AuthFailed => "AUTH_FAILED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Timeout => "TIMEOUT",
            Self::Network => "NETWORK",
            Self::Decode => "DECODE",
            Self::Provider => "PROVIDER",
        }
    }
}

/// A classified completion failure.
#[derive(Debug, Clone, thiserror::Error)]
#[error("[{}] {message}", .kind.code())]
pub struct TransportError {
    /// The failure class, decided at the transport boundary.
    pub kind: FailureKind,
    /// Displayable message; never contains credentials.
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A unit that issues exactly one completion request per call.
///
/// The seam between retry policy and HTTP: production uses
/// [`HttpCompletionTransport`], tests substitute scripted transports.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Request one completion using `credential` as the bearer token,
    /// returning the raw completion text.
    async fn complete(
        &self,
        credential: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TransportError>;
}

/// Reqwest-backed transport for an OpenAI-compatible completion API.
#[derive(Debug, Clone)]
pub struct HttpCompletionTransport {
    config: SummaryConfig,
}

impl HttpCompletionTransport {
    /// Create a transport from validated summary configuration.
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_url)
    }
}

#[async_trait]
impl CompletionTransport for HttpCompletionTransport {
    async fn complete(
        &self,
        credential: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, TransportError> {
        let body = build_completion_body(&self.config, system_prompt, user_prompt);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .build()
            .map_err(|e| {
                TransportError::new(FailureKind::Network, format!("failed to build client: {e}"))
            })?;

        tracing::trace!(model = %self.config.api_model, "completion request");

        let response = client
            .post(self.endpoint())
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await
            .map_err(classify_reqwest)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_reqwest)?;

        if !status.is_success() {
            return Err(classify_provider_failure(status.as_u16(), &text));
        }

        decode_completion(&text)
    }
}

/// Build the JSON request body for the Chat Completions API.
pub(crate) fn build_completion_body(
    config: &SummaryConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> serde_json::Value {
    serde_json::json!({
        "model": config.api_model,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_prompt },
        ],
        "temperature": config.temperature,
        "top_p": config.top_p,
        "max_tokens": config.max_tokens,
        "stop": serde_json::Value::Null,
        "stream": false,
    })
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Decode a successful completion response to its first choice's text.
pub(crate) fn decode_completion(body: &str) -> Result<String, TransportError> {
    let response: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        TransportError::new(FailureKind::Decode, format!("completion response: {e}"))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            TransportError::new(
                FailureKind::Decode,
                "completion response has no message content",
            )
        })
}

fn classify_reqwest(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::new(FailureKind::Timeout, format!("completion request: {err}"))
    } else {
        TransportError::new(FailureKind::Network, format!("completion request: {err}"))
    }
}

/// Classify a non-2xx provider response.
///
/// HTTP status decides first; the provider's error message is the
/// fallback, matched against the three historical substrings
/// (case-sensitive, as the original did).
pub(crate) fn classify_provider_failure(status: u16, body: &str) -> TransportError {
    let message = provider_error_message(body)
        .unwrap_or_else(|| format!("status {status}"));

    let kind = match status {
        429 => FailureKind::RateLimited,
        401 | 403 => FailureKind::AuthFailed,
        _ => {
            if message.contains("rate limit") {
                FailureKind::RateLimited
            } else if message.contains("authentication") {
                FailureKind::AuthFailed
            } else if message.contains("invalid") {
                FailureKind::InvalidRequest
            } else {
                FailureKind::Provider
            }
        }
    };

    TransportError::new(kind, message)
}

/// Pull `error.message` (or a bare `error` string) out of a provider
/// error body, if it is JSON at all.
fn provider_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_owned),
        None => None,
    }
}
