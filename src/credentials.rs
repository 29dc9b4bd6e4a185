//! Credential pool for the completion API.
//!
//! An ordered, fixed-size set of interchangeable bearer tokens used for
//! load-spreading and failover on rate-limit/auth failures. Keys are
//! resolved from the environment at startup — never embedded in source
//! or config files — and exist only for the lifetime of the process.

use crate::error::LanternError;

/// Default environment variable holding the comma-separated key list.
pub const DEFAULT_CREDENTIALS_VAR: &str = "LANTERN_API_KEYS";

/// An ordered pool of opaque bearer tokens.
///
/// The pool itself is read-only data; only a per-request index advances
/// (forward, never past the pool size) during a summarization attempt
/// chain. The `Debug` impl reports the key count only so pools can be
/// logged without leaking secrets.
#[derive(Clone)]
pub struct CredentialPool {
    keys: Vec<String>,
}

impl std::fmt::Debug for CredentialPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPool")
            .field("keys", &format!("<{} redacted>", self.keys.len()))
            .finish()
    }
}

impl CredentialPool {
    /// Build a pool from an explicit key list.
    ///
    /// Keys are trimmed; empty entries are dropped. An empty pool is a
    /// configuration error.
    pub fn from_keys<I, S>(keys: I) -> Result<Self, LanternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(Into::into)
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return Err(LanternError::Config(
                "credential pool must contain at least one key".into(),
            ));
        }
        Ok(Self { keys })
    }

    /// Resolve the pool from a comma-separated environment variable.
    ///
    /// # Errors
    ///
    /// Returns a config error if the variable is missing, empty, or
    /// contains no usable keys. The variable name appears in the error;
    /// its value never does.
    pub fn from_env(var: &str) -> Result<Self, LanternError> {
        let raw = std::env::var(var).map_err(|_| {
            LanternError::Config(format!("credential env var is missing: {var}"))
        })?;
        Self::from_keys(raw.split(',')).map_err(|_| {
            LanternError::Config(format!("credential env var has no usable keys: {var}"))
        })
    }

    /// Number of keys in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// A constructed pool is never empty, but the standard pair keeps
    /// clippy and callers honest.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key at `index`, if the pool has one.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }
}
