//! Error types for the Tierbot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

use crate::request::Tier;

/// The top-level error type for all Tierbot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Backend errors ---
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    // --- Dispatch errors ---
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    // --- Direct action errors ---
    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    // --- Profile pipeline errors ---
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised at the chat-backend boundary.
///
/// Economy-tier callers absorb these into a degraded [`crate::Insight`];
/// premium-tier callers escalate them as fatal.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by backend, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty completion from backend '{0}'")]
    EmptyCompletion(String),
}

/// Errors from the tier dispatch machinery.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The premium ceiling would be exceeded. Distinct so callers can decide
    /// to override or abort — never silently downgraded to a cheaper tier.
    #[error(
        "Premium budget exceeded: spent ${spent_usd:.4} of ${ceiling_usd:.4}, \
         estimated ${estimated_usd:.4} more"
    )]
    BudgetExceeded {
        spent_usd: f64,
        ceiling_usd: f64,
        estimated_usd: f64,
    },

    /// A second premium invocation was attempted within one pipeline run.
    #[error("Premium tier already invoked this run (one invocation per run without override)")]
    InvocationLimit,

    /// A premium-tier backend failure. Fatal for the enclosing pipeline run.
    #[error("Premium backend failed: {0}")]
    FatalBackend(#[source] BackendError),

    #[error("No executor available for tier {0}")]
    NoExecutor(Tier),
}

/// Errors from direct-tier local actions.
///
/// These surface the underlying failure unchanged — local actions are
/// never retried.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    Unknown(String),

    #[error("Action '{action}' failed: {reason}")]
    Failed { action: String, reason: String },

    #[error("Command exited with code {code}: {output}")]
    NonZeroExit { code: i32, output: String },

    #[error("Action '{action}' timed out after {timeout_secs}s")]
    Timeout { action: String, timeout_secs: u64 },

    #[error("Command '{0}' not in allowlist")]
    NotAllowed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors from the profile pipeline and store.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The single premium synthesis call failed; nothing was persisted.
    #[error("Profile synthesis failed: {0}")]
    SynthesisFailed(#[source] DispatchError),

    #[error("No profile exists yet — run a build first")]
    NotBuilt,

    #[error("Profile storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_correctly() {
        let err = Error::Backend(BackendError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn budget_exceeded_displays_amounts() {
        let err = DispatchError::BudgetExceeded {
            spent_usd: 0.95,
            ceiling_usd: 1.0,
            estimated_usd: 0.10,
        };
        let text = err.to_string();
        assert!(text.contains("0.9500"));
        assert!(text.contains("1.0000"));
        assert!(text.contains("0.1000"));
    }

    #[test]
    fn fatal_backend_keeps_source() {
        use std::error::Error as _;
        let err = DispatchError::FatalBackend(BackendError::Network("conn refused".into()));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Premium backend failed"));
    }

    #[test]
    fn action_error_displays_correctly() {
        let err = Error::Action(ActionError::NonZeroExit {
            code: 2,
            output: "no such file".into(),
        });
        assert!(err.to_string().contains("2"));
        assert!(err.to_string().contains("no such file"));
    }
}
