//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Tiers
//!
//! - **Retrieval**: locator validation and clone failures. Fatal to the
//!   run and surfaced to the caller with detail (HTTP 400).
//! - **Everything else**: internal failures that must never leak detail
//!   to the caller (HTTP 500 with a generic message).
//! - Per-file and per-manifest failures inside the analyzers are not
//!   errors at all: they degrade into [`crate::types::AnalysisWarning`]s.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Retrieval Error
// =============================================================================

/// Failures while validating a locator or obtaining a local copy.
///
/// These abort the orchestration run before any analysis happens and are
/// the only errors whose message is shown to the caller verbatim.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid repository locator: {0}")]
    InvalidLocator(String),

    #[error("unsupported host '{0}': only github.com repositories are supported")]
    UnsupportedHost(String),

    #[error("failed to clone repository: {0}")]
    CloneFailed(String),

    #[error("repository clone produced no content")]
    EmptyClone,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum RepoLensError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis error: {0}")]
    Analysis(String),
}

pub type Result<T> = std::result::Result<T, RepoLensError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl RepoLensError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create an LLM API error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::LlmApi(message.into())
    }

    /// Whether this error is the caller's fault (bad locator, private or
    /// missing repository) rather than an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Retrieval(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_is_client_error() {
        let err: RepoLensError =
            RetrievalError::InvalidLocator("missing owner/repo".to_string()).into();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_is_not_client_error() {
        assert!(!RepoLensError::Analysis("walk failed".to_string()).is_client_error());
        assert!(!RepoLensError::llm("provider down").is_client_error());
    }

    #[test]
    fn test_retrieval_display_keeps_detail() {
        let err = RetrievalError::UnsupportedHost("gitlab.com".to_string());
        assert!(err.to_string().contains("gitlab.com"));
        assert!(err.to_string().contains("github.com"));
    }

    #[test]
    fn test_timeout_constructor() {
        let err = RepoLensError::timeout("overview generation", Duration::from_secs(60));
        assert!(err.to_string().contains("overview generation"));
    }
}
