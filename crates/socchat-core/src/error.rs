//! Error types for the chat enrichment pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole pipeline.
///
/// Every failure is local to a single submission: the session mutator turns
/// enrichment failures into a degraded assistant reply and validation failures
/// into inline feedback, so none of these variants tear down a session.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatError {
    /// Input rejected by the format-acceptance rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Threat-intelligence lookup failed.
    #[error("Enrichment error ({kind}): {message}")]
    Enrichment {
        kind: String,
        message: String,
        retryable: bool,
    },

    /// Lookup did not resolve within the configured deadline.
    #[error("Enrichment timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    /// Submission discarded because the session was torn down.
    #[error("Submission cancelled: {0}")]
    Cancelled(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Enrichment error that may succeed on a later attempt.
    pub fn transient(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Enrichment {
            kind: kind.into(),
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates an Enrichment error that retrying will not fix.
    pub fn terminal(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Enrichment {
            kind: kind.into(),
            message: message.into(),
            retryable: false,
        }
    }

    /// Creates a Cancelled error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an enrichment failure (including timeouts)
    pub fn is_enrichment(&self) -> bool {
        matches!(self, Self::Enrichment { .. } | Self::Timeout { .. })
    }

    /// Check if this is a Cancelled error
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Whether another lookup attempt may succeed.
    ///
    /// Timeouts count as transient; everything else outside
    /// `Enrichment { retryable: true }` does not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Enrichment { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ChatError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;
