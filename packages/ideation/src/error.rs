//! Typed errors for the ideation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only topic
//! validation surfaces to callers of the pipeline; every other variant is
//! produced by an external source and absorbed by the core.

use thiserror::Error;

/// Errors that can occur while talking to idea or evidence sources.
#[derive(Debug, Error)]
pub enum IdeationError {
    /// Topic rejected before any work is done
    #[error("invalid topic: {reason}")]
    InvalidTopic { reason: String },

    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Upstream answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Upstream payload parsed but had an unusable shape
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Generator or search client failed
    #[error("upstream error: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IdeationError {
    /// Create an invalid-topic error.
    pub fn invalid_topic(reason: impl Into<String>) -> Self {
        Self::InvalidTopic {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for IdeationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

#[cfg(feature = "gemini")]
impl From<gemini_client::GeminiError> for IdeationError {
    fn from(err: gemini_client::GeminiError) -> Self {
        Self::Upstream(Box::new(err))
    }
}

/// Result type alias for ideation operations.
pub type Result<T> = std::result::Result<T, IdeationError>;
