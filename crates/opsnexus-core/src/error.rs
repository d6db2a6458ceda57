//! Error types for the Nexus core.

use thiserror::Error;

/// `GenerationFailed` reason for a reply that parsed but carried no text.
pub const EMPTY_OUTPUT_REASON: &str = "model returned no text";

/// Result type alias for text generation.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Why a generation call produced no text. Both kinds degrade to display text at the edge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API credential was configured at startup.
    #[error("LLM gateway is not configured (missing API key)")]
    ConfigurationMissing,

    /// Transport, status, parse, or empty-output failure. `reason` is for logs only.
    #[error("generation failed: {reason}")]
    GenerationFailed { reason: String },
}

impl GenerationError {
    pub fn failed(reason: impl Into<String>) -> Self {
        GenerationError::GenerationFailed {
            reason: reason.into(),
        }
    }

    pub fn is_empty_output(&self) -> bool {
        matches!(self, GenerationError::GenerationFailed { reason } if reason == EMPTY_OUTPUT_REASON)
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::failed(format!("request: {}", err))
    }
}

/// Rejected operator input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
}
