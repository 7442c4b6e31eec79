//! Text generation backend trait.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// How a backend failure should be read by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport trouble, overload or rate limiting. Trying again later may work.
    RetryableLocal,
    /// The backend answered and refused, or cannot be used at all.
    TerminalRemote,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::HttpError(_) => FailureKind::RetryableLocal,
            GenerationError::ApiError { status, .. } if *status == 429 || *status >= 500 => {
                FailureKind::RetryableLocal
            }
            GenerationError::ApiError { .. }
            | GenerationError::NotConfigured(_)
            | GenerationError::Malformed(_) => FailureKind::TerminalRemote,
        }
    }
}

/// Accept a backend reply only if it has visible text.
pub(crate) fn require_text(backend: &str, text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(GenerationError::Malformed(format!("{} returned no text", backend)));
    }
    Ok(text)
}

/// A text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name used in logs.
    fn name(&self) -> &str;

    /// Generate text for `prompt`, optionally steered by a system instruction.
    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String>;
}
