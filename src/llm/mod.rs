//! Text generation backends.

use std::sync::Arc;

pub mod gemini;
pub mod ollama;
pub mod provider;

pub use provider::{FailureKind, GenerationError, Result, TextGenerator};

use crate::config::Settings;

/// Hosted backend, tried first.
pub fn primary_generator(settings: &Settings) -> Arc<dyn TextGenerator> {
    Arc::new(gemini::GeminiGenerator::new(settings.llm_token.clone()))
}

/// Local backend used when the hosted one fails.
pub fn fallback_generator() -> Arc<dyn TextGenerator> {
    Arc::new(ollama::OllamaGenerator::new())
}
