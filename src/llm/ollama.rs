//! Ollama HTTP backend (local inference server).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{require_text, GenerationError, Result, TextGenerator};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const OLLAMA_DEFAULT_MODEL: &str = "qwen2.5:3b";

pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaGenerator {
    pub fn new() -> Self {
        Self::with_base_url(OLLAMA_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: OLLAMA_DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// `/api/generate` has no system channel; the instruction leads the prompt.
fn single_prompt(system_instruction: Option<&str>, prompt: &str) -> String {
    match system_instruction {
        Some(system) if !system.trim().is_empty() => format!("{}\n\n{}", system, prompt),
        _ => prompt.to_string(),
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: single_prompt(system_instruction, prompt),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError { status, body });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        require_text(self.name(), body.response)
    }
}
