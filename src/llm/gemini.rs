//! Google Gemini HTTP backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use super::provider::{require_text, GenerationError, Result, TextGenerator};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

pub struct GeminiGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiGenerator {
    /// Build a backend from a configured key, falling back to the environment.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .filter(|k| is_usable_key(k))
            .or_else(|| env::var(GEMINI_API_KEY_ENV).ok().filter(|k| is_usable_key(k)));

        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn get_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            GenerationError::NotConfigured(format!("no LLM token configured and {} not set", GEMINI_API_KEY_ENV))
        })
    }
}

/// Setup stores a sentinel when the user skips the token prompt.
fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != crate::config::LLM_TOKEN_SKIPPED && key != "dont-ask"
}

fn text_content(role: Option<&str>, text: &str) -> Content {
    Content {
        role: role.map(str::to_string),
        parts: vec![Part { text: text.to_string() }],
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, system_instruction: Option<&str>, prompt: &str) -> Result<String> {
        let api_key = self.get_api_key()?;

        let request = GenerateRequest {
            system_instruction: system_instruction.map(|s| text_content(None, s)),
            contents: vec![text_content(Some("user"), prompt)],
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", api_key)
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

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        require_text(self.name(), text)
    }
}
