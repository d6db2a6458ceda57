//! Gemini client: `generateContent` over reqwest.
//!
//! API key: `API_KEY` (or `GEMINI_API_KEY`) in the environment or `.env`. Without one the
//! client still constructs and every call returns [`GenerationError::ConfigurationMissing`]
//! without touching the network.

use crate::config::{api_key_from_env, LlmSettings};
use crate::error::{GenerationError, GenerationResult, EMPTY_OUTPUT_REASON};
use crate::llm_gateway::LlmGateway;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default()
    }
}

/// Hosted model client. Cheap to share behind an `Arc`.
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

/// Falls back to a default client (no timeout) when the configured one cannot be built.
fn client_or_default(built: reqwest::Result<reqwest::Client>) -> reqwest::Client {
    built.unwrap_or_else(|e| {
        tracing::warn!("Gemini HTTP client build failed ({}); using defaults without timeout", e);
        reqwest::Client::new()
    })
}

impl GeminiClient {
    /// Client from settings, with the credential read from the environment.
    pub fn from_env(settings: &LlmSettings) -> Self {
        Self::new(api_key_from_env(), settings)
    }

    /// Client with an explicit credential. `None` or a blank key means unconfigured.
    pub fn new(api_key: Option<String>, settings: &LlmSettings) -> Self {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!("Gemini API key is missing; generation actions will report it as not configured");
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = client_or_default(builder.build());

        Self {
            api_key,
            model: settings.model.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn request(&self, api_key: &str, prompt: &str) -> GenerationResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(GenerationError::failed(format!("Gemini API error {}: {}", status, text)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::failed(format!("response parse: {}", e)))?;
        let output = parsed.into_text();
        if output.trim().is_empty() {
            return Err(GenerationError::failed(EMPTY_OUTPUT_REASON));
        }
        Ok(output)
    }
}

#[async_trait::async_trait]
impl LlmGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::ConfigurationMissing);
        };

        tracing::info!(model = %self.model, prompt_chars = prompt.chars().count(), "Gemini generation requested");
        let result = self.request(api_key, prompt).await;
        match &result {
            Ok(text) => tracing::debug!(chars = text.chars().count(), "Gemini generation finished"),
            Err(e) => tracing::error!("Gemini API error: {}", e),
        }
        result
    }
}
