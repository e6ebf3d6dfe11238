//! Gemini API client - calls the hosted generateContent endpoint

use crate::agent::response::{ModelError, ModelResponse, TokenUsage};
use crate::agent::{ModelClient, ModelRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Client for the hosted Gemini model API
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build a client from environment variables.
    ///
    /// Reads `GEMINI_API_KEY` (required) and `GEMINI_MODEL` (optional).
    /// Call this once at process start and pass the client down; credentials
    /// are never re-read mid-run.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ModelError::Credentials(format!("{} is not set", API_KEY_ENV)))?;

        let mut client = Self::new(api_key);
        if let Ok(model) = std::env::var(MODEL_ENV) {
            client = client.with_model(model);
        }
        Ok(client)
    }

    #[cfg(test)]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = GenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: request.instruction.clone(),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.input.clone(),
                }],
            }],
        };

        debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Api(format!("request failed: {}", e)))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ModelError::Api(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(%status, "model API returned an error");
            return Err(ModelError::Api(format!(
                "model API error ({}): {}",
                status,
                raw.trim()
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| ModelError::Internal(format!("failed to decode model response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ModelError::Api("model response contained no text".to_string()))?;

        debug!(bytes = text.len(), "model returned text");

        Ok(ModelResponse {
            text,
            usage: parsed.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
        })
    }
}
