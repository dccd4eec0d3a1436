//! Gemini client: the vision-capable provider.
//!
//! Talks to the `generateContent` REST endpoint directly. Images travel as
//! base64 `inline_data` parts next to the text prompt; generation parameters
//! map onto `generationConfig`. The response text sits at
//! `candidates[0].content.parts[0].text` — anything else in the body is
//! ignored.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::AnalyzeError;
use crate::provider::{ensure_non_empty, GenerationRequest, ModelProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for Google's Gemini `generateContent` API.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    /// Default vision-capable model, matching the original deployment.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

    /// Create a client for `model`. A missing key is not an error here —
    /// the first [`ModelProvider::generate`] call will fail instead.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    fn invocation_error(&self, detail: impl Into<String>) -> AnalyzeError {
        AnalyzeError::ModelInvocation {
            provider: self.name().to_string(),
            detail: detail.into(),
        }
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, AnalyzeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| self.invocation_error("GEMINI_API_KEY is not set"))?;

        let mut parts = vec![json!({ "text": request.prompt })];
        if let Some(image) = request.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.media_type,
                    "data": STANDARD.encode(&image.bytes),
                }
            }));
        }

        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            },
        });

        debug!(model = %self.model, has_image = request.image.is_some(), "calling gemini");
        let response = self
            .client
            .post(format!("{API_BASE}/{}:generateContent?key={api_key}", self.model))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.invocation_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(self.invocation_error(format!("HTTP {status}: {detail}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| self.invocation_error(format!("invalid JSON response: {e}")))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| self.invocation_error("response carried no candidate text"))?;

        ensure_non_empty(self.name(), text.to_string())
    }
}
