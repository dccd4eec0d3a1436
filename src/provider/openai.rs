//! OpenAI client: the language-model provider for the analysis stage.
//!
//! Talks to `chat/completions` directly. When an image is attached the user
//! message becomes a content-parts array with an `image_url` data URI, the
//! multimodal form the API shares with plain-text requests; otherwise the
//! content is the bare prompt string. The completion text sits at
//! `choices[0].message.content`.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::AnalyzeError;
use crate::provider::{ensure_non_empty, GenerationRequest, ModelProvider};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for OpenAI's chat completions API.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl OpenAiProvider {
    /// Default analysis model: cheap, fast, and good enough at turning a
    /// transcript into a structured brief.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

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
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, AnalyzeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| self.invocation_error("OPENAI_API_KEY is not set"))?;

        let content = match request.image {
            Some(image) => json!([
                { "type": "text", "text": request.prompt },
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!(
                            "data:{};base64,{}",
                            image.media_type,
                            STANDARD.encode(&image.bytes)
                        ),
                    }
                },
            ]),
            None => json!(request.prompt),
        };

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": content }],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        debug!(model = %self.model, has_image = request.image.is_some(), "calling openai");
        let response = self
            .client
            .post(API_URL)
            .bearer_auth(api_key)
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

        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| self.invocation_error("response carried no completion text"))?;

        ensure_non_empty(self.name(), text.to_string())
    }
}
