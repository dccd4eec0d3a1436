//! Model provider abstraction.
//!
//! Each provider is reduced to one capability: generate text from a prompt
//! and an optional image, or fail. Keeping the surface this narrow means the
//! two concrete clients ([`gemini::GeminiProvider`] and
//! [`openai::OpenAiProvider`]) are interchangeable behind
//! `Arc<dyn ModelProvider>`, and tests can swap in deterministic doubles
//! without touching the pipeline.

pub mod gemini;
pub mod openai;

use async_trait::async_trait;

use crate::error::AnalyzeError;
use crate::pipeline::normalize::DecodedImage;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// One text-generation call: prompt, optional image, generation parameters.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub image: Option<&'a DecodedImage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A generative model client.
///
/// Implementations make exactly one outbound call per [`generate`] and map
/// every failure mode — transport, non-success status, malformed body, empty
/// completion — to [`AnalyzeError::ModelInvocation`]. Nothing is retried.
///
/// [`generate`]: ModelProvider::generate
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Generate text for the request, or fail.
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, AnalyzeError>;
}

/// Reject empty completions.
///
/// Both providers treat a blank response the same as a failed call: the
/// pipeline has nothing to hand to the next stage, so surfacing it as a
/// provider error keeps the success invariant (`success=true` implies a
/// non-empty report).
pub(crate) fn ensure_non_empty(provider: &str, text: String) -> Result<String, AnalyzeError> {
    if text.trim().is_empty() {
        return Err(AnalyzeError::ModelInvocation {
            provider: provider.to_string(),
            detail: "model returned an empty completion".to_string(),
        });
    }
    Ok(text)
}
