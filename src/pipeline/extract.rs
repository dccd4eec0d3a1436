//! Extraction stage: whiteboard image → literal transcript.
//!
//! One vision-model call with the fixed transcription instruction. The
//! model's answer is the transcript, verbatim — no post-processing, no
//! validation of its content. A bad reading flows through to the analysis
//! stage, which is the intended trade-off: the extraction model is the only
//! component that saw the pixels, so second-guessing it here has nothing to
//! stand on.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::pipeline::normalize::DecodedImage;
use crate::prompts::EXTRACTION_PROMPT;
use crate::provider::{GenerationRequest, ModelProvider};

/// Transcription wants fidelity, not creativity. Kept low and fixed,
/// independent of the analysis-stage temperature.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Read the whiteboard into a transcript via the vision provider.
///
/// # Errors
/// [`AnalyzeError::ModelInvocation`] if the call fails or returns an empty
/// response. Not retried.
pub async fn extract_content(
    provider: &dyn ModelProvider,
    image: &DecodedImage,
    config: &AnalysisConfig,
) -> Result<String, AnalyzeError> {
    let prompt = config
        .extraction_prompt
        .as_deref()
        .unwrap_or(EXTRACTION_PROMPT);

    let transcript = provider
        .generate(GenerationRequest {
            prompt,
            image: Some(image),
            temperature: EXTRACTION_TEMPERATURE,
            max_tokens: config.max_tokens,
        })
        .await?;

    debug!(
        provider = provider.name(),
        chars = transcript.len(),
        "extraction complete"
    );
    Ok(transcript)
}
