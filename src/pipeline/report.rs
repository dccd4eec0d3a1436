//! Analysis stage: transcript (or image) → structured brief.
//!
//! Two entry points for the two pipeline variants. Both run at the fixed
//! generation parameters from [`AnalysisConfig`] (0.7 temperature,
//! 2000-token ceiling by default) and return the model's text untouched —
//! the section structure is requested by the prompt, not enforced on the
//! way out. Model output is natural language; callers treat the section
//! layout as best effort.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::pipeline::normalize::DecodedImage;
use crate::prompts::{analysis_prompt, SINGLE_STAGE_PROMPT};
use crate::provider::{GenerationRequest, ModelProvider};

/// Turn an extraction transcript into the six-section brief.
///
/// The transcript is embedded verbatim in the prompt; no image travels with
/// this call.
pub async fn analyze_transcript(
    provider: &dyn ModelProvider,
    transcript: &str,
    config: &AnalysisConfig,
) -> Result<String, AnalyzeError> {
    let prompt = analysis_prompt(transcript);

    let report = provider
        .generate(GenerationRequest {
            prompt: &prompt,
            image: None,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
        .await?;

    debug!(
        provider = provider.name(),
        chars = report.len(),
        "analysis complete"
    );
    Ok(report)
}

/// Single-stage variant: the model reads the image directly and produces the
/// reduced five-section report.
pub async fn analyze_image(
    provider: &dyn ModelProvider,
    image: &DecodedImage,
    config: &AnalysisConfig,
) -> Result<String, AnalyzeError> {
    let report = provider
        .generate(GenerationRequest {
            prompt: SINGLE_STAGE_PROMPT,
            image: Some(image),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
        .await?;

    debug!(
        provider = provider.name(),
        chars = report.len(),
        "single-stage analysis complete"
    );
    Ok(report)
}
