//! Pipeline coordinator: the primary entry point of the library.
//!
//! One request moves through a strictly linear state machine:
//!
//! ```text
//! Idle ──▶ Normalizing ──▶ Extracting ──▶ Analyzing ──▶ Succeeded
//!               │               │              │
//!               └───────────────┴──────────────┴──────▶ Failed
//! ```
//!
//! There are no loops, no branches beyond the two pipeline variants, and no
//! retries: the first failing stage aborts the run via `?` and the caller
//! receives that stage's error with no partial data. Single-stage mode is
//! the degenerate case that skips `Extracting` entirely.
//!
//! The two model calls within a request can never overlap — the analysis
//! prompt embeds the transcript, so it cannot be built before extraction
//! returns. Distinct requests run concurrently and share nothing but the
//! read-only configuration passed in.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, PipelineMode, ProviderCredentials};
use crate::error::AnalyzeError;
use crate::pipeline::{extract, normalize, report};
use crate::provider::{GeminiProvider, ModelProvider, OpenAiProvider};

/// Progress of one pipeline invocation. Transitions are strictly linear;
/// `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Normalizing,
    Extracting,
    Analyzing,
    Succeeded,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Normalizing => "normalizing",
            Stage::Extracting => "extracting",
            Stage::Analyzing => "analyzing",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The successful outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhiteboardAnalysis {
    /// The structured brief, exactly as the language model produced it.
    pub analysis: String,
    /// The extraction transcript. `None` in single-stage mode.
    pub extracted_content: Option<String>,
}

/// Analyse a whiteboard capture.
///
/// `payload` is the transport-encoded image string as received (optionally a
/// `data:` URL); `None` models an absent request field.
///
/// # Errors
/// The first failing stage's [`AnalyzeError`], with no partial results:
/// a payload problem surfaces before any model call, an extraction failure
/// surfaces before the analysis provider is touched.
pub async fn analyze(
    payload: Option<&str>,
    config: &AnalysisConfig,
    credentials: &ProviderCredentials,
) -> Result<WhiteboardAnalysis, AnalyzeError> {
    let started = Instant::now();
    let outcome = run(payload, config, credentials).await;

    match &outcome {
        Ok(result) => info!(
            stage = %Stage::Succeeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            report_chars = result.analysis.len(),
            "analysis complete"
        ),
        Err(e) => warn!(stage = %Stage::Failed, error = %e, "analysis aborted"),
    }

    outcome
}

async fn run(
    payload: Option<&str>,
    config: &AnalysisConfig,
    credentials: &ProviderCredentials,
) -> Result<WhiteboardAnalysis, AnalyzeError> {
    debug!(stage = %Stage::Normalizing, "decoding image payload");
    let image = normalize::decode_payload(payload)?;

    match config.mode {
        PipelineMode::TwoStage => {
            let vision = resolve_vision_provider(config, credentials);
            debug!(stage = %Stage::Extracting, provider = vision.name(), model = %config.extraction_model);
            let transcript = extract::extract_content(vision.as_ref(), &image, config).await?;

            let language = resolve_language_provider(config, credentials);
            debug!(stage = %Stage::Analyzing, provider = language.name(), model = %config.analysis_model);
            let analysis =
                report::analyze_transcript(language.as_ref(), &transcript, config).await?;

            Ok(WhiteboardAnalysis {
                analysis,
                extracted_content: Some(transcript),
            })
        }
        PipelineMode::SingleStage => {
            let vision = resolve_vision_provider(config, credentials);
            debug!(stage = %Stage::Analyzing, provider = vision.name(), model = %config.extraction_model);
            let analysis = report::analyze_image(vision.as_ref(), &image, config).await?;

            Ok(WhiteboardAnalysis {
                analysis,
                extracted_content: None,
            })
        }
    }
}

// ── Provider resolution ──────────────────────────────────────────────────

/// A pre-built provider on the config wins; otherwise construct the Gemini
/// client from the startup credentials. Construction never fails — a missing
/// key surfaces on first use as [`AnalyzeError::ModelInvocation`].
fn resolve_vision_provider(
    config: &AnalysisConfig,
    credentials: &ProviderCredentials,
) -> Arc<dyn ModelProvider> {
    match &config.vision_provider {
        Some(provider) => Arc::clone(provider),
        None => Arc::new(GeminiProvider::new(
            credentials.gemini_api_key.clone(),
            config.extraction_model.clone(),
        )),
    }
}

fn resolve_language_provider(
    config: &AnalysisConfig,
    credentials: &ProviderCredentials,
) -> Arc<dyn ModelProvider> {
    match &config.language_provider {
        Some(provider) => Arc::clone(provider),
        None => Arc::new(OpenAiProvider::new(
            credentials.openai_api_key.clone(),
            config.analysis_model.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_is_lowercase() {
        assert_eq!(Stage::Extracting.to_string(), "extracting");
        assert_eq!(Stage::Failed.to_string(), "failed");
    }

    #[test]
    fn default_stage_is_idle() {
        assert_eq!(Stage::default(), Stage::Idle);
    }

    #[test]
    fn resolvers_fall_back_to_real_clients() {
        let config = AnalysisConfig::default();
        let credentials = ProviderCredentials::default();
        assert_eq!(resolve_vision_provider(&config, &credentials).name(), "gemini");
        assert_eq!(
            resolve_language_provider(&config, &credentials).name(),
            "openai"
        );
    }
}
