//! Configuration types for whiteboard analysis.
//!
//! All pipeline behaviour is controlled through [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`] and constructed once at process start.
//! Provider credentials live in their own [`ProviderCredentials`] struct,
//! also read once at startup and passed by reference into the pipeline —
//! nothing is looked up from the environment mid-request.

use std::fmt;
use std::sync::Arc;

use crate::error::AnalyzeError;
use crate::provider::ModelProvider;

/// Which pipeline variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// Extract a transcript with the vision model, then analyse the
    /// transcript with the language model. The response carries both.
    #[default]
    TwoStage,
    /// Analyse the image directly with the vision model using the reduced
    /// five-section prompt. No transcript is produced.
    SingleStage,
}

/// API credentials for the two model providers.
///
/// Read from the process environment exactly once at startup. Absence is not
/// an error at this point: the matching provider fails on first use instead,
/// so a two-stage deployment missing one key still starts (and says so in
/// the log).
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl ProviderCredentials {
    /// Read `GEMINI_API_KEY` and `OPENAI_API_KEY`. Blank values count as
    /// absent.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            gemini_api_key: read("GEMINI_API_KEY"),
            openai_api_key: read("OPENAI_API_KEY"),
        }
    }

    /// Log a warning for each absent credential. Called once at startup so
    /// a misconfigured deployment is visible before the first request fails.
    pub fn log_missing(&self) {
        if self.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; extraction calls will fail");
        }
        if self.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; analysis calls will fail");
        }
    }
}

/// Configuration for the analysis pipeline.
///
/// Built via [`AnalysisConfig::builder()`] or [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use board2brief::{AnalysisConfig, PipelineMode};
///
/// let config = AnalysisConfig::builder()
///     .mode(PipelineMode::SingleStage)
///     .temperature(0.7)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Pipeline variant. Default: [`PipelineMode::TwoStage`].
    pub mode: PipelineMode,

    /// Vision model used for extraction (and for single-stage analysis).
    /// Default: `gemini-2.0-flash`.
    pub extraction_model: String,

    /// Language model used for the two-stage analysis. Default: `gpt-4o-mini`.
    pub analysis_model: String,

    /// Sampling temperature for the analysis stage. Default: 0.7.
    ///
    /// The report is generative, not transcriptive: some creativity makes
    /// recommendations and next steps less formulaic. Extraction runs at its
    /// own fixed low temperature — see [`crate::pipeline::extract`].
    pub temperature: f32,

    /// Output-token ceiling per model call. Default: 2000.
    ///
    /// A six-section brief of a dense whiteboard fits comfortably; setting
    /// this lower truncates the report mid-section.
    pub max_tokens: u32,

    /// Custom extraction instruction. If None, uses
    /// [`crate::prompts::EXTRACTION_PROMPT`].
    pub extraction_prompt: Option<String>,

    /// Pre-constructed vision provider. Takes precedence over
    /// `extraction_model` + credentials; used by tests to inject doubles.
    pub vision_provider: Option<Arc<dyn ModelProvider>>,

    /// Pre-constructed language provider. Takes precedence over
    /// `analysis_model` + credentials; used by tests to inject doubles.
    pub language_provider: Option<Arc<dyn ModelProvider>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            extraction_model: crate::provider::GeminiProvider::DEFAULT_MODEL.to_string(),
            analysis_model: crate::provider::OpenAiProvider::DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            extraction_prompt: None,
            vision_provider: None,
            language_provider: None,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("mode", &self.mode)
            .field("extraction_model", &self.extraction_model)
            .field("analysis_model", &self.analysis_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field(
                "vision_provider",
                &self.vision_provider.as_ref().map(|p| p.name()),
            )
            .field(
                "language_provider",
                &self.language_provider.as_ref().map(|p| p.name()),
            )
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn mode(mut self, mode: PipelineMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn extraction_model(mut self, model: impl Into<String>) -> Self {
        self.config.extraction_model = model.into();
        self
    }

    pub fn analysis_model(mut self, model: impl Into<String>) -> Self {
        self.config.analysis_model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn extraction_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.extraction_prompt = Some(prompt.into());
        self
    }

    pub fn vision_provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.config.vision_provider = Some(provider);
        self
    }

    pub fn language_provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.config.language_provider = Some(provider);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalyzeError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(AnalyzeError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.extraction_model.trim().is_empty() || c.analysis_model.trim().is_empty() {
            return Err(AnalyzeError::InvalidConfig(
                "model identifiers must be non-empty".into(),
            ));
        }
        Ok(self.config)
    }
}
