//! Pipeline integration tests driven by deterministic provider doubles.
//!
//! No network calls are made: both stages run against [`ScriptedProvider`],
//! which records what it was asked and replies from a script. Live-provider
//! coverage lives in `tests/live.rs` behind `E2E_ENABLED`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use board2brief::{
    analyze, AnalysisConfig, AnalyzeError, GenerationRequest, ModelProvider, PipelineMode,
    ProviderCredentials, ResultPayload,
};
use serde_json::json;

// ── Test doubles ─────────────────────────────────────────────────────────

/// A provider that replies from a script and records the request it saw.
struct ScriptedProvider {
    provider_name: &'static str,
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
    last_had_image: AtomicBool,
}

impl ScriptedProvider {
    fn replying(provider_name: &'static str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            provider_name,
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_had_image: AtomicBool::new(false),
        })
    }

    fn failing(provider_name: &'static str, detail: &str) -> Arc<Self> {
        Arc::new(Self {
            provider_name,
            reply: Err(detail.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_had_image: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.provider_name
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, AnalyzeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.to_string());
        self.last_had_image
            .store(request.image.is_some(), Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(AnalyzeError::ModelInvocation {
                provider: self.provider_name.to_string(),
                detail: detail.clone(),
            }),
        }
    }
}

fn two_stage_config(
    vision: &Arc<ScriptedProvider>,
    language: &Arc<ScriptedProvider>,
) -> AnalysisConfig {
    AnalysisConfig::builder()
        .vision_provider(Arc::clone(vision) as Arc<dyn ModelProvider>)
        .language_provider(Arc::clone(language) as Arc<dyn ModelProvider>)
        .build()
        .expect("valid config")
}

fn jpeg_data_url() -> String {
    let bytes: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

// ── Two-stage pipeline ───────────────────────────────────────────────────

#[tokio::test]
async fn two_stage_success_carries_report_and_transcript() {
    let vision = ScriptedProvider::replying("vision", "Transcript: buy milk");
    let language = ScriptedProvider::replying("language", "Summary: groceries");
    let config = two_stage_config(&vision, &language);

    let result = analyze(
        Some(&jpeg_data_url()),
        &config,
        &ProviderCredentials::default(),
    )
    .await
    .expect("pipeline must succeed");

    assert_eq!(result.analysis, "Summary: groceries");
    assert_eq!(result.extracted_content.as_deref(), Some("Transcript: buy milk"));
    assert_eq!(vision.calls(), 1);
    assert_eq!(language.calls(), 1);

    // The extraction call carries the image; the analysis call carries the
    // transcript verbatim instead.
    assert!(vision.last_had_image.load(Ordering::SeqCst));
    assert!(!language.last_had_image.load(Ordering::SeqCst));
    let analysis_prompt = language.last_prompt().expect("analysis prompt recorded");
    assert!(analysis_prompt.contains("Transcript: buy milk"));
}

#[tokio::test]
async fn two_stage_success_serialises_to_the_contract_shape() {
    let vision = ScriptedProvider::replying("vision", "Transcript: buy milk");
    let language = ScriptedProvider::replying("language", "Summary: groceries");
    let config = two_stage_config(&vision, &language);

    let payload = ResultPayload::from_result(
        analyze(
            Some(&jpeg_data_url()),
            &config,
            &ProviderCredentials::default(),
        )
        .await,
    );

    assert_eq!(payload.http_status(), 200);
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "success": true,
            "analysis": "Summary: groceries",
            "extracted_content": "Transcript: buy milk",
        })
    );
}

#[tokio::test]
async fn extraction_failure_short_circuits_the_analysis_stage() {
    let vision = ScriptedProvider::failing("vision", "HTTP 503: overloaded");
    let language = ScriptedProvider::replying("language", "never used");
    let config = two_stage_config(&vision, &language);

    let result = analyze(
        Some(&jpeg_data_url()),
        &config,
        &ProviderCredentials::default(),
    )
    .await;

    let err = result.expect_err("extraction failure must abort the pipeline");
    assert!(matches!(err, AnalyzeError::ModelInvocation { .. }));
    assert_eq!(vision.calls(), 1);
    assert_eq!(language.calls(), 0, "analysis stage must never be invoked");

    let payload = ResultPayload::from_result(Err(err));
    assert_eq!(payload.http_status(), 500);
    let value = serde_json::to_value(&payload).unwrap();
    assert!(value.get("success").is_none());
    assert!(value["error"].as_str().unwrap().contains("overloaded"));
}

#[tokio::test]
async fn analysis_failure_still_returns_no_partial_data() {
    let vision = ScriptedProvider::replying("vision", "Transcript: roadmap");
    let language = ScriptedProvider::failing("language", "HTTP 500");
    let config = two_stage_config(&vision, &language);

    let result = analyze(
        Some(&jpeg_data_url()),
        &config,
        &ProviderCredentials::default(),
    )
    .await;

    assert!(result.is_err(), "analysis failure must fail the run");
    let payload = ResultPayload::from_result(result);
    let value = serde_json::to_value(&payload).unwrap();
    // The transcript existed, but a failure response must not leak it.
    assert!(value.get("extracted_content").is_none());
    assert!(value.get("analysis").is_none());
}

// ── Input short-circuits ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_image_makes_zero_provider_calls() {
    let vision = ScriptedProvider::replying("vision", "unused");
    let language = ScriptedProvider::replying("language", "unused");
    let config = two_stage_config(&vision, &language);

    let result = analyze(None, &config, &ProviderCredentials::default()).await;

    assert!(matches!(result, Err(AnalyzeError::MissingImage)));
    assert_eq!(vision.calls(), 0);
    assert_eq!(language.calls(), 0);

    let payload = ResultPayload::from_result(result);
    assert_eq!(payload.http_status(), 400);
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "error": "No image provided" })
    );
}

#[tokio::test]
async fn undecodable_payload_never_reaches_extraction() {
    let vision = ScriptedProvider::replying("vision", "unused");
    let language = ScriptedProvider::replying("language", "unused");
    let config = two_stage_config(&vision, &language);

    let result = analyze(
        Some("data:image/jpeg;base64,not!!valid!!base64"),
        &config,
        &ProviderCredentials::default(),
    )
    .await;

    assert!(matches!(result, Err(AnalyzeError::ImageDecode { .. })));
    assert_eq!(vision.calls(), 0);
    assert_eq!(language.calls(), 0);
    assert_eq!(ResultPayload::from_result(result).http_status(), 500);
}

// ── Single-stage pipeline ────────────────────────────────────────────────

#[tokio::test]
async fn single_stage_makes_one_vision_call_and_no_transcript() {
    let vision = ScriptedProvider::replying("vision", "Summary: direct reading");
    let language = ScriptedProvider::replying("language", "unused");
    let config = AnalysisConfig::builder()
        .mode(PipelineMode::SingleStage)
        .vision_provider(Arc::clone(&vision) as Arc<dyn ModelProvider>)
        .language_provider(Arc::clone(&language) as Arc<dyn ModelProvider>)
        .build()
        .expect("valid config");

    let result = analyze(
        Some(&jpeg_data_url()),
        &config,
        &ProviderCredentials::default(),
    )
    .await
    .expect("single-stage must succeed");

    assert_eq!(result.analysis, "Summary: direct reading");
    assert!(result.extracted_content.is_none());
    assert_eq!(vision.calls(), 1);
    assert_eq!(language.calls(), 0);

    // The one call carries the image and the reduced five-section prompt.
    assert!(vision.last_had_image.load(Ordering::SeqCst));
    let prompt = vision.last_prompt().expect("prompt recorded");
    assert!(prompt.contains("Organization"));
    assert!(!prompt.contains("Strategic Recommendations"));

    let value = serde_json::to_value(ResultPayload::from_result(Ok(result))).unwrap();
    assert!(value.get("extracted_content").is_none());
}
