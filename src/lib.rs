//! # board2brief
//!
//! Turn a photographed whiteboard into a structured strategic brief using
//! Vision Language Models.
//!
//! ## Why this crate?
//!
//! Whiteboards capture the highest-bandwidth moments of a working session —
//! and then get erased. A phone photo preserves the pixels but not the
//! meaning: handwriting, arrows, and box diagrams are opaque to text search
//! and to anyone who wasn't in the room. This crate reads the capture with a
//! vision model and turns the reading into an actionable, sectioned brief.
//!
//! ## Pipeline Overview
//!
//! ```text
//! capture payload (data URL)
//!  │
//!  ├─ 1. Normalize  strip media-type prefix, decode base64 → JPEG bytes
//!  ├─ 2. Extract    vision model produces a literal transcript
//!  ├─ 3. Report     language model turns the transcript into a
//!  │                six-section brief (summary, key points, action items,
//!  │                next steps, recommendations, challenges)
//!  └─ 4. Shape      success/error payload + HTTP status
//! ```
//!
//! Single-stage mode collapses steps 2–3 into one vision call with a reduced
//! five-section prompt.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use board2brief::{analyze, AnalysisConfig, ProviderCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credentials read once; missing keys fail on first use, not here.
//!     let credentials = ProviderCredentials::from_env();
//!     let config = AnalysisConfig::default();
//!
//!     let payload = std::fs::read("whiteboard.jpg")
//!         .map(|bytes| {
//!             use base64::{engine::general_purpose::STANDARD, Engine as _};
//!             STANDARD.encode(bytes)
//!         })?;
//!
//!     let result = analyze(Some(&payload), &config, &credentials).await?;
//!     println!("{}", result.analysis);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | on      | Enables the `board2brief` binary and the axum HTTP surface |
//!
//! Disable `server` when using only the library:
//! ```toml
//! board2brief = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod response;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, Stage, WhiteboardAnalysis};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, PipelineMode, ProviderCredentials};
pub use error::AnalyzeError;
pub use pipeline::normalize::DecodedImage;
pub use provider::{GeminiProvider, GenerationRequest, ModelProvider, OpenAiProvider};
pub use response::{AnalyzeRequest, ResultPayload};
