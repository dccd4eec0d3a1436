//! Error types for the board2brief library.
//!
//! The taxonomy mirrors the three ways an analysis can fail:
//!
//! * [`AnalyzeError::MissingImage`] — the request carried no image payload.
//!   Caught at the boundary before any work happens; a client error.
//!
//! * [`AnalyzeError::ImageDecode`] — the payload was present but is not
//!   valid base64. Nothing has left the process yet.
//!
//! * [`AnalyzeError::ModelInvocation`] — an outbound call to a model
//!   provider failed, timed out, or came back unusable (non-2xx status,
//!   malformed body, empty completion).
//!
//! No variant is retried or recovered internally. The pipeline coordinator
//! halts on the first error and the response formatter converts it to a flat
//! message string — see [`crate::response`] for the status mapping.

use thiserror::Error;

/// All errors produced by the analysis pipeline.
#[derive(Debug, Clone, Error)]
pub enum AnalyzeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The `image` field was absent or empty.
    ///
    /// The message is part of the external contract: clients match on the
    /// literal string `No image provided`.
    #[error("No image provided")]
    MissingImage,

    /// The payload could not be decoded as base64 image data.
    #[error("Invalid image data: {detail}")]
    ImageDecode { detail: String },

    // ── Provider errors ───────────────────────────────────────────────────
    /// An outbound call to a model provider failed or returned unusable
    /// output. Covers transport errors, non-success statuses, response
    /// bodies missing the expected text, and empty completions.
    #[error("{provider} request failed: {detail}")]
    ModelInvocation { provider: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed. Raised at startup, never mid-request.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyzeError {
    /// Whether the failure is the caller's fault.
    ///
    /// Only a missing input maps to a client status; decoding and provider
    /// failures are reported as server errors, matching the coarse mapping
    /// of the original service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalyzeError::MissingImage)
    }
}
