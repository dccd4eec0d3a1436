//! Response shaping: pipeline outcome → external payload and status.
//!
//! [`ResultPayload`] is the externally observable shape. Success carries the
//! analysis text and, in two-stage mode, the transcript; failure carries a
//! flat message string only — the error taxonomy is not exposed on the wire.
//! The status mapping is deliberately coarse: only a missing input is the
//! client's fault, everything else (decoding included) reports as a server
//! error.

use serde::{Deserialize, Serialize};

use crate::analyze::WhiteboardAnalysis;
use crate::error::AnalyzeError;

/// The inbound request body: one optional image payload string.
///
/// `#[serde(default)]` lets `{}` deserialize to an absent image, which the
/// pipeline turns into the `No image provided` validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// The externally visible result of one analysis request.
///
/// Invariants: the success variant always has `success == true` and a
/// non-empty `analysis` (providers reject empty completions); the failure
/// variant serialises to `{"error": …}` with no analysis fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Success {
        success: bool,
        analysis: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        extracted_content: Option<String>,
    },
    Failure {
        error: String,
        #[serde(skip)]
        client_error: bool,
    },
}

impl ResultPayload {
    /// Shape a pipeline outcome into the external payload.
    pub fn from_result(result: Result<WhiteboardAnalysis, AnalyzeError>) -> Self {
        match result {
            Ok(analysis) => ResultPayload::Success {
                success: true,
                analysis: analysis.analysis,
                extracted_content: analysis.extracted_content,
            },
            Err(e) => ResultPayload::Failure {
                client_error: e.is_client_error(),
                error: e.to_string(),
            },
        }
    }

    /// The HTTP status this payload travels with.
    pub fn http_status(&self) -> u16 {
        match self {
            ResultPayload::Success { .. } => 200,
            ResultPayload::Failure {
                client_error: true, ..
            } => 400,
            ResultPayload::Failure { .. } => 500,
        }
    }
}
