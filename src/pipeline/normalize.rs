//! Image normalisation: transport payload → raw JPEG bytes.
//!
//! Browsers submit captures as data URLs
//! (`data:image/jpeg;base64,/9j/4AAQ…`). The normaliser strips the
//! media-type declaration up to the first comma, decodes the remainder with
//! the standard base64 alphabet, and tags the bytes with the fixed
//! `image/jpeg` media type the capture front-end produces. It is a pure
//! transformation — validation of the actual pixel data is left to the
//! vision model, which sees the bytes next.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::error::AnalyzeError;

/// The only image format accepted from the capture front-end.
pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// Raw image bytes plus their media type, ready for a vision model call.
///
/// Owned by a single pipeline invocation and dropped with it; never retained
/// across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

/// Decode a transport-encoded image payload into [`DecodedImage`] bytes.
///
/// # Errors
/// [`AnalyzeError::MissingImage`] when the payload is absent or blank —
/// checked before any decoding is attempted. [`AnalyzeError::ImageDecode`]
/// when the remaining text is not valid base64.
pub fn decode_payload(payload: Option<&str>) -> Result<DecodedImage, AnalyzeError> {
    let raw = match payload {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(AnalyzeError::MissingImage),
    };

    // Strip the data-URL prefix ("data:image/jpeg;base64,") if present.
    let encoded = match raw.split_once(',') {
        Some((_, rest)) => rest,
        None => raw,
    };

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AnalyzeError::ImageDecode {
            detail: e.to_string(),
        })?;
    debug!("decoded image payload: {} bytes", bytes.len());

    Ok(DecodedImage {
        bytes,
        media_type: JPEG_MEDIA_TYPE,
    })
}
