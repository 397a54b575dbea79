//! Form-field detection: prompt construction, hosted-model client,
//! lenient response normalization, and the checkbox geometry filter.

pub mod client;
pub mod geometry;
pub mod parser;
pub mod prompt;
pub mod types;

pub use client::GeminiDetector;
pub use types::{DetectCall, DetectTimings, DetectedField, FieldDetector, MockDetector};

/// Errors from the detection seam. The two endpoints choose divergent
/// handling: `/api/form/detect` surfaces these, `/api/form/draw_boxes`
/// degrades to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("Model endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("Model call failed: {0}")]
    Upstream(String),
    #[error("Model returned non-JSON output: {0}")]
    BadResponse(String),
}
