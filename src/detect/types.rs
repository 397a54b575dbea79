//! Detection record types and the detector seam.

use async_trait::async_trait;

use super::DetectError;

/// A single detected field: normalized box plus synthetic filler text.
/// Request-scoped — built per detection call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedField {
    /// `[y_min, x_min, y_max, x_max]`, integers normalized to 0–1000.
    pub box_2d: Vec<i64>,
    pub text: String,
}

/// Wall-clock timings for one detection call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectTimings {
    /// Time spent in the hosted-model network call.
    pub inference_ms: u64,
    /// Time spent parsing and normalizing the model's JSON.
    pub parse_ms: u64,
}

/// Seam to the hosted multimodal model. A single attempt is made per
/// call; any timeout is owned by the HTTP transport, not this layer.
#[async_trait]
pub trait FieldDetector: Send + Sync {
    async fn detect(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        model: &str,
    ) -> Result<(Vec<DetectedField>, DetectTimings), DetectError>;
}

/// Arguments of one recorded mock detection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectCall {
    pub mime_type: String,
    pub model: String,
}

/// Mock detector returning a fixed outcome, for endpoint tests. Records
/// the arguments of every call so tests can assert what reached it.
pub struct MockDetector {
    outcome: Result<Vec<DetectedField>, String>,
    calls: std::sync::Mutex<Vec<DetectCall>>,
}

impl MockDetector {
    pub fn with_fields(fields: Vec<DetectedField>) -> Self {
        Self {
            outcome: Ok(fields),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<DetectCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FieldDetector for MockDetector {
    async fn detect(
        &self,
        _image_bytes: &[u8],
        mime_type: &str,
        model: &str,
    ) -> Result<(Vec<DetectedField>, DetectTimings), DetectError> {
        self.calls.lock().unwrap().push(DetectCall {
            mime_type: mime_type.to_string(),
            model: model.to_string(),
        });
        match &self.outcome {
            Ok(fields) => Ok((fields.clone(), DetectTimings::default())),
            Err(message) => Err(DetectError::Upstream(message.clone())),
        }
    }
}
