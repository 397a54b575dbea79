//! Vertex AI Gemini client for the combined detection call.
//!
//! Sends the image inline (base64) with the fixed prompt and a JSON
//! response hint, then normalizes the model's output. A single attempt
//! is made per request — no retries, and no timeout beyond what the
//! HTTP transport imposes.

use std::time::Instant;

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use super::parser::parse_detection_response;
use super::prompt;
use super::types::{DetectTimings, DetectedField, FieldDetector};
use super::DetectError;
use crate::config::ServerConfig;

pub struct GeminiDetector {
    http: reqwest::Client,
    project: String,
    location: String,
    access_token: Option<String>,
}

impl GeminiDetector {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            project: config.gcp_project.clone(),
            location: config.gcp_location.clone(),
            access_token: config.gcp_access_token.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent",
            location = self.location,
            project = self.project,
        )
    }
}

// Minimal view of the generateContent response — only the text parts of
// the first candidate matter here.
#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> String {
        self.candidates
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_deref())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl FieldDetector for GeminiDetector {
    async fn detect(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        model: &str,
    ) -> Result<(Vec<DetectedField>, DetectTimings), DetectError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": mime_type,
                            "data": base64::engine::general_purpose::STANDARD.encode(image_bytes),
                        }
                    },
                    { "text": prompt::USER_INSTRUCTION },
                ],
            }],
            "system_instruction": {
                "parts": [{ "text": prompt::SYSTEM_INSTRUCTION }],
            },
            "generation_config": {
                "response_mime_type": "application/json",
            },
        });

        let mut request = self.http.post(self.endpoint(model)).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| DetectError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DetectError::Upstream(format!("{status}: {detail}")));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DetectError::Upstream(e.to_string()))?;
        let inference_ms = started.elapsed().as_millis() as u64;

        let parse_started = Instant::now();
        let fields = parse_detection_response(&payload.text())?;
        let parse_ms = parse_started.elapsed().as_millis() as u64;

        tracing::info!(
            model,
            inference_ms,
            parse_ms,
            field_count = fields.len(),
            "detection call complete"
        );

        Ok((fields, DetectTimings { inference_ms, parse_ms }))
    }
}
