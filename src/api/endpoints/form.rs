//! Form detection endpoints.
//!
//! Both accept a multipart `file` part and an optional `?detector=`
//! model override. They differ deliberately in failure policy:
//! `/api/form/detect` surfaces upstream failures with partial timings,
//! while `/api/form/draw_boxes` degrades to an empty success so the
//! frontend's box overlay keeps working.

use std::time::Instant;

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use image::GenericImageView;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::detect::geometry::{classify_and_render, BoxEntry};

/// Coordinate range the model normalizes boxes to.
const NORMALIZED_SCALE: u32 = 1000;

#[derive(Deserialize)]
pub struct DetectorQuery {
    /// Model identifier override; falls back to the configured default.
    pub detector: Option<String>,
}

#[derive(Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize)]
pub struct DetectTimingsBody {
    pub combined_inference_ms: u64,
    pub combined_parse_ms: u64,
    pub image_open_ms: u64,
    pub total_ms: u64,
}

#[derive(Serialize)]
pub struct DetectResponse {
    pub image: ImageSize,
    pub normalized_scale: u32,
    pub boxes: Vec<BoxEntry>,
    pub texts: Vec<String>,
    pub timings_ms: DetectTimingsBody,
}

#[derive(Serialize)]
pub struct PartialTimingsBody {
    pub total_ms: u64,
    pub image_open_ms: u64,
}

#[derive(Serialize)]
pub struct DetectFailureBody {
    pub error: String,
    pub timings_ms: PartialTimingsBody,
}

#[derive(Serialize)]
pub struct BoxesResponse {
    pub normalized_scale: u32,
    pub boxes: Vec<BoxEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/form/detect` — boxes plus synthetic filler text.
///
/// The upload is decoded before any model call; undecodable content is
/// a 400 and costs no inference. Upstream failures return a 500 body
/// carrying the timings gathered so far.
pub async fn detect(
    State(ctx): State<ApiContext>,
    Query(query): Query<DetectorQuery>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let route_started = Instant::now();
    let (bytes, mime_type) = read_upload(&mut multipart).await?;

    let open_started = Instant::now();
    let (width, height) = image_dimensions(&bytes)?;
    let image_open_ms = open_started.elapsed().as_millis() as u64;

    let model = query
        .detector
        .unwrap_or_else(|| ctx.config.detect_model.clone());

    match ctx.detector.detect(&bytes, &mime_type, &model).await {
        Ok((fields, timings)) => {
            let (boxes, texts) = classify_and_render(&fields, width);
            let total_ms = route_started.elapsed().as_millis() as u64;
            Ok(Json(DetectResponse {
                image: ImageSize { width, height },
                normalized_scale: NORMALIZED_SCALE,
                boxes,
                texts,
                timings_ms: DetectTimingsBody {
                    combined_inference_ms: timings.inference_ms,
                    combined_parse_ms: timings.parse_ms,
                    image_open_ms,
                    total_ms,
                },
            })
            .into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, model = %model, "detection failed");
            let total_ms = route_started.elapsed().as_millis() as u64;
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetectFailureBody {
                    error: err.to_string(),
                    timings_ms: PartialTimingsBody {
                        total_ms,
                        image_open_ms,
                    },
                }),
            )
                .into_response())
        }
    }
}

/// `POST /api/form/draw_boxes` — box locations only.
pub async fn draw_boxes(
    State(ctx): State<ApiContext>,
    Query(query): Query<DetectorQuery>,
    mut multipart: Multipart,
) -> Result<Json<BoxesResponse>, ApiError> {
    let (bytes, mime_type) = read_upload(&mut multipart).await?;

    let model = query
        .detector
        .unwrap_or_else(|| ctx.config.boxes_model.clone());

    match ctx.detector.detect(&bytes, &mime_type, &model).await {
        Ok((fields, _timings)) => {
            let boxes = fields
                .iter()
                .filter(|f| f.box_2d.len() == 4)
                .map(|f| BoxEntry {
                    box_2d: f.box_2d.clone(),
                })
                .collect();
            Ok(Json(BoxesResponse {
                normalized_scale: NORMALIZED_SCALE,
                boxes,
                error: None,
            }))
        }
        Err(err) => {
            tracing::warn!(error = %err, model = %model, "draw_boxes degrading to empty result");
            Ok(Json(BoxesResponse {
                normalized_scale: NORMALIZED_SCALE,
                boxes: Vec::new(),
                error: Some(err.to_string()),
            }))
        }
    }
}

/// Pull the `file` part out of a multipart body. The part's declared
/// content type is trusted here (the image decode validates detect
/// uploads); absent, it defaults to `image/png`.
async fn read_upload(multipart: &mut Multipart) -> Result<(Vec<u8>, String), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mime_type = field.content_type().unwrap_or("image/png").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
        return Ok((bytes.to_vec(), mime_type));
    }
    Err(ApiError::BadRequest("Missing 'file' field".into()))
}

fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32), ApiError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ApiError::BadRequest(format!("Cannot decode image: {e}")))?;
    Ok(img.dimensions())
}
