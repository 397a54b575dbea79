//! Checkbox geometry filter.
//!
//! Converts each record's normalized x-span to pixel width and
//! reclassifies narrow fields as checkbox-like: their box is kept but
//! the text is forced to a fixed marker, whatever the model returned.

use serde::Serialize;

use super::types::DetectedField;

/// Pixel width at or below which a field is treated as a checkbox
/// (roughly room for three letters).
pub const SMALL_BOX_PX_THRESHOLD: i64 = 30;

/// Marker written into checkbox-like fields.
pub const CHECKBOX_MARKER: &str = "x";

/// A box entry in the response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxEntry {
    pub box_2d: Vec<i64>,
}

/// Build index-aligned `boxes` / `texts` arrays from normalized records.
///
/// Records without exactly four box values are dropped; the outputs are
/// always the same length as each other.
pub fn classify_and_render(
    records: &[DetectedField],
    image_width_px: u32,
) -> (Vec<BoxEntry>, Vec<String>) {
    let mut boxes = Vec::with_capacity(records.len());
    let mut texts = Vec::with_capacity(records.len());

    for record in records {
        let [_y_min, x_min, _y_max, x_max] = record.box_2d[..] else {
            continue;
        };
        let width_px =
            ((x_max - x_min) as f64 / 1000.0 * f64::from(image_width_px)).round() as i64;

        boxes.push(BoxEntry {
            box_2d: record.box_2d.clone(),
        });
        if width_px <= SMALL_BOX_PX_THRESHOLD {
            texts.push(CHECKBOX_MARKER.to_string());
        } else {
            texts.push(record.text.clone());
        }
    }

    (boxes, texts)
}
