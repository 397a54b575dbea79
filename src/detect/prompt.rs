//! Fixed prompt for the combined boxes + synthetic text detection call.

/// System instruction sent with every detection request.
///
/// The model must emit a strict JSON array of three-key objects with
/// 0–1000 integer coordinates. Small tick/checkbox fields are included
/// and may carry the text "x"; purposely blank fields get an empty
/// string, never a None-like literal.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are given an image of a paper form. Find all fields where a human is expected to WRITE text (e.g., blank lines, long empty boxes) and, for each, produce:

- label_box_2d: bounding box for the nearest descriptive label or prompt text for that field
- input_box_2d: bounding box for the empty area where the user writes their answer
- text: a realistic, context-appropriate fake value that matches what the field expects

Important rules:
- INCLUDE small tick, circle, checkbox boxes as fields too. When a field is very small (roughly room for <=3 letters), it is likely a check box. It is acceptable to return these; setting text to "x" is fine for such small fields.
- Return ONLY a JSON array where each element is an object with exactly these keys:
  {"label_box_2d": [y_min, x_min, y_max, x_max], "input_box_2d": [y_min, x_min, y_max, x_max], "text": "..."}
- All coordinates must be normalized to 0-1000 and should be integers.
- If a field should be left blank purposely, set text to an empty string "" (never the word None).
"#;

/// User-turn instruction accompanying the image part.
pub const USER_INSTRUCTION: &str =
    "Return bounding boxes and fake text for writable fields only.";
