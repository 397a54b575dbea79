//! Lenient normalization of the model's JSON output.
//!
//! The model is asked for a strict array of three-key objects but in
//! practice drifts: bare coordinate arrays, a missing `text` key, or the
//! literal word "None" for blank fields. Each array element is classified
//! into one of two recognized shapes; anything else is dropped silently.
//! A non-array top level degrades to an empty list. Raw text that is not
//! JSON at all is an error — the two endpoints disagree on how to
//! surface it, so the decision is left to the caller.

use serde_json::Value;

use super::types::DetectedField;
use super::DetectError;

/// The two shapes an array element may take.
#[derive(Debug)]
enum EntryShape {
    /// Object carrying `input_box_2d` (preferred) or `box_2d`, plus an
    /// optional text value.
    Keyed { box_2d: Vec<i64>, text: Value },
    /// Bare sequence of at least four coordinates; carries no text.
    Bare { box_2d: Vec<i64> },
}

impl EntryShape {
    fn into_field(self) -> DetectedField {
        match self {
            EntryShape::Keyed { box_2d, text } => DetectedField {
                box_2d,
                text: normalize_text(text),
            },
            EntryShape::Bare { box_2d } => DetectedField {
                box_2d,
                text: String::new(),
            },
        }
    }
}

/// Parse the model's raw text into normalized field records, preserving
/// the model's element order.
pub fn parse_detection_response(raw: &str) -> Result<Vec<DetectedField>, DetectError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DetectError::BadResponse(e.to_string()))?;

    let Value::Array(entries) = value else {
        tracing::debug!("model output top level is not an array; treating as empty");
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(classify)
        .map(EntryShape::into_field)
        .collect())
}

fn classify(entry: &Value) -> Option<EntryShape> {
    match entry {
        Value::Object(map) => {
            // Prefer input_box_2d when it is a non-empty array; null,
            // empty, or malformed values fall back to a generic box_2d.
            let raw_box = map
                .get("input_box_2d")
                .filter(|v| v.as_array().is_some_and(|a| !a.is_empty()))
                .or_else(|| map.get("box_2d"))?;
            Some(EntryShape::Keyed {
                box_2d: coordinates(raw_box),
                text: map.get("text").cloned().unwrap_or(Value::Null),
            })
        }
        Value::Array(items) if items.len() >= 4 => Some(EntryShape::Bare {
            box_2d: items[..4].iter().filter_map(as_coordinate).collect(),
        }),
        _ => None,
    }
}

fn coordinates(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(as_coordinate).collect())
        .unwrap_or_default()
}

fn as_coordinate(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
}

/// Coerce a text value to a string: null/absent and the literal word
/// "none" (case-insensitive, trimmed) become the empty string.
fn normalize_text(text: Value) -> String {
    match text {
        Value::String(s) if s.trim().eq_ignore_ascii_case("none") => String::new(),
        Value::String(s) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_with_input_box_and_text() {
        let raw = r#"[{"input_box_2d": [100, 100, 200, 400], "text": "John Doe"}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].box_2d, vec![100, 100, 200, 400]);
        assert_eq!(fields[0].text, "John Doe");
    }

    #[test]
    fn input_box_preferred_over_generic_box() {
        let raw = r#"[{"box_2d": [0, 0, 1, 1], "input_box_2d": [5, 5, 9, 9], "text": "a"}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].box_2d, vec![5, 5, 9, 9]);
    }

    #[test]
    fn null_input_box_falls_back_to_generic() {
        let raw = r#"[{"input_box_2d": null, "box_2d": [1, 2, 3, 4], "text": "b"}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].box_2d, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_input_box_falls_back_to_generic() {
        let raw = r#"[{"input_box_2d": [], "box_2d": [1, 2, 3, 4], "text": "c"}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].box_2d, vec![1, 2, 3, 4]);
    }

    #[test]
    fn bare_array_takes_first_four_with_empty_text() {
        let raw = "[[10, 20, 30, 40, 999]]";
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].box_2d, vec![10, 20, 30, 40]);
        assert_eq!(fields[0].text, "");
    }

    #[test]
    fn unrecognized_shapes_are_dropped() {
        let raw = r#"[
            {"input_box_2d": [1, 2, 3, 4], "text": "kept"},
            {"label_only": true},
            [1, 2, 3],
            "just a string",
            42
        ]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].text, "kept");
    }

    #[test]
    fn order_is_preserved() {
        let raw = r#"[
            {"box_2d": [1, 1, 1, 1], "text": "first"},
            {"box_2d": [2, 2, 2, 2], "text": "second"}
        ]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].text, "first");
        assert_eq!(fields[1].text, "second");
    }

    #[test]
    fn none_literal_becomes_empty() {
        for text in ["\"None\"", "\" none \"", "\"NONE\"", "null"] {
            let raw = format!(r#"[{{"box_2d": [1, 2, 3, 4], "text": {text}}}]"#);
            let fields = parse_detection_response(&raw).unwrap();
            assert_eq!(fields[0].text, "", "input text: {text}");
        }
    }

    #[test]
    fn missing_text_becomes_empty() {
        let raw = r#"[{"box_2d": [1, 2, 3, 4]}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].text, "");
    }

    #[test]
    fn other_strings_pass_through() {
        let raw = r#"[{"box_2d": [1, 2, 3, 4], "text": "Nonette"}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].text, "Nonette");
    }

    #[test]
    fn float_coordinates_are_rounded() {
        let raw = r#"[{"box_2d": [1.4, 2.6, 3.5, 4.0], "text": ""}]"#;
        let fields = parse_detection_response(raw).unwrap();
        assert_eq!(fields[0].box_2d, vec![1, 3, 4, 4]);
    }

    #[test]
    fn non_array_top_level_is_empty() {
        assert!(parse_detection_response("{}").unwrap().is_empty());
        assert!(parse_detection_response("\"oops\"").unwrap().is_empty());
        assert!(parse_detection_response("null").unwrap().is_empty());
    }

    #[test]
    fn empty_array_is_empty() {
        assert!(parse_detection_response("[]").unwrap().is_empty());
    }

    #[test]
    fn non_json_is_an_error() {
        let err = parse_detection_response("I could not find any fields").unwrap_err();
        assert!(matches!(err, DetectError::BadResponse(_)));
    }
}
