//! Best-effort extraction of a JSON array from raw model output.
//!
//! The model is instructed to emit only JSON but routinely wraps the
//! array in commentary, code fences, or citation markers like `[1]`.
//! Malformed output is "no data", never an error.

use serde_json::Value;

/// Find and parse the first top-level JSON array of objects in `text`.
///
/// Scans for a `[` that opens an object array (next non-whitespace
/// char is `{`), walks to its matching `]` with string- and
/// escape-aware bracket tracking, and parses the slice. Returns an
/// empty vec when no such array exists or parsing fails.
pub fn first_json_array(text: &str) -> Vec<Value> {
    let bytes = text.as_bytes();
    for (start, _) in text.match_indices('[') {
        if !opens_object_array(bytes, start) {
            continue;
        }
        let Some(end) = matching_bracket(bytes, start) else {
            return Vec::new();
        };
        return match serde_json::from_slice::<Value>(&bytes[start..=end]) {
            Ok(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };
    }
    Vec::new()
}

/// True when the `[` at `start` is followed (after whitespace) by `{`.
/// Filters out citation markers (`[1]`) and prose brackets.
fn opens_object_array(bytes: &[u8], start: usize) -> bool {
    bytes[start + 1..]
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}

/// Index of the `]` closing the `[` at `start`, tracking nesting and
/// skipping bracket characters inside JSON strings.
fn matching_bracket(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}
