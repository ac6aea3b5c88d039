use serde_json::Value;

use crate::error::{ConvertError, Result};

/// Resolve a local `$ref` pointer against the root document.
///
/// Only same-document pointers (`#`, `#/definitions/Model`) are supported.
/// Segments are unescaped per RFC 6901 (`~1` is `/`, `~0` is `~`) and
/// index into arrays when the current node is one.
pub fn resolve_reference<'a>(root: &'a Value, reference: &str) -> Result<&'a Value> {
    let mut segments = reference.split('/');
    if segments.next() != Some("#") {
        return Err(ConvertError::UnsupportedExternalRef {
            reference: reference.to_string(),
        });
    }

    let mut selector = root;
    for segment in segments {
        let key = unescape_segment(segment);
        let next = match selector {
            Value::Object(map) => map.get(&key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        selector = next.ok_or_else(|| ConvertError::DanglingRef {
            reference: reference.to_string(),
        })?;
    }
    Ok(selector)
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Render path segments as a local pointer, e.g. `#/properties/a`.
pub fn location<S: AsRef<str>>(segments: &[S]) -> String {
    let mut pointer = String::from("#");
    for segment in segments {
        pointer.push('/');
        pointer.push_str(&escape_segment(segment.as_ref()));
    }
    pointer
}

/// Split a local pointer back into unescaped segments.
pub fn segments_of(reference: &str) -> Vec<String> {
    reference
        .split('/')
        .skip(1)
        .map(unescape_segment)
        .collect()
}
