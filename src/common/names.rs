use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("name pattern is valid"));
static INVALID_NAMESPACE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_\.]").expect("namespace pattern is valid"));

/// Convert a raw string into a valid Avro name.
///
/// Replaces invalid characters with `_` and makes sure the result starts
/// with a letter or underscore. Names that are already valid come back
/// unchanged.
pub fn avro_name(name: &str) -> String {
    let val = INVALID_NAME_CHARS.replace_all(name, "_");
    if val.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        val.into_owned()
    } else {
        format!("_{val}")
    }
}

/// Convert an input string into a valid dotted Avro namespace.
///
/// Each dot-separated segment is normalized like a name; empty segments are
/// dropped.
pub fn avro_namespace(namespace: &str) -> String {
    let val = INVALID_NAMESPACE_CHARS.replace_all(namespace, "_");
    val.split('.')
        .filter(|segment| !segment.is_empty())
        .map(avro_name)
        .collect::<Vec<_>>()
        .join(".")
}

/// Join a namespace and a name into a fully qualified Avro name.
pub fn fullname(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
