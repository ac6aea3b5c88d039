use serde_json::Value;

/// The conversion rule that applies to a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Record,
    Map,
    Ref,
    Array,
    Union,
    UnsupportedAllOf,
    StringPrimitive,
    BinaryString,
    UuidString,
    DatePrimitive,
    TimePrimitive,
    DateTimePrimitive,
    IntegerPrimitive,
    NumberPrimitive,
    BooleanPrimitive,
    Unknown,
}

/// Decide which conversion rule applies to `node`.
///
/// The keywords are not mutually exclusive in real documents, so the checks
/// run in a fixed order: object shapes first, then `$ref`, arrays, `anyOf`,
/// `allOf`, and finally the scalar types.
pub fn classify(node: &Value) -> Shape {
    let type_field = node.get("type").and_then(Value::as_str);

    if type_field == Some("object") {
        return if node.get("properties").is_some() {
            Shape::Record
        } else {
            Shape::Map
        };
    }
    if node.get("$ref").is_some() {
        return Shape::Ref;
    }
    if type_field == Some("array") {
        return Shape::Array;
    }
    if node.get("anyOf").is_some() {
        return Shape::Union;
    }
    if node.get("allOf").is_some() {
        return Shape::UnsupportedAllOf;
    }

    match type_field {
        Some("string") => match node.get("format").and_then(Value::as_str) {
            Some("binary") => Shape::BinaryString,
            Some("uuid") => Shape::UuidString,
            Some("date") => Shape::DatePrimitive,
            Some("time") => Shape::TimePrimitive,
            Some("date-time") => Shape::DateTimePrimitive,
            _ => Shape::StringPrimitive,
        },
        Some("integer") => Shape::IntegerPrimitive,
        Some("number") => Shape::NumberPrimitive,
        Some("boolean") => Shape::BooleanPrimitive,
        _ => Shape::Unknown,
    }
}

/// Enums are flattened to `string`; any other underlying type is rejected.
///
/// Returns a description of the offending `type` when `node` carries an
/// `enum` that cannot be flattened.
pub fn enum_type_violation(node: &Value) -> Option<String> {
    node.get("enum")?;
    match node.get("type") {
        Some(Value::String(t)) if t == "string" => None,
        Some(other) => Some(other.to_string()),
        None => Some("no type".to_string()),
    }
}

/// Check whether a JSON object has a non-null `default`.
pub fn explicit_default(node: &Value) -> Option<&Value> {
    node.get("default").filter(|value| !value.is_null())
}
