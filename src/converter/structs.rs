use serde_json::Value;

use crate::avro::{AvroField, AvroNode, AvroType};
use crate::common::names::avro_name;

/// Create a record field.
///
/// With a default the type stays as is. Without one, an optional field is
/// widened to `["null", T]` and defaults to `null`.
pub fn create_field(
    name: &str,
    avro_type: AvroType,
    default: Option<Value>,
    required: bool,
) -> AvroField {
    let (field_type, default) = match default {
        Some(default) => (avro_type, Some(default)),
        None if !required => (avro_type.nullable(), Some(Value::Null)),
        None => (avro_type, None),
    };
    AvroField {
        name: avro_name(name),
        field_type,
        default,
    }
}

/// Apply the field wrapping rule to a converted type.
///
/// Unnamed positions carry no default; an optional one is still widened.
pub fn wrap_type(
    avro_type: AvroType,
    default: Option<Value>,
    name: Option<&str>,
    required: bool,
) -> AvroNode {
    match name {
        Some(name) => AvroNode::Field(create_field(name, avro_type, default, required)),
        None if !required && default.is_none() => AvroNode::Type(avro_type.nullable()),
        None => AvroNode::Type(avro_type),
    }
}
