use serde_json::Value;

use crate::avro::{AvroType, Logical, LogicalType, Primitive};
use crate::converter::analysis::Shape;

/// Map a scalar shape to its Avro type.
///
/// Logical types carry the node's default on the type object itself.
/// Returns `None` for shapes that are not scalars.
pub fn scalar_to_avro_type(shape: Shape, default: Option<&Value>) -> Option<AvroType> {
    let avro_type = match shape {
        Shape::StringPrimitive => AvroType::Primitive(Primitive::String),
        Shape::BinaryString => AvroType::Primitive(Primitive::Bytes),
        Shape::IntegerPrimitive => AvroType::Primitive(Primitive::Long),
        Shape::NumberPrimitive => AvroType::Primitive(Primitive::Double),
        Shape::BooleanPrimitive => AvroType::Primitive(Primitive::Boolean),
        Shape::UuidString => logical(Primitive::String, Logical::Uuid, default),
        Shape::DatePrimitive => logical(Primitive::Int, Logical::Date, default),
        Shape::TimePrimitive => logical(Primitive::Long, Logical::TimeMicros, default),
        Shape::DateTimePrimitive => logical(Primitive::Long, Logical::TimestampMicros, default),
        _ => return None,
    };
    Some(avro_type)
}

fn logical(base: Primitive, logical_type: Logical, default: Option<&Value>) -> AvroType {
    AvroType::Logical(LogicalType {
        base,
        logical_type,
        default: default.cloned(),
    })
}
