//! Typed Avro schema tree produced by the converter.
//!
//! Types serialize in two forms. Under a `"type"` key (fields, nullable
//! unions) primitives are plain names such as `"long"`. In bare positions
//! (array items, map values, `anyOf` members, the document root) they are
//! expanded to `{"type": "long"}`.

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Double,
    Bytes,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Logical {
    Date,
    TimeMicros,
    TimestampMicros,
    Uuid,
}

/// A primitive annotated with a `logicalType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalType {
    #[serde(rename = "type")]
    pub base: Primitive,
    #[serde(rename = "logicalType")]
    pub logical_type: Logical,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// A record emitted with its full body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "record")]
pub struct Record {
    pub namespace: String,
    pub name: String,
    pub fields: Vec<AvroField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// Short form of a record that was already emitted in the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "record")]
pub struct RecordReference {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AvroType {
    Primitive(Primitive),
    Logical(LogicalType),
    Record(Box<Record>),
    Reference(RecordReference),
    #[serde(serialize_with = "serialize_array")]
    Array(Box<AvroType>),
    #[serde(serialize_with = "serialize_map")]
    Map(Box<AvroType>),
    #[serde(serialize_with = "serialize_union")]
    Union(Vec<AvroType>),
    /// `["null", T]`, flattened into `T`'s members when `T` is a union.
    #[serde(serialize_with = "serialize_nullable")]
    Nullable(Box<AvroType>),
}

impl AvroType {
    pub fn nullable(self) -> Self {
        AvroType::Nullable(Box::new(self))
    }

    pub fn bare(&self) -> Bare<'_> {
        Bare(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvroField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: AvroType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Result of converting one schema node: a record field when the node sits
/// under a property name, a bare type otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AvroNode {
    Field(AvroField),
    #[serde(serialize_with = "serialize_bare")]
    Type(AvroType),
}

impl AvroNode {
    pub fn into_type(self) -> AvroType {
        match self {
            AvroNode::Field(field) => field.field_type,
            AvroNode::Type(avro_type) => avro_type,
        }
    }
}

/// The converted document; serializes as a standalone Avro schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AvroDocument {
    #[serde(serialize_with = "serialize_bare")]
    pub root: AvroType,
}

impl AvroDocument {
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Standalone rendering of an [`AvroType`].
#[derive(Debug, Clone, Copy)]
pub struct Bare<'a>(&'a AvroType);

impl Serialize for Bare<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            AvroType::Primitive(primitive) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", primitive)?;
                map.end()
            }
            other => other.serialize(serializer),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename = "array")]
struct ArraySchema<'a> {
    items: Bare<'a>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename = "map")]
struct MapSchema<'a> {
    values: Bare<'a>,
}

fn serialize_bare<S: Serializer>(avro_type: &AvroType, serializer: S) -> Result<S::Ok, S::Error> {
    avro_type.bare().serialize(serializer)
}

fn serialize_array<S: Serializer>(items: &AvroType, serializer: S) -> Result<S::Ok, S::Error> {
    ArraySchema {
        items: items.bare(),
    }
    .serialize(serializer)
}

fn serialize_map<S: Serializer>(values: &AvroType, serializer: S) -> Result<S::Ok, S::Error> {
    MapSchema {
        values: values.bare(),
    }
    .serialize(serializer)
}

fn serialize_union<S: Serializer>(members: &[AvroType], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(members.iter().map(AvroType::bare))
}

fn serialize_nullable<S: Serializer>(inner: &AvroType, serializer: S) -> Result<S::Ok, S::Error> {
    match inner {
        AvroType::Union(members) => {
            let mut seq = serializer.serialize_seq(Some(members.len() + 1))?;
            seq.serialize_element(&Primitive::Null)?;
            for member in members {
                seq.serialize_element(&member.bare())?;
            }
            seq.end()
        }
        other => {
            let mut seq = serializer.serialize_seq(Some(2))?;
            seq.serialize_element(&Primitive::Null)?;
            seq.serialize_element(other)?;
            seq.end()
        }
    }
}
