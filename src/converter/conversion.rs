use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::avro::{AvroField, AvroNode, AvroType, Primitive, Record, RecordReference};
use crate::common::names::{avro_name, fullname};
use crate::converter::analysis::{classify, enum_type_violation, explicit_default, Shape};
use crate::converter::references::{resolve_reference, segments_of};
use crate::converter::registry::Registration;
use crate::converter::state::Converter;
use crate::converter::structs::{create_field, wrap_type};
use crate::converter::types::scalar_to_avro_type;
use crate::error::{ConvertError, Result};

impl<'a> Converter<'a> {
    /// Convert a schema node into its Avro counterpart.
    ///
    /// `name` is `None` for unnamed positions (array items, union members,
    /// map values, the document root) and produces a bare type; otherwise
    /// the result is a record field. `namespace` defaults to the run's root
    /// namespace.
    pub fn convert(
        &mut self,
        node: &Value,
        name: Option<&str>,
        required: bool,
        namespace: Option<&str>,
    ) -> Result<AvroNode> {
        let namespace = namespace.unwrap_or(self.root_namespace.as_str()).to_string();
        let (avro_type, default) = self.convert_type(node, &namespace)?;
        Ok(wrap_type(avro_type, default, name, required))
    }

    fn convert_field(
        &mut self,
        node: &Value,
        name: &str,
        required: bool,
        namespace: &str,
    ) -> Result<AvroField> {
        let (avro_type, default) = self.convert_type(node, namespace)?;
        Ok(create_field(name, avro_type, default, required))
    }

    /// Convert an unnamed, required node in the root namespace.
    fn convert_bare(&mut self, node: &Value) -> Result<AvroType> {
        let namespace = self.root_namespace.clone();
        self.convert_type(node, &namespace).map(|(avro_type, _)| avro_type)
    }

    /// Compute the Avro type of `node` along with the default that applies
    /// to the position it is converted into.
    fn convert_type(&mut self, node: &Value, namespace: &str) -> Result<(AvroType, Option<Value>)> {
        if self.depth >= self.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                limit: self.max_depth,
                path: self.location(),
            });
        }
        self.depth += 1;
        let result = self.convert_shape(node, namespace);
        self.depth -= 1;
        result
    }

    fn convert_shape(&mut self, node: &Value, namespace: &str) -> Result<(AvroType, Option<Value>)> {
        if let Some(found) = enum_type_violation(node) {
            return Err(ConvertError::EnumOfNonStringType {
                path: self.location(),
                found,
            });
        }

        let shape = classify(node);
        trace!(path = %self.location(), ?shape, "classified schema node");
        let default = explicit_default(node);

        let avro_type = match shape {
            Shape::Record => self.object_to_record(node, namespace)?,
            Shape::Map => self.object_to_map(node)?,
            Shape::Ref => return self.follow_reference(node),
            Shape::Array => self.array_to_array(node)?,
            Shape::Union => self.any_of_to_union(node)?,
            Shape::UnsupportedAllOf => {
                return Err(ConvertError::NestedDefaultUnsupported {
                    path: self.location(),
                })
            }
            Shape::StringPrimitive
            | Shape::BinaryString
            | Shape::UuidString
            | Shape::DatePrimitive
            | Shape::TimePrimitive
            | Shape::DateTimePrimitive
            | Shape::IntegerPrimitive
            | Shape::NumberPrimitive
            | Shape::BooleanPrimitive => match scalar_to_avro_type(shape, default) {
                Some(avro_type) => avro_type,
                None => {
                    return Err(ConvertError::UnknownSchemaType {
                        path: self.location(),
                    })
                }
            },
            Shape::Unknown => {
                return Err(ConvertError::UnknownSchemaType {
                    path: self.location(),
                })
            }
        };
        Ok((avro_type, default.cloned()))
    }

    /// Convert an object with `properties` into a record.
    ///
    /// The record's full name is registered before its fields are
    /// converted; meeting the same name again yields a short reference.
    fn object_to_record(&mut self, node: &Value, namespace: &str) -> Result<AvroType> {
        let title = match node.get("title") {
            Some(Value::String(title)) => title,
            Some(_) => {
                return Err(ConvertError::InvalidKeyword {
                    keyword: "title",
                    path: self.location(),
                    expected: "a string",
                })
            }
            None => {
                return Err(ConvertError::MissingTitle {
                    path: self.location(),
                })
            }
        };
        let name = avro_name(title);
        if name != *title {
            debug!(%title, %name, "sanitized record title");
        }

        let qualified_name = fullname(namespace, &name);
        match self.registry.register(&qualified_name, title) {
            Registration::New => {}
            Registration::Emitted => {
                debug!(name = %qualified_name, "record already emitted, referencing by name");
                return Ok(AvroType::Reference(RecordReference {
                    name: qualified_name,
                }));
            }
            Registration::Conflict { existing } => {
                return Err(ConvertError::NameCollision {
                    name: qualified_name,
                    original: title.clone(),
                    existing,
                    path: self.location(),
                })
            }
        }

        let properties = node
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| ConvertError::InvalidKeyword {
                keyword: "properties",
                path: self.location(),
                expected: "an object",
            })?;
        let required = self.required_properties(node)?;

        let mut fields = Vec::with_capacity(properties.len());
        let mut field_names: HashMap<String, &str> = HashMap::with_capacity(properties.len());
        for (property_name, property) in properties {
            let is_required = required.contains(&property_name.as_str());
            let segments = ["properties", property_name.as_str()];
            let field = self.descend(&segments, |this| -> Result<AvroField> {
                let field =
                    this.convert_field(property, property_name, is_required, &qualified_name)?;
                if let Some(existing) = field_names.insert(field.name.clone(), property_name) {
                    return Err(ConvertError::NameCollision {
                        name: field.name,
                        original: property_name.clone(),
                        existing: existing.to_string(),
                        path: this.location(),
                    });
                }
                Ok(field)
            })?;
            fields.push(field);
        }

        debug!(name = %qualified_name, fields = fields.len(), "emitted record");
        Ok(AvroType::Record(Box::new(Record {
            namespace: namespace.to_string(),
            name,
            fields,
            doc: node
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        })))
    }

    fn required_properties<'n>(&self, node: &'n Value) -> Result<Vec<&'n str>> {
        match node.get("required") {
            None => Ok(Vec::new()),
            Some(Value::Array(names)) => Ok(names.iter().filter_map(Value::as_str).collect()),
            Some(_) => Err(ConvertError::InvalidKeyword {
                keyword: "required",
                path: self.location(),
                expected: "an array of property names",
            }),
        }
    }

    /// Convert an object without `properties` into a map. A missing
    /// `additionalProperties` allows any value, like `true`, and maps to
    /// `string` values.
    fn object_to_map(&mut self, node: &Value) -> Result<AvroType> {
        let values = match node.get("additionalProperties") {
            Some(schema @ Value::Object(_)) => {
                self.descend(&["additionalProperties"], |this| this.convert_bare(schema))?
            }
            None | Some(Value::Bool(true)) => AvroType::Primitive(Primitive::String),
            _ => {
                return Err(ConvertError::InvalidKeyword {
                    keyword: "additionalProperties",
                    path: self.location(),
                    expected: "a schema object or true",
                })
            }
        };
        Ok(AvroType::Map(Box::new(values)))
    }

    /// Follow a `$ref` and convert its target in the root namespace.
    ///
    /// The reference is transparent: the target's type is used in the
    /// referencing position, and a default on the reference itself takes
    /// precedence over one on the target.
    fn follow_reference(&mut self, node: &Value) -> Result<(AvroType, Option<Value>)> {
        let reference = node
            .get("$ref")
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::InvalidKeyword {
                keyword: "$ref",
                path: self.location(),
                expected: "a string",
            })?;
        let root = self.root;
        let target = resolve_reference(root, reference)?;
        debug!(from = %self.location(), to = %reference, "following reference");

        let namespace = self.root_namespace.clone();
        let (avro_type, target_default) = self.relocate(segments_of(reference), |this| {
            this.convert_type(target, &namespace)
        })?;
        let default = explicit_default(node).cloned().or(target_default);
        Ok((avro_type, default))
    }

    fn array_to_array(&mut self, node: &Value) -> Result<AvroType> {
        let items = match node.get("items") {
            Some(items @ Value::Object(_)) => items,
            _ => {
                return Err(ConvertError::InvalidKeyword {
                    keyword: "items",
                    path: self.location(),
                    expected: "a schema object",
                })
            }
        };
        let items = self.descend(&["items"], |this| this.convert_bare(items))?;
        Ok(AvroType::Array(Box::new(items)))
    }

    /// Convert `anyOf` into a union; member order is kept as written.
    ///
    /// A member that is itself a union contributes its members in place,
    /// since Avro unions cannot nest.
    fn any_of_to_union(&mut self, node: &Value) -> Result<AvroType> {
        let members = node
            .get("anyOf")
            .and_then(Value::as_array)
            .ok_or_else(|| ConvertError::InvalidKeyword {
                keyword: "anyOf",
                path: self.location(),
                expected: "an array of schemas",
            })?;

        let mut union = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let index = index.to_string();
            match self.descend(&["anyOf", index.as_str()], |this| this.convert_bare(member))? {
                AvroType::Union(members) => union.extend(members),
                member => union.push(member),
            }
        }
        Ok(AvroType::Union(union))
    }
}
