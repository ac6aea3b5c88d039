use jsonschema_avro::{json_to_avro, ConvertError, JsonSchema};
use rstest::rstest;
use serde_json::{json, Value};

fn to_avro(schema: Value) -> Value {
    JsonSchema::new(schema).to_avro().unwrap().to_value().unwrap()
}

fn assert_parses_as_avro(avro: &Value) {
    if let Err(e) = apache_avro::Schema::parse(avro) {
        panic!("produced schema is not valid Avro: {e}\n{avro:#}");
    }
}

/// Every `(fullname, has_fields)` record occurrence in an Avro tree.
fn record_occurrences(value: &Value, out: &mut Vec<(String, bool)>) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&json!("record")) {
                let name = map["name"].as_str().unwrap();
                match map.get("fields") {
                    Some(Value::Array(fields)) => {
                        let namespace = map["namespace"].as_str().unwrap();
                        out.push((format!("{namespace}.{name}"), !fields.is_empty()));
                    }
                    _ => {
                        assert_eq!(map.len(), 2, "short reference has extra keys: {value}");
                        out.push((name.to_string(), false));
                    }
                }
            }
            for child in map.values() {
                record_occurrences(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                record_occurrences(item, out);
            }
        }
        _ => {}
    }
}

fn pet_store() -> Value {
    json!({
        "title": "Store",
        "type": "object",
        "properties": {
            "first": {"$ref": "#/definitions/Pet"},
            "second": {"$ref": "#/definitions/Pet"},
            "pets": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
        },
        "required": ["first", "second", "pets"],
        "definitions": {
            "Pet": {
                "title": "Pet",
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "owner": {"$ref": "#/definitions/Person"}
                },
                "required": ["name"]
            },
            "Person": {
                "title": "Person",
                "type": "object",
                "properties": {
                    "pets": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}
                }
            }
        }
    })
}

#[test]
fn flat_record() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {"n": {"type": "integer"}},
        "required": ["n"]
    }));
    assert_eq!(
        avro,
        json!({
            "namespace": "base",
            "name": "Model",
            "type": "record",
            "fields": [{"name": "n", "type": "long"}]
        })
    );
    assert_parses_as_avro(&avro);
}

#[test]
fn custom_namespace() {
    let schema = json!({
        "title": "Model",
        "type": "object",
        "properties": {"string_field": {"type": "string"}},
        "required": ["string_field"]
    });
    let avro = JsonSchema::new(schema.clone())
        .with_namespace("streamer")
        .to_avro()
        .unwrap()
        .to_value()
        .unwrap();
    assert_eq!(avro["namespace"], "streamer");
    assert_eq!(json_to_avro(&schema, "streamer").unwrap().to_value().unwrap(), avro);
}

#[test]
fn optional_and_default_fields() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {
            "optional_int": {"title": "Optional Int", "type": "integer"},
            "default_int": {"title": "Default Int", "type": "integer", "default": 1000},
            "flag": {"type": "boolean", "default": false}
        }
    }));
    assert_eq!(
        avro["fields"],
        json!([
            {"name": "optional_int", "type": ["null", "long"], "default": null},
            {"name": "default_int", "type": "long", "default": 1000},
            {"name": "flag", "type": "boolean", "default": false}
        ])
    );
    assert_parses_as_avro(&avro);
}

#[test]
fn fields_keep_declaration_order() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {
            "zeta": {"type": "string"},
            "alpha": {"type": "string"},
            "mid": {"type": "string"}
        },
        "required": ["zeta", "alpha", "mid"]
    }));
    let names: Vec<&str> = avro["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn lists_unions_and_maps() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {
            "list_of_int": {"type": "array", "items": {"type": "integer"}},
            "union_of_int_and_string": {"anyOf": [{"type": "integer"}, {"type": "string"}]},
            "scores": {"type": "object", "additionalProperties": {"type": "number"}},
            "labels": {"type": "object", "additionalProperties": true}
        },
        "required": ["list_of_int", "union_of_int_and_string", "scores", "labels"]
    }));
    assert_eq!(
        avro["fields"],
        json!([
            {"name": "list_of_int", "type": {"type": "array", "items": {"type": "long"}}},
            {"name": "union_of_int_and_string", "type": [{"type": "long"}, {"type": "string"}]},
            {"name": "scores", "type": {"type": "map", "values": {"type": "double"}}},
            {"name": "labels", "type": {"type": "map", "values": {"type": "string"}}}
        ])
    );
    assert_parses_as_avro(&avro);
}

#[test]
fn bare_map() {
    assert_eq!(
        to_avro(json!({"type": "object", "additionalProperties": {"type": "number"}})),
        json!({"type": "map", "values": {"type": "double"}})
    );
}

#[test]
fn object_without_properties_or_values_is_a_string_map() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {"extra": {"title": "Extra", "type": "object"}},
        "required": ["extra"]
    }));
    assert_eq!(
        avro["fields"][0],
        json!({"name": "extra", "type": {"type": "map", "values": {"type": "string"}}})
    );
    assert_parses_as_avro(&avro);
}

#[test]
fn union_order_is_kept_and_optional_unions_are_flattened() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {
            "value": {"anyOf": [{"type": "string"}, {"type": "number"}, {"type": "integer"}]}
        }
    }));
    assert_eq!(
        avro["fields"][0],
        json!({
            "name": "value",
            "type": ["null", {"type": "string"}, {"type": "double"}, {"type": "long"}],
            "default": null
        })
    );
    assert_parses_as_avro(&avro);
}

#[test]
fn nested_unions_are_merged_into_one() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {
            "direct": {"anyOf": [{"anyOf": [{"type": "integer"}, {"type": "string"}]}, {"type": "number"}]},
            "via_ref": {"anyOf": [{"type": "boolean"}, {"$ref": "#/definitions/IdOrName"}]}
        },
        "required": ["direct", "via_ref"],
        "definitions": {
            "IdOrName": {"anyOf": [{"type": "integer"}, {"type": "string"}]}
        }
    }));
    assert_eq!(
        avro["fields"],
        json!([
            {"name": "direct", "type": [{"type": "long"}, {"type": "string"}, {"type": "double"}]},
            {"name": "via_ref", "type": [{"type": "boolean"}, {"type": "long"}, {"type": "string"}]}
        ])
    );
    assert_parses_as_avro(&avro);
}

#[rstest]
#[case(json!({"type": "string", "format": "date"}), json!({"type": "int", "logicalType": "date"}))]
#[case(json!({"type": "string", "format": "time"}), json!({"type": "long", "logicalType": "time-micros"}))]
#[case(json!({"type": "string", "format": "date-time"}), json!({"type": "long", "logicalType": "timestamp-micros"}))]
#[case(json!({"type": "string", "format": "uuid"}), json!({"type": "string", "logicalType": "uuid"}))]
#[case(json!({"type": "string", "format": "binary"}), json!({"type": "bytes"}))]
#[case(json!({"type": "string", "enum": ["F", "S"]}), json!({"type": "string"}))]
fn scalar_formats(#[case] schema: Value, #[case] expected: Value) {
    let avro = to_avro(schema);
    assert_eq!(avro, expected);
    assert_parses_as_avro(&avro);
}

#[test]
fn logical_type_defaults() {
    let avro = to_avro(json!({
        "title": "Event",
        "type": "object",
        "properties": {
            "day": {"type": "string", "format": "date", "default": "2020-01-01"}
        }
    }));
    assert_eq!(
        avro["fields"][0],
        json!({
            "name": "day",
            "type": {"type": "int", "logicalType": "date", "default": "2020-01-01"},
            "default": "2020-01-01"
        })
    );
}

#[test]
fn enum_definitions_flatten_to_string() {
    let avro = to_avro(json!({
        "title": "Model",
        "type": "object",
        "properties": {"string_enum": {"$ref": "#/definitions/StrEnum"}},
        "required": ["string_enum"],
        "definitions": {
            "StrEnum": {
                "title": "StrEnum",
                "description": "An enumeration.",
                "enum": ["F", "S"],
                "type": "string"
            }
        }
    }));
    assert_eq!(avro["fields"], json!([{"name": "string_enum", "type": "string"}]));
}

#[test]
fn self_reference() {
    let avro = to_avro(json!({
        "$ref": "#/definitions/Model",
        "definitions": {
            "Model": {
                "title": "Model",
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "child": {"$ref": "#/definitions/Model"}
                },
                "required": ["name"]
            }
        }
    }));
    assert_eq!(
        avro,
        json!({
            "namespace": "base",
            "name": "Model",
            "type": "record",
            "fields": [
                {"name": "name", "type": "string"},
                {
                    "name": "child",
                    "type": ["null", {"type": "record", "name": "base.Model"}],
                    "default": null
                }
            ]
        })
    );
}

#[test]
fn inline_root_referencing_itself() {
    let model = json!({
        "title": "Model",
        "type": "object",
        "properties": {"child": {"$ref": "#/definitions/Model"}}
    });
    let mut schema = model.clone();
    schema["definitions"] = json!({"Model": model});
    let avro = to_avro(schema);
    assert_eq!(
        avro["fields"][0]["type"],
        json!(["null", {"type": "record", "name": "base.Model"}])
    );
}

#[test]
fn mutual_references() {
    let avro = to_avro(json!({
        "$ref": "#/definitions/A",
        "definitions": {
            "A": {"title": "A", "type": "object", "properties": {"b": {"$ref": "#/definitions/B"}}, "required": ["b"]},
            "B": {"title": "B", "type": "object", "properties": {"a": {"$ref": "#/definitions/A"}}}
        }
    }));
    assert_eq!(
        avro,
        json!({
            "namespace": "base",
            "name": "A",
            "type": "record",
            "fields": [{
                "name": "b",
                "type": {
                    "namespace": "base",
                    "name": "B",
                    "type": "record",
                    "fields": [{
                        "name": "a",
                        "type": ["null", {"type": "record", "name": "base.A"}],
                        "default": null
                    }]
                }
            }]
        })
    );
}

#[test]
fn each_record_body_is_emitted_once() {
    let avro = to_avro(pet_store());
    let mut occurrences = Vec::new();
    record_occurrences(&avro, &mut occurrences);

    for name in ["base.Store", "base.Pet", "base.Person"] {
        let full = occurrences
            .iter()
            .filter(|(n, has_fields)| n == name && *has_fields)
            .count();
        assert_eq!(full, 1, "{name} should be emitted in full exactly once");
    }
    let short_pets = occurrences
        .iter()
        .filter(|(n, has_fields)| n == "base.Pet" && !has_fields)
        .count();
    assert_eq!(short_pets, 3);
    assert_eq!(
        avro["fields"][1],
        json!({"name": "second", "type": {"type": "record", "name": "base.Pet"}})
    );
}

#[test]
fn conversion_is_idempotent() {
    let schema = JsonSchema::new(pet_store());
    let first = serde_json::to_string(&schema.to_avro().unwrap()).unwrap();
    let second = serde_json::to_string(&schema.to_avro().unwrap()).unwrap();
    assert_eq!(first, second);
    let fresh = serde_json::to_string(&JsonSchema::new(pet_store()).to_avro().unwrap()).unwrap();
    assert_eq!(first, fresh);
}

#[test]
fn nested_records_are_namespaced_by_position() {
    let avro = to_avro(json!({
        "title": "Order",
        "description": "A customer order",
        "type": "object",
        "properties": {
            "customer": {
                "title": "Customer",
                "type": "object",
                "properties": {
                    "address": {
                        "title": "Address",
                        "type": "object",
                        "properties": {"street": {"type": "string"}},
                        "required": ["street"]
                    }
                },
                "required": ["address"]
            },
            "lines": {
                "type": "array",
                "items": {
                    "title": "Line",
                    "type": "object",
                    "properties": {"sku": {"type": "string"}},
                    "required": ["sku"]
                }
            }
        },
        "required": ["customer", "lines"]
    }));
    assert_eq!(avro["doc"], "A customer order");
    let customer = &avro["fields"][0]["type"];
    assert_eq!(customer["namespace"], "base.Order");
    assert_eq!(customer["fields"][0]["type"]["namespace"], "base.Order.Customer");
    assert_eq!(avro["fields"][1]["type"]["items"]["namespace"], "base");
    assert_parses_as_avro(&avro);
}

#[test]
fn names_are_sanitized() {
    let avro = to_avro(json!({
        "title": "My Model",
        "type": "object",
        "properties": {"first-name": {"type": "string"}},
        "required": ["first-name"]
    }));
    assert_eq!(avro["name"], "My_Model");
    assert_eq!(avro["fields"][0], json!({"name": "first_name", "type": "string"}));
    assert_parses_as_avro(&avro);
}

#[rstest]
#[case::unknown_type(
    json!({"title": "M", "type": "object", "properties": {"x": {"type": "null"}}}),
    ConvertError::UnknownSchemaType { path: "#/properties/x".into() }
)]
#[case::non_string_enum(
    json!({"title": "M", "type": "object", "properties": {"x": {"type": "integer", "enum": [1, 2]}}}),
    ConvertError::EnumOfNonStringType { path: "#/properties/x".into(), found: "\"integer\"".into() }
)]
#[case::enum_without_type(
    json!({"enum": ["a", "b"]}),
    ConvertError::EnumOfNonStringType { path: "#".into(), found: "no type".into() }
)]
#[case::all_of(
    json!({
        "title": "M",
        "type": "object",
        "properties": {"x": {"allOf": [{"$ref": "#/definitions/D"}], "default": {"v": 1}}},
        "definitions": {"D": {"title": "D", "type": "object", "properties": {"v": {"type": "integer"}}}}
    }),
    ConvertError::NestedDefaultUnsupported { path: "#/properties/x".into() }
)]
#[case::external_ref(
    json!({"$ref": "other.json#/definitions/A"}),
    ConvertError::UnsupportedExternalRef { reference: "other.json#/definitions/A".into() }
)]
#[case::dangling_ref(
    json!({"$ref": "#/definitions/Missing"}),
    ConvertError::DanglingRef { reference: "#/definitions/Missing".into() }
)]
#[case::missing_title(
    json!({"type": "object", "properties": {"n": {"type": "integer"}}}),
    ConvertError::MissingTitle { path: "#".into() }
)]
#[case::array_without_items(
    json!({"type": "array"}),
    ConvertError::InvalidKeyword { keyword: "items", path: "#".into(), expected: "a schema object" }
)]
#[case::closed_map(
    json!({"type": "object", "additionalProperties": false}),
    ConvertError::InvalidKeyword { keyword: "additionalProperties", path: "#".into(), expected: "a schema object or true" }
)]
#[case::field_names_collide(
    json!({
        "title": "M",
        "type": "object",
        "properties": {"a-b": {"type": "string"}, "a_b": {"type": "integer"}}
    }),
    ConvertError::NameCollision {
        name: "a_b".into(),
        original: "a_b".into(),
        existing: "a-b".into(),
        path: "#/properties/a_b".into()
    }
)]
#[case::record_titles_collide(
    json!({
        "title": "M",
        "type": "object",
        "properties": {
            "first": {"title": "A-B", "type": "object", "properties": {"x": {"type": "string"}}},
            "second": {"title": "A_B", "type": "object", "properties": {"y": {"type": "integer"}}}
        }
    }),
    ConvertError::NameCollision {
        name: "base.M.A_B".into(),
        original: "A_B".into(),
        existing: "A-B".into(),
        path: "#/properties/second".into()
    }
)]
fn conversion_errors(#[case] schema: Value, #[case] expected: ConvertError) {
    assert_eq!(JsonSchema::new(schema).to_avro(), Err(expected));
}

#[test]
fn depth_limit() {
    let mut schema = json!({"type": "integer"});
    for _ in 0..10 {
        schema = json!({"type": "array", "items": schema});
    }
    assert!(JsonSchema::new(schema.clone()).to_avro().is_ok());
    assert!(matches!(
        JsonSchema::new(schema).with_max_depth(5).to_avro(),
        Err(ConvertError::DepthLimitExceeded { limit: 5, .. })
    ));
}

#[test]
fn error_messages() {
    let err = JsonSchema::new(json!({"allOf": []})).to_avro().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Avro schema cannot have nested objects with default values (allOf at #)"
    );
    let err = JsonSchema::new(json!({"$ref": "schema.json"})).to_avro().unwrap_err();
    assert_eq!(err.to_string(), "won't resolve external reference schema.json");
}
