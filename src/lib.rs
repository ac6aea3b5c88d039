//! # jsonschema-avro
//!
//! Convert [JSON Schema](https://json-schema.org/) documents, as produced by
//! data-model definitions, into [Apache Avro](https://avro.apache.org/)
//! schemas.
//!
//! ## Features
//!
//! - Objects with `properties` become records, other objects become maps
//! - Local `$ref` resolution (`#/definitions/...`)
//! - Self- and mutually-referential records are emitted once and referenced
//!   by full name afterwards
//! - Nested records are namespaced by their position (`base.Outer.Inner`)
//! - `required`, `default` and optional fields map to Avro defaults and
//!   `["null", T]` unions
//! - `date`, `time`, `date-time` and `uuid` formats map to logical types
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use jsonschema_avro::JsonSchema;
//!
//! let schema = json!({
//!     "title": "Model",
//!     "type": "object",
//!     "properties": { "n": { "type": "integer" } },
//!     "required": ["n"]
//! });
//!
//! let avro = JsonSchema::new(schema).to_avro().unwrap();
//! assert_eq!(
//!     avro.to_value().unwrap(),
//!     json!({
//!         "namespace": "base",
//!         "name": "Model",
//!         "type": "record",
//!         "fields": [{ "name": "n", "type": "long" }]
//!     })
//! );
//! ```
//!
//! ## CLI
//!
//! ```bash
//! jsonschema2avro schema.json out.avsc --namespace com.example
//! ```
//!
//! The binary is enabled with the `cli` feature (on by default); the `http`
//! feature lets it read the input schema from a URL.
pub mod avro;
pub mod common;
pub mod converter;
pub mod error;

pub use avro::{AvroDocument, AvroField, AvroNode, AvroType};
pub use converter::{json_to_avro, Converter, JsonSchema};
pub use error::ConvertError;
