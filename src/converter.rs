pub mod analysis;
pub mod conversion;
pub mod references;
pub mod registry;
pub mod state;
pub mod structs;
pub mod types;

pub use analysis::{classify, Shape};
pub use references::resolve_reference;
pub use registry::{RecordRegistry, Registration};
pub use state::{Converter, DEFAULT_MAX_DEPTH, DEFAULT_NAMESPACE};

use serde_json::Value;

use crate::avro::AvroDocument;
use crate::common::names::avro_namespace;
use crate::error::Result;

/// A JSON Schema document bound to the namespace its records are emitted in.
#[derive(Debug, Clone)]
pub struct JsonSchema {
    document: Value,
    namespace: String,
    max_depth: usize,
}

impl JsonSchema {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the root namespace. It is normalized to a valid Avro
    /// namespace.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = avro_namespace(namespace);
        self
    }

    /// Maximum nesting depth of schema nodes before conversion gives up.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Convert the document into an Avro schema.
    ///
    /// Every call runs with fresh state, so repeated calls give identical
    /// output.
    pub fn to_avro(&self) -> Result<AvroDocument> {
        let mut converter =
            Converter::new(&self.document, &self.namespace).with_max_depth(self.max_depth);
        let root = converter
            .convert(&self.document, None, true, None)?
            .into_type();
        Ok(AvroDocument { root })
    }
}

/// Convert an in-memory JSON Schema into an Avro schema.
pub fn json_to_avro(json_schema: &Value, namespace: &str) -> Result<AvroDocument> {
    JsonSchema::new(json_schema.clone())
        .with_namespace(namespace)
        .to_avro()
}

#[cfg(feature = "cli")]
pub use files::convert_jsons_to_avro;

#[cfg(feature = "cli")]
mod files {
    use anyhow::{Context, Result};
    use serde_json::Value;
    use std::fs;

    use super::JsonSchema;

    fn read_schema_text(json_schema_file_path: &str) -> Result<String> {
        if json_schema_file_path.starts_with("http://")
            || json_schema_file_path.starts_with("https://")
        {
            return fetch_schema_text(json_schema_file_path);
        }
        fs::read_to_string(json_schema_file_path)
            .with_context(|| format!("Failed to read schema file {json_schema_file_path}"))
    }

    #[cfg(feature = "http")]
    fn fetch_schema_text(url: &str) -> Result<String> {
        reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .with_context(|| format!("HTTP fetch of {url} failed"))
    }

    #[cfg(not(feature = "http"))]
    fn fetch_schema_text(url: &str) -> Result<String> {
        anyhow::bail!("reading {url} requires the `http` feature")
    }

    /// Convert a JSON Schema file into an Avro schema file.
    ///
    /// # Arguments
    /// * `json_schema_file_path` - Path of the input JSON Schema (or an
    ///   `http(s)` URL with the `http` feature).
    /// * `avro_schema_path` - Path the `.avsc` file is written to.
    /// * `namespace` - Root namespace for emitted records.
    /// * `max_depth` - Nesting guard for the conversion.
    /// * `pretty` - Pretty-print the output.
    pub fn convert_jsons_to_avro(
        json_schema_file_path: &str,
        avro_schema_path: &str,
        namespace: &str,
        max_depth: usize,
        pretty: bool,
    ) -> Result<()> {
        let content = read_schema_text(json_schema_file_path)?;
        let json_schema: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {json_schema_file_path}"))?;

        let avro_schema = JsonSchema::new(json_schema)
            .with_namespace(namespace)
            .with_max_depth(max_depth)
            .to_avro()
            .with_context(|| format!("Failed to convert {json_schema_file_path}"))?;

        let output = if pretty {
            avro_schema.to_string_pretty()?
        } else {
            serde_json::to_string(&avro_schema)?
        };
        fs::write(avro_schema_path, output)
            .with_context(|| format!("Failed to write {avro_schema_path}"))?;
        tracing::info!(input = %json_schema_file_path, output = %avro_schema_path, "converted schema");
        Ok(())
    }
}
