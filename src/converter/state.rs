use serde_json::Value;

use crate::converter::references::location;
use crate::converter::registry::RecordRegistry;

pub const DEFAULT_NAMESPACE: &str = "base";
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Holds the state of one JSON Schema → Avro conversion run.
///
/// A converter is bound to a single root document. Its registry lives as
/// long as the converter, so every top-level conversion should use a fresh
/// instance.
pub struct Converter<'a> {
    pub(crate) root: &'a Value,
    pub(crate) root_namespace: String,
    pub(crate) max_depth: usize,
    pub(crate) registry: RecordRegistry,
    pub(crate) path: Vec<String>,
    pub(crate) depth: usize,
}

impl<'a> Converter<'a> {
    pub fn new(root: &'a Value, root_namespace: &str) -> Self {
        Self {
            root,
            root_namespace: root_namespace.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            registry: RecordRegistry::new(),
            path: Vec::new(),
            depth: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn registry(&self) -> &RecordRegistry {
        &self.registry
    }

    /// Pointer to the node currently being converted.
    pub(crate) fn location(&self) -> String {
        location(&self.path)
    }

    /// Run `f` with `segments` appended to the current path.
    pub(crate) fn descend<T>(
        &mut self,
        segments: &[&str],
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let len = self.path.len();
        self.path.extend(segments.iter().map(|s| s.to_string()));
        let result = f(self);
        self.path.truncate(len);
        result
    }

    /// Run `f` with the path replaced by `segments` (used when jumping
    /// through a `$ref`).
    pub(crate) fn relocate<T>(&mut self, segments: Vec<String>, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.path, segments);
        let result = f(self);
        self.path = saved;
        result
    }
}
