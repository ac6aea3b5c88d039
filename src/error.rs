use thiserror::Error;

/// Errors raised while converting a JSON Schema document into Avro.
///
/// Every variant aborts the whole conversion; there is no partial output.
/// Locations are JSON pointers into the input document (`#/properties/a`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("unknown schema type at {path}")]
    UnknownSchemaType { path: String },

    #[error("enum at {path} must have type \"string\", found {found}")]
    EnumOfNonStringType { path: String, found: String },

    #[error("Avro schema cannot have nested objects with default values (allOf at {path})")]
    NestedDefaultUnsupported { path: String },

    #[error("won't resolve external reference {reference}")]
    UnsupportedExternalRef { reference: String },

    #[error("reference {reference} does not resolve in the root document")]
    DanglingRef { reference: String },

    #[error("record-shaped object at {path} has no title")]
    MissingTitle { path: String },

    #[error("invalid `{keyword}` at {path}: expected {expected}")]
    InvalidKeyword {
        keyword: &'static str,
        path: String,
        expected: &'static str,
    },

    #[error("`{original}` at {path} sanitizes to `{name}`, which is already taken by `{existing}`")]
    NameCollision {
        name: String,
        original: String,
        existing: String,
        path: String,
    },

    #[error("maximum nesting depth {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: String },
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
