//! Error types for schema registration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while declaring or loading a settings schema.
///
/// Every variant is fatal: a schema that fails to build must never be rendered.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A section is missing one of its identifying attributes
    #[error("section '{section}' is missing required attribute '{attribute}'")]
    MissingSectionAttribute { section: String, attribute: String },

    /// An option group is missing its group id or option name
    #[error("option group '{option_name}' is missing required attribute '{attribute}'")]
    MissingGroupAttribute {
        option_name: String,
        attribute: String,
    },

    /// A field is missing an attribute its type requires
    #[error("field '{field}' in section '{section}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        section: String,
        field: String,
        attribute: String,
    },

    /// A select, radio or checkboxes field declared no choices
    #[error("field '{field}' requires at least one choice")]
    EmptyChoices { field: String },

    /// A callback field did not name a callback
    #[error("callback field '{field}' does not name a callback")]
    MissingCallback { field: String },

    /// A callback field names a callback that was never bound
    #[error("callback '{callback}' for field '{field}' is not registered")]
    UnboundCallback { field: String, callback: String },

    /// An option group names a sanitizer that was never bound
    #[error("sanitizer '{sanitizer}' for option '{option_name}' is not registered")]
    UnboundSanitizer {
        option_name: String,
        sanitizer: String,
    },

    /// Two sections on the same page share an id
    #[error("duplicate section '{section}' on page '{page}'")]
    DuplicateSection { page: String, section: String },

    /// Two fields in one section share an id
    #[error("duplicate field '{field}' in section '{section}'")]
    DuplicateField { section: String, field: String },

    /// Two option groups persist under the same option name
    #[error("duplicate option group for option '{option_name}'")]
    DuplicateOptionGroup { option_name: String },

    /// A section refers to an option name no group declares
    #[error("section '{section}' refers to undeclared option '{option_name}'")]
    UnknownOptionName {
        section: String,
        option_name: String,
    },

    /// A field type is not recognised and the schema rejects unknown types
    #[error("field '{field}' has unknown type '{type_name}'")]
    UnknownFieldType { field: String, type_name: String },

    /// Schema file could not be read
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Schema document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::EmptyChoices {
            field: "color".into(),
        };
        assert_eq!(err.to_string(), "field 'color' requires at least one choice");
    }

    #[test]
    fn test_missing_attribute_names_everything() {
        let err = SchemaError::MissingAttribute {
            section: "general".into(),
            field: "#2".into(),
            attribute: "title".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("general"));
        assert!(msg.contains("#2"));
        assert!(msg.contains("title"));
    }
}
