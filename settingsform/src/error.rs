//! Error types for settings form rendering

use settingsform_fields::{CallbackError, SchemaError};
use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors that can occur while rendering or saving a settings form
#[derive(Debug, Error)]
pub enum FormError {
    /// The schema failed to build
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A callback field's renderer failed
    #[error("callback for field '{field}' failed: {source}")]
    Callback {
        field: String,
        source: CallbackError,
    },

    /// The option store could not read or write a bundle
    #[error("option store error for '{option_name}': {message}")]
    Store {
        option_name: String,
        message: String,
    },

    /// A submission targeted an option no group registered
    #[error("option '{option_name}' is not registered")]
    UnregisteredOption { option_name: String },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for FormError {
    fn from(error: figment::Error) -> Self {
        FormError::Config(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_error_keeps_source() {
        use std::error::Error as _;

        let err = FormError::Callback {
            field: "api_key".into(),
            source: "service unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "callback for field 'api_key' failed: service unavailable"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: FormError = SchemaError::EmptyChoices {
            field: "size".into(),
        }
        .into();
        assert_eq!(err.to_string(), "field 'size' requires at least one choice");
    }
}
