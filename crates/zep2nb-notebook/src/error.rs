//! Error types for Zeppelin note conversion

use thiserror::Error;

/// Error type for note conversion operations
#[derive(Error, Debug)]
pub enum NotebookError {
    /// I/O error when reading a note
    #[error("Failed to read note: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("Failed to process note JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The source note lacks a field the target notebook needs
    #[error("Note is missing required field '{0}'")]
    MissingRequiredField(&'static str),
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, NotebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = NotebookError::MissingRequiredField("name");
        assert_eq!(err.to_string(), "Note is missing required field 'name'");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: NotebookError = json_err.into();
        assert!(matches!(err, NotebookError::JsonError(_)));
        assert!(err.to_string().starts_with("Failed to process note JSON"));
    }
}
