//! Error types for content maintenance
//!
//! Provides structured error types for loading documents, reading
//! configuration, rewriting files and driving external tools.

use std::path::Path;
use thiserror::Error;

/// Main error type for maintenance operations
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content directory could not be listed
    #[error("Content directory not found: {0}")]
    DirectoryNotFound(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Document or configuration parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration is readable but not usable
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error while rendering output
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// External tool could not be started
    #[error("External tool error: {0}")]
    ExternalTool(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ContentError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ContentError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        ContentError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ContentError::ParseError(msg.into())
    }

    /// Create a configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        ContentError::ConfigError(msg.into())
    }

    /// File error carrying the path that failed
    pub fn io_at(path: &Path, err: std::io::Error) -> Self {
        ContentError::FileError(format!("{}: {}", path.display(), err))
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ContentError::DirectoryNotFound(_)
                | ContentError::InvalidInput(_)
                | ContentError::FileError(_)
                | ContentError::ParseError(_)
                | ContentError::ConfigError(_)
        )
    }
}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        ContentError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ContentError {
    fn from(err: serde_yaml::Error) -> Self {
        ContentError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ContentError {
    fn from(err: toml::de::Error) -> Self {
        ContentError::ParseError(format!("TOML error: {}", err))
    }
}

impl From<csv::Error> for ContentError {
    fn from(err: csv::Error) -> Self {
        ContentError::ParseError(format!("CSV error: {}", err))
    }
}

/// Result type alias for maintenance operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContentError::DirectoryNotFound("content/reviews".to_string());
        assert_eq!(err.to_string(), "Content directory not found: content/reviews");
    }

    #[test]
    fn test_is_user_error() {
        assert!(ContentError::DirectoryNotFound("x".to_string()).is_user_error());
        assert!(ContentError::ConfigError("x".to_string()).is_user_error());
        assert!(!ContentError::ExternalTool("x".to_string()).is_user_error());
        assert!(!ContentError::InternalError("x".to_string()).is_user_error());
    }

    #[test]
    fn test_io_at_keeps_path() {
        let err = ContentError::io_at(
            Path::new("a/b.mdx"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ContentError::FileError(_)));
        assert!(err.to_string().contains("a/b.mdx"));
    }
}
