//! Domain error types
//!
//! This module defines the error hierarchy for Leafex.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Leafex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LeafexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Host document errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Image encoder errors
    #[error("Encode error: {0}")]
    Encode(String),

    /// Filesystem errors raised by a filesystem adapter
    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Host document errors
///
/// Raised by [`LayerTree`](crate::adapters::document::LayerTree) implementations
/// when the layer model cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A group's children could not be enumerated
    #[error("Group '{name}' cannot be enumerated: {reason}")]
    GroupUnreadable { name: String, reason: String },

    /// Group id does not belong to this document
    #[error("Unknown group: {0}")]
    UnknownGroup(usize),

    /// Layer id does not belong to this document
    #[error("Unknown layer: {0}")]
    UnknownLayer(usize),

    /// Manifest is structurally invalid
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for LeafexError {
    fn from(err: std::io::Error) -> Self {
        LeafexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LeafexError {
    fn from(err: serde_json::Error) -> Self {
        LeafexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LeafexError {
    fn from(err: toml::de::Error) -> Self {
        LeafexError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leafex_error_display() {
        let err = LeafexError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_document_error_conversion() {
        let doc_err = DocumentError::GroupUnreadable {
            name: "Arms".to_string(),
            reason: "locked".to_string(),
        };
        let err: LeafexError = doc_err.into();
        assert!(matches!(err, LeafexError::Document(_)));
        assert_eq!(
            err.to_string(),
            "Document error: Group 'Arms' cannot be enumerated: locked"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: LeafexError = io_err.into();
        assert!(matches!(err, LeafexError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: LeafexError = json_err.into();
        assert!(matches!(err, LeafexError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: LeafexError = toml_err.into();
        assert!(matches!(err, LeafexError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_leafex_error_implements_std_error() {
        let err = LeafexError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
