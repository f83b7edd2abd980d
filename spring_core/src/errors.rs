//! # Error Types
//!
//! Structured error types for spring_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Note the deliberate split: errors cover *malformed input* and *I/O*.
//! A candidate spring that fails a design check (spring index, buckling,
//! safety factor) is not an error — it is a normal outcome recorded on the
//! [`SpringDesign`](crate::calculations::spring::SpringDesign) itself.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::errors::{SpringError, SpringResult};
//!
//! fn validate_mean_diameter(d_mm: f64) -> SpringResult<()> {
//!     if d_mm <= 0.0 {
//!         return Err(SpringError::InvalidInput {
//!             field: "mean_diameter_mm".to_string(),
//!             value: d_mm.to_string(),
//!             reason: "Mean coil diameter must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spring_core operations
pub type SpringResult<T> = Result<T, SpringError>;

/// Structured error type for engine operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SpringError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material name not recognized by the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SpringError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SpringError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SpringError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        SpringError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SpringError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        SpringError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SpringError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SpringError::InvalidInput { .. } => "INVALID_INPUT",
            SpringError::MissingField { .. } => "MISSING_FIELD",
            SpringError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            SpringError::FileError { .. } => "FILE_ERROR",
            SpringError::FileLocked { .. } => "FILE_LOCKED",
            SpringError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SpringError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SpringError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error =
            SpringError::invalid_input("free_length_mm", "-60", "Free length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SpringError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SpringError::missing_field("f_min_n").error_code(), "MISSING_FIELD");
        assert_eq!(
            SpringError::material_not_found("unobtanium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_recoverable() {
        let locked = SpringError::file_locked("job.hlx", "someone", "now");
        assert!(locked.is_recoverable());
        assert!(!SpringError::missing_field("d").is_recoverable());
    }
}
