//! Error types for rollbook.
//!
//! This module defines the single error enum used throughout the crate so
//! that every layer (store, config, CLI, interactive menu) reports failures
//! the same way.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rollbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to write the primary data file or a backup snapshot.
    #[error("failed to write {path}: {source}")]
    DataFileWrite {
        /// Path that could not be written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// A record with this roll number already exists in the collection.
    #[error("a student with roll number {roll_number} already exists")]
    DuplicateRollNumber {
        /// The offending roll number.
        roll_number: u32,
    },

    /// No record with this roll number exists in the collection.
    #[error("no student with roll number {roll_number}")]
    RecordNotFound {
        /// The roll number that was looked up.
        roll_number: u32,
    },

    /// A field value failed validation.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Name of the field that was rejected.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    // === Export Errors ===
    /// Export was requested on an empty collection; no file is created.
    #[error("there are no students to export")]
    NothingToExport,

    /// CSV writing failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid-field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Check if this error came from rejecting user-supplied input.
    ///
    /// Validation errors are recoverable: the interactive loop re-prompts
    /// instead of aborting the current operation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField { .. } | Self::DuplicateRollNumber { .. }
        )
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NothingToExport;
        assert_eq!(err.to_string(), "there are no students to export");

        let err = Error::DuplicateRollNumber { roll_number: 7 };
        assert_eq!(
            err.to_string(),
            "a student with roll number 7 already exists"
        );
    }

    #[test]
    fn test_invalid_field_display() {
        let err = Error::invalid_field("age", "must be between 5 and 120");
        assert_eq!(err.to_string(), "invalid age: must be between 5 and 120");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::invalid_field("cgpa", "out of range").is_validation());
        assert!(Error::DuplicateRollNumber { roll_number: 1 }.is_validation());
        assert!(!Error::NothingToExport.is_validation());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::RecordNotFound { roll_number: 3 }.is_not_found());
        assert!(!Error::DuplicateRollNumber { roll_number: 3 }.is_not_found());
    }

    #[test]
    fn test_record_not_found_display() {
        let err = Error::RecordNotFound { roll_number: 42 };
        assert_eq!(err.to_string(), "no student with roll number 42");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_data_file_write_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DataFileWrite {
            path: PathBuf::from("/data/students.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/students.json"));
    }

    #[test]
    fn test_directory_create_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/data/backups"),
            source: io_err,
        };
        assert!(err.to_string().contains("/data/backups"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::ConfigValidation {
            message: "csv_path must not be empty".to_string(),
        };
        assert!(err.to_string().contains("csv_path"));
    }
}
