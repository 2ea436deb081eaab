//! Error types for timetable generation.
//!
//! Distinguishes invalid input (rejected before any store mutation) from
//! failures during a generation run (the staged batch is discarded) and
//! from lesson store or configuration problems.

use std::path::PathBuf;

/// A specialized `Result` type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors that can occur while configuring or running timetable generation.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Request rejected during validation. Nothing was staged or committed.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the request.
        message: String,
    },

    /// Unexpected failure while the placement passes ran.
    ///
    /// All lessons staged by the run were discarded.
    #[error("Schedule generation failed: {message}")]
    GenerationFailed {
        /// Description of the failure.
        message: String,
    },

    /// A lesson store operation failed.
    #[error("Lesson store error: {message}")]
    Store {
        /// Description of the store failure.
        message: String,
    },

    /// Invalid JSON in a configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate the file with a JSON linter")]
    ConfigParse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimetableError {
    /// Creates an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `GenerationFailed` error.
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    /// Creates a `Store` error.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a `ConfigValidation` error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Whether the error was raised while validating a request.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TimetableError::invalid_input("start date 2025-02-01 is after end date");
        assert!(err.to_string().starts_with("Invalid input"));
        assert!(err.is_invalid_input());

        let err = TimetableError::generation("teacher 3 double-booked");
        assert!(err.to_string().contains("teacher 3"));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_config_validation_has_suggestion() {
        let err = TimetableError::config_validation("no time slots", "Add at least one slot");
        let msg = err.to_string();
        assert!(msg.contains("no time slots"));
        assert!(msg.contains("Suggestion: Add at least one slot"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TimetableError = io_err.into();
        assert!(matches!(err, TimetableError::Io(_)));
    }
}
