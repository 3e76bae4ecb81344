//! Custom error types for the attrition analysis pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Input problems
//! (missing files, wrong column layout) are fatal; a zero denominator is
//! reported as [`AnalysisError::DivisionByZero`] so callers can decide how to
//! present "no data" instead of ever seeing a NaN.
//!
//! Errors are serializable so they can be embedded in JSON reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// An input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A headerless file has the wrong number of columns.
    #[error("Expected {expected} columns in '{file}', found {found}")]
    SchemaMismatch {
        file: String,
        expected: usize,
        found: usize,
    },

    /// A required column is missing from an input file.
    #[error("Column '{column}' not found in '{file}'")]
    ColumnNotFound { file: String, column: String },

    /// A required numeric column has empty values.
    #[error("Column '{column}' in '{file}' has {rows} empty value(s)")]
    MissingValues {
        file: String,
        column: String,
        rows: usize,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rate or percentage was requested over an empty population.
    #[error("Division by zero while computing {0}")]
    DivisionByZero(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code, preserved through added context.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            Self::MissingValues { .. } => "MISSING_VALUES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::DivisionByZero(_) => "DIVISION_BY_ZERO",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means "the population was empty".
    pub fn is_division_by_zero(&self) -> bool {
        match self {
            Self::DivisionByZero(_) => true,
            Self::WithContext { source, .. } => source.is_division_by_zero(),
            _ => false,
        }
    }

    /// Check if this error comes from unusable input files.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::FileNotFound(_)
            | Self::SchemaMismatch { .. }
            | Self::ColumnNotFound { .. }
            | Self::MissingValues { .. } => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for AnalysisError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::FileNotFound(PathBuf::from("adult.csv")).error_code(),
            "FILE_NOT_FOUND"
        );
        assert_eq!(
            AnalysisError::SchemaMismatch {
                file: "adult.csv".to_string(),
                expected: 15,
                found: 14,
            }
            .error_code(),
            "SCHEMA_MISMATCH"
        );
    }

    #[test]
    fn test_schema_mismatch_names_file() {
        let error = AnalysisError::SchemaMismatch {
            file: "adult.csv".to_string(),
            expected: 15,
            found: 14,
        };
        let message = error.to_string();
        assert!(message.contains("adult.csv"));
        assert!(message.contains("15"));
        assert!(message.contains("14"));
    }

    #[test]
    fn test_division_by_zero_survives_context() {
        let error = AnalysisError::DivisionByZero("travel attrition".to_string())
            .with_context("Non-Travel");
        assert!(error.is_division_by_zero());
        assert_eq!(error.error_code(), "DIVISION_BY_ZERO");
        assert!(!error.is_input_error());
    }

    #[test]
    fn test_input_errors() {
        let error = AnalysisError::ColumnNotFound {
            file: "IBM_HR_data.csv".to_string(),
            column: "Attrition".to_string(),
        };
        assert!(error.is_input_error());
        assert!(!error.is_division_by_zero());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::ColumnNotFound {
            file: "IBM_HR_data.csv".to_string(),
            column: "Gender".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Gender"));
    }
}
