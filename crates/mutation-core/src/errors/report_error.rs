//! PIT report reading errors.

use super::error_code::{self, MutationErrorCode};

/// Errors that can occur while reading mutation reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Cannot read report {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed report {path}: {message}")]
    Xml { path: String, message: String },

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Mutant is missing mandatory field '{field}'")]
    MissingField { field: &'static str },
}

impl MutationErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
