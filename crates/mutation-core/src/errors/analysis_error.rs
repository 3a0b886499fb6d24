//! Top-level analysis errors.

use super::error_code::{self, MutationErrorCode};
use super::{CatalogError, ConfigError, ReportError};

/// Errors that can occur during an analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Cannot write {path}: {message}")]
    Output { path: String, message: String },

    #[error("Reporter '{format}' failed: {message}")]
    Reporter { format: String, message: String },
}

impl MutationErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::UnsupportedLanguage(_) => error_code::UNSUPPORTED_LANGUAGE,
            Self::Output { .. } => error_code::OUTPUT_ERROR,
            Self::Reporter { .. } => error_code::REPORTER_ERROR,
        }
    }
}
