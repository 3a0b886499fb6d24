//! Rule and operator catalog errors.
//!
//! Any of these aborts registration: a repository or profile is either
//! complete or absent.

use super::error_code::{self, MutationErrorCode};

/// Errors raised while loading catalogs and registering repositories or profiles.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed definitions in {source_name}: {message}")]
    Xml { source_name: String, message: String },

    #[error("Rule '{key}' is missing mandatory field '{field}'")]
    MissingField { key: String, field: &'static str },

    #[error("Rule '{key}' has invalid {field} '{value}'")]
    InvalidValue {
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate rule '{key}' in repository '{repository}'")]
    DuplicateRule { repository: String, key: String },

    #[error("Repository '{key}' is already defined")]
    DuplicateRepository { key: String },

    #[error("Repository '{key}' does not exist")]
    UnknownRepository { key: String },

    #[error("Rule '{key}' does not exist in repository '{repository}'")]
    UnknownRule { repository: String, key: String },

    #[error("Profile '{name}' for language '{language}' is already defined")]
    DuplicateProfile { language: String, name: String },

    #[error("Rule '{repository}:{key}' is activated twice in profile '{profile}'")]
    DuplicateActivation {
        profile: String,
        repository: String,
        key: String,
    },
}

impl MutationErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateRule { .. }
            | Self::DuplicateRepository { .. }
            | Self::DuplicateProfile { .. }
            | Self::DuplicateActivation { .. } => error_code::DUPLICATE_KEY,
            Self::UnknownRepository { .. } | Self::UnknownRule { .. } => error_code::UNKNOWN_RULE,
            _ => error_code::CATALOG_ERROR,
        }
    }
}
