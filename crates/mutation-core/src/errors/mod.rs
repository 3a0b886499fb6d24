//! Error handling for the mutation analysis engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod report_error;

pub use analysis_error::AnalysisError;
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::MutationErrorCode;
pub use report_error::ReportError;
