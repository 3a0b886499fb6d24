//! MutationErrorCode trait for tagged error output.

/// Every error enum implements this to provide a stable, machine-readable
/// code alongside its human-readable message.
pub trait MutationErrorCode {
    /// Returns the error code string (e.g., "CATALOG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const DUPLICATE_KEY: &str = "DUPLICATE_KEY";
pub const UNKNOWN_RULE: &str = "UNKNOWN_RULE";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const REPORTER_ERROR: &str = "REPORTER_ERROR";
