//! Sensor configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REPORT_DIRECTORY;
use crate::types::Language;

/// Configuration for the PIT sensors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SensorConfig {
    /// Run the Java sensor. Default: true.
    pub java_enabled: Option<bool>,
    /// Run the Kotlin sensor. Default: true.
    pub kotlin_enabled: Option<bool>,
    /// PIT report directory relative to the module base directory.
    /// Default: `target/pit-reports`.
    pub report_directory: Option<String>,
    /// Root of a multi-module project. Discovered from build files when unset.
    pub project_root: Option<String>,
}

impl SensorConfig {
    /// Returns whether the sensor for `language` is enabled.
    pub fn is_enabled(&self, language: Language) -> bool {
        match language {
            Language::Java => self.java_enabled.unwrap_or(true),
            Language::Kotlin => self.kotlin_enabled.unwrap_or(true),
        }
    }

    /// Returns the effective report directory, defaulting to `target/pit-reports`.
    pub fn effective_report_directory(&self) -> &str {
        self.report_directory
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_DIRECTORY)
    }
}
