//! Reporters: output formats for analysis results.
//!
//! 2 formats: SonarQube Generic Issue Import and plain JSON.

pub mod json;
pub mod sonarqube;

use crate::rules::RulesContext;
use crate::sensors::SensorReport;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &SensorReport, rules: &RulesContext) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "sonarqube" => Some(Box::new(sonarqube::SonarQubeReporter::new())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["sonarqube", "json"]
}
