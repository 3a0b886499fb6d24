//! Feature switches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeatureConfig {
    /// Enables global mutants, test metrics, density and percentage measures. Default: false.
    pub experimental: Option<bool>,
    /// Report 0% coverage for components without mutation data. Default: false.
    pub force_missing_coverage_to_zero: Option<bool>,
}

impl FeatureConfig {
    pub fn experimental_enabled(&self) -> bool {
        self.experimental.unwrap_or(false)
    }

    pub fn force_missing_coverage_to_zero(&self) -> bool {
        self.force_missing_coverage_to_zero.unwrap_or(false)
    }
}
