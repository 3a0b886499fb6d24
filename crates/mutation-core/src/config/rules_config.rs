//! Rule catalog and activation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for rule registration and activation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Register a code smell rule next to every operator bug rule. Default: true.
    pub code_smell_variants: Option<bool>,
    /// Rule keys activated in addition to the built-in profile.
    #[serde(default)]
    pub extra_active: Vec<String>,
    /// Threshold for the coverage rule, overriding the rule's default parameter.
    pub coverage_threshold: Option<f64>,
}

impl RulesConfig {
    /// Returns whether code smell variants are registered, defaulting to true.
    pub fn effective_code_smell_variants(&self) -> bool {
        self.code_smell_variants.unwrap_or(true)
    }
}
