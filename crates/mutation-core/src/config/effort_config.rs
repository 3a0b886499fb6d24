//! Remediation effort configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EFFORT_TO_KILL_MUTANT, DEFAULT_MISSING_COVERAGE_FACTOR,
    DEFAULT_SURVIVED_MUTANT_FACTOR,
};
use crate::types::Effort;

/// Configuration for the effort attached to rules and issues.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EffortConfig {
    /// Effort to kill a single mutant, e.g. `"5min"`. Default: 5min.
    pub mutant_kill: Option<String>,
    /// Gap factor for coverage threshold issues. Default: 1.0.
    pub missing_coverage_factor: Option<f64>,
    /// Gap factor for survived mutant issues. Default: 1.0.
    pub survived_mutant_factor: Option<f64>,
}

impl EffortConfig {
    /// Returns the effective effort to kill a mutant, defaulting to 5min.
    /// An unparseable value falls back to the default; `validate` rejects it earlier.
    pub fn effective_mutant_kill(&self) -> Effort {
        self.mutant_kill
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_mutant_kill)
    }

    /// Returns the effective missing coverage factor, defaulting to 1.0.
    pub fn effective_missing_coverage_factor(&self) -> f64 {
        self.missing_coverage_factor
            .unwrap_or(DEFAULT_MISSING_COVERAGE_FACTOR)
    }

    /// Returns the effective survived mutant factor, defaulting to 1.0.
    pub fn effective_survived_mutant_factor(&self) -> f64 {
        self.survived_mutant_factor
            .unwrap_or(DEFAULT_SURVIVED_MUTANT_FACTOR)
    }
}

fn default_mutant_kill() -> Effort {
    DEFAULT_EFFORT_TO_KILL_MUTANT
        .parse()
        .unwrap_or(Effort::from_minutes(5))
}
