//! Top-level mutation analysis configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EffortConfig, FeatureConfig, RulesConfig, SensorConfig};
use crate::constants::{properties, PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::Effort;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`MUTATION_ANALYSIS_*`)
/// 3. Project config (`mutation-analysis.toml` in project root)
/// 4. User config (`~/.mutation-analysis/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MutationConfig {
    pub effort: EffortConfig,
    pub sensor: SensorConfig,
    pub features: FeatureConfig,
    pub rules: RulesConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub report_directory: Option<String>,
    pub experimental: Option<bool>,
    pub mutant_kill: Option<String>,
    pub coverage_threshold: Option<f64>,
    pub java_enabled: Option<bool>,
    pub kotlin_enabled: Option<bool>,
    /// Host-style `key=value` properties, applied before the typed overrides.
    pub properties: Vec<(String, String)>,
}

impl MutationConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. CLI flags
    /// 2. Environment variables (`MUTATION_ANALYSIS_*`)
    /// 3. Project config (`mutation-analysis.toml` in `root`)
    /// 4. User config (`~/.mutation-analysis/config.toml`)
    /// 5. Compiled defaults
    pub fn load(
        root: &Path,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli)?;
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MutationConfig) -> Result<(), ConfigError> {
        if let Some(ref effort) = config.effort.mutant_kill {
            effort
                .parse::<Effort>()
                .map_err(|e| ConfigError::ValidationFailed {
                    field: "effort.mutant_kill".to_string(),
                    message: e.to_string(),
                })?;
        }
        for (field, factor) in [
            (
                "effort.missing_coverage_factor",
                config.effort.missing_coverage_factor,
            ),
            (
                "effort.survived_mutant_factor",
                config.effort.survived_mutant_factor,
            ),
        ] {
            if let Some(factor) = factor {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a non-negative number".to_string(),
                    });
                }
            }
        }
        if let Some(threshold) = config.rules.coverage_threshold {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.coverage_threshold".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if let Some(ref dir) = config.sensor.report_directory {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "sensor.report_directory".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply host-style properties (`dc5.mutationAnalysis.*`).
    /// Unknown keys are ignored; known keys with bad values are errors.
    pub fn apply_properties<'a, I>(&mut self, props: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in props {
            let value = value.trim();
            match key {
                properties::JAVA_SENSOR_ENABLED => {
                    self.sensor.java_enabled = Some(parse_bool(key, value)?);
                }
                properties::KOTLIN_SENSOR_ENABLED => {
                    self.sensor.kotlin_enabled = Some(parse_bool(key, value)?);
                }
                properties::EXPERIMENTAL_FEATURES_ENABLED => {
                    self.features.experimental = Some(parse_bool(key, value)?);
                }
                properties::FORCE_MISSING_COVERAGE_TO_ZERO => {
                    self.features.force_missing_coverage_to_zero =
                        Some(parse_bool(key, value)?);
                }
                properties::REPORT_DIRECTORY => {
                    self.sensor.report_directory = Some(value.to_string());
                }
                properties::PROJECT_ROOT => {
                    self.sensor.project_root = Some(value.to_string());
                }
                properties::EFFORT_TO_KILL_MUTANT => {
                    self.effort.mutant_kill = Some(value.to_string());
                }
                properties::EFFORT_FACTOR_MISSING_COVERAGE => {
                    self.effort.missing_coverage_factor = Some(parse_f64(key, value)?);
                }
                properties::EFFORT_FACTOR_SURVIVED_MUTANT => {
                    self.effort.survived_mutant_factor = Some(parse_f64(key, value)?);
                }
                other => {
                    tracing::debug!(key = other, "ignoring unknown property");
                }
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.mutation-analysis/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MutationConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MutationConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut MutationConfig, other: &MutationConfig) {
        // Effort
        if other.effort.mutant_kill.is_some() {
            base.effort.mutant_kill = other.effort.mutant_kill.clone();
        }
        if other.effort.missing_coverage_factor.is_some() {
            base.effort.missing_coverage_factor = other.effort.missing_coverage_factor;
        }
        if other.effort.survived_mutant_factor.is_some() {
            base.effort.survived_mutant_factor = other.effort.survived_mutant_factor;
        }

        // Sensor
        if other.sensor.java_enabled.is_some() {
            base.sensor.java_enabled = other.sensor.java_enabled;
        }
        if other.sensor.kotlin_enabled.is_some() {
            base.sensor.kotlin_enabled = other.sensor.kotlin_enabled;
        }
        if other.sensor.report_directory.is_some() {
            base.sensor.report_directory = other.sensor.report_directory.clone();
        }
        if other.sensor.project_root.is_some() {
            base.sensor.project_root = other.sensor.project_root.clone();
        }

        // Features
        if other.features.experimental.is_some() {
            base.features.experimental = other.features.experimental;
        }
        if other.features.force_missing_coverage_to_zero.is_some() {
            base.features.force_missing_coverage_to_zero =
                other.features.force_missing_coverage_to_zero;
        }

        // Rules
        if other.rules.code_smell_variants.is_some() {
            base.rules.code_smell_variants = other.rules.code_smell_variants;
        }
        if !other.rules.extra_active.is_empty() {
            base.rules.extra_active = other.rules.extra_active.clone();
        }
        if other.rules.coverage_threshold.is_some() {
            base.rules.coverage_threshold = other.rules.coverage_threshold;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `MUTATION_ANALYSIS_EFFORT_MUTANT_KILL`, `MUTATION_ANALYSIS_EXPERIMENTAL`, etc.
    fn apply_env_overrides(config: &mut MutationConfig) {
        if let Ok(val) = std::env::var("MUTATION_ANALYSIS_EFFORT_MUTANT_KILL") {
            config.effort.mutant_kill = Some(val);
        }
        if let Ok(val) = std::env::var("MUTATION_ANALYSIS_REPORT_DIRECTORY") {
            config.sensor.report_directory = Some(val);
        }
        if let Ok(val) = std::env::var("MUTATION_ANALYSIS_EXPERIMENTAL") {
            if let Ok(v) = val.parse::<bool>() {
                config.features.experimental = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MUTATION_ANALYSIS_FORCE_MISSING_COVERAGE_TO_ZERO") {
            if let Ok(v) = val.parse::<bool>() {
                config.features.force_missing_coverage_to_zero = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MUTATION_ANALYSIS_COVERAGE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.rules.coverage_threshold = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(
        config: &mut MutationConfig,
        cli: &CliOverrides,
    ) -> Result<(), ConfigError> {
        config.apply_properties(cli.properties.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

        if let Some(ref v) = cli.report_directory {
            config.sensor.report_directory = Some(v.clone());
        }
        if let Some(v) = cli.experimental {
            config.features.experimental = Some(v);
        }
        if let Some(ref v) = cli.mutant_kill {
            config.effort.mutant_kill = Some(v.clone());
        }
        if let Some(v) = cli.coverage_threshold {
            config.rules.coverage_threshold = Some(v);
        }
        if let Some(v) = cli.java_enabled {
            config.sensor.java_enabled = Some(v);
        }
        if let Some(v) = cli.kotlin_enabled {
            config.sensor.kotlin_enabled = Some(v);
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_err(|_| ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("expected true or false, got '{value}'"),
        })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        message: format!("expected a number, got '{value}'"),
    })
}

/// Returns the user-level config directory: `~/.mutation-analysis/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(USER_CONFIG_DIR))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
