//! Configuration system for mutation analysis.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod effort_config;
pub mod feature_config;
pub mod mutation_config;
pub mod rules_config;
pub mod sensor_config;

pub use effort_config::EffortConfig;
pub use feature_config::FeatureConfig;
pub use mutation_config::{CliOverrides, MutationConfig};
pub use rules_config::RulesConfig;
pub use sensor_config::SensorConfig;
