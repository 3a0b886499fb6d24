//! Structured span field names.
//!
//! Spans declare these fields as `Empty` and record them once the value is
//! known, so log queries can rely on consistent names.

/// Sensor: mutants read from the local report.
pub const MUTANT_COUNT: &str = "mutant_count";

/// Sensor: mutants read from every module of the project.
pub const GLOBAL_MUTANT_COUNT: &str = "global_mutant_count";

/// Sensor: source files with at least one mutant.
pub const RESOURCE_COUNT: &str = "resource_count";

/// Sensor/rules: issues raised.
pub const ISSUE_COUNT: &str = "issue_count";

/// Rules: rules registered in a repository.
pub const RULE_COUNT: &str = "rule_count";

/// Report: parse time in milliseconds.
pub const PARSE_TIME_MS: &str = "parse_time_ms";
