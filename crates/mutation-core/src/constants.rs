//! Shared constants for the mutation analysis engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base key of the rule repositories. The language key is appended: `mutation.analysis.java`.
pub const REPOSITORY_KEY: &str = "mutation.analysis";

/// Display name of the rule repositories.
pub const REPOSITORY_NAME: &str = "MutationAnalysis";

/// Prefix shared by every mutation analysis rule key.
pub const MUTANT_RULES_PREFIX: &str = "mutant.";

/// Suffix of the code smell variant of an operator rule.
pub const CODE_SMELL_SUFFIX: &str = "_CODE_SMELL";

/// Rule for survived mutants regardless of operator.
pub const RULE_SURVIVED: &str = "mutant.survived";

/// Rule for mutants not covered by any test.
pub const RULE_UNCOVERED: &str = "mutant.uncovered";

/// Rule for mutants whose state could not be determined.
pub const RULE_UNKNOWN_STATUS: &str = "mutant.unknownStatus";

/// Rule raising an issue when a file's mutation coverage is below a threshold.
pub const RULE_COVERAGE: &str = "mutant.coverage";

/// Threshold parameter of [`RULE_COVERAGE`].
pub const PARAM_COVERAGE_THRESHOLD: &str = "mutant.coverage.threshold";

/// Name of the built-in quality profile.
pub const PROFILE_NAME: &str = "Mutation Analysis";

/// Default effort to kill a single mutant.
pub const DEFAULT_EFFORT_TO_KILL_MUTANT: &str = "5min";

/// Fixed offset, in minutes, of the remediation function of every rule.
pub const REMEDIATION_OFFSET_MINUTES: u32 = 7;

/// Gap description of every rule.
pub const GAP_DESCRIPTION: &str = "Effort to kill the mutant(s)";

/// Default PIT report directory relative to a module's base directory.
pub const DEFAULT_REPORT_DIRECTORY: &str = "target/pit-reports";

/// Default factor applied to the gap of coverage threshold issues.
pub const DEFAULT_MISSING_COVERAGE_FACTOR: f64 = 1.0;

/// Default factor applied to the gap of survived mutant issues.
pub const DEFAULT_SURVIVED_MUTANT_FACTOR: f64 = 1.0;

/// Threshold used when the coverage rule is active without a parameter value.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 80.0;

/// Engine id written into generic issue reports.
pub const ENGINE_ID: &str = "mutation-analysis";

/// Default output file of the standalone analysis.
pub const DEFAULT_ISSUES_REPORT: &str = "issuesReport.json";

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "mutation-analysis.toml";

/// User-level configuration directory name (under the home directory).
pub const USER_CONFIG_DIR: &str = ".mutation-analysis";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "MUTATION_ANALYSIS_LOG";

/// Host property keys understood by [`crate::config::MutationConfig::apply_properties`].
pub mod properties {
    pub const JAVA_SENSOR_ENABLED: &str = "dc5.mutationAnalysis.pitest.java.sensor.enabled";
    pub const KOTLIN_SENSOR_ENABLED: &str = "dc5.mutationAnalysis.pitest.kotlin.sensor.enabled";
    pub const EXPERIMENTAL_FEATURES_ENABLED: &str =
        "dc5.mutationAnalysis.experimentalFeatures.enabled";
    pub const REPORT_DIRECTORY: &str = "dc5.mutationAnalysis.pitest.sensor.reports.directory";
    pub const EFFORT_TO_KILL_MUTANT: &str = "dc5.mutationAnalysis.effort.mutantKill";
    pub const EFFORT_FACTOR_MISSING_COVERAGE: &str =
        "dc5.mutationAnalysis.effort.missingCoverage";
    pub const EFFORT_FACTOR_SURVIVED_MUTANT: &str = "dc5.mutationAnalysis.effort.survivedMutant";
    pub const FORCE_MISSING_COVERAGE_TO_ZERO: &str =
        "dc5.mutationAnalysis.missingCoverage.force2zero";
    pub const PROJECT_ROOT: &str = "dc5.mutationAnalysis.project.root";

    /// Every key, in declaration order.
    pub const ALL: &[&str] = &[
        JAVA_SENSOR_ENABLED,
        KOTLIN_SENSOR_ENABLED,
        EXPERIMENTAL_FEATURES_ENABLED,
        REPORT_DIRECTORY,
        EFFORT_TO_KILL_MUTANT,
        EFFORT_FACTOR_MISSING_COVERAGE,
        EFFORT_FACTOR_SURVIVED_MUTANT,
        FORCE_MISSING_COVERAGE_TO_ZERO,
        PROJECT_ROOT,
    ];
}
