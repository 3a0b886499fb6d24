//! Mutation analysis metric definitions.

use serde::Serialize;

/// Domain all mutation metrics are grouped under.
pub const DOMAIN: &str = "Mutation Analysis";

/// Metric keys.
pub mod keys {
    pub const MUTATIONS_DATA: &str = "dc5_mutationAnalysis_mutations_data";
    pub const MUTATIONS_TOTAL: &str = "dc5_mutationAnalysis_mutations_total";
    pub const MUTATIONS_TOTAL_PERCENT: &str = "dc5_mutationAnalysis_mutations_hotspots";
    pub const MUTATIONS_NO_COVERAGE: &str = "dc5_mutationAnalysis_mutations_noCoverage";
    pub const MUTATIONS_DETECTED: &str = "dc5_mutationAnalysis_mutations_detected";
    pub const MUTATIONS_ALIVE: &str = "dc5_mutationAnalysis_mutations_alive";
    pub const MUTATIONS_KILLED: &str = "dc5_mutationAnalysis_mutations_killed";
    pub const MUTATIONS_UNKNOWN: &str = "dc5_mutationAnalysis_mutations_unknown";
    pub const MUTATIONS_COVERAGE: &str = "dc5_mutationAnalysis_mutations_coverage";
    pub const MUTATIONS_TEST_STRENGTH: &str = "dc5_mutationAnalysis_mutations_test_strength";
    pub const MUTATIONS_DENSITY: &str = "dc5_mutationAnalysis_mutations_density";
    pub const MUTATIONS_ALIVE_PERCENT: &str = "dc5_mutationAnalysis_mutations_survivor_hotspots";
    pub const MUTATIONS_TIMED_OUT: &str = "dc5_mutationAnalysis_mutations_timedOut";
    pub const MUTATIONS_MEMORY_ERROR: &str = "dc5_mutationAnalysis_mutations_memoryError";
    pub const MUTATIONS_SURVIVED: &str = "dc5_mutationAnalysis_mutations_survived";
    pub const TEST_KILLS: &str = "dc5_mutationAnalysis_mutations_testkills";
    pub const TEST_KILL_RATIO: &str = "dc5_mutationAnalysis_mutations_testkill_ratio";
    pub const UTILITY_GLOBAL_MUTATIONS: &str = "dc5_mutationAnalysis_mutations_global";
    pub const UTILITY_GLOBAL_ALIVE: &str = "dc5_mutationAnalysis_survivors_global";

    /// Executable lines of a component; input of the density computation.
    pub const LINES_TO_COVER: &str = "lines_to_cover";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Int,
    Percent,
    Data,
}

/// Whether higher values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Better,
    Worse,
    None,
}

impl Direction {
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Better => 1,
            Self::Worse => -1,
            Self::None => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub value_type: ValueType,
    pub direction: Direction,
    pub qualitative: bool,
    pub hidden: bool,
    pub best_value: Option<f64>,
    pub worst_value: Option<f64>,
    pub decimal_scale: Option<u8>,
}

impl Metric {
    const fn count(key: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            key,
            name,
            description,
            value_type: ValueType::Int,
            direction: Direction::Worse,
            qualitative: false,
            hidden: false,
            best_value: None,
            worst_value: None,
            decimal_scale: None,
        }
    }

    const fn percent(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        direction: Direction,
        best: f64,
        worst: f64,
    ) -> Self {
        Self {
            key,
            name,
            description,
            value_type: ValueType::Percent,
            direction,
            qualitative: true,
            hidden: false,
            best_value: Some(best),
            worst_value: Some(worst),
            decimal_scale: Some(1),
        }
    }

    const fn utility(key: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            direction: Direction::Better,
            hidden: true,
            ..Self::count(key, name, description)
        }
    }

    pub fn domain(&self) -> &'static str {
        DOMAIN
    }

    pub fn is_percentage(&self) -> bool {
        self.value_type == ValueType::Percent
    }
}

pub const MUTATIONS_DATA: Metric = Metric {
    key: keys::MUTATIONS_DATA,
    name: "Mutations Data",
    description: "None",
    value_type: ValueType::Data,
    direction: Direction::None,
    qualitative: true,
    hidden: true,
    best_value: None,
    worst_value: None,
    decimal_scale: None,
};

pub const MUTATIONS_TOTAL: Metric = Metric::count(
    keys::MUTATIONS_TOTAL,
    "Mutations: Total",
    "Total number of mutations generated",
);

pub const MUTATIONS_TOTAL_PERCENT: Metric = Metric::percent(
    keys::MUTATIONS_TOTAL_PERCENT,
    "Mutations: Total %",
    "Percent of total mutations per class",
    Direction::Worse,
    0.0,
    100.0,
);

pub const MUTATIONS_NO_COVERAGE: Metric = Metric::count(
    keys::MUTATIONS_NO_COVERAGE,
    "Alive: Not Covered",
    "Number of mutations non covered by any test.",
);

pub const MUTATIONS_DETECTED: Metric = Metric::count(
    keys::MUTATIONS_DETECTED,
    "Killed: Total",
    "The number of all mutations that are killed by a test, a timeout or a memory error",
);

pub const MUTATIONS_ALIVE: Metric = Metric::count(
    keys::MUTATIONS_ALIVE,
    "Alive: Total",
    "Number of mutations still alive, covered or not.",
);

pub const MUTATIONS_KILLED: Metric = Metric::count(
    keys::MUTATIONS_KILLED,
    "Killed: by Tests",
    "Number of mutations killed by tests",
);

pub const MUTATIONS_UNKNOWN: Metric = Metric::count(
    keys::MUTATIONS_UNKNOWN,
    "Unknown Status",
    "Number of mutations with unknown status.",
);

pub const MUTATIONS_COVERAGE: Metric = Metric::percent(
    keys::MUTATIONS_COVERAGE,
    "Mutation: Coverage",
    "Mutations coverage percentage",
    Direction::Better,
    100.0,
    0.0,
);

pub const MUTATIONS_TEST_STRENGTH: Metric = Metric::percent(
    keys::MUTATIONS_TEST_STRENGTH,
    "Mutation: Test Strength",
    "Detected mutations among the covered ones",
    Direction::Better,
    100.0,
    0.0,
);

pub const MUTATIONS_DENSITY: Metric = Metric::percent(
    keys::MUTATIONS_DENSITY,
    "Mutation: Density",
    "Mutations per Statement",
    Direction::Worse,
    100.0,
    0.0,
);

pub const MUTATIONS_ALIVE_PERCENT: Metric = Metric::percent(
    keys::MUTATIONS_ALIVE_PERCENT,
    "Alive: Total %",
    "Distribution Percentage of all survivor",
    Direction::Worse,
    0.0,
    100.0,
);

pub const MUTATIONS_TIMED_OUT: Metric = Metric::count(
    keys::MUTATIONS_TIMED_OUT,
    "Killed: by Timeout",
    "Number of mutations detected by time outs.",
);

pub const MUTATIONS_MEMORY_ERROR: Metric = Metric::count(
    keys::MUTATIONS_MEMORY_ERROR,
    "Killed: by Memory Error",
    "Number of mutations detected by memory errors.",
);

pub const MUTATIONS_SURVIVED: Metric = Metric::count(
    keys::MUTATIONS_SURVIVED,
    "Alive: Survivors",
    "Number of mutations survived.",
);

pub const TEST_KILLS: Metric = Metric::count(keys::TEST_KILLS, "Test: Kills", "Kills per Test");

pub const TEST_KILL_RATIO: Metric = Metric::percent(
    keys::TEST_KILL_RATIO,
    "Test: Kill Ratio",
    "Kills per Test",
    Direction::Worse,
    100.0,
    0.0,
);

pub const UTILITY_GLOBAL_MUTATIONS: Metric = Metric::utility(
    keys::UTILITY_GLOBAL_MUTATIONS,
    "Utility: Total Mutations Global",
    "Total number of mutations of the whole project, kept on every resource",
);

pub const UTILITY_GLOBAL_ALIVE: Metric = Metric::utility(
    keys::UTILITY_GLOBAL_ALIVE,
    "Utility: Total Survivors Global",
    "Total number of surviving mutations of the whole project, kept on every resource",
);

static QUANTITATIVE_METRICS: [Metric; 12] = [
    MUTATIONS_TOTAL,
    MUTATIONS_NO_COVERAGE,
    MUTATIONS_DETECTED,
    MUTATIONS_ALIVE,
    MUTATIONS_KILLED,
    MUTATIONS_UNKNOWN,
    MUTATIONS_TIMED_OUT,
    MUTATIONS_MEMORY_ERROR,
    MUTATIONS_SURVIVED,
    TEST_KILLS,
    UTILITY_GLOBAL_MUTATIONS,
    UTILITY_GLOBAL_ALIVE,
];

static QUALITATIVE_METRICS: [Metric; 7] = [
    MUTATIONS_DATA,
    MUTATIONS_TOTAL_PERCENT,
    MUTATIONS_COVERAGE,
    MUTATIONS_TEST_STRENGTH,
    MUTATIONS_DENSITY,
    MUTATIONS_ALIVE_PERCENT,
    TEST_KILL_RATIO,
];

/// Counting metrics, aggregated by summing over child components.
pub fn quantitative_metrics() -> &'static [Metric] {
    &QUANTITATIVE_METRICS
}

/// Ratio and data metrics, computed per component.
pub fn qualitative_metrics() -> &'static [Metric] {
    &QUALITATIVE_METRICS
}

/// Every metric the sensor and the computers produce.
pub fn sensor_metrics() -> impl Iterator<Item = &'static Metric> {
    QUALITATIVE_METRICS.iter().chain(QUANTITATIVE_METRICS.iter())
}

pub fn find(key: &str) -> Option<&'static Metric> {
    sensor_metrics().find(|m| m.key == key)
}
