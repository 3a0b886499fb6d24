//! Mutant states as reported by PIT.

use std::fmt;

use serde::Serialize;

/// Outcome of running the test suite against a mutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutantState {
    NoCoverage,
    Killed,
    Survived,
    MemoryError,
    TimedOut,
    RunError,
    NonViable,
    Unknown,
}

impl MutantState {
    /// Parse a PIT status. Unrecognized values map to [`MutantState::Unknown`].
    pub fn parse(status: &str) -> Self {
        match status.trim() {
            "NO_COVERAGE" => Self::NoCoverage,
            "KILLED" => Self::Killed,
            "SURVIVED" => Self::Survived,
            "MEMORY_ERROR" => Self::MemoryError,
            "TIMED_OUT" => Self::TimedOut,
            "RUN_ERROR" => Self::RunError,
            "NON_VIABLE" => Self::NonViable,
            _ => Self::Unknown,
        }
    }

    /// Whether the mutant escaped the tests.
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::NoCoverage | Self::Survived | Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCoverage => "NO_COVERAGE",
            Self::Killed => "KILLED",
            Self::Survived => "SURVIVED",
            Self::MemoryError => "MEMORY_ERROR",
            Self::TimedOut => "TIMED_OUT",
            Self::RunError => "RUN_ERROR",
            Self::NonViable => "NON_VIABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MutantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
