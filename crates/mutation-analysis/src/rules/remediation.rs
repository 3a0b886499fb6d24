//! Debt remediation functions.

use std::fmt;

use mutation_core::types::Effort;
use serde::Serialize;

/// How the remediation effort of an issue is derived from its gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtRemediationFunction {
    /// `gap * multiplier`
    Linear { gap_multiplier: Effort },
    /// `gap * multiplier + offset`
    LinearWithOffset {
        gap_multiplier: Effort,
        base_effort: Effort,
    },
    /// A fixed effort per issue.
    ConstantPerIssue { base_effort: Effort },
}

impl DebtRemediationFunction {
    pub fn linear(gap_multiplier: Effort) -> Self {
        Self::Linear { gap_multiplier }
    }

    pub fn linear_with_offset(gap_multiplier: Effort, base_effort: Effort) -> Self {
        Self::LinearWithOffset {
            gap_multiplier,
            base_effort,
        }
    }

    pub fn constant_per_issue(base_effort: Effort) -> Self {
        Self::ConstantPerIssue { base_effort }
    }

    /// Remediation effort of an issue. A missing gap counts as 1.
    pub fn effort(&self, gap: Option<f64>) -> Effort {
        let gap = gap.unwrap_or(1.0);
        match *self {
            Self::Linear { gap_multiplier } => gap_multiplier.scale(gap),
            Self::LinearWithOffset {
                gap_multiplier,
                base_effort,
            } => gap_multiplier.scale(gap) + base_effort,
            Self::ConstantPerIssue { base_effort } => base_effort,
        }
    }
}

impl fmt::Display for DebtRemediationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { gap_multiplier } => write!(f, "linear({gap_multiplier})"),
            Self::LinearWithOffset {
                gap_multiplier,
                base_effort,
            } => write!(f, "linear_offset({gap_multiplier}, {base_effort})"),
            Self::ConstantPerIssue { base_effort } => write!(f, "constant_issue({base_effort})"),
        }
    }
}
