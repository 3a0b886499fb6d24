//! Remediation effort durations.
//!
//! Written the way the host platform writes them: `5min`, `1h`, `2h 30min`,
//! `1d`. A day is a work day of eight hours.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 8;
const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// A remediation effort, stored in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Effort {
    minutes: u32,
}

impl Effort {
    pub const ZERO: Effort = Effort { minutes: 0 };

    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Scales the effort by `factor`, rounding to the nearest minute.
    pub fn scale(&self, factor: f64) -> Effort {
        let scaled = (f64::from(self.minutes) * factor.max(0.0)).round();
        Effort::from_minutes(scaled.min(f64::from(u32::MAX)) as u32)
    }
}

impl Add for Effort {
    type Output = Effort;

    fn add(self, rhs: Effort) -> Effort {
        Effort::from_minutes(self.minutes.saturating_add(rhs.minutes))
    }
}

impl FromStr for Effort {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| ConfigError::InvalidValue {
            field: "effort".to_string(),
            message,
        };

        let text = s.trim();
        if text.is_empty() {
            return Err(invalid("empty duration".to_string()));
        }

        let mut total: u32 = 0;
        let mut chars = text.chars().peekable();
        while chars.peek().is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}

            let mut digits = String::new();
            while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
                digits.push(c);
            }
            let mut unit = String::new();
            while let Some(c) = chars.next_if(|c| c.is_ascii_alphabetic()) {
                unit.push(c);
            }
            if digits.is_empty() && unit.is_empty() {
                if chars.peek().is_some() {
                    return Err(invalid(format!("unexpected character in '{text}'")));
                }
                break;
            }

            let value: u32 = digits
                .parse()
                .map_err(|_| invalid(format!("missing amount in '{text}'")))?;
            let factor = match unit.as_str() {
                "min" | "mn" => 1,
                "h" => MINUTES_PER_HOUR,
                "d" => MINUTES_PER_DAY,
                "" => return Err(invalid(format!("missing unit in '{text}'"))),
                other => return Err(invalid(format!("unknown unit '{other}' in '{text}'"))),
            };
            total = value
                .checked_mul(factor)
                .and_then(|m| total.checked_add(m))
                .ok_or_else(|| invalid(format!("'{text}' is too large")))?;
        }

        Ok(Effort::from_minutes(total))
    }
}

impl TryFrom<String> for Effort {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Effort> for String {
    fn from(value: Effort) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes == 0 {
            return write!(f, "0min");
        }
        let days = self.minutes / MINUTES_PER_DAY;
        let hours = (self.minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        let minutes = self.minutes % MINUTES_PER_HOUR;

        let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "min")]
            .into_iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| format!("{value}{unit}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
