//! Core types for the rule model.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Default severity of a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Minor,
    #[default]
    Major,
    Critical,
    Blocker,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Minor => "MINOR",
            Self::Major => "MAJOR",
            Self::Critical => "CRITICAL",
            Self::Blocker => "BLOCKER",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "INFO" => Ok(Self::Info),
            "MINOR" => Ok(Self::Minor),
            "MAJOR" => Ok(Self::Major),
            "CRITICAL" => Ok(Self::Critical),
            "BLOCKER" => Ok(Self::Blocker),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of finding a rule produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Bug,
    #[default]
    CodeSmell,
    Vulnerability,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "BUG",
            Self::CodeSmell => "CODE_SMELL",
            Self::Vulnerability => "VULNERABILITY",
        }
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BUG" => Ok(Self::Bug),
            "CODE_SMELL" => Ok(Self::CodeSmell),
            "VULNERABILITY" => Ok(Self::Vulnerability),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleStatus {
    Beta,
    Deprecated,
    #[default]
    Ready,
}

impl RuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beta => "BETA",
            Self::Deprecated => "DEPRECATED",
            Self::Ready => "READY",
        }
    }
}

impl FromStr for RuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BETA" => Ok(Self::Beta),
            "DEPRECATED" => Ok(Self::Deprecated),
            "READY" => Ok(Self::Ready),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type of a rule parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParamType {
    #[default]
    String,
    Text,
    Boolean,
    Integer,
    Float,
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "STRING" => Ok(Self::String),
            "TEXT" => Ok(Self::Text),
            "BOOLEAN" => Ok(Self::Boolean),
            "INTEGER" => Ok(Self::Integer),
            "FLOAT" => Ok(Self::Float),
            other => Err(other.to_string()),
        }
    }
}

/// A configurable rule parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleParam {
    pub key: String,
    pub description: Option<String>,
    pub default_value: Option<String>,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl RuleParam {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}
