//! Issues raised by the rules processor.

use mutation_core::types::Effort;
use serde::Serialize;

use crate::rules::{ActiveRule, DebtRemediationFunction, RuleType, Severity};

/// An issue on a source file, optionally at a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    repository_key: String,
    rule_key: String,
    severity: Severity,
    #[serde(rename = "type")]
    rule_type: RuleType,
    file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap: Option<f64>,
    #[serde(skip)]
    remediation: DebtRemediationFunction,
}

impl Issue {
    pub fn new(rule: &ActiveRule, file_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            repository_key: rule.repository_key().to_string(),
            rule_key: rule.rule_key().to_string(),
            severity: rule.severity(),
            rule_type: rule.rule().rule_type(),
            file_path: file_path.into(),
            line: None,
            message: message.into(),
            gap: None,
            remediation: *rule.rule().debt_remediation_function(),
        }
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    pub fn rule_key(&self) -> &str {
        &self.rule_key
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn gap(&self) -> Option<f64> {
        self.gap
    }

    /// Remediation effort from the rule's remediation function and the gap.
    pub fn effort(&self) -> Effort {
        self.remediation.effort(self.gap)
    }
}
