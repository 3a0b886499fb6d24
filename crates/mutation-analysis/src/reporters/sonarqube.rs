//! SonarQube Generic Issue Format reporter.
//!
//! Produces JSON output conforming to SonarQube's Generic Issue Import format.

use mutation_core::constants::ENGINE_ID;
use rustc_hash::FxHashSet;
use serde_json::{json, Value};

use super::Reporter;
use crate::rules::{RuleType, RulesContext, Severity};
use crate::sensors::{Issue, SensorReport};

/// Each issue maps to a SonarQube issue with type, severity, location and
/// the effort given by its rule's remediation function.
pub struct SonarQubeReporter;

impl SonarQubeReporter {
    pub fn new() -> Self {
        Self
    }

    fn impact_severity(severity: Severity) -> &'static str {
        match severity {
            Severity::Blocker | Severity::Critical => "HIGH",
            Severity::Major => "MEDIUM",
            Severity::Minor | Severity::Info => "LOW",
        }
    }

    fn software_quality(rule_type: RuleType) -> &'static str {
        match rule_type {
            RuleType::Bug => "RELIABILITY",
            RuleType::Vulnerability => "SECURITY",
            RuleType::CodeSmell => "MAINTAINABILITY",
        }
    }

    fn issue(issue: &Issue) -> Value {
        let mut primary_location = json!({
            "message": issue.message(),
            "filePath": issue.file_path(),
        });
        if let Some(line) = issue.line() {
            primary_location["textRange"] = json!({
                "startLine": line.max(1),
                "endLine": line.max(1)
            });
        }

        json!({
            "engineId": ENGINE_ID,
            "ruleId": issue.rule_key(),
            "severity": issue.severity().as_str(),
            "type": issue.rule_type().as_str(),
            "primaryLocation": primary_location,
            "effortMinutes": issue.effort().minutes()
        })
    }
}

impl Default for SonarQubeReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SonarQubeReporter {
    fn name(&self) -> &'static str {
        "sonarqube"
    }

    fn generate(&self, report: &SensorReport, rules: &RulesContext) -> Result<String, String> {
        let issues: Vec<Value> = report.context.issues().iter().map(Self::issue).collect();

        // Rules array, required since SonarQube 10.3
        let mut seen = FxHashSet::default();
        let mut rule_entries: Vec<Value> = Vec::new();
        for issue in report.context.issues() {
            if !seen.insert((issue.repository_key(), issue.rule_key())) {
                continue;
            }
            let rule = rules
                .repository(issue.repository_key())
                .and_then(|r| r.rule(issue.rule_key()));
            let (name, description) = match rule {
                Some(rule) => (rule.name(), rule.html_description()),
                None => (issue.rule_key(), issue.message()),
            };
            rule_entries.push(json!({
                "id": issue.rule_key(),
                "name": name,
                "description": description,
                "engineId": ENGINE_ID,
                "cleanCodeAttribute": "TESTED",
                "type": issue.rule_type().as_str(),
                "severity": issue.severity().as_str(),
                "impacts": [{
                    "softwareQuality": Self::software_quality(issue.rule_type()),
                    "severity": Self::impact_severity(issue.severity())
                }]
            }));
        }

        let output = json!({
            "rules": rule_entries,
            "issues": issues
        });
        serde_json::to_string_pretty(&output).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
