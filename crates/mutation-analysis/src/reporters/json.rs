//! JSON reporter: issues, measures and line hits of a run.

use serde_json::{json, Value};

use super::Reporter;
use crate::metrics::measures::PROJECT_KEY;
use crate::rules::RulesContext;
use crate::sensors::SensorReport;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &SensorReport, _rules: &RulesContext) -> Result<String, String> {
        let issues: Vec<Value> = report
            .context
            .issues()
            .iter()
            .map(|issue| {
                let mut value = serde_json::to_value(issue).unwrap_or(Value::Null);
                value["effortMinutes"] = json!(issue.effort().minutes());
                value
            })
            .collect();

        let measures = report.context.measures();
        let output = json!({
            "languages": report.languages,
            "summary": {
                "mutants": report.mutant_count,
                "globalMutants": report.global_mutant_count,
                "issues": issues.len(),
            },
            "project": measures.component(PROJECT_KEY),
            "measures": measures,
            "lineHits": report.context.line_hits(),
            "issues": issues
        });
        serde_json::to_string_pretty(&output).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
