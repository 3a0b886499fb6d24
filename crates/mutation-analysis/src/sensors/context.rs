//! Collects what a sensor run produces.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Issue;
use crate::metrics::MeasureStore;

/// Issues, measures and line hits written during an analysis run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorContext {
    issues: Vec<Issue>,
    measures: MeasureStore,
    line_hits: BTreeMap<String, BTreeMap<u32, u32>>,
}

impl SensorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: Issue) {
        tracing::debug!(
            rule = issue.rule_key(),
            file = issue.file_path(),
            line = issue.line(),
            "raised issue"
        );
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn measures(&self) -> &MeasureStore {
        &self.measures
    }

    pub fn measures_mut(&mut self) -> &mut MeasureStore {
        &mut self.measures
    }

    /// Add `hits` to a line of `file`.
    pub fn add_line_hits(&mut self, file: &str, line: u32, hits: u32) {
        *self
            .line_hits
            .entry(file.to_string())
            .or_default()
            .entry(line)
            .or_insert(0) += hits;
    }

    pub fn line_hits(&self) -> &BTreeMap<String, BTreeMap<u32, u32>> {
        &self.line_hits
    }
}
