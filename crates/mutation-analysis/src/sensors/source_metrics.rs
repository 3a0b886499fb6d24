//! Writes the per-file mutation measures.

use super::SensorContext;
use crate::metrics::{keys, ResourceMutationMetrics};
use crate::model::{Mutant, MutantState};

#[derive(Debug, Default, Clone, Copy)]
pub struct SourceMetricsWriter;

impl SourceMetricsWriter {
    pub fn new() -> Self {
        Self
    }

    /// Save the counters of every main file, the project-wide totals on every
    /// file, and a line hit for every killed mutant.
    ///
    /// Project-wide totals come from `global_mutants` when there are any and
    /// from the local metrics otherwise.
    pub fn write_metrics(
        &self,
        metrics: &[ResourceMutationMetrics],
        context: &mut SensorContext,
        global_mutants: &[Mutant],
    ) {
        let (total, detected) = if global_mutants.is_empty() {
            (
                metrics.iter().map(|m| m.total()).sum::<u32>(),
                metrics.iter().map(|m| m.detected()).sum::<u32>(),
            )
        } else {
            (
                global_mutants.len() as u32,
                global_mutants.iter().filter(|m| m.is_detected()).count() as u32,
            )
        };
        let alive = total.saturating_sub(detected);

        for resource_metrics in metrics {
            self.save_resource_metrics(resource_metrics, context);
            let path = resource_metrics.resource().relative_path();
            context
                .measures_mut()
                .save(path, keys::UTILITY_GLOBAL_MUTATIONS, total)
                .save(path, keys::UTILITY_GLOBAL_ALIVE, alive);
        }
    }

    fn save_resource_metrics(&self, metrics: &ResourceMutationMetrics, context: &mut SensorContext) {
        let resource = metrics.resource();
        let path = resource.relative_path();
        tracing::debug!(file = path, total = metrics.total(), "saving resource metrics");

        if metrics.killed() > 0 {
            for mutant in metrics.mutants() {
                if mutant.state() == MutantState::Killed {
                    context.add_line_hits(path, mutant.line_number(), 1);
                }
            }
        }

        if resource.is_test() {
            return;
        }
        context
            .measures_mut()
            .save(path, keys::MUTATIONS_TOTAL, metrics.total())
            .save(path, keys::MUTATIONS_NO_COVERAGE, metrics.no_coverage())
            .save(path, keys::MUTATIONS_KILLED, metrics.killed())
            .save(path, keys::MUTATIONS_SURVIVED, metrics.survived())
            .save(path, keys::MUTATIONS_ALIVE, metrics.alive())
            .save(path, keys::MUTATIONS_MEMORY_ERROR, metrics.memory_error())
            .save(path, keys::MUTATIONS_TIMED_OUT, metrics.timed_out())
            .save(path, keys::MUTATIONS_UNKNOWN, metrics.unknown())
            .save(path, keys::MUTATIONS_DETECTED, metrics.detected())
            .save(path, keys::LINES_TO_COVER, resource.code_lines());
    }
}
