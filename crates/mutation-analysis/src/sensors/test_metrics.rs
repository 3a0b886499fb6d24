//! Writes kills per test file.

use rustc_hash::FxHashMap;

use super::{ResourceResolver, SensorContext};
use crate::metrics::{keys, ResourceMutationMetrics};
use crate::model::{Mutant, TestDescriptor};

#[derive(Debug, Clone, Copy)]
pub struct TestMetricsWriter<'a> {
    resolver: ResourceResolver<'a>,
}

impl<'a> TestMetricsWriter<'a> {
    pub fn new(resolver: ResourceResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Count the mutants killed by each test class and save the count on the
    /// class's file, together with the project-wide mutant total.
    pub fn write_metrics(
        &self,
        metrics: &[ResourceMutationMetrics],
        context: &mut SensorContext,
        global_mutants: &[Mutant],
    ) {
        let mut kills: FxHashMap<TestDescriptor, u32> = FxHashMap::default();
        for mutant in metrics.iter().flat_map(|m| m.mutants()) {
            if let Some(test) = mutant.killing_test_descriptor() {
                *kills.entry(test).or_insert(0) += 1;
            }
        }

        let total = if global_mutants.is_empty() {
            metrics.iter().map(|m| m.total()).sum::<u32>()
        } else {
            global_mutants.len() as u32
        };

        for (test, count) in kills {
            tracing::debug!(test = test.class_name(), kills = count, "test kills");
            match self.resolver.resolve(test.class_name()) {
                Some(file) => {
                    context
                        .measures_mut()
                        .save(file.relative_path(), keys::TEST_KILLS, count)
                        .save(file.relative_path(), keys::UTILITY_GLOBAL_MUTATIONS, total);
                }
                None => {
                    tracing::debug!(test = test.class_name(), "test class not found in sources");
                }
            }
        }
    }
}
