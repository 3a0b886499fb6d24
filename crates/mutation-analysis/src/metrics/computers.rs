//! Measure computers, run bottom-up over the component tree.

use mutation_core::config::FeatureConfig;

use super::catalog::{self, keys, Metric, ValueType};
use super::measures::{ComponentKind, ComponentTree, MeasureContext, MeasureStore};

/// Derives measures of a component from its own and its children's measures.
pub trait MeasureComputer {
    fn name(&self) -> &'static str;

    fn compute(&self, context: &mut MeasureContext<'_>);
}

/// Run `computers` on every component, children before parents.
pub fn compute_measures(
    tree: &ComponentTree,
    store: &mut MeasureStore,
    computers: &[Box<dyn MeasureComputer>],
) {
    for id in tree.post_order() {
        let mut context = MeasureContext::new(tree, id, store);
        for computer in computers {
            computer.compute(&mut context);
        }
    }
    tracing::debug!(
        components = tree.len(),
        computers = computers.len(),
        measures = store.len(),
        "computed measures"
    );
}

/// The computers of an analysis run, in execution order.
pub fn default_computers(features: &FeatureConfig) -> Vec<Box<dyn MeasureComputer>> {
    let experimental = features.experimental_enabled();
    vec![
        Box::new(QuantitativeMeasureComputer),
        Box::new(MutationScoreComputer::new(features.force_missing_coverage_to_zero())),
        Box::new(MutationDensityComputer::new(experimental)),
        Box::new(TotalMutationsComputer::new(experimental)),
        Box::new(TestKillRatioComputer::new(experimental)),
    ]
}

/// Sums the counting metrics of the children where a component has none.
/// Hidden utility metrics hold project-wide values and are copied from the
/// first child instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuantitativeMeasureComputer;

impl MeasureComputer for QuantitativeMeasureComputer {
    fn name(&self) -> &'static str {
        "quantitative"
    }

    fn compute(&self, context: &mut MeasureContext<'_>) {
        let counting = catalog::quantitative_metrics()
            .iter()
            .filter(|m| m.value_type == ValueType::Int);

        for metric in counting {
            if context.measure(metric.key).is_some() {
                continue;
            }
            let children = context.children_ints(metric.key);
            let value = if metric.hidden {
                children.first().copied().unwrap_or(0)
            } else {
                children.iter().sum()
            };
            if value > 0 {
                tracing::debug!(
                    component = context.component().key(),
                    metric = metric.key,
                    value,
                    "computed quantitative measure"
                );
                context.add_measure(metric.key, value);
            }
        }
    }
}

/// Mutation coverage and test strength.
#[derive(Debug, Clone, Copy)]
pub struct MutationScoreComputer {
    force_missing_coverage_to_zero: bool,
}

impl MutationScoreComputer {
    pub fn new(force_missing_coverage_to_zero: bool) -> Self {
        Self {
            force_missing_coverage_to_zero,
        }
    }
}

impl MeasureComputer for MutationScoreComputer {
    fn name(&self) -> &'static str {
        "mutation-score"
    }

    fn compute(&self, context: &mut MeasureContext<'_>) {
        let Some(total) = context.int_measure(keys::MUTATIONS_TOTAL) else {
            if self.force_missing_coverage_to_zero {
                context.add_measure(keys::MUTATIONS_COVERAGE, 0.0);
                context.add_measure(keys::MUTATIONS_TEST_STRENGTH, 0.0);
            }
            return;
        };

        // 0 of 0 mutants is full coverage
        if total <= 0 {
            context.add_measure(keys::MUTATIONS_COVERAGE, 100.0);
            context.add_measure(keys::MUTATIONS_TEST_STRENGTH, 100.0);
            return;
        }

        let detected = context.int_measure(keys::MUTATIONS_DETECTED).unwrap_or(0) as f64;
        let survived = context.int_measure(keys::MUTATIONS_SURVIVED).unwrap_or(0) as f64;
        let coverage = 100.0 * detected / total as f64;
        let strength = if survived + detected > 0.0 {
            100.0 * detected / (survived + detected)
        } else {
            0.0
        };
        tracing::debug!(
            component = context.component().key(),
            coverage,
            strength,
            "computed mutation score"
        );
        context.add_measure(keys::MUTATIONS_COVERAGE, coverage);
        context.add_measure(keys::MUTATIONS_TEST_STRENGTH, strength);
    }
}

/// Mutants per executable line.
#[derive(Debug, Clone, Copy)]
pub struct MutationDensityComputer {
    enabled: bool,
}

impl MutationDensityComputer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl MeasureComputer for MutationDensityComputer {
    fn name(&self) -> &'static str {
        "mutation-density"
    }

    fn compute(&self, context: &mut MeasureContext<'_>) {
        if !self.enabled {
            return;
        }
        let Some(mutations) = context.int_measure(keys::MUTATIONS_TOTAL) else {
            return;
        };
        let lines = context.int_measure(keys::LINES_TO_COVER).or_else(|| {
            let children = context.children_ints(keys::LINES_TO_COVER);
            (!children.is_empty()).then(|| children.iter().sum())
        });
        if let Some(lines) = lines.filter(|&l| l > 0) {
            if context.measure(keys::LINES_TO_COVER).is_none() {
                context.add_measure(keys::LINES_TO_COVER, lines);
            }
        }
        let density = match lines {
            Some(lines) if lines > 0 => 100.0 * mutations as f64 / lines as f64,
            _ => 0.0,
        };
        context.add_measure(keys::MUTATIONS_DENSITY, density);
    }
}

/// Share of the project's mutants, and of its surviving mutants, located in
/// each main component.
#[derive(Debug, Clone, Copy)]
pub struct TotalMutationsComputer {
    enabled: bool,
}

impl TotalMutationsComputer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn percentage(context: &mut MeasureContext<'_>, global: &Metric, local: &Metric, result: &Metric) {
        let global_value = global_value(context, global.key);
        let local_value = context
            .int_measure(local.key)
            .unwrap_or_else(|| context.children_ints(local.key).iter().sum());
        let percentage = if global_value > 0 {
            100.0 * local_value as f64 / global_value as f64
        } else {
            0.0
        };
        context.add_measure(result.key, percentage);
    }
}

impl MeasureComputer for TotalMutationsComputer {
    fn name(&self) -> &'static str {
        "total-mutations"
    }

    fn compute(&self, context: &mut MeasureContext<'_>) {
        if !self.enabled || context.component().is_test() {
            return;
        }
        Self::percentage(
            context,
            &catalog::UTILITY_GLOBAL_MUTATIONS,
            &catalog::MUTATIONS_TOTAL,
            &catalog::MUTATIONS_TOTAL_PERCENT,
        );
        Self::percentage(
            context,
            &catalog::UTILITY_GLOBAL_ALIVE,
            &catalog::MUTATIONS_ALIVE,
            &catalog::MUTATIONS_ALIVE_PERCENT,
        );
    }
}

/// Share of the project's mutants killed by each test file.
#[derive(Debug, Clone, Copy)]
pub struct TestKillRatioComputer {
    enabled: bool,
}

impl TestKillRatioComputer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl MeasureComputer for TestKillRatioComputer {
    fn name(&self) -> &'static str {
        "test-kill-ratio"
    }

    fn compute(&self, context: &mut MeasureContext<'_>) {
        if !self.enabled {
            return;
        }
        let component = context.component();
        if component.kind() == ComponentKind::File && !component.is_test() {
            return;
        }
        let global = global_value(context, keys::UTILITY_GLOBAL_MUTATIONS);
        if global == 0 {
            return;
        }
        let kills = context
            .int_measure(keys::TEST_KILLS)
            .unwrap_or_else(|| context.children_ints(keys::TEST_KILLS).iter().sum());
        context.add_measure(keys::TEST_KILL_RATIO, 100.0 * kills as f64 / global as f64);
    }
}

fn global_value(context: &MeasureContext<'_>, metric: &str) -> i64 {
    context
        .int_measure(metric)
        .unwrap_or_else(|| context.children_ints(metric).first().copied().unwrap_or(0))
}
