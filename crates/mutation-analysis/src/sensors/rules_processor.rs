//! Turns active rules and mutation metrics into issues.

use mutation_core::config::MutationConfig;
use mutation_core::constants::{
    CODE_SMELL_SUFFIX, DEFAULT_COVERAGE_THRESHOLD, MUTANT_RULES_PREFIX, PARAM_COVERAGE_THRESHOLD,
    RULE_COVERAGE, RULE_SURVIVED, RULE_UNCOVERED, RULE_UNKNOWN_STATUS,
};
use mutation_core::types::Language;

use super::{Issue, SensorContext};
use crate::metrics::ResourceMutationMetrics;
use crate::model::{Mutant, MutantState};
use crate::rules::{repository_key, ActiveRule, ActiveRules};

/// Applies the active rules of a language to the metrics of its files.
#[derive(Debug, Clone, Copy)]
pub struct RulesProcessor<'a> {
    active_rules: &'a ActiveRules,
    missing_coverage_factor: f64,
    survived_mutant_factor: f64,
}

impl<'a> RulesProcessor<'a> {
    pub fn new(config: &MutationConfig, active_rules: &'a ActiveRules) -> Self {
        Self {
            active_rules,
            missing_coverage_factor: config.effort.effective_missing_coverage_factor(),
            survived_mutant_factor: config.effort.effective_survived_mutant_factor(),
        }
    }

    /// Raise issues for the files of `language`. Returns the number of issues.
    pub fn process_rules(
        &self,
        metrics: &[ResourceMutationMetrics],
        context: &mut SensorContext,
        language: Language,
    ) -> usize {
        let repository = repository_key(language);
        let rules: Vec<&ActiveRule> = self.active_rules.find_by_repository(&repository).collect();
        if rules.is_empty() {
            tracing::warn!(
                %language,
                "at least one mutation analysis rule needs to be activated for the current profile"
            );
            return 0;
        }

        let before = context.issues().len();
        for resource_metrics in metrics
            .iter()
            .filter(|m| m.resource().language() == language)
        {
            for rule in &rules {
                self.apply_threshold_rule(resource_metrics, rule, context);
                self.apply_mutant_rule(resource_metrics, rule, context);
            }
        }
        context.issues().len() - before
    }

    fn apply_threshold_rule(
        &self,
        metrics: &ResourceMutationMetrics,
        rule: &ActiveRule,
        context: &mut SensorContext,
    ) {
        let threshold = match rule.param(PARAM_COVERAGE_THRESHOLD) {
            Some(value) => match value.trim().parse::<f64>() {
                Ok(threshold) => threshold,
                Err(_) => {
                    tracing::warn!(rule = rule.rule_key(), value, "invalid coverage threshold");
                    return;
                }
            },
            None if rule.rule_key() == RULE_COVERAGE => DEFAULT_COVERAGE_THRESHOLD,
            None => return,
        };

        let actual = metrics.mutation_coverage();
        if actual >= threshold {
            return;
        }
        let minimum_killed = f64::from(metrics.total()) * threshold / 100.0;
        let additional = (minimum_killed - f64::from(metrics.killed())).ceil();
        let message = format!(
            "{additional:.0} more mutants need to be killed to get the mutation coverage from {actual:.1}% to {threshold:.1}%"
        );
        context.add_issue(
            Issue::new(rule, metrics.resource().relative_path(), message)
                .with_gap(self.missing_coverage_factor * additional),
        );
    }

    fn apply_mutant_rule(
        &self,
        metrics: &ResourceMutationMetrics,
        rule: &ActiveRule,
        context: &mut SensorContext,
    ) {
        for mutant in metrics.mutants() {
            if violates(rule.rule_key(), mutant) {
                context.add_issue(
                    Issue::new(rule, metrics.resource().relative_path(), violation_message(mutant))
                        .at_line(mutant.line_number())
                        .with_gap(self.survived_mutant_factor),
                );
            }
        }
    }
}

fn violates(rule_key: &str, mutant: &Mutant) -> bool {
    let state = mutant.state();
    match rule_key {
        RULE_SURVIVED => matches!(state, MutantState::Survived | MutantState::NoCoverage),
        RULE_UNCOVERED => state == MutantState::NoCoverage,
        RULE_UNKNOWN_STATUS => state == MutantState::Unknown,
        key => is_operator_rule(key, mutant) && mutant.is_alive(),
    }
}

fn is_operator_rule(rule_key: &str, mutant: &Mutant) -> bool {
    rule_key
        .strip_prefix(MUTANT_RULES_PREFIX)
        .map(|rest| rest.strip_suffix(CODE_SMELL_SUFFIX).unwrap_or(rest))
        .is_some_and(|id| id == mutant.operator().id())
}

/// The operator's violation description, the mutation description and the
/// mutator variant, e.g. `Removed call. Mutation: removed call to foo (EQUAL_IF)`.
pub fn violation_message(mutant: &Mutant) -> String {
    let mut message = mutant.operator().violation_description().to_string();
    if let Some(description) = mutant.description() {
        message.push_str(" Mutation: ");
        message.push_str(description);
    }
    if !mutant.mutator_suffix().is_empty() {
        message.push_str(" (");
        message.push_str(mutant.mutator_suffix());
        message.push(')');
    }
    message
}
