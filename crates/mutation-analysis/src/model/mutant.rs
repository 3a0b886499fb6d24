//! A single mutant from a PIT report.

use std::sync::Arc;

use super::{MutantBuilder, MutantState, MutationOperator, TestDescriptor};

/// One mutation PIT applied, with the outcome of the test run.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutant {
    pub(crate) detected: bool,
    pub(crate) state: MutantState,
    pub(crate) source_file: String,
    pub(crate) mutated_class: String,
    pub(crate) mutated_method: String,
    pub(crate) method_description: String,
    pub(crate) line_number: u32,
    pub(crate) operator: Arc<MutationOperator>,
    pub(crate) mutator_suffix: String,
    pub(crate) index: u32,
    pub(crate) killing_test: String,
    pub(crate) description: Option<String>,
    pub(crate) number_of_tests_run: u32,
}

impl Mutant {
    pub fn builder() -> MutantBuilder {
        MutantBuilder::default()
    }

    pub fn is_detected(&self) -> bool {
        self.detected
    }

    pub fn state(&self) -> MutantState {
        self.state
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn mutated_class(&self) -> &str {
        &self.mutated_class
    }

    pub fn mutated_method(&self) -> &str {
        &self.mutated_method
    }

    pub fn method_description(&self) -> &str {
        &self.method_description
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn operator(&self) -> &Arc<MutationOperator> {
        &self.operator
    }

    /// Variant of the operator, e.g. `EQUAL_IF`; empty when there is none.
    pub fn mutator_suffix(&self) -> &str {
        &self.mutator_suffix
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The test that killed the mutant; empty when none did.
    pub fn killing_test(&self) -> &str {
        &self.killing_test
    }

    pub fn killing_test_descriptor(&self) -> Option<TestDescriptor> {
        let test = self.killing_test.trim();
        (!test.is_empty()).then(|| TestDescriptor::parse(test))
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn number_of_tests_run(&self) -> u32 {
        self.number_of_tests_run
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Mutated class without nested class suffix: `a.B$C` becomes `a.B`.
    pub fn outer_class(&self) -> &str {
        self.mutated_class
            .split_once('$')
            .map(|(outer, _)| outer)
            .unwrap_or(&self.mutated_class)
    }
}
