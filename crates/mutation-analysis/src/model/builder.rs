//! Step-wise construction of [`Mutant`]s.

use std::sync::Arc;

use mutation_core::errors::ReportError;

use super::{Mutant, MutantState, MutationOperator, OperatorCatalog};

/// Builder for [`Mutant`]. State, source file, class, method, method
/// description, and operator are mandatory.
#[derive(Debug, Default, Clone)]
pub struct MutantBuilder {
    detected: bool,
    state: Option<MutantState>,
    source_file: Option<String>,
    mutated_class: Option<String>,
    mutated_method: Option<String>,
    method_description: Option<String>,
    line_number: u32,
    operator: Option<Arc<MutationOperator>>,
    mutator_suffix: String,
    index: u32,
    killing_test: String,
    description: Option<String>,
    number_of_tests_run: u32,
}

impl MutantBuilder {
    pub fn detected(mut self, detected: bool) -> Self {
        self.detected = detected;
        self
    }

    pub fn state(mut self, state: MutantState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the state from a PIT status string.
    pub fn status(self, status: &str) -> Self {
        self.state(MutantState::parse(status))
    }

    pub fn source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub fn mutated_class(mut self, class: impl Into<String>) -> Self {
        self.mutated_class = Some(class.into());
        self
    }

    pub fn mutated_method(mut self, method: impl Into<String>) -> Self {
        self.mutated_method = Some(method.into());
        self
    }

    pub fn method_description(mut self, description: impl Into<String>) -> Self {
        self.method_description = Some(description.into());
        self
    }

    pub fn line_number(mut self, line: u32) -> Self {
        self.line_number = line;
        self
    }

    /// Set the operator directly; the mutator suffix is cleared.
    pub fn operator(mut self, operator: Arc<MutationOperator>) -> Self {
        self.operator = Some(operator);
        self.mutator_suffix.clear();
        self
    }

    /// Resolve the operator and suffix from a PIT mutator id or class name.
    pub fn using_mutator(mut self, catalog: &OperatorCatalog, mutator: &str) -> Self {
        let operator = catalog.find(mutator);
        if operator.is_unknown() {
            tracing::warn!(mutator, "found unknown mutation operator");
            self.mutator_suffix.clear();
        } else {
            self.mutator_suffix = operator.suffix_of(mutator).to_string();
        }
        self.operator = Some(operator);
        self
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn killing_test(mut self, test: impl Into<String>) -> Self {
        self.killing_test = test.into();
        self
    }

    /// Set the human-readable mutation description. Blank values are dropped.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = Some(description).filter(|d| !d.trim().is_empty());
        self
    }

    pub fn number_of_tests_run(mut self, count: u32) -> Self {
        self.number_of_tests_run = count;
        self
    }

    pub fn build(self) -> Result<Mutant, ReportError> {
        let missing = |field: &'static str| ReportError::MissingField { field };
        Ok(Mutant {
            detected: self.detected,
            state: self.state.ok_or_else(|| missing("status"))?,
            source_file: self.source_file.ok_or_else(|| missing("sourceFile"))?,
            mutated_class: self.mutated_class.ok_or_else(|| missing("mutatedClass"))?,
            mutated_method: self.mutated_method.ok_or_else(|| missing("mutatedMethod"))?,
            method_description: self
                .method_description
                .ok_or_else(|| missing("methodDescription"))?,
            line_number: self.line_number,
            operator: self.operator.ok_or_else(|| missing("mutator"))?,
            mutator_suffix: self.mutator_suffix,
            index: self.index,
            killing_test: self.killing_test,
            description: self.description,
            number_of_tests_run: self.number_of_tests_run,
        })
    }
}
