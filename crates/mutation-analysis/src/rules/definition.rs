//! Rule repository definition for mutation analysis.
//!
//! Each language gets a repository `mutation.analysis.{language}` holding the
//! generic rules from the bundled `rules.xml` plus, for every operator of the
//! catalog, a bug rule `mutant.{ID}` and (optionally) a code smell rule
//! `mutant.{ID}_CODE_SMELL`.

use mutation_core::config::MutationConfig;
use mutation_core::constants::{
    CODE_SMELL_SUFFIX, GAP_DESCRIPTION, MUTANT_RULES_PREFIX, REMEDIATION_OFFSET_MINUTES,
    REPOSITORY_KEY, REPOSITORY_NAME,
};
use mutation_core::errors::CatalogError;
use mutation_core::types::{Effort, Language};

use super::{
    DebtRemediationFunction, NewRepository, Repository, RuleStatus, RuleType, RulesContext,
    RulesXmlLoader,
};
use crate::model::{MutationOperator, OperatorCatalog};

/// Bundled generic rule definitions.
pub const RULES_XML: &str = include_str!("../../resources/rules.xml");

const RULES_XML_NAME: &str = "rules.xml";

const OPERATOR_RULE_TAGS: &[&str] = &[
    "pitest",
    "test",
    "test-quality",
    "mutator",
    "mutation-operator",
];

/// Something that registers rule repositories.
pub trait RulesDefinition {
    fn define(&self, context: &mut RulesContext) -> Result<(), CatalogError>;
}

/// Repository key for `language`: `mutation.analysis.{language}`.
pub fn repository_key(language: Language) -> String {
    format!("{REPOSITORY_KEY}.{}", language.key())
}

/// Rule key of the bug rule for `operator`.
pub fn operator_rule_key(operator: &MutationOperator) -> String {
    format!("{MUTANT_RULES_PREFIX}{}", operator.id())
}

/// Rule key of the code smell rule for `operator`.
pub fn operator_code_smell_rule_key(operator: &MutationOperator) -> String {
    format!("{MUTANT_RULES_PREFIX}{}{CODE_SMELL_SUFFIX}", operator.id())
}

/// Settings that shape the registered rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSettings {
    /// Effort to kill one mutant; the gap multiplier of every rule.
    pub effort_to_kill_mutant: Effort,
    /// Register a code smell rule next to every operator bug rule.
    pub code_smell_variants: bool,
}

impl RuleSettings {
    pub fn from_config(config: &MutationConfig) -> Self {
        Self {
            effort_to_kill_mutant: config.effort.effective_mutant_kill(),
            code_smell_variants: config.rules.effective_code_smell_variants(),
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self::from_config(&MutationConfig::default())
    }
}

/// Registers the mutation analysis repository of one language.
#[derive(Debug, Clone)]
pub struct MutationRulesDefinition<'a> {
    language: Language,
    catalog: &'a OperatorCatalog,
    settings: RuleSettings,
    rules_source: (&'a str, &'a str),
}

impl<'a> MutationRulesDefinition<'a> {
    pub fn new(language: Language, catalog: &'a OperatorCatalog, settings: RuleSettings) -> Self {
        Self {
            language,
            catalog,
            settings,
            rules_source: (RULES_XML_NAME, RULES_XML),
        }
    }

    /// Use a different generic rules document instead of the bundled `rules.xml`.
    pub fn with_rules_xml(mut self, source_name: &'a str, content: &'a str) -> Self {
        self.rules_source = (source_name, content);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Define the repository and return it.
    pub fn define_repository<'c>(
        &self,
        context: &'c mut RulesContext,
    ) -> Result<&'c Repository, CatalogError> {
        let key = repository_key(self.language);
        let mut repository = context.create_repository(key, self.language)?;
        repository.set_name(REPOSITORY_NAME);

        let (source_name, content) = self.rules_source;
        RulesXmlLoader::load(&mut repository, source_name, content)?;
        self.add_operator_rules(&mut repository)?;

        let remediation = DebtRemediationFunction::linear_with_offset(
            self.settings.effort_to_kill_mutant,
            Effort::from_minutes(REMEDIATION_OFFSET_MINUTES),
        );
        for rule in repository.rules_mut() {
            rule.set_debt_remediation_function(remediation)
                .set_gap_description(GAP_DESCRIPTION);
        }

        let repository = repository.done()?;
        tracing::info!(
            repository = repository.key(),
            rule_count = repository.len(),
            "defined mutation analysis rules"
        );
        Ok(repository)
    }

    fn add_operator_rules(&self, repository: &mut NewRepository<'_>) -> Result<(), CatalogError> {
        for operator in self.catalog.iter() {
            let description = operator_html_description(operator);
            let status = if operator.is_experimental() {
                RuleStatus::Beta
            } else {
                RuleStatus::Ready
            };

            repository
                .create_rule(operator_rule_key(operator))?
                .set_name(operator.name())
                .set_type(RuleType::Bug)
                .set_status(status)
                .set_activated_by_default(!operator.is_experimental())
                .set_html_description(description.clone())
                .add_tags(OPERATOR_RULE_TAGS);

            if self.settings.code_smell_variants {
                repository
                    .create_rule(operator_code_smell_rule_key(operator))?
                    .set_name(format!("{} (Code Smell)", operator.name()))
                    .set_type(RuleType::CodeSmell)
                    .set_status(status)
                    .set_activated_by_default(!operator.is_experimental())
                    .set_html_description(description)
                    .add_tags(OPERATOR_RULE_TAGS);
            }
        }
        Ok(())
    }
}

impl RulesDefinition for MutationRulesDefinition<'_> {
    fn define(&self, context: &mut RulesContext) -> Result<(), CatalogError> {
        self.define_repository(context).map(|_| ())
    }
}

fn operator_html_description(operator: &MutationOperator) -> String {
    match operator.operator_description() {
        Some(html) => html.to_string(),
        None => format!("<p>{}</p>", operator.violation_description()),
    }
}
