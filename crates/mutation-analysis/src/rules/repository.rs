//! Rule repositories and the context they are registered into.
//!
//! A repository is assembled through [`NewRepository`] and only becomes
//! visible in the [`RulesContext`] once [`NewRepository::done`] validated
//! every rule. Dropping a `NewRepository` registers nothing.

use std::collections::BTreeMap;

use mutation_core::errors::CatalogError;
use mutation_core::types::Language;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::{DebtRemediationFunction, RuleParam, RuleStatus, RuleType, Severity};

/// Registry of all rule repositories, keyed by repository key.
#[derive(Debug, Default)]
pub struct RulesContext {
    repositories: BTreeMap<String, Repository>,
}

impl RulesContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start defining a repository. Fails if `key` is already registered.
    pub fn create_repository(
        &mut self,
        key: impl Into<String>,
        language: Language,
    ) -> Result<NewRepository<'_>, CatalogError> {
        let key = key.into();
        if self.repositories.contains_key(&key) {
            return Err(CatalogError::DuplicateRepository { key });
        }
        Ok(NewRepository {
            context: self,
            name: key.clone(),
            key,
            language,
            rules: Vec::new(),
            keys: FxHashSet::default(),
        })
    }

    pub fn repository(&self, key: &str) -> Option<&Repository> {
        self.repositories.get(key)
    }

    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values()
    }
}

/// A repository under construction.
#[derive(Debug)]
pub struct NewRepository<'a> {
    context: &'a mut RulesContext,
    key: String,
    name: String,
    language: Language,
    rules: Vec<NewRule>,
    keys: FxHashSet<String>,
}

impl<'a> NewRepository<'a> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Add a rule. Keys are unique within the repository.
    pub fn create_rule(&mut self, key: impl Into<String>) -> Result<&mut NewRule, CatalogError> {
        let key = key.into();
        if !self.keys.insert(key.clone()) {
            return Err(CatalogError::DuplicateRule {
                repository: self.key.clone(),
                key,
            });
        }
        self.rules.push(NewRule::new(key));
        let index = self.rules.len() - 1;
        Ok(&mut self.rules[index])
    }

    pub fn rule_mut(&mut self, key: &str) -> Option<&mut NewRule> {
        self.rules.iter_mut().find(|r| r.key == key)
    }

    pub fn rules_mut(&mut self) -> impl Iterator<Item = &mut NewRule> {
        self.rules.iter_mut()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Validate every rule and register the repository.
    pub fn done(self) -> Result<&'a Repository, CatalogError> {
        let NewRepository {
            context,
            key,
            name,
            language,
            rules,
            ..
        } = self;

        let rules = rules
            .into_iter()
            .map(|rule| rule.build(&key))
            .collect::<Result<Vec<_>, _>>()?;
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();

        tracing::debug!(repository = %key, rules = rules.len(), "registering rule repository");
        let repository = Repository {
            key: key.clone(),
            name,
            language,
            rules,
            index,
        };
        Ok(context.repositories.entry(key).or_insert(repository))
    }
}

/// A rule under construction.
#[derive(Debug, Clone)]
pub struct NewRule {
    key: String,
    name: Option<String>,
    html_description: Option<String>,
    internal_key: Option<String>,
    severity: Severity,
    rule_type: RuleType,
    status: RuleStatus,
    tags: Vec<String>,
    params: Vec<RuleParam>,
    debt_remediation_function: Option<DebtRemediationFunction>,
    gap_description: Option<String>,
    activated_by_default: bool,
}

impl NewRule {
    fn new(key: String) -> Self {
        Self {
            key,
            name: None,
            html_description: None,
            internal_key: None,
            severity: Severity::default(),
            rule_type: RuleType::default(),
            status: RuleStatus::default(),
            tags: Vec::new(),
            params: Vec::new(),
            debt_remediation_function: None,
            gap_description: None,
            activated_by_default: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_html_description(&mut self, html: impl Into<String>) -> &mut Self {
        self.html_description = Some(html.into());
        self
    }

    pub fn set_internal_key(&mut self, internal_key: impl Into<String>) -> &mut Self {
        self.internal_key = Some(internal_key.into());
        self
    }

    pub fn set_severity(&mut self, severity: Severity) -> &mut Self {
        self.severity = severity;
        self
    }

    pub fn set_type(&mut self, rule_type: RuleType) -> &mut Self {
        self.rule_type = rule_type;
        self
    }

    pub fn set_status(&mut self, status: RuleStatus) -> &mut Self {
        self.status = status;
        self
    }

    /// Add tags, keeping them unique and lower-case.
    pub fn add_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref().trim().to_ascii_lowercase();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    pub fn add_param(&mut self, param: RuleParam) -> &mut Self {
        self.params.push(param);
        self
    }

    pub fn set_debt_remediation_function(&mut self, function: DebtRemediationFunction) -> &mut Self {
        self.debt_remediation_function = Some(function);
        self
    }

    pub fn set_gap_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.gap_description = Some(description.into());
        self
    }

    pub fn set_activated_by_default(&mut self, activated: bool) -> &mut Self {
        self.activated_by_default = activated;
        self
    }

    fn build(self, repository: &str) -> Result<Rule, CatalogError> {
        let missing = |field: &'static str| CatalogError::MissingField {
            key: self.key.clone(),
            field,
        };
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| missing("name"))?;
        let html_description = self
            .html_description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| missing("description"))?;
        let debt_remediation_function = self
            .debt_remediation_function
            .ok_or_else(|| missing("debt remediation function"))?;
        let gap_description = self
            .gap_description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| missing("gap description"))?;

        {
            let mut param_keys = FxHashSet::default();
            for param in &self.params {
                if param.key.is_empty() {
                    return Err(missing("param key"));
                }
                if !param_keys.insert(param.key.as_str()) {
                    return Err(CatalogError::InvalidValue {
                        key: self.key.clone(),
                        field: "param",
                        value: param.key.clone(),
                    });
                }
            }
        }

        let mut tags = self.tags;
        tags.sort();

        Ok(Rule {
            key: self.key,
            repository_key: repository.to_string(),
            name,
            html_description,
            internal_key: self.internal_key,
            severity: self.severity,
            rule_type: self.rule_type,
            status: self.status,
            tags,
            params: self.params,
            debt_remediation_function,
            gap_description,
            activated_by_default: self.activated_by_default,
        })
    }
}

/// An immutable, registered rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    key: String,
    repository_key: String,
    name: String,
    html_description: String,
    internal_key: Option<String>,
    severity: Severity,
    #[serde(rename = "type")]
    rule_type: RuleType,
    status: RuleStatus,
    tags: Vec<String>,
    params: Vec<RuleParam>,
    debt_remediation_function: DebtRemediationFunction,
    gap_description: String,
    activated_by_default: bool,
}

impl Rule {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn html_description(&self) -> &str {
        &self.html_description
    }

    pub fn internal_key(&self) -> Option<&str> {
        self.internal_key.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn status(&self) -> RuleStatus {
        self.status
    }

    /// Sorted, lower-case tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn params(&self) -> &[RuleParam] {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&RuleParam> {
        self.params.iter().find(|p| p.key == key)
    }

    pub fn debt_remediation_function(&self) -> &DebtRemediationFunction {
        &self.debt_remediation_function
    }

    pub fn gap_description(&self) -> &str {
        &self.gap_description
    }

    pub fn activated_by_default(&self) -> bool {
        self.activated_by_default
    }
}

/// A registered, read-only rule repository.
#[derive(Debug, Clone, Serialize)]
pub struct Repository {
    key: String,
    name: String,
    language: Language,
    rules: Vec<Rule>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Repository {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Rules in definition order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, key: &str) -> Option<&Rule> {
        self.index.get(key).map(|&i| &self.rules[i])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
