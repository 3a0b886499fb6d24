//! Rules that are switched on for an analysis run.

use std::collections::BTreeMap;

use mutation_core::config::RulesConfig;
use mutation_core::constants::PARAM_COVERAGE_THRESHOLD;
use mutation_core::errors::CatalogError;

use super::{repository_key, BuiltInProfile, Rule, RulesContext, Severity};

/// A rule activated for analysis, with resolved severity and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRule {
    repository_key: String,
    rule_key: String,
    severity: Severity,
    params: BTreeMap<String, String>,
    rule: Rule,
}

impl ActiveRule {
    /// Activate `rule` with its default severity and parameter defaults.
    pub fn from_rule(rule: &Rule) -> Self {
        let params = rule
            .params()
            .iter()
            .filter_map(|p| p.default_value.clone().map(|v| (p.key.clone(), v)))
            .collect();
        Self {
            repository_key: rule.repository_key().to_string(),
            rule_key: rule.key().to_string(),
            severity: rule.severity(),
            params,
            rule: rule.clone(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    pub fn rule_key(&self) -> &str {
        &self.rule_key
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The registered rule definition.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

/// The set of active rules of an analysis run.
#[derive(Debug, Clone, Default)]
pub struct ActiveRules {
    rules: Vec<ActiveRule>,
}

impl ActiveRules {
    pub fn new(rules: Vec<ActiveRule>) -> Self {
        Self { rules }
    }

    /// Resolve a profile against the registered repositories, then apply
    /// the extra activations and the threshold override from `config`.
    pub fn from_profile(
        profile: &BuiltInProfile,
        context: &RulesContext,
        config: &RulesConfig,
    ) -> Result<Self, CatalogError> {
        profile.validate_against(context)?;

        let mut rules = Vec::with_capacity(profile.activations().len());
        for activation in profile.activations() {
            let rule = lookup(context, activation.repository_key(), activation.rule_key())?;
            let mut active = ActiveRule::from_rule(rule);
            if let Some(severity) = activation.overridden_severity() {
                active = active.with_severity(severity);
            }
            for (key, value) in activation.overridden_params() {
                active = active.with_param(key.as_str(), value.as_str());
            }
            rules.push(active);
        }

        let repository = repository_key(profile.language());
        for rule_key in &config.extra_active {
            if rules
                .iter()
                .any(|r| r.repository_key == repository && &r.rule_key == rule_key)
            {
                continue;
            }
            let rule = lookup(context, &repository, rule_key)?;
            rules.push(ActiveRule::from_rule(rule));
        }

        if let Some(threshold) = config.coverage_threshold {
            for active in rules
                .iter_mut()
                .filter(|r| r.rule.param(PARAM_COVERAGE_THRESHOLD).is_some())
            {
                active
                    .params
                    .insert(PARAM_COVERAGE_THRESHOLD.to_string(), threshold.to_string());
            }
        }

        tracing::debug!(
            profile = profile.name(),
            language = %profile.language(),
            active = rules.len(),
            "resolved active rules"
        );
        Ok(Self { rules })
    }

    pub fn find_by_repository<'s>(
        &'s self,
        repository_key: &'s str,
    ) -> impl Iterator<Item = &'s ActiveRule> + 's {
        self.rules
            .iter()
            .filter(move |r| r.repository_key == repository_key)
    }

    pub fn find(&self, repository_key: &str, rule_key: &str) -> Option<&ActiveRule> {
        self.rules
            .iter()
            .find(|r| r.repository_key == repository_key && r.rule_key == rule_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn lookup<'c>(
    context: &'c RulesContext,
    repository_key: &str,
    rule_key: &str,
) -> Result<&'c Rule, CatalogError> {
    context
        .repository(repository_key)
        .ok_or_else(|| CatalogError::UnknownRepository {
            key: repository_key.to_string(),
        })?
        .rule(rule_key)
        .ok_or_else(|| CatalogError::UnknownRule {
            repository: repository_key.to_string(),
            key: rule_key.to_string(),
        })
}
