//! Built-in quality profiles.

use std::collections::BTreeMap;

use mutation_core::errors::CatalogError;
use mutation_core::types::Language;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::{RulesContext, Severity};

/// Registry of built-in quality profiles.
#[derive(Debug, Default)]
pub struct BuiltInProfilesContext {
    profiles: Vec<BuiltInProfile>,
}

impl BuiltInProfilesContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start defining a profile. Profile names are unique per language.
    pub fn create_profile(
        &mut self,
        name: impl Into<String>,
        language: Language,
    ) -> Result<NewBuiltInProfile<'_>, CatalogError> {
        let name = name.into();
        if self.profile(language, &name).is_some() {
            return Err(CatalogError::DuplicateProfile {
                language: language.key().to_string(),
                name,
            });
        }
        Ok(NewBuiltInProfile {
            context: self,
            name,
            language,
            is_default: false,
            activations: Vec::new(),
            seen: FxHashSet::default(),
        })
    }

    pub fn profile(&self, language: Language, name: &str) -> Option<&BuiltInProfile> {
        self.profiles
            .iter()
            .find(|p| p.language == language && p.name == name)
    }

    pub fn profiles_for(&self, language: Language) -> impl Iterator<Item = &BuiltInProfile> {
        self.profiles.iter().filter(move |p| p.language == language)
    }

    pub fn profiles(&self) -> &[BuiltInProfile] {
        &self.profiles
    }
}

/// A profile under construction.
#[derive(Debug)]
pub struct NewBuiltInProfile<'a> {
    context: &'a mut BuiltInProfilesContext,
    name: String,
    language: Language,
    is_default: bool,
    activations: Vec<ProfileActivation>,
    seen: FxHashSet<(String, String)>,
}

impl<'a> NewBuiltInProfile<'a> {
    pub fn set_default(&mut self, is_default: bool) -> &mut Self {
        self.is_default = is_default;
        self
    }

    /// Activate `repository_key:rule_key`. A rule can only be activated once.
    pub fn activate_rule(
        &mut self,
        repository_key: impl Into<String>,
        rule_key: impl Into<String>,
    ) -> Result<&mut ProfileActivation, CatalogError> {
        let repository_key = repository_key.into();
        let rule_key = rule_key.into();
        if !self
            .seen
            .insert((repository_key.clone(), rule_key.clone()))
        {
            return Err(CatalogError::DuplicateActivation {
                profile: self.name.clone(),
                repository: repository_key,
                key: rule_key,
            });
        }
        self.activations.push(ProfileActivation {
            repository_key,
            rule_key,
            overridden_severity: None,
            overridden_params: BTreeMap::new(),
        });
        let index = self.activations.len() - 1;
        Ok(&mut self.activations[index])
    }

    /// Register the profile.
    pub fn done(self) -> &'a BuiltInProfile {
        let NewBuiltInProfile {
            context,
            name,
            language,
            is_default,
            activations,
            ..
        } = self;
        tracing::debug!(
            profile = %name,
            %language,
            activations = activations.len(),
            "registering built-in profile"
        );
        context.profiles.push(BuiltInProfile {
            name,
            language,
            is_default,
            activations,
        });
        let index = context.profiles.len() - 1;
        &context.profiles[index]
    }
}

/// A rule activated in a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileActivation {
    repository_key: String,
    rule_key: String,
    overridden_severity: Option<Severity>,
    overridden_params: BTreeMap<String, String>,
}

impl ProfileActivation {
    pub fn repository_key(&self) -> &str {
        &self.repository_key
    }

    pub fn rule_key(&self) -> &str {
        &self.rule_key
    }

    pub fn overridden_severity(&self) -> Option<Severity> {
        self.overridden_severity
    }

    pub fn overridden_params(&self) -> &BTreeMap<String, String> {
        &self.overridden_params
    }

    pub fn override_severity(&mut self, severity: Severity) -> &mut Self {
        self.overridden_severity = Some(severity);
        self
    }

    pub fn override_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.overridden_params.insert(key.into(), value.into());
        self
    }
}

/// A registered, read-only quality profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltInProfile {
    name: String,
    language: Language,
    is_default: bool,
    activations: Vec<ProfileActivation>,
}

impl BuiltInProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn activations(&self) -> &[ProfileActivation] {
        &self.activations
    }

    /// Activations whose repository key ends with `.{language}` of this profile.
    pub fn rules_for_language(&self) -> impl Iterator<Item = &ProfileActivation> {
        let suffix = format!(".{}", self.language.key());
        self.activations
            .iter()
            .filter(move |a| a.repository_key.ends_with(&suffix))
    }

    pub fn rules_for_repository<'s>(
        &'s self,
        repository_key: &'s str,
    ) -> impl Iterator<Item = &'s ProfileActivation> + 's {
        self.activations
            .iter()
            .filter(move |a| a.repository_key == repository_key)
    }

    /// Check that every activation references an existing rule.
    pub fn validate_against(&self, rules: &RulesContext) -> Result<(), CatalogError> {
        for activation in &self.activations {
            let repository = rules.repository(&activation.repository_key).ok_or_else(|| {
                CatalogError::UnknownRepository {
                    key: activation.repository_key.clone(),
                }
            })?;
            if repository.rule(&activation.rule_key).is_none() {
                return Err(CatalogError::UnknownRule {
                    repository: activation.repository_key.clone(),
                    key: activation.rule_key.clone(),
                });
            }
        }
        Ok(())
    }
}
