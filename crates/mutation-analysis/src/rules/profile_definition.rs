//! The built-in "Mutation Analysis" profile.

use mutation_core::constants::PROFILE_NAME;
use mutation_core::errors::CatalogError;
use mutation_core::types::Language;

use super::definition::operator_rule_key;
use super::{repository_key, BuiltInProfile, BuiltInProfilesContext};
use crate::model::OperatorCatalog;

/// Something that registers built-in quality profiles.
pub trait ProfileDefinition {
    fn define(&self, context: &mut BuiltInProfilesContext) -> Result<(), CatalogError>;
}

/// Activates the bug rule of every cataloged operator for one language.
#[derive(Debug, Clone, Copy)]
pub struct MutationProfileDefinition<'a> {
    language: Language,
    catalog: &'a OperatorCatalog,
}

impl<'a> MutationProfileDefinition<'a> {
    pub fn new(language: Language, catalog: &'a OperatorCatalog) -> Self {
        Self { language, catalog }
    }

    pub fn define_profile<'c>(
        &self,
        context: &'c mut BuiltInProfilesContext,
    ) -> Result<&'c BuiltInProfile, CatalogError> {
        let repository = repository_key(self.language);
        let mut profile = context.create_profile(PROFILE_NAME, self.language)?;
        for operator in self.catalog.iter() {
            profile.activate_rule(repository.as_str(), operator_rule_key(operator))?;
        }
        let profile = profile.done();
        tracing::info!(
            profile = profile.name(),
            language = %self.language,
            rule_count = profile.activations().len(),
            "defined built-in profile"
        );
        Ok(profile)
    }
}

impl ProfileDefinition for MutationProfileDefinition<'_> {
    fn define(&self, context: &mut BuiltInProfilesContext) -> Result<(), CatalogError> {
        self.define_profile(context).map(|_| ())
    }
}
