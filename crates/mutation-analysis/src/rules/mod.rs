//! Rule registration: rule model, repositories, the XML rule loader, the
//! mutation analysis rule and profile definitions, and active rules.

pub mod active_rules;
pub mod definition;
pub mod profile;
pub mod profile_definition;
pub mod remediation;
pub mod repository;
pub mod types;
pub mod xml_loader;

pub use active_rules::{ActiveRule, ActiveRules};
pub use definition::{repository_key, MutationRulesDefinition, RuleSettings, RulesDefinition};
pub use profile::{BuiltInProfile, BuiltInProfilesContext, NewBuiltInProfile, ProfileActivation};
pub use profile_definition::{MutationProfileDefinition, ProfileDefinition};
pub use remediation::DebtRemediationFunction;
pub use repository::{NewRepository, NewRule, Repository, Rule, RulesContext};
pub use types::{ParamType, RuleParam, RuleStatus, RuleType, Severity};
pub use xml_loader::RulesXmlLoader;
