//! A single PIT mutation operator ("mutagen").

use std::sync::{Arc, OnceLock};

use serde::Serialize;

/// Id of the fallback operator for mutators missing from the catalog.
pub const UNKNOWN_ID: &str = "UNKNOWN";

static UNKNOWN: OnceLock<Arc<MutationOperator>> = OnceLock::new();

/// A mutation operator as described by the operator catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOperator {
    id: String,
    name: String,
    class_names: Vec<String>,
    violation_description: String,
    operator_description: Option<String>,
}

impl MutationOperator {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class_names: Vec<String>,
        violation_description: impl Into<String>,
        operator_description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_names,
            violation_description: violation_description.into(),
            operator_description,
        }
    }

    /// The operator for mutators that are not in the catalog.
    pub fn unknown() -> Arc<MutationOperator> {
        UNKNOWN
            .get_or_init(|| {
                Arc::new(MutationOperator::new(
                    UNKNOWN_ID,
                    "Unknown mutagen",
                    vec!["unknown.mutation.operator".to_string()],
                    "An unknown mutagen has been applied",
                    None,
                ))
            })
            .clone()
    }

    /// Upper-case operator id, e.g. `ARGUMENT_PROPAGATION`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified PIT mutator classes implementing this operator.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Short text describing what the mutant changed, used in issue messages.
    pub fn violation_description(&self) -> &str {
        &self.violation_description
    }

    /// HTML description of the operator, used as rule description.
    pub fn operator_description(&self) -> Option<&str> {
        self.operator_description.as_deref()
    }

    pub fn is_experimental(&self) -> bool {
        self.id.starts_with("EXPERIMENTAL")
    }

    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_ID
    }

    /// Whether `key` names this operator, either by id or by a mutator class
    /// name, optionally followed by a suffix (`..RemoveConditionalMutator_EQUAL_IF`).
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.class_names.iter().any(|c| key.starts_with(c.as_str()))
    }

    /// The mutator suffix of `mutator`: the text after the matching class
    /// name with a single leading `_` removed. Empty when no class matches.
    pub fn suffix_of<'a>(&self, mutator: &'a str) -> &'a str {
        self.class_names
            .iter()
            .find_map(|c| mutator.strip_prefix(c.as_str()))
            .map(|rest| rest.strip_prefix('_').unwrap_or(rest))
            .unwrap_or("")
    }
}
