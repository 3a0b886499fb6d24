//! The operator catalog, loaded from `mutagen-def.xml`.

use std::sync::{Arc, OnceLock};

use mutation_core::errors::CatalogError;
use quick_xml::events::Event;
use rustc_hash::FxHashSet;

use super::MutationOperator;
use crate::xml;

/// Bundled operator definitions.
pub const BUNDLED_DEFINITIONS: &str = include_str!("../../resources/mutagen-def.xml");

const BUNDLED_NAME: &str = "mutagen-def.xml";

static BUNDLED: OnceLock<OperatorCatalog> = OnceLock::new();

/// An ordered, read-only set of mutation operators.
#[derive(Debug, Clone, Default)]
pub struct OperatorCatalog {
    operators: Vec<Arc<MutationOperator>>,
}

impl OperatorCatalog {
    /// The catalog bundled with this crate, parsed once per process.
    pub fn bundled() -> Result<&'static OperatorCatalog, CatalogError> {
        if let Some(catalog) = BUNDLED.get() {
            return Ok(catalog);
        }
        let catalog = Self::from_xml(BUNDLED_NAME, BUNDLED_DEFINITIONS)?;
        tracing::debug!(operators = catalog.len(), "loaded bundled operator catalog");
        Ok(BUNDLED.get_or_init(|| catalog))
    }

    pub fn new(operators: Vec<MutationOperator>) -> Self {
        Self {
            operators: operators.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse an operator catalog document.
    ///
    /// ```xml
    /// <mutagens>
    ///   <operator id="MATH">
    ///     <name>Math Mutator</name>
    ///     <classes><class>org.pitest...MathMutator</class></classes>
    ///     <violationDescription>...</violationDescription>
    ///     <description><![CDATA[<p>html</p>]]></description>
    ///   </operator>
    /// </mutagens>
    /// ```
    pub fn from_xml(source_name: &str, content: &str) -> Result<Self, CatalogError> {
        let xml_error = |message: String| CatalogError::Xml {
            source_name: source_name.to_string(),
            message,
        };

        let mut reader = xml::reader(content);
        let mut operators = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current: Option<OperatorDraft> = None;
        let mut saw_root = false;
        let mut closed_root = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| xml_error(xml::position_message(&reader, &e)))?;
            match event {
                Event::Start(e) => {
                    let name = e.name();
                    match name.as_ref() {
                        b"mutagens" if !saw_root && current.is_none() => saw_root = true,
                        b"classes" if current.is_some() => {}
                        b"operator" => {
                            if current.is_some() {
                                return Err(xml_error("nested <operator>".to_string()));
                            }
                            let id = xml::attribute(&e, "id")
                                .map_err(xml_error)?
                                .unwrap_or_default();
                            current = Some(OperatorDraft::new(id));
                        }
                        field => {
                            let element = String::from_utf8_lossy(field).into_owned();
                            let Some(draft) = current.as_mut() else {
                                return Err(xml_error(format!(
                                    "unexpected element <{element}> outside <operator>"
                                )));
                            };
                            let text = xml::read_text(&mut reader, field).map_err(xml_error)?;
                            match field {
                                b"name" => draft.name = text,
                                b"class" if !text.is_empty() => draft.class_names.push(text),
                                b"class" => {}
                                b"violationDescription" => draft.violation_description = text,
                                b"description" => {
                                    draft.operator_description = Some(text).filter(|t| !t.is_empty());
                                }
                                _ => {
                                    return Err(xml_error(format!(
                                        "unexpected element <{element}>"
                                    )));
                                }
                            }
                        }
                    }
                }
                Event::End(e) if e.name().as_ref() == b"operator" => {
                    if let Some(draft) = current.take() {
                        let operator = draft.finish()?;
                        if !seen.insert(operator.id().to_string()) {
                            return Err(CatalogError::InvalidValue {
                                key: operator.id().to_string(),
                                field: "id",
                                value: "duplicate operator id".to_string(),
                            });
                        }
                        operators.push(Arc::new(operator));
                    }
                }
                Event::End(e) if e.name().as_ref() == b"mutagens" && current.is_none() => {
                    closed_root = true;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(xml_error("missing <mutagens> root element".to_string()));
        }
        if current.is_some() {
            return Err(xml_error("unterminated <operator>".to_string()));
        }
        if !closed_root {
            return Err(xml_error("unterminated <mutagens> root element".to_string()));
        }
        if operators.is_empty() {
            return Err(xml_error("catalog defines no operators".to_string()));
        }
        Ok(Self { operators })
    }

    /// Find the operator for a PIT mutator id or class name. Never fails:
    /// unmatched keys yield [`MutationOperator::unknown`].
    pub fn find(&self, key: &str) -> Arc<MutationOperator> {
        self.operators
            .iter()
            .find(|op| op.matches(key))
            .cloned()
            .unwrap_or_else(MutationOperator::unknown)
    }

    /// Look an operator up by exact id.
    pub fn get(&self, id: &str) -> Option<&Arc<MutationOperator>> {
        self.operators.iter().find(|op| op.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MutationOperator>> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[derive(Debug, Default)]
struct OperatorDraft {
    id: String,
    name: String,
    class_names: Vec<String>,
    violation_description: String,
    operator_description: Option<String>,
}

impl OperatorDraft {
    fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    fn finish(self) -> Result<MutationOperator, CatalogError> {
        let key = if self.id.is_empty() {
            "<operator>".to_string()
        } else {
            self.id.clone()
        };
        let missing = |field: &'static str| CatalogError::MissingField {
            key: key.clone(),
            field,
        };
        if self.id.is_empty() {
            return Err(missing("id"));
        }
        if self.name.is_empty() {
            return Err(missing("name"));
        }
        if self.class_names.is_empty() {
            return Err(missing("class"));
        }
        if self.violation_description.is_empty() {
            return Err(missing("violationDescription"));
        }
        Ok(MutationOperator::new(
            self.id,
            self.name,
            self.class_names,
            self.violation_description,
            self.operator_description,
        ))
    }
}
