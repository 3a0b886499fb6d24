//! Loads rule definitions from the host's rules XML format into a repository.

use mutation_core::errors::CatalogError;
use quick_xml::events::Event;

use super::{NewRepository, ParamType, RuleParam, RuleStatus, RuleType, Severity};
use crate::xml;

/// Reader for documents of the form
///
/// ```xml
/// <rules>
///   <rule>
///     <key>mutant.survived</key>
///     <name>Survived Mutant</name>
///     <description><![CDATA[<p>html</p>]]></description>
///     <severity>MAJOR</severity>
///     <type>BUG</type>
///     <status>DEPRECATED</status>
///     <tag>pitest</tag>
///     <param>
///       <key>threshold</key>
///       <defaultValue>80.0</defaultValue>
///       <type>FLOAT</type>
///     </param>
///   </rule>
/// </rules>
/// ```
///
/// Any malformed or incomplete rule fails the whole load.
pub struct RulesXmlLoader;

impl RulesXmlLoader {
    pub fn load(
        repository: &mut NewRepository<'_>,
        source_name: &str,
        content: &str,
    ) -> Result<usize, CatalogError> {
        let drafts = Self::parse(source_name, content)?;
        let count = drafts.len();
        for draft in drafts {
            draft.register(repository)?;
        }
        tracing::debug!(
            repository = repository.key(),
            source = source_name,
            rules = count,
            "loaded rule definitions"
        );
        Ok(count)
    }

    fn parse(source_name: &str, content: &str) -> Result<Vec<RuleDraft>, CatalogError> {
        let xml_error = |message: String| CatalogError::Xml {
            source_name: source_name.to_string(),
            message,
        };

        let mut reader = xml::reader(content);
        let mut drafts = Vec::new();
        let mut rule: Option<RuleDraft> = None;
        let mut param: Option<RuleParamDraft> = None;
        let mut saw_root = false;
        let mut closed_root = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| xml_error(xml::position_message(&reader, &e)))?;
            match event {
                Event::Start(e) => {
                    let name = e.name();
                    match (name.as_ref(), rule.as_mut(), param.as_mut()) {
                        (b"rules", None, None) if !saw_root => saw_root = true,
                        (b"rule", None, None) => rule = Some(RuleDraft::default()),
                        (b"param", Some(_), None) => param = Some(RuleParamDraft::default()),
                        (field, Some(_), Some(p)) => {
                            let text = xml::read_text(&mut reader, field).map_err(xml_error)?;
                            p.set(field, text).map_err(xml_error)?;
                        }
                        (field, Some(r), None) => {
                            let text = xml::read_text(&mut reader, field).map_err(xml_error)?;
                            r.set(field, text).map_err(xml_error)?;
                        }
                        (other, _, _) => {
                            return Err(xml_error(format!(
                                "unexpected element <{}>",
                                String::from_utf8_lossy(other)
                            )));
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"param" => {
                        if let (Some(r), Some(p)) = (rule.as_mut(), param.take()) {
                            r.params.push(p);
                        }
                    }
                    b"rule" => {
                        if let Some(r) = rule.take() {
                            drafts.push(r);
                        }
                    }
                    b"rules" if rule.is_none() => closed_root = true,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(xml_error("missing <rules> root element".to_string()));
        }
        if param.is_some() {
            return Err(xml_error("unterminated <param>".to_string()));
        }
        if rule.is_some() {
            return Err(xml_error("unterminated <rule>".to_string()));
        }
        if !closed_root {
            return Err(xml_error("unterminated <rules> root element".to_string()));
        }
        Ok(drafts)
    }
}

#[derive(Debug, Default)]
struct RuleDraft {
    key: Option<String>,
    name: Option<String>,
    internal_key: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    rule_type: Option<String>,
    status: Option<String>,
    tags: Vec<String>,
    params: Vec<RuleParamDraft>,
}

impl RuleDraft {
    fn set(&mut self, field: &[u8], text: String) -> Result<(), String> {
        match field {
            b"key" => self.key = Some(text),
            b"name" => self.name = Some(text),
            b"internalKey" | b"configKey" => self.internal_key = Some(text),
            b"description" => self.description = Some(text),
            b"severity" | b"priority" => self.severity = Some(text),
            b"type" => self.rule_type = Some(text),
            b"status" => self.status = Some(text),
            b"tag" => self.tags.push(text),
            other => {
                return Err(format!(
                    "unexpected element <{}> in <rule>",
                    String::from_utf8_lossy(other)
                ))
            }
        }
        Ok(())
    }

    fn register(self, repository: &mut NewRepository<'_>) -> Result<(), CatalogError> {
        let key = self
            .key
            .filter(|k| !k.is_empty())
            .ok_or(CatalogError::MissingField {
                key: "<rule>".to_string(),
                field: "key",
            })?;
        let missing = |field: &'static str| CatalogError::MissingField {
            key: key.clone(),
            field,
        };
        let invalid = |field: &'static str, value: String| CatalogError::InvalidValue {
            key: key.clone(),
            field,
            value,
        };

        let name = self.name.filter(|n| !n.is_empty()).ok_or_else(|| missing("name"))?;
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .ok_or_else(|| missing("description"))?;
        let severity = match self.severity {
            Some(s) => s.parse::<Severity>().map_err(|v| invalid("severity", v))?,
            None => Severity::default(),
        };
        let rule_type = match self.rule_type {
            Some(t) => t.parse::<RuleType>().map_err(|v| invalid("type", v))?,
            None => RuleType::default(),
        };
        let status = match self.status {
            Some(s) => s.parse::<RuleStatus>().map_err(|v| invalid("status", v))?,
            None => RuleStatus::default(),
        };
        let params = self
            .params
            .into_iter()
            .map(|p| p.finish().map_err(|(field, value)| invalid(field, value)))
            .collect::<Result<Vec<_>, _>>()?;

        let rule = repository.create_rule(key.clone())?;
        rule.set_name(name)
            .set_html_description(description)
            .set_severity(severity)
            .set_type(rule_type)
            .set_status(status)
            .add_tags(&self.tags);
        if let Some(internal_key) = self.internal_key {
            rule.set_internal_key(internal_key);
        }
        for param in params {
            rule.add_param(param);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RuleParamDraft {
    key: Option<String>,
    description: Option<String>,
    default_value: Option<String>,
    param_type: Option<String>,
}

impl RuleParamDraft {
    fn set(&mut self, field: &[u8], text: String) -> Result<(), String> {
        match field {
            b"key" => self.key = Some(text),
            b"description" => self.description = Some(text),
            b"defaultValue" => self.default_value = Some(text),
            b"type" => self.param_type = Some(text),
            other => {
                return Err(format!(
                    "unexpected element <{}> in <param>",
                    String::from_utf8_lossy(other)
                ))
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<RuleParam, (&'static str, String)> {
        let key = self
            .key
            .filter(|k| !k.is_empty())
            .ok_or(("param key", String::new()))?;
        let param_type = match self.param_type {
            Some(t) => t.parse::<ParamType>().map_err(|v| ("param type", v))?,
            None => ParamType::default(),
        };
        Ok(RuleParam {
            key,
            description: self.description.filter(|d| !d.is_empty()),
            default_value: self.default_value,
            param_type,
        })
    }
}
