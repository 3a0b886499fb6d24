//! Rule repository, XML loader, built-in profile and active rule tests.

use mutation_analysis::model::OperatorCatalog;
use mutation_analysis::rules::*;
use mutation_core::config::{MutationConfig, RulesConfig};
use mutation_core::errors::CatalogError;
use mutation_core::types::{Effort, Language};

fn catalog() -> &'static OperatorCatalog {
    OperatorCatalog::bundled().unwrap()
}

fn settings(code_smell_variants: bool) -> RuleSettings {
    RuleSettings {
        effort_to_kill_mutant: Effort::from_minutes(5),
        code_smell_variants,
    }
}

fn define(language: Language, code_smell_variants: bool) -> RulesContext {
    let mut context = RulesContext::new();
    MutationRulesDefinition::new(language, catalog(), settings(code_smell_variants))
        .define_repository(&mut context)
        .unwrap();
    context
}

fn count<F: Fn(&Rule) -> bool>(repository: &Repository, f: F) -> usize {
    repository.rules().iter().filter(|r| f(r)).count()
}

// ─── Repository definition ──────────────────────────────────────────────

#[test]
fn java_repository_has_50_rules() {
    let context = define(Language::Java, true);
    let repository = context.repository("mutation.analysis.java").unwrap();

    assert_eq!(repository.len(), 50);
    assert_eq!(repository.name(), "MutationAnalysis");
    assert_eq!(repository.language(), Language::Java);
    assert_eq!(count(repository, |r| r.rule_type() == RuleType::Bug), 26);
    assert_eq!(count(repository, |r| r.rule_type() == RuleType::CodeSmell), 24);
    assert_eq!(count(repository, |r| r.status() == RuleStatus::Beta), 12);
    assert_eq!(count(repository, |r| r.status() == RuleStatus::Deprecated), 3);
    assert_eq!(count(repository, |r| r.status() == RuleStatus::Ready), 35);
    assert_eq!(count(repository, |r| r.activated_by_default()), 34);
}

#[test]
fn without_variants_has_27_rules_and_no_code_smell_suffixed_keys() {
    let context = define(Language::Java, false);
    let repository = context.repository("mutation.analysis.java").unwrap();

    assert_eq!(repository.len(), 27);
    assert_eq!(count(repository, |r| r.key().ends_with("_CODE_SMELL")), 0);
    assert_eq!(count(repository, |r| r.rule_type() == RuleType::Bug), 26);
    // mutant.coverage from rules.xml stays a code smell
    assert_eq!(count(repository, |r| r.rule_type() == RuleType::CodeSmell), 1);
    assert_eq!(
        repository.rule("mutant.coverage").unwrap().rule_type(),
        RuleType::CodeSmell
    );
    assert_eq!(count(repository, |r| r.status() == RuleStatus::Beta), 6);
    assert_eq!(count(repository, |r| r.status() == RuleStatus::Deprecated), 3);
}

#[test]
fn every_rule_has_remediation_gap_and_description() {
    let context = define(Language::Java, true);
    let repository = context.repository("mutation.analysis.java").unwrap();
    let expected = DebtRemediationFunction::linear_with_offset(
        Effort::from_minutes(5),
        Effort::from_minutes(7),
    );
    for rule in repository.rules() {
        assert_eq!(rule.debt_remediation_function(), &expected, "{}", rule.key());
        assert_eq!(rule.gap_description(), "Effort to kill the mutant(s)");
        assert!(!rule.html_description().trim().is_empty(), "{}", rule.key());
        assert!(!rule.name().is_empty());
        assert_eq!(rule.repository_key(), "mutation.analysis.java");
    }
}

#[test]
fn operator_rules_carry_operator_metadata() {
    let context = define(Language::Java, true);
    let repository = context.repository("mutation.analysis.java").unwrap();

    let bug = repository.rule("mutant.NEGATE_CONDITIONALS").unwrap();
    assert_eq!(bug.rule_type(), RuleType::Bug);
    assert_eq!(bug.status(), RuleStatus::Ready);
    assert!(bug.activated_by_default());
    assert!(bug.tags().iter().any(|t| t == "pitest"));

    let smell = repository.rule("mutant.NEGATE_CONDITIONALS_CODE_SMELL").unwrap();
    assert_eq!(smell.rule_type(), RuleType::CodeSmell);
    assert_eq!(smell.html_description(), bug.html_description());

    let experimental = repository.rule("mutant.EXPERIMENTAL_SWITCH").unwrap();
    assert_eq!(experimental.status(), RuleStatus::Beta);
    assert!(!experimental.activated_by_default());
}

#[test]
fn generic_rules_come_from_rules_xml() {
    let context = define(Language::Java, true);
    let repository = context.repository("mutation.analysis.java").unwrap();

    for key in ["mutant.survived", "mutant.uncovered", "mutant.unknownStatus"] {
        let rule = repository.rule(key).unwrap();
        assert_eq!(rule.status(), RuleStatus::Deprecated, "{key}");
        assert_eq!(rule.rule_type(), RuleType::Bug, "{key}");
    }

    let coverage = repository.rule("mutant.coverage").unwrap();
    assert_eq!(coverage.rule_type(), RuleType::CodeSmell);
    assert_eq!(coverage.severity(), Severity::Major);
    let param = coverage.param("mutant.coverage.threshold").unwrap();
    assert_eq!(param.default_value.as_deref(), Some("80.0"));
    assert_eq!(param.param_type, ParamType::Float);
}

#[test]
fn remediation_effort_scales_with_gap() {
    let context = define(Language::Java, true);
    let rule = context
        .repository("mutation.analysis.java")
        .unwrap()
        .rule("mutant.MATH")
        .unwrap();
    let function = rule.debt_remediation_function();
    assert_eq!(function.effort(Some(2.0)).minutes(), 17);
    assert_eq!(function.effort(None).minutes(), 12);
}

#[test]
fn effort_setting_follows_config() {
    let config = MutationConfig::from_toml("[effort]\nmutant_kill = \"1h\"\n").unwrap();
    let mut context = RulesContext::new();
    MutationRulesDefinition::new(Language::Java, catalog(), RuleSettings::from_config(&config))
        .define_repository(&mut context)
        .unwrap();
    let rule = context
        .repository("mutation.analysis.java")
        .unwrap()
        .rule("mutant.MATH")
        .unwrap();
    assert_eq!(
        rule.debt_remediation_function().effort(Some(1.0)).minutes(),
        67
    );
}

#[test]
fn kotlin_repository_is_independent() {
    let mut context = RulesContext::new();
    for &language in Language::all() {
        MutationRulesDefinition::new(language, catalog(), settings(true))
            .define(&mut context)
            .unwrap();
    }
    let kotlin = context.repository("mutation.analysis.kotlin").unwrap();
    assert_eq!(kotlin.len(), 50);
    assert_eq!(kotlin.language(), Language::Kotlin);
    assert_eq!(context.repositories().count(), 2);
}

#[test]
fn defining_a_repository_twice_fails() {
    let mut context = define(Language::Java, true);
    let err = MutationRulesDefinition::new(Language::Java, catalog(), settings(true))
        .define_repository(&mut context)
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateRepository { .. }));
}

#[test]
fn rule_without_remediation_or_gap_is_rejected() {
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    repository
        .create_rule("x")
        .unwrap()
        .set_name("X")
        .set_html_description("<p>d</p>");
    let err = repository.done().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::MissingField { ref key, field: "debt remediation function" } if key == "x"
    ));

    let mut repository = context.create_repository("r", Language::Java).unwrap();
    repository
        .create_rule("x")
        .unwrap()
        .set_name("X")
        .set_html_description("<p>d</p>")
        .set_debt_remediation_function(DebtRemediationFunction::constant_per_issue(
            Effort::from_minutes(10),
        ));
    let err = repository.done().unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { field: "gap description", .. }));
    assert!(context.repository("r").is_none());
}

// ─── XML loader ─────────────────────────────────────────────────────────

#[test]
fn malformed_rules_xml_fails_and_registers_nothing() {
    let mut context = RulesContext::new();
    let err = MutationRulesDefinition::new(Language::Java, catalog(), settings(true))
        .with_rules_xml("bad.xml", "<rules><rule><key>a</key></rules>")
        .define_repository(&mut context)
        .unwrap_err();
    assert!(matches!(err, CatalogError::Xml { ref source_name, .. } if source_name == "bad.xml"));
    assert!(context.repository("mutation.analysis.java").is_none());
}

#[test]
fn rule_without_name_fails() {
    let xml = r#"<rules><rule>
        <key>x</key>
        <description>d</description>
    </rule></rules>"#;
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    let err = RulesXmlLoader::load(&mut repository, "x.xml", xml).unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { field: "name", .. }));
}

#[test]
fn invalid_enum_values_fail() {
    let xml = r#"<rules><rule>
        <key>x</key><name>X</name><description>d</description>
        <severity>HUGE</severity>
    </rule></rules>"#;
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    let err = RulesXmlLoader::load(&mut repository, "x.xml", xml).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidValue { field: "severity", .. }));
}

#[test]
fn duplicate_rule_keys_fail() {
    let rule = "<rule><key>x</key><name>X</name><description>d</description></rule>";
    let xml = format!("<rules>{rule}{rule}</rules>");
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    let err = RulesXmlLoader::load(&mut repository, "x.xml", &xml).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateRule { .. }));
}

#[test]
fn missing_root_fails() {
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    assert!(matches!(
        RulesXmlLoader::load(&mut repository, "x.xml", ""),
        Err(CatalogError::Xml { .. })
    ));
}

#[test]
fn truncated_rules_xml_fails() {
    let rule = "<rule><key>a</key><name>A</name><description>d</description></rule>";
    let open_rule = "<rule><key>b</key><name>B</name><description>d</description>";
    let open_param = "<rule><key>b</key><name>B</name><description>d</description><param><key>p</key>";
    for xml in [
        format!("<rules>{rule}{open_rule}"),
        format!("<rules>{rule}{open_param}"),
        format!("<rules>{rule}"),
    ] {
        let mut context = RulesContext::new();
        let mut repository = context.create_repository("r", Language::Java).unwrap();
        let err = RulesXmlLoader::load(&mut repository, "cut.xml", &xml).unwrap_err();
        assert!(matches!(err, CatalogError::Xml { .. }), "{xml}: {err:?}");
        assert_eq!(repository.rule_count(), 0, "{xml}");
    }
}

#[test]
fn loader_reads_optional_fields() {
    let xml = r#"<rules><rule>
        <key>x</key><name>X</name>
        <internalKey>X_INTERNAL</internalKey>
        <description><![CDATA[<p>x &amp; y</p>]]></description>
        <type>VULNERABILITY</type>
        <status>BETA</status>
        <tag>b</tag><tag>a</tag>
        <param><key>p</key><description>P</description><defaultValue>3</defaultValue><type>INTEGER</type></param>
    </rule></rules>"#;
    let mut context = RulesContext::new();
    let mut repository = context.create_repository("r", Language::Java).unwrap();
    assert_eq!(RulesXmlLoader::load(&mut repository, "x.xml", xml).unwrap(), 1);
    for rule in repository.rules_mut() {
        rule.set_debt_remediation_function(DebtRemediationFunction::linear(Effort::from_minutes(5)))
            .set_gap_description("gap");
    }
    let repository = repository.done().unwrap();
    let rule = repository.rule("x").unwrap();
    assert_eq!(rule.internal_key(), Some("X_INTERNAL"));
    assert_eq!(rule.html_description(), "<p>x &amp; y</p>");
    assert_eq!(rule.rule_type(), RuleType::Vulnerability);
    assert_eq!(rule.status(), RuleStatus::Beta);
    assert_eq!(rule.severity(), Severity::Major);
    assert_eq!(rule.tags(), ["a", "b"]);
    assert_eq!(rule.param("p").unwrap().param_type, ParamType::Integer);
}

// ─── Built-in profile ───────────────────────────────────────────────────

fn profiles() -> BuiltInProfilesContext {
    let mut context = BuiltInProfilesContext::new();
    for &language in Language::all() {
        MutationProfileDefinition::new(language, catalog())
            .define(&mut context)
            .unwrap();
    }
    context
}

#[test]
fn profile_activates_23_operator_rules() {
    let context = profiles();
    let profile = context.profile(Language::Java, "Mutation Analysis").unwrap();
    assert_eq!(profile.activations().len(), 23);
    assert_eq!(profile.rules_for_language().count(), 23);
    assert_eq!(profile.rules_for_repository("mutation.analysis.java").count(), 23);
    assert_eq!(profile.rules_for_repository("mutation.analysis.kotlin").count(), 0);
    assert!(profile
        .activations()
        .iter()
        .all(|a| a.rule_key().starts_with("mutant.") && !a.rule_key().ends_with("_CODE_SMELL")));

    let kotlin = context.profile(Language::Kotlin, "Mutation Analysis").unwrap();
    assert_eq!(kotlin.rules_for_language().count(), 23);
}

#[test]
fn profile_validates_against_both_catalogs() {
    let context = profiles();
    let profile = context.profile(Language::Java, "Mutation Analysis").unwrap();
    profile.validate_against(&define(Language::Java, true)).unwrap();
    profile.validate_against(&define(Language::Java, false)).unwrap();

    let err = profile.validate_against(&RulesContext::new()).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownRepository { .. }));
}

#[test]
fn duplicate_profile_and_activation_fail() {
    let mut context = profiles();
    let err = MutationProfileDefinition::new(Language::Java, catalog())
        .define(&mut context)
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateProfile { .. }));

    let mut profile = context.create_profile("Other", Language::Java).unwrap();
    profile.activate_rule("mutation.analysis.java", "mutant.MATH").unwrap();
    let err = profile
        .activate_rule("mutation.analysis.java", "mutant.MATH")
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateActivation { .. }));
}

#[test]
fn unknown_rule_in_profile_fails_validation() {
    let mut context = BuiltInProfilesContext::new();
    let mut profile = context.create_profile("Custom", Language::Java).unwrap();
    profile.activate_rule("mutation.analysis.java", "mutant.NOPE").unwrap();
    let profile = profile.done();
    let err = profile
        .validate_against(&define(Language::Java, true))
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnknownRule { ref key, .. } if key == "mutant.NOPE"));
}

// ─── Active rules ───────────────────────────────────────────────────────

#[test]
fn active_rules_resolve_from_profile() {
    let rules = define(Language::Java, true);
    let context = profiles();
    let profile = context.profile(Language::Java, "Mutation Analysis").unwrap();
    let active = ActiveRules::from_profile(profile, &rules, &RulesConfig::default()).unwrap();

    assert_eq!(active.len(), 23);
    assert_eq!(active.find_by_repository("mutation.analysis.java").count(), 23);
    let math = active.find("mutation.analysis.java", "mutant.MATH").unwrap();
    assert_eq!(math.severity(), Severity::Major);
    assert_eq!(math.rule().name(), "Math Mutator");
    assert!(active.find("mutation.analysis.java", "mutant.coverage").is_none());
}

#[test]
fn extra_active_rules_and_threshold_override() {
    let rules = define(Language::Java, true);
    let context = profiles();
    let profile = context.profile(Language::Java, "Mutation Analysis").unwrap();
    let config = RulesConfig {
        extra_active: vec!["mutant.coverage".to_string(), "mutant.MATH".to_string()],
        coverage_threshold: Some(65.0),
        ..RulesConfig::default()
    };
    let active = ActiveRules::from_profile(profile, &rules, &config).unwrap();

    assert_eq!(active.len(), 24);
    let coverage = active.find("mutation.analysis.java", "mutant.coverage").unwrap();
    assert_eq!(coverage.param("mutant.coverage.threshold"), Some("65"));
}

#[test]
fn unknown_extra_active_rule_fails() {
    let rules = define(Language::Java, true);
    let context = profiles();
    let profile = context.profile(Language::Java, "Mutation Analysis").unwrap();
    let config = RulesConfig {
        extra_active: vec!["mutant.NOPE".to_string()],
        ..RulesConfig::default()
    };
    assert!(matches!(
        ActiveRules::from_profile(profile, &rules, &config),
        Err(CatalogError::UnknownRule { .. })
    ));
}
