//! Output format tests for the issue reporters.

use mutation_analysis::metrics::keys;
use mutation_analysis::model::OperatorCatalog;
use mutation_analysis::reporters::{available_formats, create_reporter};
use mutation_analysis::rules::*;
use mutation_analysis::sensors::{Issue, SensorContext, SensorReport};
use mutation_core::config::MutationConfig;
use mutation_core::types::Language;
use serde_json::Value;

const FILE: &str = "src/main/java/com/example/Calculator.java";

fn rules() -> RulesContext {
    let catalog = OperatorCatalog::bundled().unwrap();
    let mut context = RulesContext::new();
    MutationRulesDefinition::new(
        Language::Java,
        catalog,
        RuleSettings::from_config(&MutationConfig::default()),
    )
    .define_repository(&mut context)
    .unwrap();
    context
}

fn report(rules: &RulesContext) -> SensorReport {
    let repository = rules.repository("mutation.analysis.java").unwrap();
    let conditionals = ActiveRule::from_rule(repository.rule("mutant.REMOVE_CONDITIONALS").unwrap());
    let coverage = ActiveRule::from_rule(repository.rule("mutant.coverage").unwrap());

    let mut context = SensorContext::new();
    context.add_issue(
        Issue::new(&conditionals, FILE, "removed conditional")
            .at_line(30)
            .with_gap(1.0),
    );
    context.add_issue(
        Issue::new(&conditionals, FILE, "removed another conditional")
            .at_line(31)
            .with_gap(1.0),
    );
    context.add_issue(Issue::new(&coverage, FILE, "2 more mutants need to be killed").with_gap(2.0));
    context.add_line_hits(FILE, 12, 1);
    context.measures_mut().save(FILE, keys::MUTATIONS_TOTAL, 3_i64);

    SensorReport {
        languages: vec![Language::Java],
        mutant_count: 3,
        global_mutant_count: 0,
        context,
    }
}

fn generate(format: &str) -> Value {
    let rules = rules();
    let output = create_reporter(format)
        .unwrap()
        .generate(&report(&rules), &rules)
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn formats() {
    assert_eq!(available_formats(), ["sonarqube", "json"]);
    for format in available_formats() {
        assert_eq!(create_reporter(format).unwrap().name(), *format);
    }
    assert!(create_reporter("xml").is_none());
}

#[test]
fn sonarqube_generic_issues() {
    let output = generate("sonarqube");

    let rules = output["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 2, "one entry per distinct rule");
    assert_eq!(rules[0]["id"], "mutant.REMOVE_CONDITIONALS");
    assert_eq!(rules[0]["name"], "Remove Conditionals Mutator");
    assert_eq!(rules[0]["engineId"], "mutation-analysis");
    assert_eq!(rules[0]["type"], "BUG");
    assert_eq!(rules[0]["impacts"][0]["softwareQuality"], "RELIABILITY");
    assert_eq!(rules[1]["type"], "CODE_SMELL");
    assert_eq!(rules[1]["impacts"][0]["softwareQuality"], "MAINTAINABILITY");

    let issues = output["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 3);
    let first = &issues[0];
    assert_eq!(first["ruleId"], "mutant.REMOVE_CONDITIONALS");
    assert_eq!(first["primaryLocation"]["filePath"], FILE);
    assert_eq!(first["primaryLocation"]["textRange"]["startLine"], 30);
    assert_eq!(first["effortMinutes"], 12);
    // project-level coverage issue has no text range
    assert!(issues[2]["primaryLocation"].get("textRange").is_none());
    assert_eq!(issues[2]["effortMinutes"], 17);
}

#[test]
fn json_report_summary() {
    let output = generate("json");

    assert_eq!(output["languages"][0], "java");
    assert_eq!(output["summary"]["mutants"], 3);
    assert_eq!(output["summary"]["globalMutants"], 0);
    assert_eq!(output["summary"]["issues"], 3);
    assert_eq!(output["measures"][FILE][keys::MUTATIONS_TOTAL], 3);
    assert_eq!(output["lineHits"][FILE]["12"], 1);

    let issue = &output["issues"][0];
    assert_eq!(issue["repositoryKey"], "mutation.analysis.java");
    assert_eq!(issue["type"], "BUG");
    assert_eq!(issue["line"], 30);
    assert_eq!(issue["effortMinutes"], 12);
    assert!(output["issues"][2].get("line").is_none());
}
