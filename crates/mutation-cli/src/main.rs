//! `mutation-analysis` command line.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use mutation_analysis::model::OperatorCatalog;
use mutation_analysis::reporters::{available_formats, create_reporter};
use mutation_analysis::rules::{
    ActiveRules, BuiltInProfilesContext, MutationProfileDefinition, MutationRulesDefinition,
    RuleSettings, RulesContext,
};
use mutation_analysis::sensors::{PitestSensor, ProjectFileSystem};
use mutation_core::config::MutationConfig;
use mutation_core::constants::DEFAULT_ISSUES_REPORT;
use mutation_core::errors::{AnalysisError, MutationErrorCode};
use mutation_core::tracing::init_tracing;
use mutation_core::types::Language;

use cli::{AnalyzeArgs, Cli, Commands, ProfileArgs, RulesArgs};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.tagged_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AnalysisError> {
    let base_dir = cli.global.base_dir.as_path();
    let config = MutationConfig::load(base_dir, Some(&cli.overrides()))?;
    let catalog = OperatorCatalog::bundled()?;
    let rules = define_rules(&config, catalog)?;
    let profiles = define_profiles(catalog)?;

    match &cli.command {
        Commands::Analyze(args) => analyze(args, base_dir, &config, catalog, &rules, &profiles),
        Commands::Rules(args) => list_rules(args, &rules),
        Commands::Profile(args) => list_profile(args, &profiles),
    }
}

fn define_rules(
    config: &MutationConfig,
    catalog: &OperatorCatalog,
) -> Result<RulesContext, AnalysisError> {
    let settings = RuleSettings::from_config(config);
    let mut context = RulesContext::new();
    for &language in Language::all() {
        MutationRulesDefinition::new(language, catalog, settings).define_repository(&mut context)?;
    }
    Ok(context)
}

fn define_profiles(catalog: &OperatorCatalog) -> Result<BuiltInProfilesContext, AnalysisError> {
    let mut context = BuiltInProfilesContext::new();
    for &language in Language::all() {
        MutationProfileDefinition::new(language, catalog).define_profile(&mut context)?;
    }
    Ok(context)
}

fn analyze(
    args: &AnalyzeArgs,
    base_dir: &Path,
    config: &MutationConfig,
    catalog: &OperatorCatalog,
    rules: &RulesContext,
    profiles: &BuiltInProfilesContext,
) -> Result<(), AnalysisError> {
    let reporter = create_reporter(&args.format).ok_or_else(|| AnalysisError::Reporter {
        format: args.format.clone(),
        message: format!("unknown format, expected one of {}", available_formats().join(", ")),
    })?;

    let mut active = Vec::new();
    for profile in profiles.profiles() {
        let resolved = ActiveRules::from_profile(profile, rules, &config.rules)?;
        active.extend(resolved.iter().cloned());
    }
    let active_rules = ActiveRules::new(active);

    let fs = ProjectFileSystem::scan(base_dir);
    let report = PitestSensor::new(config, &fs, catalog, &active_rules).execute()?;

    let content = reporter
        .generate(&report, rules)
        .map_err(|message| AnalysisError::Reporter {
            format: reporter.name().to_string(),
            message,
        })?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| base_dir.join(DEFAULT_ISSUES_REPORT));
    write_output(&output, &content)?;

    tracing::info!(
        output = %output.display(),
        format = reporter.name(),
        issues = report.issue_count(),
        "analysis report written"
    );
    println!(
        "{} mutants, {} issues -> {}",
        report.mutant_count,
        report.issue_count(),
        output.display()
    );
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<(), AnalysisError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AnalysisError::Output {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }
    std::fs::write(path, content).map_err(|e| AnalysisError::Output {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn list_rules(args: &RulesArgs, rules: &RulesContext) -> Result<(), AnalysisError> {
    let key = mutation_analysis::rules::repository_key(args.language);
    let repository = rules
        .repository(&key)
        .ok_or_else(|| AnalysisError::UnsupportedLanguage(args.language.to_string()))?;

    if args.json {
        let json = serde_json::to_string_pretty(repository).map_err(|e| AnalysisError::Reporter {
            format: "json".to_string(),
            message: e.to_string(),
        })?;
        println!("{json}");
        return Ok(());
    }

    println!("{} ({}), {} rules", repository.name(), repository.key(), repository.len());
    for rule in repository.rules() {
        println!(
            "  {:<60} {:<10} {:<10} {:<8} {}",
            rule.key(),
            rule.rule_type().as_str(),
            rule.status().as_str(),
            rule.severity().as_str(),
            rule.name()
        );
    }
    Ok(())
}

fn list_profile(args: &ProfileArgs, profiles: &BuiltInProfilesContext) -> Result<(), AnalysisError> {
    let profile = profiles
        .profiles_for(args.language)
        .next()
        .ok_or_else(|| AnalysisError::UnsupportedLanguage(args.language.to_string()))?;

    if args.json {
        let json = serde_json::to_string_pretty(profile).map_err(|e| AnalysisError::Reporter {
            format: "json".to_string(),
            message: e.to_string(),
        })?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{} ({}), {} activations",
        profile.name(),
        profile.language(),
        profile.activations().len()
    );
    for activation in profile.activations() {
        println!("  {}:{}", activation.repository_key(), activation.rule_key());
    }
    Ok(())
}
