use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mutation_core::config::CliOverrides;
use mutation_core::types::Language;

/// `mutation-analysis`: turns PIT mutation reports into SonarQube generic
/// issues and mutation metrics, and lists the registered rule catalog.
#[derive(Parser, Debug)]
#[command(name = "mutation-analysis", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Module base directory; also where `mutation-analysis.toml` is read from.
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Host-style property, e.g. `-D dc5.mutationAnalysis.effort.mutantKill=10min`. Repeatable.
    #[arg(short = 'D', global = true, value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Effort to kill a single mutant, e.g. `5min` or `1h 30min`.
    #[arg(long, global = true, value_name = "DURATION")]
    pub mutant_kill: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze the PIT report of a module and write an issue report.
    Analyze(AnalyzeArgs),

    /// List the rule repository of a language.
    Rules(RulesArgs),

    /// List the built-in quality profile of a language.
    Profile(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// PIT report directory (or report file), relative to the base directory.
    #[arg(long, value_name = "DIR")]
    pub reports: Option<String>,

    /// Output file. Defaults to `issuesReport.json` in the base directory.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "sonarqube")]
    pub format: String,

    /// Restrict the analysis to these languages. Repeatable.
    #[arg(long = "language", value_name = "LANG")]
    pub languages: Vec<Language>,

    /// Enable experimental metrics and rules.
    #[arg(long)]
    pub experimental: bool,

    /// Coverage threshold of the `mutant.coverage` rule, in percent.
    #[arg(long, value_name = "PERCENT")]
    pub coverage_threshold: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[arg(long, default_value = "java")]
    pub language: Language,

    /// Print the repository as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value = "java")]
    pub language: Language,

    /// Print the profile as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Configuration overrides taken from the command line.
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            mutant_kill: self.global.mutant_kill.clone(),
            properties: self.global.properties.clone(),
            ..CliOverrides::default()
        };
        if let Commands::Analyze(args) = &self.command {
            overrides.report_directory = args.reports.clone();
            overrides.experimental = args.experimental.then_some(true);
            overrides.coverage_threshold = args.coverage_threshold;
            if !args.languages.is_empty() {
                overrides.java_enabled = Some(args.languages.contains(&Language::Java));
                overrides.kotlin_enabled = Some(args.languages.contains(&Language::Kotlin));
            }
        }
        overrides
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty property key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_properties() {
        assert_eq!(
            parse_property("dc5.mutationAnalysis.effort.mutantKill = 10min"),
            Ok((
                "dc5.mutationAnalysis.effort.mutantKill".to_string(),
                "10min".to_string()
            ))
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }

    #[test]
    fn language_flags_restrict_enabled_languages() {
        let cli = Cli::parse_from([
            "mutation-analysis",
            "analyze",
            "--language",
            "kotlin",
            "--experimental",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.java_enabled, Some(false));
        assert_eq!(overrides.kotlin_enabled, Some(true));
        assert_eq!(overrides.experimental, Some(true));
    }

    #[test]
    fn global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "mutation-analysis",
            "rules",
            "--json",
            "-D",
            "a.b=c",
            "--base-dir",
            "/tmp/x",
        ]);
        assert_eq!(cli.global.base_dir, PathBuf::from("/tmp/x"));
        assert_eq!(cli.overrides().properties, vec![("a.b".to_string(), "c".to_string())]);
        assert!(matches!(cli.command, Commands::Rules(RulesArgs { json: true, .. })));
    }
}
