//! The PIT sensor: reads reports, writes measures and raises issues.

use std::collections::BTreeMap;

use mutation_core::config::MutationConfig;
use mutation_core::errors::AnalysisError;
use mutation_core::tracing::fields;
use mutation_core::types::Language;
use serde::Serialize;

use super::{
    InputFile, ProjectFileSystem, ReportCollector, ResourceResolver, RulesProcessor,
    SensorContext, SourceMetricsWriter, TestMetricsWriter,
};
use crate::metrics::{compute_measures, default_computers, ComponentTree, ResourceMutationMetrics};
use crate::model::{Mutant, OperatorCatalog};
use crate::rules::ActiveRules;

/// Outcome of a sensor run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReport {
    pub languages: Vec<Language>,
    pub mutant_count: usize,
    pub global_mutant_count: usize,
    #[serde(flatten)]
    pub context: SensorContext,
}

impl SensorReport {
    pub fn issue_count(&self) -> usize {
        self.context.issues().len()
    }
}

#[derive(Debug)]
pub struct PitestSensor<'a> {
    config: &'a MutationConfig,
    fs: &'a ProjectFileSystem,
    catalog: &'a OperatorCatalog,
    active_rules: &'a ActiveRules,
}

impl<'a> PitestSensor<'a> {
    pub fn new(
        config: &'a MutationConfig,
        fs: &'a ProjectFileSystem,
        catalog: &'a OperatorCatalog,
        active_rules: &'a ActiveRules,
    ) -> Self {
        Self {
            config,
            fs,
            catalog,
            active_rules,
        }
    }

    /// Languages that are enabled and have source files.
    pub fn languages(&self) -> Vec<Language> {
        Language::all()
            .iter()
            .copied()
            .filter(|&l| self.config.sensor.is_enabled(l) && self.fs.has_files(l))
            .collect()
    }

    pub fn execute(&self) -> Result<SensorReport, AnalysisError> {
        let languages = self.languages();
        if languages.is_empty() {
            tracing::info!("PIT sensor disabled: no enabled language with source files");
            return Ok(SensorReport::default());
        }

        let base_dir = self.fs.base_dir();
        let span = tracing::info_span!(
            "pitest_sensor",
            base_dir = %base_dir.display(),
            mutant_count = tracing::field::Empty,
            global_mutant_count = tracing::field::Empty,
            resource_count = tracing::field::Empty,
            issue_count = tracing::field::Empty,
        );
        let _entered = span.enter();
        tracing::info!(languages = ?languages, "PIT sensor running");

        let collector = ReportCollector::new(self.config, self.catalog);
        let global_mutants = collector.collect_global_mutants(base_dir);
        let local_mutants = collector.collect_local_mutants(base_dir)?;
        span.record(fields::GLOBAL_MUTANT_COUNT, global_mutants.len());
        span.record(fields::MUTANT_COUNT, local_mutants.len());

        let resolver = ResourceResolver::new(self.fs);
        let metrics = collect_metrics(&resolver, &languages, &local_mutants);
        span.record(fields::RESOURCE_COUNT, metrics.len());

        let mut context = SensorContext::new();
        let processor = RulesProcessor::new(self.config, self.active_rules);
        for &language in &languages {
            processor.process_rules(&metrics, &mut context, language);
        }

        SourceMetricsWriter::new().write_metrics(&metrics, &mut context, &global_mutants);
        if self.config.features.experimental_enabled() {
            TestMetricsWriter::new(resolver).write_metrics(&metrics, &mut context, &global_mutants);
        }

        let files: Vec<&InputFile> = self
            .fs
            .files()
            .iter()
            .filter(|f| languages.contains(&f.language()))
            .collect();
        let tree = ComponentTree::from_files(files);
        compute_measures(
            &tree,
            context.measures_mut(),
            &default_computers(&self.config.features),
        );

        span.record(fields::ISSUE_COUNT, context.issues().len());
        tracing::info!(issues = context.issues().len(), "PIT sensor done");
        Ok(SensorReport {
            languages,
            mutant_count: local_mutants.len(),
            global_mutant_count: global_mutants.len(),
            context,
        })
    }
}

/// Group mutants by the source file of their class. Mutants whose class
/// resolves to no file of an analyzed language are dropped.
fn collect_metrics(
    resolver: &ResourceResolver<'_>,
    languages: &[Language],
    mutants: &[Mutant],
) -> Vec<ResourceMutationMetrics> {
    let mut by_file: BTreeMap<&str, ResourceMutationMetrics> = BTreeMap::new();
    for mutant in mutants {
        let Some(file) = resolver
            .resolve_mutant(mutant)
            .filter(|f| languages.contains(&f.language()))
        else {
            tracing::debug!(class = mutant.mutated_class(), "no source file for mutated class");
            continue;
        };
        by_file
            .entry(file.relative_path())
            .or_insert_with(|| ResourceMutationMetrics::new(file.clone()))
            .add_mutant(mutant.clone());
    }
    by_file.into_values().collect()
}
