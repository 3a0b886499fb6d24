//! Collects mutants of the current module and, for the project-wide
//! metrics, of every module of the project.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use mutation_core::config::MutationConfig;
use mutation_core::errors::ReportError;
use quick_xml::events::Event;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::model::{Mutant, OperatorCatalog};
use crate::{report, xml};

const POM_XML: &str = "pom.xml";
const SETTINGS_GRADLE: &str = "settings.gradle";
const SETTINGS_GRADLE_KTS: &str = "settings.gradle.kts";

/// Reads the PIT reports relevant to one module.
#[derive(Debug, Clone)]
pub struct ReportCollector<'a> {
    catalog: &'a OperatorCatalog,
    report_directory: String,
    project_root: Option<PathBuf>,
    experimental: bool,
}

impl<'a> ReportCollector<'a> {
    pub fn new(config: &MutationConfig, catalog: &'a OperatorCatalog) -> Self {
        Self {
            catalog,
            report_directory: config.sensor.effective_report_directory().to_string(),
            project_root: config.sensor.project_root.as_ref().map(PathBuf::from),
            experimental: config.features.experimental_enabled(),
        }
    }

    /// Mutants of the report below `{base_dir}/{report_directory}`.
    pub fn collect_local_mutants(&self, base_dir: &Path) -> Result<Vec<Mutant>, ReportError> {
        report::read_mutants(&base_dir.join(&self.report_directory), self.catalog)
    }

    /// Mutants of every module of the project `base_dir` belongs to. Only
    /// collected with experimental features enabled; otherwise empty.
    pub fn collect_global_mutants(&self, base_dir: &Path) -> Vec<Mutant> {
        if !self.experimental {
            return Vec::new();
        }
        let root = self
            .project_root
            .clone()
            .unwrap_or_else(|| find_project_root(base_dir));
        tracing::info!(root = %root.display(), "using project root");

        let mut visited = FxHashSet::default();
        let mut modules = Vec::new();
        collect_module_roots(&root, &mut visited, &mut modules);

        modules
            .iter()
            .flat_map(|module| {
                let reports = module.join(&self.report_directory);
                report::read_mutants(&reports, self.catalog).unwrap_or_else(|e| {
                    tracing::debug!(reports = %reports.display(), error = %e, "could not read report");
                    Vec::new()
                })
            })
            .collect()
    }
}

/// Root of the multi-module project `module` belongs to: follow the Maven
/// parent's `relativePath`, then plain parent directories, as long as the
/// parent lists the child as one of its modules.
///
/// The search runs on the canonical path so that `.` and `..` components
/// can still walk up; a path that cannot be resolved is searched as given.
pub fn find_project_root(module: &Path) -> PathBuf {
    let module = &module
        .canonicalize()
        .unwrap_or_else(|_| module.to_path_buf());
    tracing::debug!(module = %module.display(), "searching project root");
    if let Some(parent) = pom_parent_path(module) {
        if is_multi_module_parent(&parent, module) {
            return find_project_root(&parent);
        }
    }
    match module.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && is_multi_module_parent(parent, module) => {
            find_project_root(parent)
        }
        _ => module.to_path_buf(),
    }
}

/// Module directories declared by the Maven pom and the Gradle settings of
/// `parent`, deduplicated and sorted.
pub fn module_paths(parent: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    if let Ok(pom) = std::fs::read_to_string(parent.join(POM_XML)) {
        paths.extend(pom_modules(&pom).into_iter().map(|m| parent.join(m)));
    }
    for settings in [SETTINGS_GRADLE, SETTINGS_GRADLE_KTS] {
        if let Ok(content) = std::fs::read_to_string(parent.join(settings)) {
            paths.extend(gradle_includes(&content).into_iter().map(|m| parent.join(m)));
        }
    }
    paths.sort();
    paths.dedup();
    paths
}

fn collect_module_roots(root: &Path, visited: &mut FxHashSet<PathBuf>, modules: &mut Vec<PathBuf>) {
    let key = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    if !visited.insert(key) {
        return;
    }
    modules.push(root.to_path_buf());
    for module in module_paths(root) {
        collect_module_roots(&module, visited, modules);
    }
}

fn is_multi_module_parent(parent: &Path, child: &Path) -> bool {
    module_paths(parent)
        .iter()
        .any(|module| is_same_path(module, child))
}

fn is_same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn pom_parent_path(module: &Path) -> Option<PathBuf> {
    let pom = std::fs::read_to_string(module.join(POM_XML)).ok()?;
    let relative = pom_parent_relative_path(&pom)?;
    let path = module.join(relative);
    // relativePath may name the parent pom itself
    if path.file_name().is_some_and(|name| name == POM_XML) {
        path.parent().map(Path::to_path_buf)
    } else {
        Some(path)
    }
}

/// `<project><parent><relativePath>` of a pom, if present and non-empty.
pub fn pom_parent_relative_path(pom: &str) -> Option<String> {
    let mut reader = xml::reader(pom);
    let mut path: Vec<Vec<u8>> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if name.as_ref() == b"relativePath"
                    && path.len() == 2
                    && path[0] == b"project"
                    && path[1] == b"parent"
                {
                    let text = xml::read_text(&mut reader, e.name().as_ref()).ok()?;
                    return (!text.is_empty()).then_some(text);
                }
                path.push(name.as_ref().to_vec());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "could not parse pom");
                return None;
            }
        }
    }
}

/// Every `<module>` of a pom, profile-activated modules included.
pub fn pom_modules(pom: &str) -> Vec<String> {
    let mut reader = xml::reader(pom);
    let mut modules = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"module" => {
                match xml::read_text(&mut reader, e.name().as_ref()) {
                    Ok(module) if !module.is_empty() => modules.push(module),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(error = %e, "could not read pom module");
                        break;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "could not parse pom");
                break;
            }
        }
    }
    modules
}

/// Module directories of the `include` statements of a Gradle settings file.
/// `include ':app', ':lib:core'` yields `app` and `lib/core`.
pub fn gradle_includes(settings: &str) -> Vec<String> {
    static INCLUDE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(include) = INCLUDE
        .get_or_init(|| Regex::new(r#"(?i)^\s*include(?:\s+|\s*\()\s*(.+?)\s*\)?\s*$"#).ok())
        .as_ref()
    else {
        return Vec::new();
    };

    settings
        .lines()
        .filter_map(|line| include.captures(line))
        .filter_map(|caps| caps.get(1))
        .flat_map(|list| list.as_str().split(','))
        .map(|module| {
            module
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .trim_start_matches(':')
                .replace(':', "/")
        })
        .filter(|module| !module.is_empty())
        .collect()
}
