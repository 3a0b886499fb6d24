//! Maps mutated classes to source files.

use mutation_core::types::Language;

use super::{InputFile, ProjectFileSystem};
use crate::model::Mutant;

#[derive(Debug, Clone, Copy)]
pub struct ResourceResolver<'a> {
    fs: &'a ProjectFileSystem,
}

impl<'a> ResourceResolver<'a> {
    pub fn new(fs: &'a ProjectFileSystem) -> Self {
        Self { fs }
    }

    /// Find the source file declaring `class_name`. Nested classes resolve to
    /// the file of their outermost class.
    pub fn resolve(&self, class_name: &str) -> Option<&'a InputFile> {
        let path = class_path(class_name);
        Language::all().iter().find_map(|language| {
            let candidate = format!("{path}.{}", language.extension());
            self.find_by_suffix(&candidate)
        })
    }

    /// Resolve the file of a mutant, falling back to its package directory
    /// joined with the reported source file name. The fallback covers Kotlin
    /// top-level functions compiled into `FooKt` classes.
    pub fn resolve_mutant(&self, mutant: &Mutant) -> Option<&'a InputFile> {
        self.resolve(mutant.mutated_class()).or_else(|| {
            let source_file = mutant.source_file().trim();
            if source_file.is_empty() {
                return None;
            }
            let class_path = class_path(mutant.mutated_class());
            let candidate = match class_path.rsplit_once('/') {
                Some((package, _)) => format!("{package}/{source_file}"),
                None => source_file.to_string(),
            };
            self.find_by_suffix(&candidate)
        })
    }

    fn find_by_suffix(&self, suffix: &str) -> Option<&'a InputFile> {
        self.fs.files().iter().find(|file| {
            let path = file.relative_path();
            path == suffix
                || path
                    .strip_suffix(suffix)
                    .is_some_and(|head| head.ends_with('/'))
        })
    }
}

fn class_path(class_name: &str) -> String {
    let outer = class_name
        .split_once('$')
        .map(|(outer, _)| outer)
        .unwrap_or(class_name);
    outer.trim().replace('.', "/")
}
