//! Source files of the analyzed module.

use std::path::{Path, PathBuf};

use mutation_core::types::Language;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Main,
    Test,
}

/// A source file, addressed by its path relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    relative_path: String,
    language: Language,
    kind: FileKind,
    lines: u32,
    code_lines: u32,
}

impl InputFile {
    pub fn new(
        relative_path: impl Into<String>,
        language: Language,
        kind: FileKind,
        lines: u32,
        code_lines: u32,
    ) -> Self {
        Self {
            relative_path: relative_path.into().replace('\\', "/"),
            language,
            kind,
            lines,
            code_lines,
        }
    }

    /// Path relative to the base directory, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn is_test(&self) -> bool {
        self.kind == FileKind::Test
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Non-blank lines.
    pub fn code_lines(&self) -> u32 {
        self.code_lines
    }

    /// File name without directories.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.relative_path)
    }
}

/// The source files of one module, grouped under its base directory.
#[derive(Debug, Clone, Default)]
pub struct ProjectFileSystem {
    base_dir: PathBuf,
    files: Vec<InputFile>,
}

impl ProjectFileSystem {
    pub fn new(base_dir: impl Into<PathBuf>, files: Vec<InputFile>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files,
        }
    }

    /// Collect the main and test sources of every supported language below
    /// `base_dir`. Unreadable files are skipped.
    pub fn scan(base_dir: &Path) -> Self {
        let mut files = Vec::new();
        for &language in Language::all() {
            for (root, kind) in [
                (language.main_source_root(), FileKind::Main),
                (language.test_source_root(), FileKind::Test),
            ] {
                collect_sources(base_dir, root, language, kind, &mut files);
            }
        }
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!(
            base_dir = %base_dir.display(),
            files = files.len(),
            "scanned source files"
        );
        Self::new(base_dir, files)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub fn files_of(&self, language: Language) -> impl Iterator<Item = &InputFile> {
        self.files.iter().filter(move |f| f.language == language)
    }

    pub fn has_files(&self, language: Language) -> bool {
        self.files_of(language).next().is_some()
    }

    pub fn file(&self, relative_path: &str) -> Option<&InputFile> {
        self.files.iter().find(|f| f.relative_path == relative_path)
    }
}

fn collect_sources(
    base_dir: &Path,
    root: &str,
    language: Language,
    kind: FileKind,
    files: &mut Vec<InputFile>,
) {
    let source_root = base_dir.join(root);
    if !source_root.is_dir() {
        return;
    }
    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&source_root.to_string_lossy()),
        language.extension()
    );
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(pattern = %pattern, error = %e, "invalid source pattern");
            return;
        }
    };

    for path in entries.filter_map(Result::ok).filter(|p| p.is_file()) {
        let Ok(relative) = path.strip_prefix(base_dir) else {
            continue;
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let lines = content.lines().count() as u32;
                let code_lines = content.lines().filter(|l| !l.trim().is_empty()).count() as u32;
                files.push(InputFile::new(
                    relative.to_string_lossy(),
                    language,
                    kind,
                    lines,
                    code_lines,
                ));
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable source file");
            }
        }
    }
}
