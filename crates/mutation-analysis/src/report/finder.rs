//! Locates the PIT XML report below a report directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Finds the most recent `*.xml` report below a directory. PIT writes one
/// timestamped sub-directory per run unless timestamps are disabled, so the
/// search is recursive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportFinder;

impl ReportFinder {
    pub fn new() -> Self {
        Self
    }

    /// The newest report below `report_directory`, or `None` when the
    /// directory does not exist or holds no XML file.
    pub fn find_report(&self, report_directory: &Path) -> Option<PathBuf> {
        if !report_directory.is_dir() {
            tracing::warn!(
                directory = %report_directory.display(),
                "report directory is not a valid directory"
            );
            return None;
        }

        let pattern = format!(
            "{}/**/*.xml",
            glob::Pattern::escape(&report_directory.to_string_lossy())
        );
        let entries = match glob::glob(&pattern) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "invalid report search pattern");
                return None;
            }
        };

        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for path in entries.filter_map(Result::ok).filter(|p| p.is_file()) {
            let modified = path
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            match &newest {
                Some((time, _)) if *time >= modified => {}
                _ => newest = Some((modified, path)),
            }
        }
        newest.map(|(_, path)| path)
    }
}
