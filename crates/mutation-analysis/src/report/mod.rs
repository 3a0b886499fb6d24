//! PIT report discovery and parsing.

pub mod finder;
pub mod parser;

pub use finder::ReportFinder;
pub use parser::PitestReportParser;

use std::path::Path;

use mutation_core::errors::ReportError;

use crate::model::{Mutant, OperatorCatalog};

/// Read the mutants of a report location.
///
/// A directory is searched for the newest XML report; anything else is
/// parsed as the report itself. Finding no report is not an error.
pub fn read_mutants(location: &Path, catalog: &OperatorCatalog) -> Result<Vec<Mutant>, ReportError> {
    tracing::debug!(location = %location.display(), "searching PIT reports");

    let report = if location.is_dir() {
        ReportFinder::new().find_report(location)
    } else {
        Some(location.to_path_buf())
    };

    match report {
        Some(report) => PitestReportParser::new(catalog).parse_mutants(&report),
        None => {
            tracing::warn!(location = %location.display(), "no XML PIT report found");
            Ok(Vec::new())
        }
    }
}
