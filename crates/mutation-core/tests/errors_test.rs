//! Tests for the mutation analysis error handling system.

use mutation_core::errors::error_code;
use mutation_core::errors::*;

/// Every error enum carries an error code.
#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let catalog = CatalogError::Xml {
        source_name: "rules.xml".into(),
        message: "unexpected end".into(),
    };
    assert_eq!(catalog.error_code(), error_code::CATALOG_ERROR);

    let report = ReportError::MissingField { field: "sourceFile" };
    assert_eq!(report.error_code(), error_code::REPORT_ERROR);

    let analysis = AnalysisError::UnsupportedLanguage("cobol".into());
    assert_eq!(analysis.error_code(), error_code::UNSUPPORTED_LANGUAGE);
}

/// Duplicate and unknown keys get their own codes.
#[test]
fn test_catalog_error_codes() {
    let duplicate = CatalogError::DuplicateRule {
        repository: "mutation.analysis.java".into(),
        key: "mutant.MATH".into(),
    };
    assert_eq!(duplicate.error_code(), error_code::DUPLICATE_KEY);

    let unknown = CatalogError::UnknownRule {
        repository: "mutation.analysis.java".into(),
        key: "mutant.NOPE".into(),
    };
    assert_eq!(unknown.error_code(), error_code::UNKNOWN_RULE);

    let missing = CatalogError::MissingField {
        key: "mutant.survived".into(),
        field: "name",
    };
    assert_eq!(missing.error_code(), error_code::CATALOG_ERROR);
}

/// Subsystem errors convert into the aggregate error and keep their code.
#[test]
fn test_from_conversions() {
    let analysis: AnalysisError = ConfigError::ValidationFailed {
        field: "effort.mutant_kill".into(),
        message: "bad".into(),
    }
    .into();
    assert!(matches!(analysis, AnalysisError::Config(_)));
    assert_eq!(analysis.error_code(), error_code::CONFIG_ERROR);

    let analysis: AnalysisError = CatalogError::DuplicateRepository {
        key: "mutation.analysis.java".into(),
    }
    .into();
    assert_eq!(analysis.error_code(), error_code::DUPLICATE_KEY);

    let analysis: AnalysisError = ReportError::Io {
        path: "mutations.xml".into(),
        message: "denied".into(),
    }
    .into();
    assert!(matches!(analysis, AnalysisError::Report(ReportError::Io { .. })));
}

/// The tagged string is `[CODE] message`.
#[test]
fn test_tagged_string_format() {
    let err = CatalogError::DuplicateRule {
        repository: "mutation.analysis.kotlin".into(),
        key: "mutant.MATH".into(),
    };
    assert_eq!(
        err.tagged_string(),
        "[DUPLICATE_KEY] Duplicate rule 'mutant.MATH' in repository 'mutation.analysis.kotlin'"
    );

    let err = AnalysisError::Output {
        path: "issuesReport.json".into(),
        message: "read-only file system".into(),
    };
    assert!(err.tagged_string().starts_with("[OUTPUT_ERROR] Cannot write issuesReport.json"));
}
