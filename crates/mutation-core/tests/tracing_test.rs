//! Tests for the tracing setup.

use std::sync::Mutex;

use mutation_core::tracing::init_tracing;

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// A debug filter is accepted.
#[test]
fn test_debug_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MUTATION_ANALYSIS_LOG", "debug");
    init_tracing();
    std::env::remove_var("MUTATION_ANALYSIS_LOG");
}

/// Per-module directives are accepted.
#[test]
fn test_per_subsystem_filtering() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(
        "MUTATION_ANALYSIS_LOG",
        "mutation_analysis::report=debug,mutation_analysis::rules=warn",
    );
    init_tracing();
    std::env::remove_var("MUTATION_ANALYSIS_LOG");
}

/// Repeated initialization does not panic.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

/// Garbage in the filter variable falls back to the default filter.
#[test]
fn test_invalid_filter_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MUTATION_ANALYSIS_LOG", "[[not a filter");
    init_tracing();
    std::env::remove_var("MUTATION_ANALYSIS_LOG");
}
