//! Metric catalog, per-file counters and measure computer tests.

use mutation_analysis::metrics::catalog::{self, Direction, ValueType};
use mutation_analysis::metrics::measures::PROJECT_KEY;
use mutation_analysis::metrics::*;
use mutation_analysis::model::{Mutant, OperatorCatalog};
use mutation_analysis::sensors::{FileKind, InputFile};
use mutation_core::config::FeatureConfig;
use mutation_core::types::Language;

const A: &str = "src/main/java/com/ex/A.java";
const B: &str = "src/main/java/com/ex/B.java";
const A_TEST: &str = "src/test/java/com/ex/ATest.java";
const MAIN_DIR: &str = "src/main/java/com/ex";
const TEST_DIR: &str = "src/test/java/com/ex";

fn files() -> Vec<InputFile> {
    vec![
        InputFile::new(A, Language::Java, FileKind::Main, 30, 20),
        InputFile::new(B, Language::Java, FileKind::Main, 15, 10),
        InputFile::new(A_TEST, Language::Java, FileKind::Test, 40, 30),
    ]
}

/// File-level measures as the sensor writes them.
fn file_measures() -> MeasureStore {
    let mut store = MeasureStore::new();
    store
        .save(A, keys::MUTATIONS_TOTAL, 4_i64)
        .save(A, keys::MUTATIONS_DETECTED, 2_i64)
        .save(A, keys::MUTATIONS_KILLED, 2_i64)
        .save(A, keys::MUTATIONS_SURVIVED, 1_i64)
        .save(A, keys::MUTATIONS_NO_COVERAGE, 1_i64)
        .save(A, keys::MUTATIONS_ALIVE, 2_i64)
        .save(A, keys::LINES_TO_COVER, 20_i64);
    store
        .save(B, keys::MUTATIONS_TOTAL, 2_i64)
        .save(B, keys::MUTATIONS_DETECTED, 1_i64)
        .save(B, keys::MUTATIONS_KILLED, 1_i64)
        .save(B, keys::MUTATIONS_SURVIVED, 1_i64)
        .save(B, keys::MUTATIONS_ALIVE, 1_i64)
        .save(B, keys::LINES_TO_COVER, 10_i64);
    store.save(A_TEST, keys::TEST_KILLS, 3_i64);
    for file in [A, B, A_TEST] {
        store
            .save(file, keys::UTILITY_GLOBAL_MUTATIONS, 6_i64)
            .save(file, keys::UTILITY_GLOBAL_ALIVE, 3_i64);
    }
    store
}

fn features(experimental: bool, force_zero: bool) -> FeatureConfig {
    FeatureConfig {
        experimental: Some(experimental),
        force_missing_coverage_to_zero: Some(force_zero),
    }
}

fn compute(features: &FeatureConfig) -> MeasureStore {
    let files = files();
    let tree = ComponentTree::from_files(&files);
    let mut store = file_measures();
    compute_measures(&tree, &mut store, &default_computers(features));
    store
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("measure missing");
    assert!((actual - expected).abs() < 0.01, "{actual} != {expected}");
}

// ─── Catalog ────────────────────────────────────────────────────────────

#[test]
fn catalog_lists_metrics() {
    assert_eq!(catalog::quantitative_metrics().len(), 12);
    assert_eq!(catalog::qualitative_metrics().len(), 7);
    assert_eq!(catalog::sensor_metrics().count(), 19);

    let coverage = catalog::find(keys::MUTATIONS_COVERAGE).unwrap();
    assert_eq!(coverage.value_type, ValueType::Percent);
    assert_eq!(coverage.direction, Direction::Better);
    assert_eq!(coverage.domain(), "Mutation Analysis");
    assert!(catalog::find(keys::UTILITY_GLOBAL_MUTATIONS).unwrap().hidden);
    assert!(catalog::find("ncloc").is_none());
}

// ─── Component tree ─────────────────────────────────────────────────────

#[test]
fn tree_has_directories_between_project_and_files() {
    let files = files();
    let tree = ComponentTree::from_files(&files);

    assert_eq!(tree.root().key(), PROJECT_KEY);
    assert_eq!(tree.root().kind(), ComponentKind::Project);
    let children: Vec<&str> = tree.children(PROJECT_KEY).map(Component::key).collect();
    assert_eq!(children, ["src"]);
    assert_eq!(tree.children(MAIN_DIR).count(), 2);
    assert_eq!(tree.component(MAIN_DIR).unwrap().kind(), ComponentKind::Directory);
    assert!(!tree.component(MAIN_DIR).unwrap().is_test());
    assert!(tree.component("src/test").unwrap().is_test());
    assert!(tree.component(A_TEST).unwrap().is_test());
    // . src src/main src/main/java src/main/java/com src/main/java/com/ex A B
    // src/test src/test/java src/test/java/com src/test/java/com/ex ATest
    assert_eq!(tree.len(), 13);
}

// ─── Computers ──────────────────────────────────────────────────────────

#[test]
fn quantitative_measures_sum_up_the_tree() {
    let store = compute(&features(false, false));
    assert_eq!(store.int(MAIN_DIR, keys::MUTATIONS_TOTAL), Some(6));
    assert_eq!(store.int(MAIN_DIR, keys::MUTATIONS_DETECTED), Some(3));
    assert_eq!(store.int(PROJECT_KEY, keys::MUTATIONS_TOTAL), Some(6));
    assert_eq!(store.int(PROJECT_KEY, keys::MUTATIONS_SURVIVED), Some(2));
    assert_eq!(store.int(PROJECT_KEY, keys::TEST_KILLS), Some(3));
    // hidden utility metrics are copied, not summed
    assert_eq!(store.int(MAIN_DIR, keys::UTILITY_GLOBAL_MUTATIONS), Some(6));
    assert_eq!(store.int(PROJECT_KEY, keys::UTILITY_GLOBAL_MUTATIONS), Some(6));
    // zero sums are not saved
    assert_eq!(store.int(TEST_DIR, keys::MUTATIONS_TOTAL), None);
}

#[test]
fn mutation_coverage_and_test_strength() {
    let store = compute(&features(false, false));
    assert_close(store.double(A, keys::MUTATIONS_COVERAGE), 50.0);
    assert_close(store.double(A, keys::MUTATIONS_TEST_STRENGTH), 66.67);
    assert_close(store.double(B, keys::MUTATIONS_TEST_STRENGTH), 50.0);
    assert_close(store.double(PROJECT_KEY, keys::MUTATIONS_COVERAGE), 50.0);
    assert_close(store.double(PROJECT_KEY, keys::MUTATIONS_TEST_STRENGTH), 60.0);
    assert_eq!(store.get(TEST_DIR, keys::MUTATIONS_COVERAGE), None);
}

#[test]
fn missing_coverage_can_be_forced_to_zero() {
    let store = compute(&features(false, true));
    assert_close(store.double(TEST_DIR, keys::MUTATIONS_COVERAGE), 0.0);
    assert_close(store.double(A_TEST, keys::MUTATIONS_COVERAGE), 0.0);
    assert_close(store.double(A, keys::MUTATIONS_COVERAGE), 50.0);
}

#[test]
fn experimental_measures_are_off_by_default() {
    let store = compute(&features(false, false));
    assert_eq!(store.get(A, keys::MUTATIONS_DENSITY), None);
    assert_eq!(store.get(A, keys::MUTATIONS_TOTAL_PERCENT), None);
    assert_eq!(store.get(A_TEST, keys::TEST_KILL_RATIO), None);
}

#[test]
fn density_uses_lines_to_cover() {
    let store = compute(&features(true, false));
    assert_close(store.double(A, keys::MUTATIONS_DENSITY), 20.0);
    assert_close(store.double(MAIN_DIR, keys::MUTATIONS_DENSITY), 20.0);
    assert_eq!(store.int(MAIN_DIR, keys::LINES_TO_COVER), Some(30));
    assert_close(store.double(PROJECT_KEY, keys::MUTATIONS_DENSITY), 20.0);
}

#[test]
fn total_and_survivor_percentages() {
    let store = compute(&features(true, false));
    assert_close(store.double(A, keys::MUTATIONS_TOTAL_PERCENT), 66.67);
    assert_close(store.double(A, keys::MUTATIONS_ALIVE_PERCENT), 66.67);
    assert_close(store.double(B, keys::MUTATIONS_ALIVE_PERCENT), 33.33);
    assert_close(store.double(PROJECT_KEY, keys::MUTATIONS_TOTAL_PERCENT), 100.0);
    assert_eq!(store.get(A_TEST, keys::MUTATIONS_TOTAL_PERCENT), None);
}

#[test]
fn test_kill_ratio_on_tests_and_directories() {
    let store = compute(&features(true, false));
    assert_close(store.double(A_TEST, keys::TEST_KILL_RATIO), 50.0);
    assert_close(store.double(TEST_DIR, keys::TEST_KILL_RATIO), 50.0);
    assert_close(store.double(PROJECT_KEY, keys::TEST_KILL_RATIO), 50.0);
    assert_eq!(store.get(A, keys::TEST_KILL_RATIO), None);
}

#[test]
fn custom_computer_runs_children_first() {
    struct CountChildren;
    impl MeasureComputer for CountChildren {
        fn name(&self) -> &'static str {
            "count-children"
        }
        fn compute(&self, context: &mut MeasureContext<'_>) {
            let own = if context.component().kind() == ComponentKind::File { 1 } else { 0 };
            let below: i64 = context.children_ints("files").iter().sum();
            context.add_measure("files", own + below);
        }
    }

    let files = files();
    let tree = ComponentTree::from_files(&files);
    let mut store = MeasureStore::new();
    let computers: Vec<Box<dyn MeasureComputer>> = vec![Box::new(CountChildren)];
    compute_measures(&tree, &mut store, &computers);
    assert_eq!(store.int(MAIN_DIR, "files"), Some(2));
    assert_eq!(store.int(PROJECT_KEY, "files"), Some(3));
}

// ─── Per-file counters ──────────────────────────────────────────────────

#[test]
fn resource_metrics_count_states() {
    let catalog = OperatorCatalog::bundled().unwrap();
    let mutant = |status: &str, detected: bool| {
        Mutant::builder()
            .status(status)
            .detected(detected)
            .source_file("A.java")
            .mutated_class("com.ex.A")
            .mutated_method("m")
            .method_description("()V")
            .number_of_tests_run(2)
            .using_mutator(catalog, "MATH")
            .build()
            .unwrap()
    };

    let mut metrics = ResourceMutationMetrics::new(files().remove(0));
    assert_eq!(metrics.mutation_coverage(), 0.0);
    metrics.add_mutant(mutant("KILLED", true));
    metrics.add_mutant(mutant("TIMED_OUT", true));
    metrics.add_mutant(mutant("SURVIVED", false));
    metrics.add_mutant(mutant("NO_COVERAGE", false));

    assert_eq!(metrics.total(), 4);
    assert_eq!(metrics.killed(), 1);
    assert_eq!(metrics.timed_out(), 1);
    assert_eq!(metrics.detected(), 2);
    assert_eq!(metrics.alive(), 2);
    assert_eq!(metrics.tests_run(), 8);
    assert_eq!(metrics.mutation_coverage(), 25.0);
    assert_eq!(metrics.mutants().len(), 4);
}
