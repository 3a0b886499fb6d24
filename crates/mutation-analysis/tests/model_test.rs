//! Operator catalog and mutant model tests.

use mutation_analysis::model::{
    Mutant, MutantState, MutationOperator, OperatorCatalog, TestDescriptor,
};
use mutation_core::errors::{CatalogError, ReportError};
use proptest::prelude::*;

const GREGOR: &str = "org.pitest.mutationtest.engine.gregor.mutators";

fn catalog() -> &'static OperatorCatalog {
    OperatorCatalog::bundled().unwrap()
}

// ─── Operator catalog ───────────────────────────────────────────────────

#[test]
fn bundled_catalog_has_23_operators_6_experimental() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 23);
    assert_eq!(catalog.iter().filter(|op| op.is_experimental()).count(), 6);
    assert!(catalog
        .iter()
        .all(|op| !op.name().is_empty() && !op.violation_description().is_empty()));
}

#[test]
fn bundled_catalog_is_parsed_once() {
    let a = OperatorCatalog::bundled().unwrap() as *const OperatorCatalog;
    let b = OperatorCatalog::bundled().unwrap() as *const OperatorCatalog;
    assert_eq!(a, b);
}

#[test]
fn find_by_id_and_class_name() {
    let catalog = catalog();
    assert_eq!(catalog.find("MATH").id(), "MATH");
    assert_eq!(
        catalog.find(&format!("{GREGOR}.MathMutator")).id(),
        "MATH"
    );
    assert_eq!(
        catalog
            .find(&format!("{GREGOR}.experimental.ArgumentPropagationMutator"))
            .id(),
        "EXPERIMENTAL_ARGUMENT_PROPAGATION"
    );
    assert_eq!(
        catalog.find(&format!("{GREGOR}.ArgumentPropagationMutator")).id(),
        "ARGUMENT_PROPAGATION"
    );
    assert_eq!(
        catalog.find(&format!("{GREGOR}.NonVoidMethodCallMutator")).id(),
        "NON_VOID_METHOD_CALLS"
    );
}

#[test]
fn find_with_suffix_matches_class_prefix() {
    let catalog = catalog();
    let mutator = format!("{GREGOR}.RemoveConditionalMutator_EQUAL_IF");
    let op = catalog.find(&mutator);
    assert_eq!(op.id(), "REMOVE_CONDITIONALS");
    assert_eq!(op.suffix_of(&mutator), "EQUAL_IF");
    assert_eq!(op.suffix_of(&format!("{GREGOR}.RemoveConditionalMutator")), "");
}

#[test]
fn unknown_mutator_yields_unknown_operator() {
    let op = catalog().find("com.example.CustomMutator");
    assert!(op.is_unknown());
    assert_eq!(op.id(), "UNKNOWN");
    assert_eq!(op.violation_description(), "An unknown mutagen has been applied");
    assert!(catalog().get("UNKNOWN").is_none());
}

#[test]
fn get_by_exact_id() {
    assert!(catalog().get("NULL_RETURN").is_some());
    assert!(catalog().get("null_return").is_none());
}

#[test]
fn malformed_catalog_fails() {
    let err = OperatorCatalog::from_xml("broken.xml", "<mutagens><operator id=\"A\"><name>x</mutagens>")
        .unwrap_err();
    assert!(matches!(err, CatalogError::Xml { ref source_name, .. } if source_name == "broken.xml"));
}

#[test]
fn truncated_catalog_fails() {
    let op = r#"<operator id="A"><name>A</name><classes><class>a.A</class></classes>
        <violationDescription>changed</violationDescription></operator>"#;
    for xml in [
        format!("<mutagens>{op}"),
        r#"<mutagens><operator id="A"><name>A</name>"#.to_string(),
        op.to_string(),
    ] {
        let err = OperatorCatalog::from_xml("cut.xml", &xml).unwrap_err();
        assert!(matches!(err, CatalogError::Xml { .. }), "{xml}: {err:?}");
    }
}

#[test]
fn empty_catalog_fails() {
    for xml in ["", "<mutagens></mutagens>", "<mutagens/>"] {
        let err = OperatorCatalog::from_xml("empty.xml", xml).unwrap_err();
        assert!(matches!(err, CatalogError::Xml { .. }), "{xml:?}: {err:?}");
    }
}

#[test]
fn operator_without_class_fails() {
    let xml = r#"<mutagens>
        <operator id="A">
            <name>A</name>
            <violationDescription>changed</violationDescription>
        </operator>
    </mutagens>"#;
    let err = OperatorCatalog::from_xml("a.xml", xml).unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { field: "class", .. }));
}

#[test]
fn duplicate_operator_id_fails() {
    let op = r#"<operator id="A"><name>A</name><classes><class>a.A</class></classes>
        <violationDescription>changed</violationDescription></operator>"#;
    let xml = format!("<mutagens>{op}{op}</mutagens>");
    assert!(matches!(
        OperatorCatalog::from_xml("a.xml", &xml),
        Err(CatalogError::InvalidValue { field: "id", .. })
    ));
}

#[test]
fn custom_catalog_keeps_document_order() {
    let xml = r#"<mutagens>
        <operator id="B"><name>B</name><classes><class>x.B</class></classes>
            <violationDescription>b</violationDescription></operator>
        <operator id="EXPERIMENTAL_A"><name>A</name><classes><class>x.A</class><class>y.A</class></classes>
            <violationDescription>a</violationDescription>
            <description><![CDATA[<p>A</p>]]></description></operator>
    </mutagens>"#;
    let catalog = OperatorCatalog::from_xml("c.xml", xml).unwrap();
    let ids: Vec<&str> = catalog.iter().map(|op| op.id()).collect();
    assert_eq!(ids, ["B", "EXPERIMENTAL_A"]);
    let a = catalog.find("y.A_SUFFIX");
    assert_eq!(a.id(), "EXPERIMENTAL_A");
    assert!(a.is_experimental());
    assert_eq!(a.operator_description(), Some("<p>A</p>"));
    assert_eq!(catalog.find("B").operator_description(), None);
}

// ─── Mutant states ──────────────────────────────────────────────────────

#[test]
fn state_parsing_and_liveness() {
    assert_eq!(MutantState::parse("KILLED"), MutantState::Killed);
    assert_eq!(MutantState::parse(" NO_COVERAGE "), MutantState::NoCoverage);
    assert_eq!(MutantState::parse("STARTED"), MutantState::Unknown);
    assert!(MutantState::Survived.is_alive());
    assert!(MutantState::NoCoverage.is_alive());
    assert!(MutantState::Unknown.is_alive());
    assert!(!MutantState::Killed.is_alive());
    assert!(!MutantState::TimedOut.is_alive());
    assert_eq!(MutantState::MemoryError.to_string(), "MEMORY_ERROR");
}

// ─── Mutants ────────────────────────────────────────────────────────────

fn mutant_builder() -> mutation_analysis::model::MutantBuilder {
    Mutant::builder()
        .status("SURVIVED")
        .source_file("Foo.java")
        .mutated_class("com.example.Foo$Inner")
        .mutated_method("bar")
        .method_description("(I)I")
}

#[test]
fn builder_resolves_operator_and_suffix() {
    let mutant = mutant_builder()
        .line_number(42)
        .using_mutator(catalog(), &format!("{GREGOR}.RemoveConditionalMutator_ORDER_ELSE"))
        .description("  ")
        .build()
        .unwrap();
    assert_eq!(mutant.operator().id(), "REMOVE_CONDITIONALS");
    assert_eq!(mutant.mutator_suffix(), "ORDER_ELSE");
    assert_eq!(mutant.line_number(), 42);
    assert_eq!(mutant.outer_class(), "com.example.Foo");
    assert_eq!(mutant.description(), None);
    assert!(mutant.is_alive());
    assert!(mutant.killing_test_descriptor().is_none());
}

#[test]
fn unknown_mutator_has_no_suffix() {
    let mutant = mutant_builder()
        .using_mutator(catalog(), "com.example.CustomMutator_X")
        .build()
        .unwrap();
    assert!(mutant.operator().is_unknown());
    assert_eq!(mutant.mutator_suffix(), "");
}

#[test]
fn builder_requires_mandatory_fields() {
    let err = Mutant::builder()
        .status("KILLED")
        .source_file("Foo.java")
        .build()
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingField { field: "mutatedClass" }));

    let err = mutant_builder().build().unwrap_err();
    assert!(matches!(err, ReportError::MissingField { field: "mutator" }));
}

#[test]
fn explicit_operator_clears_suffix() {
    let mutant = mutant_builder()
        .using_mutator(catalog(), &format!("{GREGOR}.RemoveConditionalMutator_EQUAL_IF"))
        .operator(MutationOperator::unknown())
        .build()
        .unwrap();
    assert_eq!(mutant.mutator_suffix(), "");
}

// ─── Test descriptors ───────────────────────────────────────────────────

#[test]
fn test_descriptor_parses_class_and_method() {
    let test = TestDescriptor::parse("com.example.FooTest.testBar(com.example.FooTest)");
    assert_eq!(test.class_name(), "com.example.FooTest");
    assert_eq!(test.method_name(), "testBar");

    let nested = TestDescriptor::parse("com.example.FooTest$Nested.testBaz(com.example.FooTest$Nested)");
    assert_eq!(nested.class_name(), "com.example.FooTest");
    assert_eq!(nested, test);

    let bare = TestDescriptor::parse("com.example.FooTest");
    assert_eq!(bare.class_name(), "com.example.FooTest");
    assert_eq!(bare.method_name(), "unknown");
}

#[test]
fn killing_test_descriptor_from_mutant() {
    let mutant = mutant_builder()
        .status("KILLED")
        .detected(true)
        .killing_test("com.example.FooTest.testBar(com.example.FooTest)")
        .using_mutator(catalog(), "MATH")
        .build()
        .unwrap();
    let test = mutant.killing_test_descriptor().unwrap();
    assert_eq!(test.class_name(), "com.example.FooTest");
    assert!(mutant.is_detected());
    assert!(!mutant.is_alive());
}

proptest! {
    /// Any class name plus suffix resolves back to its operator.
    #[test]
    fn class_name_with_any_suffix_resolves(idx in 0usize..23, suffix in "[A-Z_]{0,12}") {
        let catalog = catalog();
        let op = catalog.iter().nth(idx).unwrap();
        let class = &op.class_names()[0];
        let mutator = if suffix.is_empty() { class.clone() } else { format!("{class}_{suffix}") };
        let found = catalog.find(&mutator);
        prop_assert_eq!(found.id(), op.id());
        prop_assert_eq!(op.suffix_of(&mutator), suffix.as_str());
    }
}
