//! Simple type engine coverage, including property tests over lexical
//! handling and value comparison.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;

use xsdstream::error::{ErrorCollector, Reporter};
use xsdstream::locations::Location;
use xsdstream::namespaces::NamespaceContext;
use xsdstream::validators::{
    validate_simple_value, BuiltinKind, FacetSet, PatternFacet, SimpleTypeDef, WhiteSpace,
    XsdValue,
};

fn run(stype: &SimpleTypeDef, text: &str) -> (Option<XsdValue>, Vec<String>) {
    let collector = ErrorCollector::new();
    let mut reporter = Reporter::new(Box::new(collector.clone()));
    let resolver = NamespaceContext::new();
    let value = validate_simple_value(
        stype,
        None,
        text,
        &resolver,
        &Location::unknown(),
        &mut reporter,
    );
    let messages = collector
        .diagnostics()
        .iter()
        .map(|d| d.message.clone())
        .collect();
    (value, messages)
}

#[test]
fn test_pattern_and_enumeration_combine() {
    let stype = SimpleTypeDef::builtin(BuiltinKind::String).with_facets(
        FacetSet::new()
            .with_pattern(PatternFacet::new("[A-Z]{2}").unwrap())
            .with_enumeration(["DE", "FR", "IT"]),
    );

    let (value, messages) = run(&stype, "FR");
    assert_eq!(value, Some(XsdValue::String("FR".to_string())));
    assert_eq!(messages, Vec::<String>::new());

    // fails both facets, one diagnostic each
    let (_, messages) = run(&stype, "Japan");
    assert_eq!(messages.len(), 2);
}

#[test]
fn test_length_facet_counts_characters_after_normalization() {
    let stype = SimpleTypeDef::builtin(BuiltinKind::String)
        .with_white_space(WhiteSpace::Collapse)
        .with_facets(FacetSet::new().with_length(5));

    let (value, messages) = run(&stype, "  hello  ");
    assert_eq!(value, Some(XsdValue::String("hello".to_string())));
    assert!(messages.is_empty());
}

#[test]
fn test_list_of_qnames_flagged_as_qname_governed() {
    let qname = Arc::new(SimpleTypeDef::builtin(BuiltinKind::QName));
    let list = SimpleTypeDef::list(qname);
    assert!(list.is_qname_governed());

    let plain = SimpleTypeDef::list(Arc::new(SimpleTypeDef::builtin(BuiltinKind::Decimal)));
    assert!(!plain.is_qname_governed());
}

#[test]
fn test_union_applies_member_whitespace() {
    // decimal collapses, so a padded lexical still matches the first member
    let stype = SimpleTypeDef::union(vec![
        Arc::new(SimpleTypeDef::builtin(BuiltinKind::Decimal)),
        Arc::new(SimpleTypeDef::builtin(BuiltinKind::String)),
    ]);

    let (value, messages) = run(&stype, "  42  ");
    assert_eq!(value, Some(XsdValue::Decimal(Decimal::from(42))));
    assert!(messages.is_empty());
}

#[test]
fn test_nested_list_items_validate_individually() {
    let stype = SimpleTypeDef::list(Arc::new(SimpleTypeDef::builtin(BuiltinKind::Boolean)));

    let (value, messages) = run(&stype, "true false 1");
    assert_eq!(
        value,
        Some(XsdValue::List(vec![
            XsdValue::Boolean(true),
            XsdValue::Boolean(false),
            XsdValue::Boolean(true),
        ]))
    );
    assert!(messages.is_empty());

    let (value, messages) = run(&stype, "true maybe");
    assert_eq!(value, None);
    assert_eq!(messages.len(), 1);
}

proptest! {
    #[test]
    fn prop_collapse_is_idempotent(text in "[ \t\r\na-z]{0,40}") {
        let once = WhiteSpace::Collapse.normalize(&text);
        let twice = WhiteSpace::Collapse.normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_decimal_lexicals_roundtrip(n in -1_000_000i64..1_000_000i64, scale in 0u32..6) {
        let value = Decimal::new(n, scale);
        let stype = SimpleTypeDef::builtin(BuiltinKind::Decimal);
        let (parsed, messages) = run(&stype, &value.to_string());
        prop_assert!(messages.is_empty());
        prop_assert_eq!(parsed, Some(XsdValue::Decimal(value)));
    }

    #[test]
    fn prop_whitespace_padding_never_changes_collapsed_outcome(n in -10_000i64..10_000) {
        let stype = SimpleTypeDef::builtin(BuiltinKind::Decimal);
        let plain = run(&stype, &n.to_string()).0;
        let padded = run(&stype, &format!("\n  {}\t ", n)).0;
        prop_assert_eq!(plain, padded);
    }

    #[test]
    fn prop_booleans_accept_only_four_lexicals(text in "[a-z01]{1,5}") {
        let stype = SimpleTypeDef::builtin(BuiltinKind::Boolean);
        let (value, _) = run(&stype, &text);
        let accepted = matches!(text.as_str(), "true" | "false" | "1" | "0");
        prop_assert_eq!(value.is_some(), accepted);
    }
}
