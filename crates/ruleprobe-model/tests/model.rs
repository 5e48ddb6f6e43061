//! Integration tests for the property model and rule serialization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ruleprobe_model::{
    CopyError, Marker, PropertyModel, Rule, RuleArg, SourceKind, TypeKind, Value, property_model,
};

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u64,
    tags: Vec<String>,
    quantities: BTreeMap<String, i32>,
    shipped_on: Option<NaiveDate>,
    checksum: Box<[u8]>,
}

property_model!(Order {
    #[positive]
    id,
    tags,
    quantities,
    #[nullable]
    shipped_on,
    #[source_only(nullable)]
    checksum,
});

fn order() -> Order {
    Order {
        id: 1,
        tags: vec!["new".to_string()],
        quantities: BTreeMap::new(),
        shipped_on: None,
        checksum: vec![1, 2].into_boxed_slice(),
    }
}

#[test]
fn describes_container_fields() {
    let properties = Order::properties();
    let kinds: Vec<TypeKind> = properties.iter().map(|p| p.ty.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TypeKind::U64,
            TypeKind::List,
            TypeKind::Map,
            TypeKind::Date,
            TypeKind::Array
        ]
    );
    assert_eq!(properties[0].markers, vec![Marker::Annotation("positive")]);
    assert_eq!(properties[4].markers, vec![Marker::SourceOnly("nullable")]);
    assert!(properties[3].ty.is_optional());
}

#[test]
fn copies_containers_and_nulls() {
    let original = order();

    let copy = original
        .with_property("tags", Value::List(Vec::new()))
        .unwrap();
    assert!(copy.tags.is_empty());

    let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let copy = original
        .with_property("shipped_on", Value::Date(date))
        .unwrap();
    assert_eq!(copy.shipped_on, Some(date));

    let copy = copy.with_property("shipped_on", Value::Null).unwrap();
    assert_eq!(copy.shipped_on, None);

    let copy = original
        .with_property("checksum", Value::Array(vec![Value::U8(9)]))
        .unwrap();
    assert_eq!(&*copy.checksum, &[9]);
    assert_eq!(copy.id, original.id);
}

#[test]
fn null_is_rejected_for_required_fields() {
    let err = order().with_property("id", Value::Null).unwrap_err();
    match err {
        CopyError::TypeMismatch { property, mismatch } => {
            assert_eq!(property, "id");
            assert_eq!(mismatch.found, "null");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rules_serialize_with_kebab_case_kinds() {
    let rule = Rule::new("id", SourceKind::BelowMin, vec![RuleArg::Int(0)]).unwrap();
    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["source"], "below-min");
    assert_eq!(json["args"][0], 0);

    let back: Rule = serde_json::from_value(json).unwrap();
    assert_eq!(back, rule);
}
