//! Structural checks run after every mutant was rejected.

mod common;

use common::{SEED, customer, invoice, seeded};
use ruleprobe_model::Violation;
use ruleprobe_validate::{ComplianceError, RuleFamilies, ValidationAssert, ValidatorOptions};

#[test]
fn uncovered_properties_are_listed() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .not_blank("name")
        .between("age", 18, 120)
        .size("tags")
        .min_max(1, 3)
        .valid_bean("address")
        .is_compliant()
        .unwrap_err();
    assert!(err.is_coverage());
    insta::assert_snapshot!(
        err.to_string(),
        @"not all properties have validation rules: [email, nickname]"
    );
}

#[test]
fn cascade_rule_requires_the_marker() {
    let err = seeded()
        .of(invoice())
        .using_bean_validation()
        .future("due")
        .valid_bean("total")
        .not_validated("memo")
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::MissingCascade {
            properties: vec!["total".to_string()]
        }
    );
}

#[test]
fn source_only_nullable_marker_is_pointed_out() {
    let err = seeded()
        .of(invoice())
        .using_bean_validation()
        .future("due")
        .not_validated("total")
        .nullable("memo")
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::MissingNullable {
            properties: vec!["memo".to_string()],
            source_only: vec!["memo".to_string()],
        }
    );
}

#[test]
fn nested_records_must_cascade() {
    let err = seeded()
        .of(invoice())
        .using_bean_validation()
        .future("due")
        .not_validated("total")
        .not_validated("memo")
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::NestedCascade {
            properties: vec!["total".to_string()]
        }
    );
}

#[test]
fn non_aggregate_types_are_exempt() {
    let mut assert = seeded();
    assert.register_non_aggregate_type("Money");
    let result = assert
        .of(invoice())
        .using_bean_validation()
        .future("due")
        .not_validated("total")
        .not_validated("memo")
        .is_compliant();
    assert_eq!(result, Ok(()));

    let configured = ValidationAssert::with_options(
        ValidatorOptions::default()
            .with_seed(SEED)
            .with_non_aggregate_type("Money"),
    );
    let result = configured
        .of(invoice())
        .using_bean_validation()
        .future("due")
        .unchecked("total")
        .unchecked("memo")
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn past_dates_violate_a_future_constraint() {
    let err = seeded()
        .of(invoice())
        .using_engine(|_: &common::Invoice| -> Vec<Violation> { Vec::new() })
        .future("due")
        .is_compliant()
        .unwrap_err();
    assert!(matches!(
        err,
        ComplianceError::MutationNotDetected { ref property, .. } if property == "due"
    ));
}
