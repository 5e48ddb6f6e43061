//! Assertions validated by calling a method with each instance.

mod common;

use common::{Customer, create, customer, seeded, update};
use ruleprobe_model::Violation;
use ruleprobe_validate::{
    CallError, ComplianceError, RuleBuilder, RuleFamilies, Validate, ensure_valid,
};

fn customer_rules(builder: RuleBuilder<Customer>) -> RuleBuilder<Customer> {
    builder
        .not_blank("name")
        .between("age", 18, 120)
        .nullable("email")
        .size("tags")
        .min_max(1, 3)
        .valid_bean("address")
        .not_validated("nickname")
}

#[test]
fn validated_method_passes() {
    let result = seeded()
        .of(customer())
        .calling(create)
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn leading_arguments_are_forwarded() {
    let result = seeded()
        .of(customer())
        .calling_with(42_u64, update)
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));

    let result = seeded()
        .of(customer())
        .calling_with2("tenant".to_string(), 42_u64, |_tenant: String, id, c| update(id, c))
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn unvalidated_method_is_not_rejected() {
    let err = seeded()
        .of(customer())
        .calling(|_c: Customer| Ok(()))
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    match err {
        ComplianceError::CallNotRejected {
            property,
            candidate,
            outcome,
        } => {
            assert_eq!(property, "name");
            assert_eq!(candidate, "\"\"");
            assert_eq!(outcome, "call completed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn other_failures_do_not_spoil_the_baseline() {
    let result = seeded()
        .of(customer())
        .calling(|c: Customer| {
            ensure_valid("save", &c)?;
            Err(anyhow::anyhow!("storage unavailable").into())
        })
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn other_failures_on_a_mutant_are_not_rejections() {
    let err = seeded()
        .of(customer())
        .calling(|c: Customer| {
            if c.name.trim().is_empty() {
                return Err(anyhow::anyhow!("name lookup failed").into());
            }
            ensure_valid("save", &c)
        })
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    assert!(matches!(
        err,
        ComplianceError::CallNotRejected { ref outcome, .. }
            if outcome == "call failed with another error: name lookup failed"
    ));
}

#[test]
fn rejection_must_mention_the_property() {
    let err = seeded()
        .of(customer())
        .calling(|c: Customer| {
            if c.validate().is_empty() {
                Ok(())
            } else {
                Err(CallError::rejected(
                    "create",
                    vec![Violation::new("arg0", "invalid customer")],
                ))
            }
        })
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"call was rejected for property name [""], but the rejection does not mention it: create.arg0 => invalid customer"#
    );
}

#[test]
fn rejection_of_a_nested_property_does_not_count() {
    let err = seeded()
        .of(customer())
        .calling(|c: Customer| {
            if c.validate().is_empty() {
                Ok(())
            } else {
                Err(CallError::rejected(
                    "create",
                    vec![Violation::new("customer.address.name", "must not be blank")],
                ))
            }
        })
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @r#"call was rejected for property name [""], but the rejection does not mention it: create.customer.address.name => must not be blank"#
    );
}

#[test]
fn rejected_baseline_is_invalid() {
    let mut invalid = customer();
    invalid.tags.clear();
    let err = seeded()
        .of(invalid)
        .calling(create)
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::BaselineInvalid {
            violations: vec![Violation::new("tags", "size must be between 1 and 3")],
        }
    );
}
