//! Assertions validated directly through an engine.

mod common;

use common::{Customer, customer, seeded};
use ruleprobe_model::{ModelError, Violation};
use ruleprobe_validate::{
    ComplianceError, RuleBuilder, RuleFamilies, Validate, ValidationAssert, ValidatorOptions,
    ViolationPolicy,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("ruleprobe_validate=debug")
        .try_init();
}

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
fn compliant_customer_passes() {
    init_tracing();
    let result = seeded()
        .of(customer())
        .using_bean_validation()
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn missing_upper_bound_is_detected() {
    let lenient = |c: &Customer| -> Vec<Violation> {
        c.validate()
            .into_iter()
            .filter(|v| !v.message.contains("less than"))
            .collect()
    };
    let err = seeded()
        .of(customer())
        .using_engine(lenient)
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    match err {
        ComplianceError::MutationNotDetected {
            property,
            candidate,
            violations,
        } => {
            assert_eq!(property, "age");
            assert_eq!(candidate, "121");
            assert!(violations.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_baseline_is_reported_with_all_violations() {
    let mut invalid = customer();
    invalid.age = 10;
    invalid.name = " ".to_string();
    let err = seeded()
        .of(invalid)
        .using_bean_validation()
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"the supplied instance possibly contains invalid values: age => must be greater than or equal to 18 | name => must not be blank"
    );
}

#[test]
fn collateral_violations_depend_on_policy() {
    let noisy = |c: &Customer| -> Vec<Violation> {
        let mut violations = c.validate();
        if c.name.trim().is_empty() {
            violations.push(Violation::new("nickname", "derived from name"));
        }
        violations
    };

    let err = seeded()
        .of(customer())
        .using_engine(noisy)
        .with_additional_rules(customer_rules)
        .is_compliant()
        .unwrap_err();
    assert!(matches!(
        &err,
        ComplianceError::UnexpectedViolations { property, violations, .. }
            if property == "name" && violations[0].property_path == "nickname"
    ));

    let lenient = ValidationAssert::with_options(
        ValidatorOptions::default()
            .with_seed(common::SEED)
            .with_violation_policy(ViolationPolicy::ContainsTarget),
    );
    let result = lenient
        .of(customer())
        .using_engine(noisy)
        .with_additional_rules(customer_rules)
        .is_compliant();
    assert_eq!(result, Ok(()));
}

#[test]
fn custom_functions_run_against_the_instance() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .with_additional_rules(customer_rules)
        .custom(|c: &Customer| {
            if c.nickname.is_some() {
                Ok(())
            } else {
                Err("nickname is required for customers".to_string())
            }
        })
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::CustomFunction {
            message: "nickname is required for customers".to_string()
        }
    );
}

#[test]
fn custom_functions_alone_are_rules() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .custom(|c: &Customer| if c.age > 0 { Ok(()) } else { Err("age".to_string()) })
        .is_compliant()
        .unwrap_err();
    assert!(matches!(err, ComplianceError::MissingCoverage { .. }));
}

#[test]
fn empty_chain_has_no_rules() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .is_compliant()
        .unwrap_err();
    assert_eq!(err, ComplianceError::NoRules);
    insta::assert_snapshot!(err.to_string(), @"validation failed: no rules were defined");
}

#[test]
fn unknown_property_is_a_configuration_error() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .not_blank("surname")
        .is_compliant()
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err,
        ComplianceError::UnknownProperty {
            property: "surname".to_string(),
            type_name: "Customer",
        }
    );
}

#[test]
fn dotted_paths_are_rejected() {
    let err = seeded()
        .of(customer())
        .using_bean_validation()
        .not_blank("address.street")
        .between("age", 18, 120)
        .is_compliant()
        .unwrap_err();
    assert_eq!(
        err,
        ComplianceError::InvalidProperty(ModelError::NestedPropertyPath(
            "address.street".to_string()
        ))
    );
}

#[test]
fn unbound_builder_fails() {
    let err = customer_rules(RuleBuilder::new()).is_compliant().unwrap_err();
    assert_eq!(err, ComplianceError::Unbound);
}

#[test]
#[should_panic(expected = "rule builder dropped without calling is_compliant")]
fn forgetting_is_compliant_panics() {
    let builder = seeded()
        .of(customer())
        .using_bean_validation()
        .not_blank("name");
    drop(builder);
}
