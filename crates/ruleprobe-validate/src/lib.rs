//! Rule-based validation probing.
//!
//! Rules declare which constraints each property of a type carries. The
//! validator starts from a valid instance, replaces one property at a time
//! with values generated to violate the declared constraint, and asserts
//! that validation rejects every such copy because of that property. It
//! then checks that every property is covered by a rule and that cascading
//! and nullable markers are present where the rules require them.

pub mod assert;
pub mod builder;
pub mod call;
pub mod engine;
pub mod error;
pub mod options;
pub mod rules;
pub mod validator;

pub use assert::{CallBuilder, MethodChecker, ValidationAssert};
pub use builder::RuleBuilder;
pub use call::{CallError, ConstraintViolations, ensure_valid};
pub use engine::{BeanValidation, Validate, ValidationEngine, nested};
pub use error::{ComplianceError, Result};
pub use options::{NonAggregateTypes, ValidatorOptions, ViolationPolicy};
pub use rules::{RuleFamilies, SizeRule, ValidationFunction, ValidationRulesData};
pub use validator::{AssertionParameter, Invocation, RuleValidator};
