//! Call mode: validating through a real method.
//!
//! A method under test validates its argument and fails with
//! [`CallError::Rejected`] when constraints are violated. Any other failure
//! is carried as [`CallError::Other`].

use std::fmt;

use ruleprobe_model::Violation;
use thiserror::Error;

use crate::engine::Validate;

/// Constraint violations raised by a validated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolations {
    method: String,
    violations: Vec<Violation>,
}

impl ConstraintViolations {
    pub fn new(method: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            method: method.into(),
            violations,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether some violation path is `property` itself or `property` on
    /// a method parameter, as in `param.property`.
    pub fn references(&self, property: &str) -> bool {
        self.violations.iter().any(|v| {
            v.property_path == property
                || v.property_path
                    .split_once('.')
                    .is_some_and(|(param, rest)| !param.is_empty() && rest == property)
        })
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}.{}", self.method, v))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl std::error::Error for ConstraintViolations {}

/// Failure of a method called in call mode.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("{0}")]
    Rejected(ConstraintViolations),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CallError {
    pub fn rejected(method: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::Rejected(ConstraintViolations::new(method, violations))
    }
}

impl From<ConstraintViolations> for CallError {
    fn from(value: ConstraintViolations) -> Self {
        Self::Rejected(value)
    }
}

/// Validates `argument` the way a validated method does on entry.
pub fn ensure_valid<T: Validate>(method: &str, argument: &T) -> Result<(), CallError> {
    let violations = argument.validate();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CallError::rejected(method, violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_matches_parameter_paths() {
        let rejection = ConstraintViolations::new(
            "create",
            vec![Violation::new("customer.name", "must not be blank")],
        );
        assert!(rejection.references("name"));
        assert!(rejection.references("customer.name"));
        assert!(!rejection.references("ame"));
        assert!(!rejection.references("customer"));
        assert_eq!(rejection.to_string(), "create.customer.name => must not be blank");
    }

    #[test]
    fn references_ignores_nested_properties() {
        let rejection = ConstraintViolations::new(
            "create",
            vec![Violation::new("customer.address.name", "must not be blank")],
        );
        assert!(!rejection.references("name"));
        assert!(rejection.references("address.name"));
        assert!(rejection.references("customer.address.name"));

        let unprefixed =
            ConstraintViolations::new("create", vec![Violation::new(".name", "must not be blank")]);
        assert!(!unprefixed.references("name"));
    }

    #[test]
    fn other_errors_convert() {
        let err: CallError = anyhow::anyhow!("database down").into();
        assert!(matches!(err, CallError::Other(_)));
        assert_eq!(err.to_string(), "database down");
    }
}
