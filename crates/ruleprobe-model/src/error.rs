//! Error types for the probing model.

use thiserror::Error;

/// Errors raised while declaring rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Property names must be non-empty.
    #[error("property name must not be empty")]
    EmptyPropertyName,

    /// Nested properties are expressed with a cascade rule, not a dotted path.
    #[error(
        "property '{0}' references a sub-object using dot notation; \
         declare a cascade rule on the parent property instead"
    )]
    NestedPropertyPath(String),
}

/// A value could not be converted into a property's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ValueMismatch {
    pub fn new(expected: &'static str, found: &crate::Value) -> Self {
        Self {
            expected,
            found: found.kind_name(),
        }
    }
}

/// Errors from building a copy with one property replaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// The type has no property with this name.
    #[error("property does not exist: {property}")]
    UnknownProperty { property: String },

    /// The replacement value does not fit the property.
    ///
    /// This usually means no setter accepts the value, for example a
    /// `FromValue` implementation for the property type is missing.
    #[error(
        "cannot assign value to property '{property}' ({mismatch}); \
         maybe there is no eligible FromValue conversion for its type?"
    )]
    TypeMismatch {
        property: String,
        mismatch: ValueMismatch,
    },

    /// A hand-written lens refused the value.
    #[error("copy of property '{property}' rejected: {reason}")]
    Rejected { property: String, reason: String },
}

impl CopyError {
    /// Property the failed copy targeted.
    pub fn property(&self) -> &str {
        match self {
            Self::UnknownProperty { property }
            | Self::TypeMismatch { property, .. }
            | Self::Rejected { property, .. } => property,
        }
    }

    /// Whether the failure points at a missing conversion rather than a bad name.
    pub fn is_missing_conversion(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_nested_path_message() {
        let err = ModelError::NestedPropertyPath("address.street".to_string());
        assert!(err.to_string().contains("dot notation"));
        assert!(err.to_string().contains("address.street"));
    }

    #[test]
    fn test_type_mismatch_hints_missing_conversion() {
        let err = CopyError::TypeMismatch {
            property: "age".to_string(),
            mismatch: ValueMismatch::new("i32", &Value::Text("x".to_string())),
        };
        assert_eq!(err.property(), "age");
        assert!(err.is_missing_conversion());
        assert!(err.to_string().contains("expected i32, found text"));
    }
}
