//! Compliance errors.

use ruleprobe_model::{CopyError, ModelError, Violation};
use ruleprobe_source::SourceError;
use thiserror::Error;

/// Why a type failed a compliance check.
///
/// Every variant is terminal for the current assertion chain. Coverage
/// style variants carry the full list of offending properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    #[error(
        "the rule builder is not bound to an instance; \
         start the chain with ValidationAssert::of"
    )]
    Unbound,

    #[error("validation failed: no rules were defined")]
    NoRules,

    #[error("invalid rule: {0}")]
    InvalidProperty(#[from] ModelError),

    #[error("property does not exist: {property} (type {type_name})")]
    UnknownProperty {
        property: String,
        type_name: &'static str,
    },

    #[error("cannot generate values for property '{property}': {source}")]
    Source {
        property: String,
        source: SourceError,
    },

    #[error(
        "the supplied instance possibly contains invalid values: {}",
        join_violations(.violations)
    )]
    BaselineInvalid { violations: Vec<Violation> },

    #[error("validation failed: {message}")]
    CustomFunction { message: String },

    #[error(
        "validation failed for property: {property} [{candidate}]; violated: [{}]",
        join_violations(.violations)
    )]
    MutationNotDetected {
        property: String,
        candidate: String,
        violations: Vec<Violation>,
    },

    #[error(
        "mutating property {property} [{candidate}] also violated other properties: {}",
        join_violations(.violations)
    )]
    UnexpectedViolations {
        property: String,
        candidate: String,
        violations: Vec<Violation>,
    },

    #[error("call was not rejected for property: {property} [{candidate}] ({outcome})")]
    CallNotRejected {
        property: String,
        candidate: String,
        outcome: String,
    },

    #[error(
        "call was rejected for property {property} [{candidate}], \
         but the rejection does not mention it: {message}"
    )]
    RejectionMissesProperty {
        property: String,
        candidate: String,
        message: String,
    },

    #[error("missing cascade marker for properties: [{}]", .properties.join(", "))]
    MissingCascade { properties: Vec<String> },

    #[error(
        "missing nullable marker for properties: [{}]{}",
        .properties.join(", "),
        source_only_note(.source_only)
    )]
    MissingNullable {
        properties: Vec<String>,
        /// Properties that only carry a marker invisible at runtime.
        source_only: Vec<String>,
    },

    #[error("not all properties have validation rules: [{}]", .properties.join(", "))]
    MissingCoverage { properties: Vec<String> },

    #[error(
        "missing cascade marker for nested records: [{}]; cascading is assumed for \
         nested records, register exceptions as non-aggregate types",
        .properties.join(", ")
    )]
    NestedCascade { properties: Vec<String> },

    #[error("error creating copy with altered property {property} [{candidate}]: {source}")]
    CopyConstruction {
        property: String,
        candidate: String,
        source: CopyError,
    },

    #[error("method {method} not found on {type_name}")]
    MethodNotFound { type_name: String, method: String },

    #[error("method {method} on {type_name} is not wired into validation: {reason}")]
    MethodNotValidated {
        type_name: String,
        method: String,
        reason: String,
    },
}

impl ComplianceError {
    /// Whether the error points at a broken rule declaration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Unbound
                | Self::NoRules
                | Self::InvalidProperty(_)
                | Self::UnknownProperty { .. }
                | Self::Source { .. }
        )
    }

    /// Whether the error lists properties lacking rules or markers.
    pub fn is_coverage(&self) -> bool {
        matches!(
            self,
            Self::MissingCascade { .. }
                | Self::MissingNullable { .. }
                | Self::MissingCoverage { .. }
                | Self::NestedCascade { .. }
        )
    }

    /// Properties named by the error.
    pub fn properties(&self) -> Vec<&str> {
        match self {
            Self::UnknownProperty { property, .. }
            | Self::Source { property, .. }
            | Self::MutationNotDetected { property, .. }
            | Self::UnexpectedViolations { property, .. }
            | Self::CallNotRejected { property, .. }
            | Self::RejectionMissesProperty { property, .. }
            | Self::CopyConstruction { property, .. } => vec![property.as_str()],
            Self::MissingCascade { properties }
            | Self::MissingCoverage { properties }
            | Self::NestedCascade { properties }
            | Self::MissingNullable { properties, .. } => {
                properties.iter().map(String::as_str).collect()
            }
            Self::BaselineInvalid { violations } => violations
                .iter()
                .map(|v| v.property_path.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn source_only_note(properties: &[String]) -> String {
    if properties.is_empty() {
        String::new()
    } else {
        format!(
            "; note: [{}] carry a matching marker that is not visible at runtime, \
             use a runtime annotation instead",
            properties.join(", ")
        )
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
