//! Value source errors.

use ruleprobe_model::{SourceKind, TypeKind};
use thiserror::Error;

/// Errors raised while producing candidate values.
///
/// All of these point at a broken rule declaration, not at the type under
/// test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("no {kind} generator registered for type {ty}")]
    UnsupportedType { kind: SourceKind, ty: String },

    #[error("{kind} values need an integer bound as first argument")]
    MissingArgument { kind: SourceKind },

    #[error("{kind} argument '{value}' is not an integer")]
    InvalidArgument { kind: SourceKind, value: String },

    #[error("size bound must not be negative, got {0}")]
    NegativeSize(i64),

    #[error("cannot fill {container} with elements of type {element}")]
    UnsupportedElement { container: TypeKind, element: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;
