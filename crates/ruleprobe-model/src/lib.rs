//! Value, type and rule model for rule-based validation probing.

pub mod convert;
pub mod decimal;
pub mod endpoint;
pub mod error;
pub mod property;
pub mod rule;
pub mod temporal;
pub mod types;
pub mod value;
pub mod violation;

pub use convert::{Describe, FromValue};
pub use decimal::ScaledDecimal;
pub use endpoint::{EndpointDescriptor, MethodSignature, ParamDescriptor};
pub use error::{CopyError, ModelError, Result, ValueMismatch};
#[doc(hidden)]
pub use property::describe_field;
pub use property::{Marker, PropertyDescriptor, PropertyModel};
pub use rule::{Rule, RuleArg, SourceKind};
pub use temporal::{OffsetTime, Year, YearMonth};
pub use types::{TypeDescriptor, TypeKind};
pub use value::{CustomValue, Value};
pub use violation::Violation;
