//! Property model: enumerating properties and copying with one field replaced.

use serde::Serialize;

use crate::convert::Describe;
use crate::error::CopyError;
use crate::types::{TypeDescriptor, TypeKind};
use crate::value::Value;

/// A marker attached to a property declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Marker {
    /// Validation descends into the property's own constraints.
    Cascade,
    /// A named marker that is visible when validating.
    Annotation(&'static str),
    /// A named marker that only documents intent and is invisible at runtime.
    SourceOnly(&'static str),
}

/// A declared property of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub ty: TypeDescriptor,
    pub markers: Vec<Marker>,
}

impl PropertyDescriptor {
    pub fn new(name: &'static str, ty: TypeDescriptor, markers: Vec<Marker>) -> Self {
        Self { name, ty, markers }
    }

    pub fn has_cascade(&self) -> bool {
        self.markers.contains(&Marker::Cascade)
    }

    /// Whether a runtime-visible annotation with this name is present.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.markers
            .iter()
            .any(|m| matches!(m, Marker::Annotation(a) if a.eq_ignore_ascii_case(name)))
    }

    /// Whether a documentation-only marker with this name is present.
    pub fn has_source_only(&self, name: &str) -> bool {
        self.markers
            .iter()
            .any(|m| matches!(m, Marker::SourceOnly(a) if a.eq_ignore_ascii_case(name)))
    }

    /// Name of the nested record type, if the property holds one.
    pub fn record_type(&self) -> Option<&'static str> {
        match self.ty.kind() {
            TypeKind::Record(name) => Some(name),
            _ => None,
        }
    }
}

/// A type whose properties can be enumerated and replaced one at a time.
///
/// Usually generated with [`property_model!`](crate::property_model). A
/// hand-written implementation must return a copy that differs from `self`
/// only in the named property and must not run any normalizing logic on
/// the new value.
pub trait PropertyModel: Clone {
    /// Short type name used in diagnostics.
    fn type_name() -> &'static str;

    /// Declared properties in declaration order.
    fn properties() -> Vec<PropertyDescriptor>;

    /// A copy of `self` with `name` set to `value`.
    fn with_property(&self, name: &str, value: Value) -> Result<Self, CopyError>;

    fn property(name: &str) -> Option<PropertyDescriptor> {
        Self::properties().into_iter().find(|p| p.name == name)
    }
}

/// Descriptor of a field, inferred from an accessor.
#[doc(hidden)]
pub fn describe_field<S, F: Describe>(_accessor: fn(S) -> F) -> TypeDescriptor {
    F::descriptor()
}

/// Implements [`PropertyModel`] for a struct from its field list.
///
/// Markers are written as attributes on the field names: `#[valid]` or
/// `#[cascade]` mark cascaded validation, `#[source_only(name)]` records a
/// marker that is not visible at runtime, and any other `#[name]` becomes a
/// runtime annotation. The struct itself also becomes usable as a nested
/// record value.
///
/// ```
/// use ruleprobe_model::{property_model, PropertyModel};
///
/// #[derive(Clone)]
/// struct Address {
///     street: String,
/// }
///
/// #[derive(Clone)]
/// struct Customer {
///     name: String,
///     nickname: Option<String>,
///     address: Address,
/// }
///
/// property_model!(Address { street });
/// property_model!(Customer {
///     name,
///     #[nullable]
///     nickname,
///     #[valid]
///     address,
/// });
///
/// assert_eq!(Customer::properties().len(), 3);
/// ```
#[macro_export]
macro_rules! property_model {
    ($ty:ident { $( $( #[$($marker:tt)*] )* $field:ident ),* $(,)? }) => {
        impl $crate::PropertyModel for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn properties() -> ::std::vec::Vec<$crate::PropertyDescriptor> {
                ::std::vec![
                    $(
                        $crate::PropertyDescriptor::new(
                            stringify!($field),
                            $crate::describe_field(|s: $ty| s.$field),
                            ::std::vec![$( $crate::__marker!($($marker)*) ),*],
                        )
                    ),*
                ]
            }

            fn with_property(
                &self,
                name: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::CopyError> {
                let mut copy = ::std::clone::Clone::clone(self);
                $(
                    if name == stringify!($field) {
                        copy.$field = $crate::FromValue::from_value(value).map_err(|mismatch| {
                            $crate::CopyError::TypeMismatch {
                                property: name.to_string(),
                                mismatch,
                            }
                        })?;
                        return Ok(copy);
                    }
                )*
                Err($crate::CopyError::UnknownProperty {
                    property: name.to_string(),
                })
            }
        }

        $crate::__opaque_value!($ty, record);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __marker {
    (valid) => {
        $crate::Marker::Cascade
    };
    (cascade) => {
        $crate::Marker::Cascade
    };
    (source_only($name:ident)) => {
        $crate::Marker::SourceOnly(stringify!($name))
    };
    ($name:ident) => {
        $crate::Marker::Annotation(stringify!($name))
    };
}
