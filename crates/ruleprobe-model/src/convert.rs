//! Conversions between Rust field types and [`Value`].
//!
//! [`Describe`] reports the declared type of a field, [`FromValue`] turns a
//! generated candidate back into the field type. Together with the
//! `From<T> for Value` impls they replace runtime reflection.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::decimal::ScaledDecimal;
use crate::error::ValueMismatch;
use crate::temporal::{OffsetTime, Year, YearMonth};
use crate::types::{TypeDescriptor, TypeKind};
use crate::value::Value;

/// Static type information for a field type.
pub trait Describe {
    fn descriptor() -> TypeDescriptor;
}

/// Conversion from a candidate value into a field type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueMismatch>;
}

macro_rules! scalar {
    ($($ty:ty => $kind:ident / $variant:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::new(TypeKind::$kind)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueMismatch> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(ValueMismatch::new(TypeKind::$kind.label(), &other)),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

scalar! {
    bool => Bool / Bool,
    i8 => I8 / I8,
    i16 => I16 / I16,
    i32 => I32 / I32,
    i64 => I64 / I64,
    u8 => U8 / U8,
    u16 => U16 / U16,
    u32 => U32 / U32,
    u64 => U64 / U64,
    f32 => F32 / F32,
    f64 => F64 / F64,
    BigInt => BigInt / BigInt,
    BigDecimal => Decimal / Decimal,
    ScaledDecimal => ScaledDecimal / Scaled,
    String => Text / Text,
    DateTime<Utc> => Instant / Instant,
    NaiveDate => Date / Date,
    NaiveDateTime => DateTime / DateTime,
    NaiveTime => Time / Time,
    DateTime<FixedOffset> => OffsetDateTime / OffsetDateTime,
    OffsetTime => OffsetTime / OffsetTime,
    DateTime<Local> => ZonedDateTime / Zoned,
    Year => Year / Year,
    YearMonth => YearMonth / YearMonth,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        Ok(value)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().optional()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

fn collect<T: FromValue, C: FromIterator<T>>(items: Vec<Value>) -> Result<C, ValueMismatch> {
    items.into_iter().map(T::from_value).collect()
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::List(items) => collect(items),
            other => Err(ValueMismatch::new("list", &other)),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Describe> Describe for Box<[T]> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }
}

impl<T: FromValue> FromValue for Box<[T]> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Array(items) => collect::<T, Vec<T>>(items).map(Vec::into_boxed_slice),
            other => Err(ValueMismatch::new("array", &other)),
        }
    }
}

impl<T: Into<Value>> From<Box<[T]>> for Value {
    fn from(value: Box<[T]>) -> Self {
        Value::Array(value.into_vec().into_iter().map(Into::into).collect())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Set(items) => collect(items),
            other => Err(ValueMismatch::new("set", &other)),
        }
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(value: BTreeSet<T>) -> Self {
        Value::Set(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Set(items) => collect(items),
            other => Err(ValueMismatch::new("set", &other)),
        }
    }
}

impl<T: Into<Value>> From<HashSet<T>> for Value {
    fn from(value: HashSet<T>) -> Self {
        Value::Set(value.into_iter().map(Into::into).collect())
    }
}

fn collect_entries<K, V, C>(entries: Vec<(Value, Value)>) -> Result<C, ValueMismatch>
where
    K: FromValue,
    V: FromValue,
    C: FromIterator<(K, V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))
        .collect()
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Map(entries) => collect_entries(entries),
            other => Err(ValueMismatch::new("map", &other)),
        }
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(value: BTreeMap<K, V>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::map(K::descriptor(), V::descriptor())
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue> FromValue for HashMap<K, V> {
    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Map(entries) => collect_entries(entries),
            other => Err(ValueMismatch::new("map", &other)),
        }
    }
}

impl<K: Into<Value>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(value: HashMap<K, V>) -> Self {
        Value::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Implements [`Describe`], [`FromValue`] and `From<T> for Value` for a
/// domain value object, carried as [`Value::Custom`].
///
/// The type must be `Clone + Send + Sync + 'static`.
#[macro_export]
macro_rules! custom_value {
    ($ty:ident) => {
        $crate::__opaque_value!($ty, custom);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __opaque_value {
    ($ty:ident, $ctor:ident) => {
        impl $crate::Describe for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::$ctor(stringify!($ty))
            }
        }

        impl $crate::FromValue for $ty {
            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::ValueMismatch> {
                match value.as_custom().and_then(|c| c.downcast_ref::<$ty>()) {
                    Some(inner) => Ok(inner.clone()),
                    None => Err($crate::ValueMismatch::new(stringify!($ty), &value)),
                }
            }
        }

        impl ::std::convert::From<$ty> for $crate::Value {
            fn from(value: $ty) -> Self {
                $crate::Value::Custom($crate::CustomValue::new(stringify!($ty), value))
            }
        }
    };
}
