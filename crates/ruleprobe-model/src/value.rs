//! Dynamically typed property values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;
use chrono::{
    DateTime, Days, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    Utc,
};

use crate::decimal::ScaledDecimal;
use crate::temporal::{OffsetTime, Year, YearMonth};
use crate::types::{TypeDescriptor, TypeKind};

/// A candidate value for a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value.
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    BigInt(BigInt),
    Decimal(BigDecimal),
    Scaled(ScaledDecimal),
    Text(String),
    List(Vec<Value>),
    /// Distinct elements in insertion order.
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Array(Vec<Value>),
    Instant(DateTime<Utc>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    OffsetDateTime(DateTime<FixedOffset>),
    OffsetTime(OffsetTime),
    Zoned(DateTime<Local>),
    Year(Year),
    YearMonth(YearMonth),
    Custom(CustomValue),
}

impl Value {
    /// Lowercase name of the variant, used in conversion diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::BigInt(_) => "bigint",
            Self::Decimal(_) => "decimal",
            Self::Scaled(_) => "scaled-decimal",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Array(_) => "array",
            Self::Instant(_) => "instant",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Time(_) => "time",
            Self::OffsetDateTime(_) => "offset-datetime",
            Self::OffsetTime(_) => "offset-time",
            Self::Zoned(_) => "zoned-datetime",
            Self::Year(_) => "year",
            Self::YearMonth(_) => "year-month",
            Self::Custom(custom) => custom.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Length of text (in characters) or containers, `None` for anything else.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::List(items) | Self::Set(items) | Self::Array(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomValue> {
        match self {
            Self::Custom(custom) => Some(custom),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Scaled(v) => write!(f, "{v}"),
            // Debug output keeps whitespace-only strings readable.
            Self::Text(v) => write!(f, "{v:?}"),
            Self::List(items) | Self::Set(items) | Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Instant(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Date(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::OffsetDateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::OffsetTime(v) => write!(f, "{v}"),
            Self::Zoned(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Year(v) => write!(f, "{v}"),
            Self::YearMonth(v) => write!(f, "{v}"),
            Self::Custom(v) => write!(f, "<{}>", v.type_name()),
        }
    }
}

/// An opaque value of a user-defined type.
///
/// Equality is identity: two custom values are equal only when they share
/// the same allocation.
#[derive(Clone)]
pub struct CustomValue {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(type_name: &'static str, value: T) -> Self {
        Self {
            type_name,
            inner: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl TypeDescriptor {
    /// The `index`-th filler value of this type.
    ///
    /// Size candidates fill containers with these. Distinct indexes give
    /// distinct values; an index past the end of the type's domain gives
    /// `None` instead of repeating an earlier value. Records and custom
    /// types have no generic filler.
    pub fn placeholder(&self, index: usize) -> Option<Value> {
        let n = i64::try_from(index).ok()?;
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let instant = || epoch.checked_add_signed(TimeDelta::try_seconds(n)?);
        let time_of_day =
            || NaiveTime::from_num_seconds_from_midnight_opt(u32::try_from(index).ok()?, 0);
        let value = match self.kind() {
            TypeKind::Bool => match index {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                _ => return None,
            },
            TypeKind::I8 => Value::I8(i8::try_from(index).ok()?),
            TypeKind::I16 => Value::I16(i16::try_from(index).ok()?),
            TypeKind::I32 => Value::I32(i32::try_from(index).ok()?),
            TypeKind::I64 => Value::I64(n),
            TypeKind::U8 => Value::U8(u8::try_from(index).ok()?),
            TypeKind::U16 => Value::U16(u16::try_from(index).ok()?),
            TypeKind::U32 => Value::U32(u32::try_from(index).ok()?),
            TypeKind::U64 => Value::U64(u64::try_from(index).ok()?),
            TypeKind::F32 => Value::F32(f32::from(u16::try_from(index).ok()?)),
            TypeKind::F64 => Value::F64(f64::from(u32::try_from(index).ok()?)),
            TypeKind::BigInt => Value::BigInt(BigInt::from(n)),
            TypeKind::Decimal => Value::Decimal(BigDecimal::from(n)),
            TypeKind::ScaledDecimal => Value::Scaled(ScaledDecimal::from(n)),
            TypeKind::Text => Value::Text(format!("dummy_{index}")),
            TypeKind::List => Value::List(vec![self.element()?.placeholder(index)?]),
            TypeKind::Set => Value::Set(vec![self.element()?.placeholder(index)?]),
            TypeKind::Array => Value::Array(vec![self.element()?.placeholder(index)?]),
            TypeKind::Map => {
                let (key, value) = self.entry()?;
                Value::Map(vec![(key.placeholder(index)?, value.placeholder(index)?)])
            }
            TypeKind::Instant => Value::Instant(instant()?),
            TypeKind::Date => Value::Date(
                epoch
                    .date_naive()
                    .checked_add_days(Days::new(u64::try_from(index).ok()?))?,
            ),
            TypeKind::DateTime => Value::DateTime(instant()?.naive_utc()),
            TypeKind::Time => Value::Time(time_of_day()?),
            TypeKind::OffsetDateTime => Value::OffsetDateTime(instant()?.fixed_offset()),
            TypeKind::OffsetTime => Value::OffsetTime(OffsetTime::new(time_of_day()?, Utc.fix())),
            TypeKind::ZonedDateTime => Value::Zoned(instant()?.with_timezone(&Local)),
            TypeKind::Year => Value::Year(Year(1970_i32.checked_add(i32::try_from(index).ok()?)?)),
            TypeKind::YearMonth => {
                let months = i32::try_from(index).ok()?;
                YearMonth::new(1970_i32.checked_add(months / 12)?, (months % 12) as u32 + 1)
                    .map(Value::YearMonth)?
            }
            TypeKind::Record(_) | TypeKind::Custom(_) => return None,
        };
        Some(value)
    }
}
