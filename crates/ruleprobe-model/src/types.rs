//! Type descriptors for declared property types.
//!
//! Value generators are registered per [`TypeKind`]. The full
//! [`TypeDescriptor`] additionally records whether the property may be
//! absent and, for containers, the element types.

use std::fmt;

use serde::Serialize;

/// Declared type of a property, without container parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TypeKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    BigInt,
    Decimal,
    ScaledDecimal,
    Text,
    List,
    Set,
    Map,
    Array,
    Instant,
    Date,
    DateTime,
    Time,
    OffsetDateTime,
    OffsetTime,
    ZonedDateTime,
    Year,
    YearMonth,
    /// A nested aggregate with its own properties.
    Record(&'static str),
    /// Any other type, typically a domain value object.
    Custom(&'static str),
}

impl TypeKind {
    /// Whether values of this kind are numbers.
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::F32
                | Self::F64
                | Self::BigInt
                | Self::Decimal
                | Self::ScaledDecimal
        )
    }

    /// Whether values of this kind are points or spans in time.
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Instant
                | Self::Date
                | Self::DateTime
                | Self::Time
                | Self::OffsetDateTime
                | Self::OffsetTime
                | Self::ZonedDateTime
                | Self::Year
                | Self::YearMonth
        )
    }

    /// Whether values of this kind have a length.
    pub const fn is_sized(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::List | Self::Set | Self::Map | Self::Array
        )
    }

    /// Short lowercase name, also accepted by [`TypeKind::parse`].
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::ScaledDecimal => "scaled-decimal",
            Self::Text => "text",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Array => "array",
            Self::Instant => "instant",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::OffsetDateTime => "offset-datetime",
            Self::OffsetTime => "offset-time",
            Self::ZonedDateTime => "zoned-datetime",
            Self::Year => "year",
            Self::YearMonth => "year-month",
            Self::Record(name) | Self::Custom(name) => *name,
        }
    }

    /// Parse a built-in kind from its label.
    ///
    /// Records and custom kinds carry a static name and cannot be parsed.
    pub fn parse(s: &str) -> Option<Self> {
        Self::builtin()
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
    }

    /// All built-in kinds.
    pub const fn builtin() -> &'static [Self] {
        &[
            Self::Bool,
            Self::I8,
            Self::I16,
            Self::I32,
            Self::I64,
            Self::U8,
            Self::U16,
            Self::U32,
            Self::U64,
            Self::F32,
            Self::F64,
            Self::BigInt,
            Self::Decimal,
            Self::ScaledDecimal,
            Self::Text,
            Self::List,
            Self::Set,
            Self::Map,
            Self::Array,
            Self::Instant,
            Self::Date,
            Self::DateTime,
            Self::Time,
            Self::OffsetDateTime,
            Self::OffsetTime,
            Self::ZonedDateTime,
            Self::Year,
            Self::YearMonth,
        ]
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(name) => write!(f, "record {name}"),
            Self::Custom(name) => write!(f, "custom {name}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Full declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    kind: TypeKind,
    optional: bool,
    params: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            optional: false,
            params: Vec::new(),
        }
    }

    pub fn list(element: TypeDescriptor) -> Self {
        Self::new(TypeKind::List).with_params(vec![element])
    }

    pub fn set(element: TypeDescriptor) -> Self {
        Self::new(TypeKind::Set).with_params(vec![element])
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self::new(TypeKind::Array).with_params(vec![element])
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(TypeKind::Map).with_params(vec![key, value])
    }

    pub fn record(name: &'static str) -> Self {
        Self::new(TypeKind::Record(name))
    }

    pub fn custom(name: &'static str) -> Self {
        Self::new(TypeKind::Custom(name))
    }

    /// Marks the type as allowing absence.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<TypeDescriptor>) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    /// Element type of a list, set or array.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self.kind {
            TypeKind::List | TypeKind::Set | TypeKind::Array => self.params.first(),
            _ => None,
        }
    }

    /// Key and value types of a map.
    pub fn entry(&self) -> Option<(&TypeDescriptor, &TypeDescriptor)> {
        match (self.kind, self.params.as_slice()) {
            (TypeKind::Map, [key, value]) => Some((key, value)),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", params.join(", "))?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}
