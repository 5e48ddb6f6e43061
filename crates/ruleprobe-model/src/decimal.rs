//! Fixed-scale decimal value object.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, ParseBigDecimalError};

/// A decimal that always carries the same number of fractional digits.
///
/// Monetary and measurement values use this instead of a bare
/// [`BigDecimal`] so that equality does not depend on the scale the value
/// happened to be parsed with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaledDecimal(BigDecimal);

impl ScaledDecimal {
    /// Number of fractional digits kept.
    pub const SCALE: i64 = 15;

    /// Truncates `value` to [`Self::SCALE`] fractional digits.
    pub fn new(value: BigDecimal) -> Self {
        Self(value.with_scale(Self::SCALE))
    }

    pub fn zero() -> Self {
        Self::new(BigDecimal::from(0))
    }

    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_inner(self) -> BigDecimal {
        self.0
    }
}

impl From<i64> for ScaledDecimal {
    fn from(value: i64) -> Self {
        Self::new(BigDecimal::from(value))
    }
}

impl From<BigDecimal> for ScaledDecimal {
    fn from(value: BigDecimal) -> Self {
        Self::new(value)
    }
}

impl FromStr for ScaledDecimal {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(s).map(Self::new)
    }
}

impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
