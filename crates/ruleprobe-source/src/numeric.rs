//! Numeric sources: above max, below min and zero.
//!
//! Every numeric representation gets its own generator since boundary
//! arithmetic differs: fixed-width integers step by one and stop at the type
//! limits, floats step by a tenth and use the largest finite magnitude,
//! arbitrary precision types have no limit and use a far away extreme.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;
use rand::Rng;
use rand::rngs::StdRng;
use ruleprobe_model::{RuleArg, ScaledDecimal, SourceKind, TypeKind, Value};

use crate::error::Result;
use crate::source::{Candidates, TypedSource, bound, candidates};

/// Interior samples drawn above the bound.
const ABOVE_SAMPLES: usize = 1;
/// Interior samples drawn below the bound.
const BELOW_SAMPLES: usize = 5;

/// Largest finite double, used as the extreme for decimals.
const DECIMAL_EXTREME: &str = "1.7976931348623157e308";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

impl Side {
    fn kind(self) -> SourceKind {
        match self {
            Self::Above => SourceKind::AboveMax,
            Self::Below => SourceKind::BelowMin,
        }
    }

    fn samples(self) -> usize {
        match self {
            Self::Above => ABOVE_SAMPLES,
            Self::Below => BELOW_SAMPLES,
        }
    }
}

/// Values strictly greater than the bound.
pub fn above_max() -> TypedSource {
    outside(Side::Above)
}

/// Values strictly less than the bound.
pub fn below_min() -> TypedSource {
    outside(Side::Below)
}

/// The zero value of each numeric type.
pub fn zero() -> TypedSource {
    let zeros: [(TypeKind, fn() -> Value); 13] = [
        (TypeKind::I8, || Value::I8(0)),
        (TypeKind::I16, || Value::I16(0)),
        (TypeKind::I32, || Value::I32(0)),
        (TypeKind::I64, || Value::I64(0)),
        (TypeKind::U8, || Value::U8(0)),
        (TypeKind::U16, || Value::U16(0)),
        (TypeKind::U32, || Value::U32(0)),
        (TypeKind::U64, || Value::U64(0)),
        (TypeKind::F32, || Value::F32(0.0)),
        (TypeKind::F64, || Value::F64(0.0)),
        (TypeKind::BigInt, || Value::BigInt(BigInt::from(0))),
        (TypeKind::Decimal, || Value::Decimal(BigDecimal::from(0))),
        (TypeKind::ScaledDecimal, || Value::Scaled(ScaledDecimal::zero())),
    ];
    let mut source = TypedSource::new(SourceKind::Zero);
    for (ty, make) in zeros {
        source.register(ty, move |_, _, _| Ok(candidates(vec![make()])));
    }
    source
}

fn outside(side: Side) -> TypedSource {
    let mut source = TypedSource::new(side.kind());

    macro_rules! integers {
        ($($kind:ident => $ty:ty),* $(,)?) => {
            $(
                source.register(TypeKind::$kind, move |_, args, rng| {
                    integer(side, args, rng, i128::from(<$ty>::MIN), i128::from(<$ty>::MAX), |v| {
                        Value::$kind(v as $ty)
                    })
                });
            )*
        };
    }

    integers! {
        I8 => i8,
        I16 => i16,
        I32 => i32,
        I64 => i64,
        U8 => u8,
        U16 => u16,
        U32 => u32,
        U64 => u64,
    }

    source.register(TypeKind::F32, move |_, args, rng| {
        let bound = bound(side.kind(), args)?;
        Ok(candidates(float32(side, bound, rng)))
    });
    source.register(TypeKind::F64, move |_, args, rng| {
        let bound = bound(side.kind(), args)?;
        Ok(candidates(float64(side, bound, rng)))
    });
    source.register(TypeKind::BigInt, move |_, args, rng| {
        let bound = bound(side.kind(), args)?;
        Ok(candidates(big_integer(side, bound, rng)))
    });
    source.register(TypeKind::Decimal, move |_, args, rng| {
        let bound = bound(side.kind(), args)?;
        Ok(candidates(
            decimal(side, bound, rng).into_iter().map(Value::Decimal).collect(),
        ))
    });
    source.register(TypeKind::ScaledDecimal, move |_, args, rng| {
        let bound = bound(side.kind(), args)?;
        Ok(candidates(
            decimal(side, bound, rng)
                .into_iter()
                .map(|v| Value::Scaled(ScaledDecimal::new(v)))
                .collect(),
        ))
    });

    source
}

/// Fixed-width integers, computed in `i128` so no bound overflows.
///
/// The tightest value comes first, then the type limit, then interior
/// samples. The sequence is empty when no value of the type lies beyond the
/// bound.
fn integer(
    side: Side,
    args: &[RuleArg],
    rng: &mut StdRng,
    min: i128,
    max: i128,
    wrap: impl Fn(i128) -> Value,
) -> Result<Candidates> {
    let bound = i128::from(bound(side.kind(), args)?);
    let (tightest, extreme) = match side {
        Side::Above => ((bound + 1).max(min), max),
        Side::Below => ((bound - 1).min(max), min),
    };
    let in_range = match side {
        Side::Above => tightest <= max,
        Side::Below => tightest >= min,
    };
    if !in_range {
        return Ok(candidates(Vec::new()));
    }

    let mut values = vec![tightest];
    if extreme != tightest {
        values.push(extreme);
        let (low, high) = if tightest < extreme {
            (tightest, extreme)
        } else {
            (extreme, tightest)
        };
        for _ in 0..side.samples() {
            values.push(rng.gen_range(low..=high));
        }
    }
    Ok(candidates(values.into_iter().map(wrap).collect()))
}

fn float64(side: Side, bound: i64, rng: &mut StdRng) -> Vec<Value> {
    let anchor = bound as f64;
    let (tightest, extreme) = match side {
        Side::Above => ((anchor + 0.1).max(anchor.next_up()), f64::MAX),
        Side::Below => ((anchor - 0.1).min(anchor.next_down()), f64::MIN),
    };
    let mut values = vec![tightest, extreme];
    for _ in 0..side.samples() {
        let t: f64 = rng.r#gen();
        let sample = tightest * (1.0 - t) + extreme * t;
        values.push(match side {
            Side::Above => sample.clamp(tightest, f64::MAX),
            Side::Below => sample.clamp(f64::MIN, tightest),
        });
    }
    values.into_iter().map(Value::F64).collect()
}

fn float32(side: Side, bound: i64, rng: &mut StdRng) -> Vec<Value> {
    let anchor = bound as f32;
    let (tightest, extreme) = match side {
        Side::Above => ((anchor + 0.1).max(anchor.next_up()), f32::MAX),
        Side::Below => ((anchor - 0.1).min(anchor.next_down()), f32::MIN),
    };
    let mut values = vec![tightest, extreme];
    for _ in 0..side.samples() {
        let t: f32 = rng.r#gen();
        let sample = tightest * (1.0 - t) + extreme * t;
        values.push(match side {
            Side::Above => sample.clamp(tightest, f32::MAX),
            Side::Below => sample.clamp(f32::MIN, tightest),
        });
    }
    values.into_iter().map(Value::F32).collect()
}

fn big_integer(side: Side, bound: i64, rng: &mut StdRng) -> Vec<Value> {
    let bound = BigInt::from(bound);
    let (tightest, extreme) = match side {
        Side::Above => (&bound + BigInt::from(1), BigInt::from(i128::MAX)),
        Side::Below => (&bound - BigInt::from(1), BigInt::from(i128::MIN)),
    };
    let mut values = vec![tightest, extreme];
    for _ in 0..side.samples() {
        let offset = BigInt::from(rng.gen_range(1..i64::MAX));
        values.push(match side {
            Side::Above => &bound + offset,
            Side::Below => &bound - offset,
        });
    }
    values.into_iter().map(Value::BigInt).collect()
}

fn decimal(side: Side, bound: i64, rng: &mut StdRng) -> Vec<BigDecimal> {
    let bound = BigDecimal::from(bound);
    let tenth = BigDecimal::new(BigInt::from(1), 1);
    let extreme =
        BigDecimal::from_str(DECIMAL_EXTREME).unwrap_or_else(|_| BigDecimal::from(i64::MAX));
    let mut values = match side {
        Side::Above => vec![&bound + &tenth, extreme],
        Side::Below => vec![&bound - &tenth, -extreme],
    };
    for _ in 0..side.samples() {
        let offset = BigDecimal::new(BigInt::from(rng.gen_range(1..1_000_000_i64)), 1);
        values.push(match side {
            Side::Above => &bound + offset,
            Side::Below => &bound - offset,
        });
    }
    values
}
