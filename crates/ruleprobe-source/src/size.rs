//! Strings and containers of a given length.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ruleprobe_model::{RuleArg, SourceKind, TypeDescriptor, TypeKind, Value};

use crate::error::{Result, SourceError};
use crate::source::{Candidates, TypedSource, bound};

/// Offsets above the bound; exhaustive enumeration is pointless there.
const ABOVE_OFFSETS: [usize; 3] = [1, 2, 6];

/// Printable ASCII used for generated strings.
const PRINTABLE: std::ops::Range<u8> = 32..127;

const SIZED: [TypeKind; 5] = [
    TypeKind::Text,
    TypeKind::List,
    TypeKind::Set,
    TypeKind::Map,
    TypeKind::Array,
];

/// Values with every length below the bound.
pub fn size_below() -> TypedSource {
    sized(SourceKind::SizeBelow)
}

/// Values with a few lengths above the bound.
pub fn size_above() -> TypedSource {
    sized(SourceKind::SizeAbove)
}

fn sized(kind: SourceKind) -> TypedSource {
    let mut source = TypedSource::new(kind);
    for ty in SIZED {
        source.register(ty, move |ty, args, rng| sized_values(kind, ty, args, rng));
    }
    source
}

/// Lazily produced lengths.
pub type Lengths = Box<dyn Iterator<Item = usize> + Send>;

/// Candidate lengths for `kind` around the bound.
pub fn lengths(kind: SourceKind, bound: i64) -> Result<Lengths> {
    let bound = usize::try_from(bound).map_err(|_| SourceError::NegativeSize(bound))?;
    Ok(match kind {
        SourceKind::SizeAbove => Box::new(
            ABOVE_OFFSETS
                .into_iter()
                .filter_map(move |offset| bound.checked_add(offset)),
        ),
        _ => Box::new(0..bound),
    })
}

/// The largest length [`lengths`] yields, if any.
fn longest(kind: SourceKind, bound: i64) -> Option<usize> {
    let bound = usize::try_from(bound).ok()?;
    match kind {
        SourceKind::SizeAbove => ABOVE_OFFSETS
            .iter()
            .rev()
            .find_map(|offset| bound.checked_add(*offset)),
        _ => bound.checked_sub(1),
    }
}

fn sized_values(
    kind: SourceKind,
    ty: &TypeDescriptor,
    args: &[RuleArg],
    rng: &mut StdRng,
) -> Result<Candidates> {
    let bound = bound(kind, args)?;
    let lengths = lengths(kind, bound)?;

    if ty.kind() != TypeKind::Text {
        check_elements(ty, longest(kind, bound))?;
    }

    let ty = ty.clone();
    let mut rng = StdRng::seed_from_u64(rng.r#gen());
    Ok(Box::new(lengths.map(move |len| value_of_length(&ty, len, &mut rng))))
}

/// Containers need a filler for their elements. Set elements and map keys
/// must stay distinct up to the longest requested length.
fn check_elements(ty: &TypeDescriptor, longest: Option<usize>) -> Result<()> {
    let last = longest.unwrap_or_default().saturating_sub(1);
    let fillable = match (ty.kind(), ty.element(), ty.entry()) {
        (TypeKind::Map, _, Some((key, value))) => {
            key.placeholder(last).is_some() && value.placeholder(0).is_some()
        }
        (TypeKind::Set, Some(element), _) => element.placeholder(last).is_some(),
        (_, Some(element), _) => element.placeholder(0).is_some(),
        _ => false,
    };
    if fillable {
        Ok(())
    } else {
        Err(SourceError::UnsupportedElement {
            container: ty.kind(),
            element: ty
                .params()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// Elements that may repeat wrap around once the type runs out of fillers.
fn filler(ty: &TypeDescriptor, index: usize) -> Option<Value> {
    ty.placeholder(index).or_else(|| ty.placeholder(0))
}

fn value_of_length(ty: &TypeDescriptor, len: usize, rng: &mut StdRng) -> Value {
    let fill = |element: &TypeDescriptor| -> Vec<Value> {
        (0..len).filter_map(|i| filler(element, i)).collect()
    };
    match (ty.kind(), ty.element(), ty.entry()) {
        (TypeKind::List, Some(element), _) => Value::List(fill(element)),
        (TypeKind::Set, Some(element), _) => Value::Set(
            (0..len).filter_map(|i| element.placeholder(i)).collect(),
        ),
        (TypeKind::Array, Some(element), _) => Value::Array(fill(element)),
        (TypeKind::Map, _, Some((key, value))) => Value::Map(
            (0..len)
                .filter_map(|i| Some((key.placeholder(i)?, filler(value, i)?)))
                .collect(),
        ),
        _ => Value::Text(
            (0..len)
                .map(|_| char::from(rng.gen_range(PRINTABLE)))
                .collect(),
        ),
    }
}
