//! Null and inert sources.

use ruleprobe_model::{SourceKind, Value};
use tracing::debug;

use crate::source::{TypedSource, candidates, nothing};

/// `Value::Null` for properties that may be absent.
///
/// A property whose type cannot hold absence yields no candidates; a
/// registered type-specific generator takes precedence over this rule.
pub fn null() -> TypedSource {
    TypedSource::new(SourceKind::Null).with_fallback(|ty, _, _| {
        if ty.is_optional() {
            Ok(candidates(vec![Value::Null]))
        } else {
            debug!(ty = %ty, "type cannot hold null, no candidates");
            Ok(nothing())
        }
    })
}

/// Never produces values.
pub fn inert() -> TypedSource {
    TypedSource::new(SourceKind::Inert).with_fallback(|_, _, _| Ok(nothing()))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ruleprobe_model::{TypeDescriptor, TypeKind};

    use super::*;
    use crate::source::ValueSource;

    #[test]
    fn null_only_for_optional_types() {
        let mut rng = StdRng::seed_from_u64(0);
        let optional = TypeDescriptor::new(TypeKind::Text).optional();
        let values: Vec<Value> = null().values(&optional, &[], &mut rng).unwrap().collect();
        assert_eq!(values, vec![Value::Null]);

        let required = TypeDescriptor::new(TypeKind::Text);
        assert_eq!(null().values(&required, &[], &mut rng).unwrap().count(), 0);
    }

    #[test]
    fn inert_accepts_anything() {
        let mut rng = StdRng::seed_from_u64(0);
        let ty = TypeDescriptor::record("Address");
        assert_eq!(inert().values(&ty, &[], &mut rng).unwrap().count(), 0);
    }
}
