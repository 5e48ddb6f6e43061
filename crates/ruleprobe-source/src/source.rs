//! The value source seam and its type-keyed implementation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use ruleprobe_model::{RuleArg, SourceKind, TypeDescriptor, TypeKind, Value};

use crate::error::{Result, SourceError};

/// A lazy, finite sequence of candidate values.
pub type Candidates = Box<dyn Iterator<Item = Value> + Send>;

/// Produces candidates for one declared type.
///
/// Random interior samples must be drawn from `rng` so that seeded
/// registries give reproducible sequences.
pub type Generator =
    Arc<dyn Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates> + Send + Sync>;

/// A family of boundary or invalid values for declared property types.
pub trait ValueSource: Send + Sync {
    /// Kind of values this source produces.
    fn kind(&self) -> SourceKind;

    /// Candidates for a property of type `ty`.
    ///
    /// Each call returns a new sequence; no cursor is shared between calls.
    fn values(&self, ty: &TypeDescriptor, args: &[RuleArg], rng: &mut StdRng)
    -> Result<Candidates>;

    /// Types with a dedicated generator.
    fn supported_types(&self) -> Vec<TypeKind>;
}

/// A [`ValueSource`] dispatching on the declared [`TypeKind`].
#[derive(Clone)]
pub struct TypedSource {
    kind: SourceKind,
    generators: HashMap<TypeKind, Generator>,
    fallback: Option<Generator>,
}

impl TypedSource {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            generators: HashMap::new(),
            fallback: None,
        }
    }

    /// Adds or replaces the generator for `ty`.
    pub fn register<F>(&mut self, ty: TypeKind, generator: F)
    where
        F: Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates>
            + Send
            + Sync
            + 'static,
    {
        self.generators.insert(ty, Arc::new(generator));
    }

    /// Generator used for types without a dedicated one.
    #[must_use]
    pub fn with_fallback<F>(mut self, generator: F) -> Self
    where
        F: Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates>
            + Send
            + Sync
            + 'static,
    {
        self.fallback = Some(Arc::new(generator));
        self
    }

    /// Builder form of [`TypedSource::register`].
    #[must_use]
    pub fn with<F>(mut self, ty: TypeKind, generator: F) -> Self
    where
        F: Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates>
            + Send
            + Sync
            + 'static,
    {
        self.register(ty, generator);
        self
    }

    pub fn supports(&self, ty: TypeKind) -> bool {
        self.fallback.is_some() || self.generators.contains_key(&ty)
    }
}

impl ValueSource for TypedSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn values(
        &self,
        ty: &TypeDescriptor,
        args: &[RuleArg],
        rng: &mut StdRng,
    ) -> Result<Candidates> {
        let generator = self
            .generators
            .get(&ty.kind())
            .or(self.fallback.as_ref())
            .ok_or_else(|| SourceError::UnsupportedType {
                kind: self.kind,
                ty: ty.to_string(),
            })?;
        generator(ty, args, rng)
    }

    fn supported_types(&self) -> Vec<TypeKind> {
        let mut types: Vec<TypeKind> = self.generators.keys().copied().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for TypedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSource")
            .field("kind", &self.kind)
            .field("types", &self.supported_types())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Wraps a fixed list of values.
pub(crate) fn candidates(values: Vec<Value>) -> Candidates {
    Box::new(values.into_iter())
}

/// No candidates.
pub(crate) fn nothing() -> Candidates {
    Box::new(std::iter::empty())
}

/// Integer bound from the first rule argument.
pub(crate) fn bound(kind: SourceKind, args: &[RuleArg]) -> Result<i64> {
    match args.first() {
        Some(RuleArg::Int(value)) => Ok(*value),
        Some(RuleArg::Text(text)) => {
            text.trim()
                .parse()
                .map_err(|_| SourceError::InvalidArgument {
                    kind,
                    value: text.clone(),
                })
        }
        None => Err(SourceError::MissingArgument { kind }),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn dispatches_on_type_kind() {
        let source = TypedSource::new(SourceKind::Zero)
            .with(TypeKind::I32, |_, _, _| Ok(candidates(vec![Value::I32(0)])));
        let ty = TypeDescriptor::new(TypeKind::I32);
        let values: Vec<Value> = source.values(&ty, &[], &mut rng()).unwrap().collect();
        assert_eq!(values, vec![Value::I32(0)]);

        let err = source
            .values(&TypeDescriptor::new(TypeKind::Text), &[], &mut rng())
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::UnsupportedType { .. }));
    }

    #[test]
    fn fallback_covers_unregistered_types() {
        let source = TypedSource::new(SourceKind::Inert).with_fallback(|_, _, _| Ok(nothing()));
        assert!(source.supports(TypeKind::Custom("Money")));
        let ty = TypeDescriptor::custom("Money");
        assert_eq!(source.values(&ty, &[], &mut rng()).unwrap().count(), 0);
    }

    #[test]
    fn bound_parses_first_argument() {
        let kind = SourceKind::AboveMax;
        assert_eq!(bound(kind, &[RuleArg::Int(3)]), Ok(3));
        assert_eq!(bound(kind, &[RuleArg::from(" 12 ")]), Ok(12));
        assert_eq!(
            bound(kind, &[]),
            Err(SourceError::MissingArgument { kind })
        );
        assert!(matches!(
            bound(kind, &[RuleArg::from("ten")]),
            Err(SourceError::InvalidArgument { .. })
        ));
    }
}
