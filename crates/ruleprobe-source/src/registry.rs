//! Registry of value sources keyed by source kind.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use ruleprobe_model::{RuleArg, SourceKind, TypeDescriptor, TypeKind};
use tracing::trace;

use crate::error::Result;
use crate::numeric::{above_max, below_min, zero};
use crate::null::{inert, null};
use crate::size::{size_above, size_below};
use crate::source::{Candidates, TypedSource, ValueSource};
use crate::temporal::{future, past};
use crate::text::{blank, empty};

/// Every value source, with per-type generators that callers can extend.
///
/// The registry is an ordinary value: clone it, extend the clone in a test
/// and hand it to the validator without affecting other tests.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: BTreeMap<SourceKind, TypedSource>,
    seed: Option<u64>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRegistry {
    /// Registry with the built-in generators for every source kind.
    pub fn new() -> Self {
        let sources = [
            above_max(),
            below_min(),
            zero(),
            blank(),
            empty(),
            null(),
            future(),
            past(),
            size_below(),
            size_above(),
            inert(),
        ]
        .into_iter()
        .map(|source| (source.kind(), source))
        .collect();
        Self {
            sources,
            seed: None,
        }
    }

    /// Makes random interior samples reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Adds or replaces the generator of `kind` for declared type `ty`.
    ///
    /// This is how domain value objects and other custom types get
    /// candidates.
    pub fn register<F>(&mut self, kind: SourceKind, ty: TypeKind, generator: F)
    where
        F: Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates>
            + Send
            + Sync
            + 'static,
    {
        self.sources
            .entry(kind)
            .or_insert_with(|| TypedSource::new(kind))
            .register(ty, generator);
    }

    /// Builder form of [`SourceRegistry::register`].
    #[must_use]
    pub fn with<F>(mut self, kind: SourceKind, ty: TypeKind, generator: F) -> Self
    where
        F: Fn(&TypeDescriptor, &[RuleArg], &mut StdRng) -> Result<Candidates>
            + Send
            + Sync
            + 'static,
    {
        self.register(kind, ty, generator);
        self
    }

    pub fn source(&self, kind: SourceKind) -> Option<&TypedSource> {
        self.sources.get(&kind)
    }

    /// Candidates of `kind` for declared type `ty`.
    ///
    /// Every call starts a fresh sequence. With a seed the sequence is
    /// identical across calls, without one only the boundary values are.
    pub fn values(
        &self,
        kind: SourceKind,
        ty: &TypeDescriptor,
        args: &[RuleArg],
    ) -> Result<Candidates> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        trace!(kind = %kind, ty = %ty, "generating candidates");
        match self.sources.get(&kind) {
            Some(source) => source.values(ty, args, &mut rng),
            None => inert().values(ty, args, &mut rng),
        }
    }

    /// Types with a dedicated generator for `kind`.
    pub fn registered_types(&self, kind: SourceKind) -> Vec<TypeKind> {
        self.sources
            .get(&kind)
            .map(ValueSource::supported_types)
            .unwrap_or_default()
    }

    pub fn supports(&self, kind: SourceKind, ty: TypeKind) -> bool {
        self.sources
            .get(&kind)
            .is_some_and(|source| source.supports(ty))
    }
}
