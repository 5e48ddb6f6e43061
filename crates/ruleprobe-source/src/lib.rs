//! Boundary and invalid value generators.
//!
//! A [`ValueSource`] produces, for one declared property type, a finite lazy
//! sequence of candidate values that a correctly constrained property must
//! reject. The [`SourceRegistry`] holds one source per [`SourceKind`] and is
//! the extension point for custom types.
//!
//! [`SourceKind`]: ruleprobe_model::SourceKind

pub mod error;
pub mod null;
pub mod numeric;
pub mod registry;
pub mod size;
pub mod source;
pub mod temporal;
pub mod text;

pub use error::{Result, SourceError};
pub use registry::SourceRegistry;
pub use source::{Candidates, Generator, TypedSource, ValueSource};
pub use text::BLANK_STRINGS;
