//! Blank and empty values.

use ruleprobe_model::{SourceKind, TypeKind, Value};

use crate::source::{TypedSource, candidates};

/// Strings that contain nothing but whitespace.
pub const BLANK_STRINGS: [&str; 7] = ["", " ", "         ", "\t", "\r", "\n", "\r\n"];

/// Empty and whitespace-only strings.
pub fn blank() -> TypedSource {
    TypedSource::new(SourceKind::Blank).with(TypeKind::Text, |_, _, _| {
        Ok(candidates(
            BLANK_STRINGS.iter().map(|s| Value::from(*s)).collect(),
        ))
    })
}

/// An empty instance of the declared string or container type.
pub fn empty() -> TypedSource {
    TypedSource::new(SourceKind::Empty)
        .with(TypeKind::Text, |_, _, _| {
            Ok(candidates(vec![Value::Text(String::new())]))
        })
        .with(TypeKind::List, |_, _, _| {
            Ok(candidates(vec![Value::List(Vec::new())]))
        })
        .with(TypeKind::Set, |_, _, _| {
            Ok(candidates(vec![Value::Set(Vec::new())]))
        })
        .with(TypeKind::Map, |_, _, _| {
            Ok(candidates(vec![Value::Map(Vec::new())]))
        })
        .with(TypeKind::Array, |_, _, _| {
            Ok(candidates(vec![Value::Array(Vec::new())]))
        })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ruleprobe_model::TypeDescriptor;

    use super::*;
    use crate::source::ValueSource;

    #[test]
    fn blank_enumerates_whitespace() {
        let mut rng = StdRng::seed_from_u64(0);
        let values: Vec<Value> = blank()
            .values(&TypeDescriptor::new(TypeKind::Text), &[], &mut rng)
            .unwrap()
            .collect();
        assert_eq!(values.len(), BLANK_STRINGS.len());
        assert!(
            values
                .iter()
                .all(|v| v.as_text().is_some_and(|s| s.trim().is_empty()))
        );
    }

    #[test]
    fn empty_matches_declared_container() {
        let mut rng = StdRng::seed_from_u64(0);
        let ty = TypeDescriptor::set(TypeDescriptor::new(TypeKind::I32));
        let values: Vec<Value> = empty().values(&ty, &[], &mut rng).unwrap().collect();
        assert_eq!(values, vec![Value::Set(Vec::new())]);
        assert!(!empty().supports(TypeKind::I32));
    }
}
