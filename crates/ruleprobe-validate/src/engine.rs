//! Validation engine seam.

use ruleprobe_model::Violation;

/// Validates instances of `T` and reports every violated constraint.
pub trait ValidationEngine<T> {
    fn validate(&self, instance: &T) -> Vec<Violation>;
}

/// A type that knows its own constraints.
///
/// Nested properties are reported with dotted paths, for example
/// `address.street`.
pub trait Validate {
    fn validate(&self) -> Vec<Violation>;
}

/// The engine that delegates to [`Validate`].
///
/// Stateless, so every assertion can use its own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeanValidation;

impl<T: Validate> ValidationEngine<T> for BeanValidation {
    fn validate(&self, instance: &T) -> Vec<Violation> {
        instance.validate()
    }
}

impl<T, F> ValidationEngine<T> for F
where
    F: Fn(&T) -> Vec<Violation>,
{
    fn validate(&self, instance: &T) -> Vec<Violation> {
        self(instance)
    }
}

/// Prefixes nested violations with the property that holds them.
pub fn nested(property: &str, violations: Vec<Violation>) -> Vec<Violation> {
    violations
        .into_iter()
        .map(|v| Violation::new(format!("{property}.{}", v.property_path), v.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name(String);

    impl Validate for Name {
        fn validate(&self) -> Vec<Violation> {
            if self.0.trim().is_empty() {
                vec![Violation::new("value", "must not be blank")]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn bean_validation_delegates() {
        assert_eq!(
            ValidationEngine::validate(&BeanValidation, &Name(" ".to_string())).len(),
            1
        );
        assert!(ValidationEngine::validate(&BeanValidation, &Name("x".to_string())).is_empty());
    }

    #[test]
    fn closures_are_engines() {
        let engine = |n: &Name| nested("name", n.validate());
        let violations = engine.validate(&Name(String::new()));
        assert_eq!(violations[0].property_path, "name.value");
    }
}
