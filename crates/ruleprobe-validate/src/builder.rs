//! Fluent rule declaration bound to one instance.

use std::mem;

use ruleprobe_model::{ModelError, PropertyModel, Rule};
use tracing::error;

use crate::error::{ComplianceError, Result};
use crate::options::NonAggregateTypes;
use crate::rules::{ValidationFunction, ValidationRulesData};
use crate::validator::{AssertionParameter, Invocation, RuleValidator};

/// What a bound builder asserts against.
pub(crate) struct Binding<T> {
    pub(crate) instance: T,
    pub(crate) invocation: Invocation<T>,
    pub(crate) validator: RuleValidator,
    pub(crate) non_aggregate_types: NonAggregateTypes,
}

/// Collects rules for `T` and asserts them with [`RuleBuilder::is_compliant`].
///
/// A builder obtained from [`crate::ValidationAssert::of`] is bound to an
/// instance and must end in `is_compliant`; dropping it earlier panics, so
/// a chain that forgot its terminal call does not pass silently.
#[must_use = "rules are only checked by is_compliant"]
pub struct RuleBuilder<T> {
    rules: Vec<Rule>,
    functions: Vec<ValidationFunction<T>>,
    errors: Vec<ModelError>,
    binding: Option<Binding<T>>,
    armed: bool,
}

impl<T: PropertyModel> RuleBuilder<T> {
    /// A builder without an instance. Useful for reusable rule batches;
    /// asserting it fails with [`ComplianceError::Unbound`].
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            functions: Vec::new(),
            errors: Vec::new(),
            binding: None,
            armed: false,
        }
    }

    pub(crate) fn bound(binding: Binding<T>) -> Self {
        Self {
            rules: Vec::new(),
            functions: Vec::new(),
            errors: Vec::new(),
            binding: Some(binding),
            armed: true,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Runs every check against the bound instance.
    pub fn is_compliant(mut self) -> Result<()> {
        self.armed = false;

        if let Some(first) = self.errors.first() {
            return Err(ComplianceError::InvalidProperty(first.clone()));
        }
        let Some(binding) = self.binding.take() else {
            return Err(ComplianceError::Unbound);
        };

        binding.validator.assert_validation(AssertionParameter {
            instance: binding.instance,
            invocation: binding.invocation,
            rules: mem::take(&mut self.rules),
            functions: mem::take(&mut self.functions),
            non_aggregate_types: binding.non_aggregate_types,
        })
    }
}

impl<T: PropertyModel> Default for RuleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValidationRulesData for RuleBuilder<T> {
    type Target = T;

    fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    fn add_validation_function(mut self, function: ValidationFunction<T>) -> Self {
        self.functions.push(function);
        self
    }

    fn reject_rule(mut self, error: ModelError) -> Self {
        self.errors.push(error);
        self
    }
}

impl<T> Drop for RuleBuilder<T> {
    fn drop(&mut self) {
        if self.armed && !std::thread::panicking() {
            error!(rules = self.rules.len(), "rule builder dropped without is_compliant");
            panic!("rule builder dropped without calling is_compliant");
        }
    }
}

#[cfg(test)]
mod tests {
    use ruleprobe_model::property_model;

    use super::*;
    use crate::rules::RuleFamilies;

    #[derive(Clone)]
    struct Point {
        x: i32,
    }

    property_model!(Point { x });

    #[test]
    fn unbound_builder_reports_unbound() {
        let result = RuleBuilder::<Point>::new().min("x", 0).is_compliant();
        assert_eq!(result, Err(ComplianceError::Unbound));
    }

    #[test]
    fn recorded_errors_come_first() {
        let result = RuleBuilder::<Point>::new()
            .not_null("")
            .min("x", 0)
            .is_compliant();
        assert_eq!(
            result,
            Err(ComplianceError::InvalidProperty(ModelError::EmptyPropertyName))
        );
    }

    #[test]
    fn unbound_builder_can_be_dropped() {
        let builder = RuleBuilder::<Point>::new().max("x", 10);
        assert_eq!(builder.rules().len(), 1);
        assert!(!builder.is_bound());
    }
}
