//! Rule registration contract and rule families.

use ruleprobe_model::{ModelError, Rule, RuleArg, SourceKind};

/// Whole-object check run against the original instance.
pub type ValidationFunction<T> = Box<dyn Fn(&T) -> Result<(), String>>;

/// Accumulates rules for one target type.
///
/// Every method consumes and returns the collector so calls chain.
pub trait ValidationRulesData: Sized {
    /// Type the rules are declared for.
    type Target;

    fn add_rule(self, rule: Rule) -> Self;

    fn add_validation_function(self, function: ValidationFunction<Self::Target>) -> Self;

    /// Records a rule that could not be declared; reported when the chain
    /// is asserted.
    fn reject_rule(self, error: ModelError) -> Self;

    /// Adds a declared rule or records why it could not be declared.
    fn push(self, rule: Result<Rule, ModelError>) -> Self {
        match rule {
            Ok(rule) => self.add_rule(rule),
            Err(error) => self.reject_rule(error),
        }
    }
}

/// One method per family of validation constraint.
///
/// Each method names the constraint the property carries; the rule it adds
/// generates values that violate it.
pub trait RuleFamilies: ValidationRulesData {
    fn not_null(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::Null, Vec::new()))
    }

    fn not_blank(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::Blank, Vec::new()))
            .push(Rule::new(property, SourceKind::Null, Vec::new()))
    }

    fn not_empty(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::Empty, Vec::new()))
            .push(Rule::new(property, SourceKind::Null, Vec::new()))
    }

    fn min(self, property: &str, min: i64) -> Self {
        self.push(Rule::new(property, SourceKind::BelowMin, vec![RuleArg::Int(min)]))
    }

    fn max(self, property: &str, max: i64) -> Self {
        self.push(Rule::new(property, SourceKind::AboveMax, vec![RuleArg::Int(max)]))
    }

    fn between(self, property: &str, min: i64, max: i64) -> Self {
        self.push(Rule::new(property, SourceKind::AboveMax, vec![RuleArg::Int(max)]))
            .push(Rule::new(property, SourceKind::BelowMin, vec![RuleArg::Int(min)]))
    }

    fn positive(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::BelowMin, vec![RuleArg::Int(0)]))
            .push(Rule::new(property, SourceKind::Zero, Vec::new()))
    }

    fn positive_or_zero(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::BelowMin, vec![RuleArg::Int(0)]))
    }

    fn negative(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::AboveMax, vec![RuleArg::Int(0)]))
            .push(Rule::new(property, SourceKind::Zero, Vec::new()))
    }

    fn negative_or_zero(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::AboveMax, vec![RuleArg::Int(0)]))
    }

    /// The property must lie in the future, so past values are substituted.
    fn future(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::Past, Vec::new()))
    }

    /// The property must lie in the past, so future values are substituted.
    fn past(self, property: &str) -> Self {
        self.push(Rule::new(property, SourceKind::Future, Vec::new()))
    }

    fn size(self, property: &str) -> SizeRule<Self> {
        SizeRule {
            parent: self,
            property: property.to_string(),
        }
    }

    /// The property must cascade validation into its value.
    fn valid_bean(self, property: &str) -> Self {
        self.push(Rule::cascade(property))
    }

    /// The property must be declared as allowing absence.
    fn nullable(self, property: &str) -> Self {
        self.push(Rule::nullable(property))
    }

    /// The property is deliberately left without constraints.
    fn not_validated(self, property: &str) -> Self {
        self.push(Rule::not_validated(property))
    }

    fn unchecked(self, property: &str) -> Self {
        self.not_validated(property)
    }

    fn custom<F>(self, function: F) -> Self
    where
        F: Fn(&Self::Target) -> Result<(), String> + 'static,
    {
        self.add_validation_function(Box::new(function))
    }

    /// Applies a reusable batch of rules.
    fn with_additional_rules<F>(self, rules: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        rules(self)
    }
}

impl<B: ValidationRulesData> RuleFamilies for B {}

/// Size bounds for one property.
#[must_use = "a size rule adds nothing until min, max or min_max is called"]
pub struct SizeRule<B> {
    parent: B,
    property: String,
}

impl<B: ValidationRulesData> SizeRule<B> {
    pub fn min(self, min: i64) -> B {
        self.parent.push(Rule::new(
            self.property,
            SourceKind::SizeBelow,
            vec![RuleArg::Int(min)],
        ))
    }

    pub fn max(self, max: i64) -> B {
        self.parent.push(Rule::new(
            self.property,
            SourceKind::SizeAbove,
            vec![RuleArg::Int(max)],
        ))
    }

    pub fn min_max(self, min: i64, max: i64) -> B {
        self.parent
            .push(Rule::new(
                self.property.as_str(),
                SourceKind::SizeBelow,
                vec![RuleArg::Int(min)],
            ))
            .push(Rule::new(
                self.property,
                SourceKind::SizeAbove,
                vec![RuleArg::Int(max)],
            ))
    }
}
