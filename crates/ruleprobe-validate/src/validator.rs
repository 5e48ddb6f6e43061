//! The rule validator.
//!
//! Starting from an instance that passes validation, every rule replaces
//! its property with each candidate value in turn and asserts that
//! validation rejects the copy because of that property. Structural checks
//! follow: required cascade and nullable markers, rule coverage of every
//! property, and cascading into nested records.

use std::collections::BTreeSet;

use ruleprobe_model::{PropertyDescriptor, PropertyModel, Rule, SourceKind, Value, Violation};
use ruleprobe_source::SourceRegistry;
use tracing::{debug, info, info_span, warn};

use crate::call::CallError;
use crate::engine::ValidationEngine;
use crate::error::{ComplianceError, Result};
use crate::options::{NonAggregateTypes, ValidatorOptions, ViolationPolicy};
use crate::rules::ValidationFunction;

/// How an instance is validated.
pub enum Invocation<T> {
    /// Validate directly with an engine.
    Engine(Box<dyn ValidationEngine<T>>),
    /// Pass the instance to a method that validates its argument.
    Call(Box<dyn Fn(T) -> std::result::Result<(), CallError>>),
}

impl<T> Invocation<T> {
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call(_))
    }
}

/// Everything one assertion needs.
pub struct AssertionParameter<T> {
    /// A valid instance; never modified.
    pub instance: T,
    pub invocation: Invocation<T>,
    pub rules: Vec<Rule>,
    pub functions: Vec<ValidationFunction<T>>,
    pub non_aggregate_types: NonAggregateTypes,
}

/// Runs the mutation and structural checks.
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    registry: SourceRegistry,
    options: ValidatorOptions,
}

impl RuleValidator {
    /// The registry's seed is replaced by the one in `options`, if any.
    pub fn new(mut registry: SourceRegistry, options: ValidatorOptions) -> Self {
        if options.seed.is_some() {
            registry.set_seed(options.seed);
        }
        Self { registry, options }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Asserts that `parameter.instance` is validated as the rules declare.
    ///
    /// Stops at the first failing check.
    pub fn assert_validation<T: PropertyModel>(&self, parameter: AssertionParameter<T>) -> Result<()> {
        let AssertionParameter {
            instance,
            invocation,
            rules,
            functions,
            non_aggregate_types,
        } = parameter;

        let span = info_span!(
            "assert_validation",
            type_name = T::type_name(),
            rules = rules.len(),
            functions = functions.len(),
            call_mode = invocation.is_call()
        );
        let _guard = span.enter();

        if rules.is_empty() && functions.is_empty() {
            return Err(ComplianceError::NoRules);
        }

        let properties = T::properties();
        let targets = resolve_targets::<T>(&rules, &properties)?;

        check_baseline(&instance, &invocation)?;
        check_functions(&instance, &functions)?;

        let mut mutants = 0_usize;
        for (rule, property) in rules.iter().zip(&targets) {
            mutants += self.check_rule(&instance, &invocation, rule, property)?;
        }
        debug!(count = mutants, "all mutants rejected");

        check_cascade(&rules, &targets)?;
        self.check_nullable(&rules, &targets)?;
        check_coverage(&rules, &properties)?;
        check_nested_records(&properties, &non_aggregate_types)?;

        info!(mutants, "validation is compliant");
        Ok(())
    }

    /// Mutates one property with every candidate of the rule.
    fn check_rule<T: PropertyModel>(
        &self,
        instance: &T,
        invocation: &Invocation<T>,
        rule: &Rule,
        property: &PropertyDescriptor,
    ) -> Result<usize> {
        if rule.source() == SourceKind::Inert {
            return Ok(0);
        }

        let candidates = self
            .registry
            .values(rule.source(), &property.ty, rule.args())
            .map_err(|source| ComplianceError::Source {
                property: rule.property().to_string(),
                source,
            })?;

        let mut count = 0;
        for candidate in candidates {
            self.check_candidate(instance, invocation, rule.property(), candidate)?;
            count += 1;
        }
        if count == 0 {
            debug!(
                property = rule.property(),
                kind = %rule.source(),
                ty = %property.ty,
                "rule produced no candidates"
            );
        }
        Ok(count)
    }

    fn check_candidate<T: PropertyModel>(
        &self,
        instance: &T,
        invocation: &Invocation<T>,
        property: &str,
        candidate: Value,
    ) -> Result<()> {
        let shown = candidate.to_string();
        debug!(property, candidate = %shown, "validating mutant");

        let copy = instance
            .with_property(property, candidate)
            .map_err(|source| ComplianceError::CopyConstruction {
                property: property.to_string(),
                candidate: shown.clone(),
                source,
            })?;

        match invocation {
            Invocation::Engine(engine) => {
                let violations = engine.validate(&copy);
                self.check_violations(property, &shown, violations)
            }
            Invocation::Call(call) => match call(copy) {
                Err(CallError::Rejected(rejection)) if rejection.references(property) => Ok(()),
                Err(CallError::Rejected(rejection)) => {
                    Err(ComplianceError::RejectionMissesProperty {
                        property: property.to_string(),
                        candidate: shown,
                        message: rejection.to_string(),
                    })
                }
                Err(CallError::Other(error)) => Err(ComplianceError::CallNotRejected {
                    property: property.to_string(),
                    candidate: shown,
                    outcome: format!("call failed with another error: {error}"),
                }),
                Ok(()) => Err(ComplianceError::CallNotRejected {
                    property: property.to_string(),
                    candidate: shown,
                    outcome: "call completed".to_string(),
                }),
            },
        }
    }

    fn check_violations(
        &self,
        property: &str,
        candidate: &str,
        mut violations: Vec<Violation>,
    ) -> Result<()> {
        violations.sort();
        if !violations.iter().any(|v| v.property_path == property) {
            warn!(property, candidate, "mutant passed validation");
            return Err(ComplianceError::MutationNotDetected {
                property: property.to_string(),
                candidate: candidate.to_string(),
                violations,
            });
        }

        if self.options.violation_policy == ViolationPolicy::ExactlyTarget {
            let others: Vec<Violation> = violations
                .into_iter()
                .filter(|v| v.property_path != property)
                .collect();
            if !others.is_empty() {
                return Err(ComplianceError::UnexpectedViolations {
                    property: property.to_string(),
                    candidate: candidate.to_string(),
                    violations: others,
                });
            }
        }
        Ok(())
    }

    /// Properties with a nullable rule need a runtime-visible nullable marker.
    fn check_nullable(&self, rules: &[Rule], targets: &[&PropertyDescriptor]) -> Result<()> {
        let mut missing = BTreeSet::new();
        let mut source_only = BTreeSet::new();
        for (rule, property) in rules.iter().zip(targets) {
            if !rule.requires_nullable() {
                continue;
            }
            let spellings = &self.options.nullable_spellings;
            if spellings.iter().any(|s| property.has_annotation(s)) {
                continue;
            }
            missing.insert(property.name.to_string());
            if spellings.iter().any(|s| property.has_source_only(s)) {
                source_only.insert(property.name.to_string());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ComplianceError::MissingNullable {
                properties: missing.into_iter().collect(),
                source_only: source_only.into_iter().collect(),
            })
        }
    }
}

/// Looks up the declared property of every rule.
fn resolve_targets<'a, T: PropertyModel>(
    rules: &[Rule],
    properties: &'a [PropertyDescriptor],
) -> Result<Vec<&'a PropertyDescriptor>> {
    rules
        .iter()
        .map(|rule| {
            properties
                .iter()
                .find(|p| p.name == rule.property())
                .ok_or_else(|| ComplianceError::UnknownProperty {
                    property: rule.property().to_string(),
                    type_name: T::type_name(),
                })
        })
        .collect()
}

/// The unmodified instance must pass.
fn check_baseline<T: Clone>(instance: &T, invocation: &Invocation<T>) -> Result<()> {
    let mut violations = match invocation {
        Invocation::Engine(engine) => engine.validate(instance),
        Invocation::Call(call) => match call(instance.clone()) {
            Err(CallError::Rejected(rejection)) => rejection.violations().to_vec(),
            Err(CallError::Other(error)) => {
                debug!(%error, "ignoring non-validation failure of the baseline call");
                Vec::new()
            }
            Ok(()) => Vec::new(),
        },
    };
    if violations.is_empty() {
        return Ok(());
    }
    violations.sort();
    Err(ComplianceError::BaselineInvalid { violations })
}

fn check_functions<T>(instance: &T, functions: &[ValidationFunction<T>]) -> Result<()> {
    for function in functions {
        function(instance).map_err(|message| ComplianceError::CustomFunction { message })?;
    }
    Ok(())
}

/// Properties with a cascade rule need the cascade marker.
fn check_cascade(rules: &[Rule], targets: &[&PropertyDescriptor]) -> Result<()> {
    let missing: BTreeSet<String> = rules
        .iter()
        .zip(targets)
        .filter(|(rule, property)| rule.requires_cascade() && !property.has_cascade())
        .map(|(rule, _)| rule.property().to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ComplianceError::MissingCascade {
            properties: missing.into_iter().collect(),
        })
    }
}

/// Every property needs at least one rule, markers and opt-outs included.
fn check_coverage(rules: &[Rule], properties: &[PropertyDescriptor]) -> Result<()> {
    let covered: BTreeSet<&str> = rules.iter().map(Rule::property).collect();
    let missing: Vec<String> = properties
        .iter()
        .filter(|p| !covered.contains(p.name))
        .map(|p| p.name.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ComplianceError::MissingCoverage {
            properties: missing,
        })
    }
}

/// Nested records cascade unless their type is registered as non-aggregate.
fn check_nested_records(
    properties: &[PropertyDescriptor],
    non_aggregate_types: &NonAggregateTypes,
) -> Result<()> {
    let missing: Vec<String> = properties
        .iter()
        .filter(|p| {
            p.record_type()
                .is_some_and(|record| !non_aggregate_types.contains(record))
                && !p.has_cascade()
        })
        .map(|p| p.name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ComplianceError::NestedCascade {
            properties: missing,
        })
    }
}
