//! Entry point of an assertion chain.
//!
//! ```text
//! ValidationAssert::new()
//!     .of(customer)
//!     .using_bean_validation()
//!     .not_blank("name")
//!     .between("age", 18, 120)
//!     .is_compliant()?;
//! ```

use ruleprobe_model::{EndpointDescriptor, PropertyModel};
use ruleprobe_source::SourceRegistry;
use tracing::debug;

use crate::builder::{Binding, RuleBuilder};
use crate::call::CallError;
use crate::engine::{BeanValidation, Validate, ValidationEngine};
use crate::error::{ComplianceError, Result};
use crate::options::{NonAggregateTypes, ValidatorOptions};
use crate::validator::{Invocation, RuleValidator};

/// Starts assertion chains with shared options and value sources.
#[derive(Debug, Clone)]
pub struct ValidationAssert {
    options: ValidatorOptions,
    registry: SourceRegistry,
}

impl ValidationAssert {
    /// Default sources, with options read from the environment.
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::from_env())
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            options,
            registry: SourceRegistry::new(),
        }
    }

    /// Replaces the value sources, for example with extra custom types.
    #[must_use]
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SourceRegistry {
        &mut self.registry
    }

    /// Exempts a nested record type from the cascade requirement.
    pub fn register_non_aggregate_type(&mut self, type_name: impl Into<String>) {
        self.options.non_aggregate_types.register(type_name);
    }

    /// Selects the valid instance the rules are checked against.
    pub fn of<T: PropertyModel>(&self, instance: T) -> CallBuilder<T> {
        CallBuilder {
            instance,
            validator: RuleValidator::new(self.registry.clone(), self.options.clone()),
            non_aggregate_types: self.options.non_aggregate_types.clone(),
        }
    }

    /// Selects a method whose validation wiring is checked.
    pub fn calling_method<'a>(
        &self,
        endpoint: &'a EndpointDescriptor,
        method: &str,
        param_types: &[&str],
    ) -> MethodChecker<'a> {
        MethodChecker {
            endpoint,
            method: method.to_string(),
            param_types: param_types.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Default for ValidationAssert {
    fn default() -> Self {
        Self::new()
    }
}

/// Chooses how the instance is validated.
#[must_use = "choose a validation strategy to obtain a rule builder"]
pub struct CallBuilder<T> {
    instance: T,
    validator: RuleValidator,
    non_aggregate_types: NonAggregateTypes,
}

impl<T: PropertyModel + 'static> CallBuilder<T> {
    /// Validates with the type's own [`Validate`] implementation.
    pub fn using_bean_validation(self) -> RuleBuilder<T>
    where
        T: Validate,
    {
        self.using_engine(BeanValidation)
    }

    pub fn using_engine<E>(self, engine: E) -> RuleBuilder<T>
    where
        E: ValidationEngine<T> + 'static,
    {
        self.bind(Invocation::Engine(Box::new(engine)))
    }

    /// Validates by passing each instance to `method`.
    ///
    /// The method must reject invalid arguments with
    /// [`CallError::Rejected`].
    pub fn calling<F>(self, method: F) -> RuleBuilder<T>
    where
        F: Fn(T) -> std::result::Result<(), CallError> + 'static,
    {
        self.bind(Invocation::Call(Box::new(method)))
    }

    /// Like [`calling`](Self::calling) for methods taking a leading argument.
    pub fn calling_with<A, F>(self, first: A, method: F) -> RuleBuilder<T>
    where
        A: Clone + 'static,
        F: Fn(A, T) -> std::result::Result<(), CallError> + 'static,
    {
        self.calling(move |instance| method(first.clone(), instance))
    }

    pub fn calling_with2<A, B, F>(self, first: A, second: B, method: F) -> RuleBuilder<T>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A, B, T) -> std::result::Result<(), CallError> + 'static,
    {
        self.calling(move |instance| method(first.clone(), second.clone(), instance))
    }

    fn bind(self, invocation: Invocation<T>) -> RuleBuilder<T> {
        RuleBuilder::bound(Binding {
            instance: self.instance,
            invocation,
            validator: self.validator,
            non_aggregate_types: self.non_aggregate_types,
        })
    }
}

/// Checks that a method validates its argument.
#[derive(Debug)]
pub struct MethodChecker<'a> {
    endpoint: &'a EndpointDescriptor,
    method: String,
    param_types: Vec<String>,
}

impl MethodChecker<'_> {
    /// The type must be validated and the method's last parameter must
    /// cascade validation.
    pub fn is_enabled(&self) -> Result<()> {
        let param_types: Vec<&str> = self.param_types.iter().map(String::as_str).collect();
        let signature = format!("{}({})", self.method, param_types.join(", "));
        let type_name = &self.endpoint.type_name;

        let Some(method) = self.endpoint.find_method(&self.method, &param_types) else {
            return Err(ComplianceError::MethodNotFound {
                type_name: type_name.clone(),
                method: signature,
            });
        };

        let reason = if !self.endpoint.validated {
            Some("the type is not marked as validated")
        } else {
            match method.params.last() {
                None => Some("the method takes no parameters"),
                Some(param) if !param.has_cascade() => {
                    Some("the last parameter is not marked for cascaded validation")
                }
                Some(_) => None,
            }
        };

        match reason {
            Some(reason) => Err(ComplianceError::MethodNotValidated {
                type_name: type_name.clone(),
                method: signature,
                reason: reason.to_string(),
            }),
            None => {
                debug!(type_name = %type_name, method = %signature, "method validation is enabled");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ruleprobe_model::{Marker, MethodSignature, ParamDescriptor};

    use super::*;

    fn service(validated: bool, cascade: bool) -> EndpointDescriptor {
        let mut param = ParamDescriptor::new("Customer");
        if cascade {
            param = param.with_marker(Marker::Cascade);
        }
        let endpoint = EndpointDescriptor::new("CustomerService")
            .with_method(MethodSignature::new("create", vec![param]))
            .with_method(MethodSignature::new("ping", Vec::new()));
        if validated { endpoint.validated() } else { endpoint }
    }

    #[test]
    fn enabled_when_validated_and_cascading() {
        let endpoint = service(true, true);
        let assert = ValidationAssert::with_options(ValidatorOptions::default());
        assert_eq!(
            assert.calling_method(&endpoint, "create", &["Customer"]).is_enabled(),
            Ok(())
        );
    }

    #[test]
    fn missing_method_names_the_signature() {
        let endpoint = service(true, true);
        let assert = ValidationAssert::with_options(ValidatorOptions::default());
        let err = assert
            .calling_method(&endpoint, "create", &["u64", "Customer"])
            .is_enabled()
            .unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"method create(u64, Customer) not found on CustomerService"
        );
    }

    #[test]
    fn disabled_reasons() {
        let assert = ValidationAssert::with_options(ValidatorOptions::default());

        let unvalidated = service(false, true);
        let err = assert
            .calling_method(&unvalidated, "create", &["Customer"])
            .is_enabled()
            .unwrap_err();
        assert!(err.to_string().contains("not marked as validated"));

        let plain = service(true, false);
        let err = assert
            .calling_method(&plain, "create", &["Customer"])
            .is_enabled()
            .unwrap_err();
        assert!(err.to_string().contains("cascaded validation"));

        let err = assert
            .calling_method(&plain, "ping", &[])
            .is_enabled()
            .unwrap_err();
        assert!(err.to_string().contains("no parameters"));
    }
}
