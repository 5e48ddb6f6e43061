//! Static description of a service type and its methods.
//!
//! Used to check that a method is wired into validation without calling it.

use std::fmt;

use serde::Serialize;

use crate::property::Marker;

/// A parameter of a method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDescriptor {
    pub type_name: String,
    pub markers: Vec<Marker>,
}

impl ParamDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn has_cascade(&self) -> bool {
        self.markers.contains(&Marker::Cascade)
    }
}

/// A method name with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<ParamDescriptor>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: Vec<ParamDescriptor>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Whether name and parameter type names match exactly.
    pub fn matches(&self, name: &str, param_types: &[&str]) -> bool {
        self.name == name
            && self.params.len() == param_types.len()
            && self
                .params
                .iter()
                .zip(param_types)
                .all(|(param, ty)| param.type_name == *ty)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|p| p.type_name.as_str()).collect();
        write!(f, "{}({})", self.name, params.join(", "))
    }
}

/// A type exposing methods, and whether the type itself is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub type_name: String,
    pub validated: bool,
    pub methods: Vec<MethodSignature>,
}

impl EndpointDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            validated: false,
            methods: Vec::new(),
        }
    }

    /// Marks the type as validated.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validated = true;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    pub fn find_method(&self, name: &str, param_types: &[&str]) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.matches(name, param_types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_method_matches_parameter_types() {
        let endpoint = EndpointDescriptor::new("CustomerService")
            .validated()
            .with_method(MethodSignature::new(
                "create",
                vec![
                    ParamDescriptor::new("u64"),
                    ParamDescriptor::new("Customer").with_marker(Marker::Cascade),
                ],
            ));
        let method = endpoint.find_method("create", &["u64", "Customer"]).unwrap();
        assert_eq!(method.to_string(), "create(u64, Customer)");
        assert!(method.params.last().unwrap().has_cascade());
        assert!(endpoint.find_method("create", &["Customer"]).is_none());
    }
}
