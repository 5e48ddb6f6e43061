use std::fmt;

use serde::{Deserialize, Serialize};

/// A constraint violation reported by a validation engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the violated property, `a.b` for nested properties.
    pub property_path: String,
    pub message: String,
}

impl Violation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }

    /// First path segment.
    pub fn root_property(&self) -> &str {
        self.property_path
            .split('.')
            .next()
            .unwrap_or(&self.property_path)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.property_path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_property_strips_nested_segments() {
        let violation = Violation::new("address.street", "must not be blank");
        assert_eq!(violation.root_property(), "address");
        assert_eq!(violation.to_string(), "address.street => must not be blank");
    }
}
