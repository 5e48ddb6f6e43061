//! Rule declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Kind of candidate values a rule substitutes for its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    AboveMax,
    BelowMin,
    Zero,
    Blank,
    Empty,
    Null,
    Future,
    Past,
    SizeBelow,
    SizeAbove,
    /// Produces nothing; used for markers and unchecked properties.
    Inert,
}

impl SourceKind {
    /// Get all source kinds.
    pub const fn all() -> &'static [Self] {
        &[
            Self::AboveMax,
            Self::BelowMin,
            Self::Zero,
            Self::Blank,
            Self::Empty,
            Self::Null,
            Self::Future,
            Self::Past,
            Self::SizeBelow,
            Self::SizeAbove,
            Self::Inert,
        ]
    }

    /// Parse a kind from its label, ignoring case and separators.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "abovemax" | "max" => Some(Self::AboveMax),
            "belowmin" | "min" => Some(Self::BelowMin),
            "zero" => Some(Self::Zero),
            "blank" => Some(Self::Blank),
            "empty" => Some(Self::Empty),
            "null" => Some(Self::Null),
            "future" => Some(Self::Future),
            "past" => Some(Self::Past),
            "sizebelow" => Some(Self::SizeBelow),
            "sizeabove" => Some(Self::SizeAbove),
            "inert" | "none" => Some(Self::Inert),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AboveMax => "above-max",
            Self::BelowMin => "below-min",
            Self::Zero => "zero",
            Self::Blank => "blank",
            Self::Empty => "empty",
            Self::Null => "null",
            Self::Future => "future",
            Self::Past => "past",
            Self::SizeBelow => "size-below",
            Self::SizeAbove => "size-above",
            Self::Inert => "inert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AboveMax => "Values greater than the bound, up to the type maximum",
            Self::BelowMin => "Values less than the bound, down to the type minimum",
            Self::Zero => "The zero value of the type",
            Self::Blank => "Empty and whitespace-only strings",
            Self::Empty => "An empty string or container",
            Self::Null => "Absence of a value",
            Self::Future => "Points in time after now",
            Self::Past => "Points in time before now",
            Self::SizeBelow => "Strings and containers shorter than the bound",
            Self::SizeAbove => "Strings and containers longer than the bound",
            Self::Inert => "No values",
        }
    }

    /// Whether the kind reads an integer bound from the rule arguments.
    pub const fn takes_bound(&self) -> bool {
        matches!(
            self,
            Self::AboveMax | Self::BelowMin | Self::SizeBelow | Self::SizeAbove
        )
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Argument passed to a value source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleArg {
    Int(i64),
    Text(String),
}

impl RuleArg {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl From<i64> for RuleArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RuleArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for RuleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

/// Expectation that one property rejects a family of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    property: String,
    source: SourceKind,
    args: Vec<RuleArg>,
    require_cascade: bool,
    require_nullable: bool,
}

impl Rule {
    /// A value-generating rule for `property`.
    pub fn new(property: impl Into<String>, source: SourceKind, args: Vec<RuleArg>) -> Result<Self> {
        let property = property.into();
        check_property_name(&property)?;
        Ok(Self {
            property,
            source,
            args,
            require_cascade: false,
            require_nullable: false,
        })
    }

    /// Marks `property` as covered without mutating it.
    pub fn not_validated(property: impl Into<String>) -> Result<Self> {
        Self::new(property, SourceKind::Inert, Vec::new())
    }

    /// Requires `property` to cascade validation into its value.
    pub fn cascade(property: impl Into<String>) -> Result<Self> {
        let mut rule = Self::not_validated(property)?;
        rule.require_cascade = true;
        Ok(rule)
    }

    /// Requires `property` to be declared as allowing absence.
    pub fn nullable(property: impl Into<String>) -> Result<Self> {
        let mut rule = Self::not_validated(property)?;
        rule.require_nullable = true;
        Ok(rule)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn args(&self) -> &[RuleArg] {
        &self.args
    }

    pub fn requires_cascade(&self) -> bool {
        self.require_cascade
    }

    pub fn requires_nullable(&self) -> bool {
        self.require_nullable
    }

    /// First integer argument, if any.
    pub fn bound(&self) -> Option<i64> {
        self.args.first().and_then(RuleArg::as_int)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.property, self.source)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
            write!(f, "({})", args.join(", "))?;
        }
        if self.require_cascade {
            f.write_str(" [cascade]")?;
        }
        if self.require_nullable {
            f.write_str(" [nullable]")?;
        }
        Ok(())
    }
}

fn check_property_name(property: &str) -> Result<()> {
    if property.trim().is_empty() {
        return Err(ModelError::EmptyPropertyName);
    }
    if property.contains('.') {
        return Err(ModelError::NestedPropertyPath(property.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_property_rejected() {
        let err = Rule::new("address.street", SourceKind::Blank, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ModelError::NestedPropertyPath("address.street".to_string())
        );
        assert_eq!(
            Rule::cascade(" ").unwrap_err(),
            ModelError::EmptyPropertyName
        );
    }

    #[test]
    fn test_marker_rules_are_inert() {
        let rule = Rule::cascade("address").unwrap();
        assert_eq!(rule.source(), SourceKind::Inert);
        assert!(rule.requires_cascade());
        assert!(!rule.requires_nullable());

        let rule = Rule::nullable("nickname").unwrap();
        assert!(rule.requires_nullable());
        assert!(rule.args().is_empty());
    }

    #[test]
    fn test_bound_reads_first_integer() {
        let rule = Rule::new("age", SourceKind::BelowMin, vec![RuleArg::Int(5)]).unwrap();
        assert_eq!(rule.bound(), Some(5));
        assert_eq!(rule.to_string(), "age <- below-min(5)");
    }

    #[test]
    fn test_source_kind_parse() {
        for kind in SourceKind::all() {
            assert_eq!(SourceKind::parse(kind.label()), Some(*kind));
        }
        assert_eq!(SourceKind::parse("SIZE_ABOVE"), Some(SourceKind::SizeAbove));
        assert_eq!(SourceKind::parse("sideways"), None);
    }
}
