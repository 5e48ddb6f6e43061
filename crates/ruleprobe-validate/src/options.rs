//! Validator configuration.

use std::collections::BTreeSet;
use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable holding a seed for interior random samples.
pub const SEED_ENV: &str = "RULEPROBE_SEED";
/// Environment variable selecting the [`ViolationPolicy`].
pub const VIOLATION_POLICY_ENV: &str = "RULEPROBE_VIOLATION_POLICY";

/// How a mutant's violations are matched against the mutated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// Only the mutated property may be violated.
    #[default]
    ExactlyTarget,
    /// The mutated property must be among the violated ones.
    ContainsTarget,
}

impl ViolationPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "exactly_target" | "exact" | "exactly" => Some(Self::ExactlyTarget),
            "contains_target" | "contains" => Some(Self::ContainsTarget),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::ExactlyTarget => "exactly target",
            Self::ContainsTarget => "contains target",
        }
    }
}

impl fmt::Display for ViolationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Record types that do not need cascaded validation when nested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NonAggregateTypes(BTreeSet<String>);

impl NonAggregateTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_name: impl Into<String>) {
        self.0.insert(type_name.into());
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.0.contains(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NonAggregateTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Options for [`RuleValidator`](crate::RuleValidator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// How strictly a mutant's violations must match the mutated property.
    pub violation_policy: ViolationPolicy,

    /// Annotation names accepted as "may be absent" markers.
    /// Default: `nullable`, `optional`.
    pub nullable_spellings: Vec<String>,

    /// Seed for interior random samples; `None` draws from entropy.
    pub seed: Option<u64>,

    /// Nested record types exempt from the cascade requirement.
    pub non_aggregate_types: NonAggregateTypes,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            violation_policy: ViolationPolicy::default(),
            nullable_spellings: vec!["nullable".to_string(), "optional".to_string()],
            seed: None,
            non_aggregate_types: NonAggregateTypes::new(),
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `RULEPROBE_SEED` and `RULEPROBE_VIOLATION_POLICY`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(raw) = env::var(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => options.seed = Some(seed),
                Err(_) => warn!(value = %raw, "ignoring invalid {SEED_ENV}"),
            }
        }
        if let Ok(raw) = env::var(VIOLATION_POLICY_ENV) {
            match ViolationPolicy::parse(&raw) {
                Some(policy) => options.violation_policy = policy,
                None => warn!(value = %raw, "ignoring invalid {VIOLATION_POLICY_ENV}"),
            }
        }
        options
    }

    #[must_use]
    pub fn with_violation_policy(mut self, policy: ViolationPolicy) -> Self {
        self.violation_policy = policy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_nullable_spelling(mut self, spelling: impl Into<String>) -> Self {
        self.nullable_spellings.push(spelling.into());
        self
    }

    /// Exempts a nested record type from the cascade requirement.
    #[must_use]
    pub fn with_non_aggregate_type(mut self, type_name: impl Into<String>) -> Self {
        self.non_aggregate_types.register(type_name);
        self
    }

    pub fn is_nullable_spelling(&self, name: &str) -> bool {
        self.nullable_spellings
            .iter()
            .any(|spelling| spelling.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ValidatorOptions::default();
        assert_eq!(options.violation_policy, ViolationPolicy::ExactlyTarget);
        assert!(options.is_nullable_spelling("Nullable"));
        assert!(options.is_nullable_spelling("optional"));
        assert!(!options.is_nullable_spelling("nonnull"));
        assert_eq!(options.seed, None);
    }

    #[test]
    fn policy_parse() {
        assert_eq!(
            ViolationPolicy::parse("contains-target"),
            Some(ViolationPolicy::ContainsTarget)
        );
        assert_eq!(
            ViolationPolicy::parse(" EXACTLY_TARGET "),
            Some(ViolationPolicy::ExactlyTarget)
        );
        assert_eq!(ViolationPolicy::parse("loose"), None);
    }

    #[test]
    fn deserializes_partial_config() {
        let options: ValidatorOptions = serde_json::from_str(
            r#"{"violation_policy":"contains_target","non_aggregate_types":["Money"]}"#,
        )
        .unwrap();
        assert_eq!(options.violation_policy, ViolationPolicy::ContainsTarget);
        assert!(options.non_aggregate_types.contains("Money"));
        assert_eq!(options.nullable_spellings.len(), 2);
    }
}
