//! Validation policy configuration.
//!
//! A handful of keyword behaviors differ between the engine's historical
//! semantics and common JSON Schema practice. Each one is a named policy
//! here, defaulting to the historical behavior. Options deserialize from any
//! serde format (kebab-case values) or load from environment variables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How tuple-mode `items` treats elements past the tuple when
/// `additionalItems` is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdditionalItemsPolicy {
    /// Each extra element is an `additionalItems` violation.
    #[default]
    Forbid,
    /// Extra elements are accepted.
    Permit,
}

/// Which `patternProperties` schemas apply to a key matching several patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternMatchPolicy {
    /// Only the first match, testing patterns in lexicographic source order.
    #[default]
    FirstMatch,
    /// Every matching schema; errors are merged.
    AllMatches,
}

/// Where a missing `required` property is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredPathPolicy {
    /// At the containing object's path.
    #[default]
    Object,
    /// At `<object path>.<missing property>`.
    Property,
}

/// Meaning of `uniqueItems: true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UniqueItemsPolicy {
    /// Every element must deep-equal the first; each one that does not is
    /// flagged at its index.
    #[default]
    Uniform,
    /// No element may deep-equal an earlier one; each repeat is flagged at
    /// its index.
    Distinct,
}

/// Policy set for one [`Validator`](crate::Validator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ValidationOptions {
    /// See [`AdditionalItemsPolicy`].
    pub additional_items: AdditionalItemsPolicy,
    /// See [`PatternMatchPolicy`].
    pub pattern_properties: PatternMatchPolicy,
    /// See [`RequiredPathPolicy`].
    pub required_path: RequiredPathPolicy,
    /// See [`UniqueItemsPolicy`].
    pub unique_items: UniqueItemsPolicy,
}

impl ValidationOptions {
    /// Load options from environment variables.
    ///
    /// Variables (unset means default):
    /// - `JSV_ADDITIONAL_ITEMS` — `forbid` | `permit`
    /// - `JSV_PATTERN_PROPERTIES` — `first-match` | `all-matches`
    /// - `JSV_REQUIRED_PATH` — `object` | `property`
    /// - `JSV_UNIQUE_ITEMS` — `uniform` | `distinct`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a set variable holding an
    /// unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            additional_items: parse_var(&lookup, "JSV_ADDITIONAL_ITEMS")?,
            pattern_properties: parse_var(&lookup, "JSV_PATTERN_PROPERTIES")?,
            required_path: parse_var(&lookup, "JSV_REQUIRED_PATH")?,
            unique_items: parse_var(&lookup, "JSV_UNIQUE_ITEMS")?,
        })
    }

    /// Behavior closest to standard JSON Schema: extra tuple items permitted,
    /// all matching pattern schemas applied, `uniqueItems` meaning distinct.
    pub fn interoperable() -> Self {
        Self {
            additional_items: AdditionalItemsPolicy::Permit,
            pattern_properties: PatternMatchPolicy::AllMatches,
            required_path: RequiredPathPolicy::Object,
            unique_items: UniqueItemsPolicy::Distinct,
        }
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(T::default()),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
    }
}

macro_rules! policy_from_str {
    ($ty:ty { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(ConfigError::UnknownPolicy(s.to_string())),
                }
            }
        }
    };
}

policy_from_str!(AdditionalItemsPolicy {
    "forbid" => AdditionalItemsPolicy::Forbid,
    "permit" => AdditionalItemsPolicy::Permit,
});
policy_from_str!(PatternMatchPolicy {
    "first-match" => PatternMatchPolicy::FirstMatch,
    "all-matches" => PatternMatchPolicy::AllMatches,
});
policy_from_str!(RequiredPathPolicy {
    "object" => RequiredPathPolicy::Object,
    "property" => RequiredPathPolicy::Property,
});
policy_from_str!(UniqueItemsPolicy {
    "uniform" => UniqueItemsPolicy::Uniform,
    "distinct" => UniqueItemsPolicy::Distinct,
});

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value its policy does not accept.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name, e.g. `JSV_UNIQUE_ITEMS`.
        var: String,
        /// The rejected value as read.
        value: String,
    },

    /// A policy name that no policy enum recognizes.
    #[error("unknown policy name: {0}")]
    UnknownPolicy(String),
}
