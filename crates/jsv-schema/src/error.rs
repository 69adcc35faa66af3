//! # Error Model
//!
//! Two error classes that are never conflated:
//!
//! - [`ValidationError`] — a well-formed schema rejected the instance. These
//!   are values, accumulated into a list and returned in full.
//! - [`SchemaError`] — the schema itself is malformed (a recognized keyword
//!   holds a value of the wrong shape). Raised once, at compilation.

use serde::Serialize;
use thiserror::Error;

/// Closed taxonomy of violation codes, one per violated keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum ErrorCode {
    // Numeric
    /// Instance handed to the numeric validator is not a number.
    NumberTypeMismatch,
    /// Remainder of instance / `multipleOf` is non-zero.
    MultipleOf,
    /// Instance exceeds `maximum`.
    Maximum,
    /// Instance equals `maximum` while `exclusiveMaximum` is true.
    ExclusiveMaximum,
    /// Instance is below `minimum`.
    Minimum,
    /// Instance equals `minimum` while `exclusiveMinimum` is true.
    ExclusiveMinimum,

    // String
    /// Instance handed to the string validator is not a string.
    StringTypeMismatch,
    /// String longer than `maxLength`.
    MaxLength,
    /// String shorter than `minLength`.
    MinLength,
    /// String does not match `pattern`.
    Pattern,

    // Array
    /// Instance handed to the array validator is not an array.
    ArrayTypeMismatch,
    /// More elements than `maxItems`.
    MaxItems,
    /// Fewer elements than `minItems`.
    MinItems,
    /// Element violates `uniqueItems`.
    UniqueItems,
    /// Element past the tuple is not admitted by `additionalItems`.
    AdditionalItems,

    // Object
    /// Instance handed to the object validator is not an object.
    ObjectTypeMismatch,
    /// More keys than `maxProperties`.
    MaxProperties,
    /// Fewer keys than `minProperties`.
    MinProperties,
    /// A `required` property is missing.
    Required,
    /// Key not admitted when `additionalProperties` is `false`.
    UndefinedProperty,

    // Any instance
    /// Instance does not have the single type named by `type`.
    TypeMismatch,
    /// Instance type is not among the alternatives listed by `type`.
    TypesMismatch,
    /// Instance equals none of the `enum` values.
    Enum,
    /// At least one `allOf` sub-schema rejected the instance.
    AllOf,
    /// No `anyOf` sub-schema accepted the instance.
    AnyOf,
    /// Not exactly one `oneOf` sub-schema accepted the instance.
    OneOf,
    /// The `not` sub-schema accepted the instance.
    Not,
    /// Instance falls outside the JSON value lattice.
    UndefinedType,
}

impl ErrorCode {
    /// Stable name of the code, as used in serialized reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumberTypeMismatch => "numberType",
            Self::MultipleOf => "multipleOf",
            Self::Maximum => "maximum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::Minimum => "minimum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::StringTypeMismatch => "stringType",
            Self::MaxLength => "maxLength",
            Self::MinLength => "minLength",
            Self::Pattern => "pattern",
            Self::ArrayTypeMismatch => "arrayType",
            Self::MaxItems => "maxItems",
            Self::MinItems => "minItems",
            Self::UniqueItems => "uniqueItems",
            Self::AdditionalItems => "additionalItems",
            Self::ObjectTypeMismatch => "objectType",
            Self::MaxProperties => "maxProperties",
            Self::MinProperties => "minProperties",
            Self::Required => "required",
            Self::UndefinedProperty => "undefinedProperty",
            Self::TypeMismatch => "type",
            Self::TypesMismatch => "types",
            Self::Enum => "enum",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
            Self::Not => "not",
            Self::UndefinedType => "undefinedType",
        }
    }
}

impl From<ErrorCode> for &'static str {
    fn from(code: ErrorCode) -> Self {
        code.as_str()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violation: which keyword failed, and where in the instance.
///
/// Paths use `<path>.<property>` for object members and `<path>[<index>]`
/// for array elements, starting from the root path the caller supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[error("{code} at {path}")]
pub struct ValidationError {
    code: ErrorCode,
    path: String,
}

impl ValidationError {
    /// Build a violation for `code` at `path`.
    pub fn new(code: ErrorCode, path: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
        }
    }

    /// The violated keyword.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Location of the offending value inside the instance.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Malformed-schema faults, raised while compiling a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A recognized keyword holds a value of the wrong shape.
    #[error("invalid keyword \"{keyword}\" at {location}: expected {expected}")]
    InvalidKeyword {
        /// Keyword name, e.g. `required`.
        keyword: &'static str,
        /// JSON pointer to the schema object holding the keyword.
        location: String,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// A `pattern` or `patternProperties` regular expression does not compile.
    #[error("invalid regular expression {pattern:?} in \"{keyword}\" at {location}: {reason}")]
    InvalidPattern {
        /// Keyword holding the expression.
        keyword: &'static str,
        /// JSON pointer to the schema object holding the keyword.
        location: String,
        /// The offending expression source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// The schema document (or a nested schema position) is not an object.
    #[error("schema at {0} must be an object")]
    NotAnObject(String),

    /// A YAML schema holds a value with no JSON counterpart: a tagged node,
    /// a non-string mapping key, or a non-finite float.
    #[error("YAML value at {location} has no JSON form: {reason}")]
    UnrepresentableYaml {
        /// JSON pointer to the offending value.
        location: String,
        /// What kind of value was found.
        reason: &'static str,
    },

    /// The schema text is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema text is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
