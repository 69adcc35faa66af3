//! # Instance Classification
//!
//! Maps runtime values onto the seven JSON Schema primitive types and gives
//! the validators uniform, read-only access to them.
//!
//! Two value trees implement [`Instance`]:
//!
//! - `serde_json::Value` — always classifiable. Numbers keep their source
//!   text (`arbitrary_precision`), and integer vs number is read off that
//!   text: a literal containing `.` is a number, anything else (`1`, `-0`,
//!   `1e2`, `100000000000000000000`) is an integer.
//! - `serde_yaml::Value` — tagged values, mappings with non-string keys, and
//!   non-finite floats have no JSON counterpart and fail classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

/// The JSON Schema primitive type lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Integral numeric literal.
    Integer,
    /// Fractional numeric literal.
    Number,
    /// Character string.
    String,
    /// Ordered sequence.
    Array,
    /// Keyed mapping.
    Object,
}

impl JsonType {
    /// Every primitive type, in declaration order.
    pub const ALL: [JsonType; 7] = [
        JsonType::Null,
        JsonType::Boolean,
        JsonType::Integer,
        JsonType::Number,
        JsonType::String,
        JsonType::Array,
        JsonType::Object,
    ];

    /// The type's name as written in a schema's `type` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Integer and number both route to the numeric validator.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type name in a schema is not one of the seven primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown JSON type name: {0}")]
pub struct UnknownTypeName(pub String);

impl FromStr for JsonType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTypeName(s.to_string()))
    }
}

/// The instance value has no place in the JSON value lattice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported value: {0}")]
pub struct UnsupportedType(pub &'static str);

/// A decoded value the engine can validate.
///
/// Accessors return `None` when the value is not of the requested shape;
/// callers are expected to consult [`Instance::json_type`] first.
pub trait Instance: PartialEq + Sized {
    /// Classify the value into the JSON type lattice.
    fn json_type(&self) -> Result<JsonType, UnsupportedType>;

    /// Numeric value for `integer` and `number` instances.
    fn as_f64(&self) -> Option<f64>;

    /// Contents of a `string` instance.
    fn as_str(&self) -> Option<&str>;

    /// Elements of an `array` instance.
    fn as_items(&self) -> Option<&[Self]>;

    /// Members of an `object` instance. Non-string keys are skipped.
    fn members(&self) -> Option<Vec<(&str, &Self)>>;

    /// Whether an `object` instance has a member named `name`.
    fn has_member(&self, name: &str) -> bool;

    /// Structural equality against a literal from the schema (`enum`).
    fn matches_literal(&self, literal: &JsonValue) -> bool;
}

/// Classify any instance. Shorthand for [`Instance::json_type`].
pub fn classify<I: Instance>(value: &I) -> Result<JsonType, UnsupportedType> {
    value.json_type()
}

impl Instance for JsonValue {
    fn json_type(&self) -> Result<JsonType, UnsupportedType> {
        Ok(match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(n) => number_type(n),
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        })
    }

    fn as_f64(&self) -> Option<f64> {
        JsonValue::as_f64(self)
    }

    fn as_str(&self) -> Option<&str> {
        JsonValue::as_str(self)
    }

    fn as_items(&self) -> Option<&[Self]> {
        JsonValue::as_array(self).map(Vec::as_slice)
    }

    fn members(&self) -> Option<Vec<(&str, &Self)>> {
        JsonValue::as_object(self).map(|map| map.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }

    fn has_member(&self, name: &str) -> bool {
        JsonValue::as_object(self).is_some_and(|map| map.contains_key(name))
    }

    fn matches_literal(&self, literal: &JsonValue) -> bool {
        self == literal
    }
}

impl Instance for YamlValue {
    fn json_type(&self) -> Result<JsonType, UnsupportedType> {
        match self {
            YamlValue::Null => Ok(JsonType::Null),
            YamlValue::Bool(_) => Ok(JsonType::Boolean),
            YamlValue::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) if f.is_finite() => Ok(JsonType::Number),
                _ => Err(UnsupportedType("non-finite float")),
            },
            YamlValue::Number(_) => Ok(JsonType::Integer),
            YamlValue::String(_) => Ok(JsonType::String),
            YamlValue::Sequence(_) => Ok(JsonType::Array),
            YamlValue::Mapping(map) => {
                if map.keys().all(|k| k.is_string()) {
                    Ok(JsonType::Object)
                } else {
                    Err(UnsupportedType("mapping with non-string key"))
                }
            }
            YamlValue::Tagged(_) => Err(UnsupportedType("tagged value")),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        YamlValue::as_f64(self)
    }

    fn as_str(&self) -> Option<&str> {
        YamlValue::as_str(self)
    }

    fn as_items(&self) -> Option<&[Self]> {
        YamlValue::as_sequence(self).map(Vec::as_slice)
    }

    fn members(&self) -> Option<Vec<(&str, &Self)>> {
        YamlValue::as_mapping(self)
            .map(|map| map.iter().filter_map(|(k, v)| k.as_str().map(|k| (k, v))).collect())
    }

    fn has_member(&self, name: &str) -> bool {
        YamlValue::as_mapping(self).is_some_and(|map| map.contains_key(name))
    }

    fn matches_literal(&self, literal: &JsonValue) -> bool {
        yaml_matches_json(self, literal)
    }
}

/// Literal shape of a JSON number: a fractional separator makes it a number.
fn number_type(n: &serde_json::Number) -> JsonType {
    if n.to_string().contains('.') {
        JsonType::Number
    } else {
        JsonType::Integer
    }
}

fn yaml_matches_json(yaml: &YamlValue, json: &JsonValue) -> bool {
    match (yaml, json) {
        (YamlValue::Null, JsonValue::Null) => true,
        (YamlValue::Bool(a), JsonValue::Bool(b)) => a == b,
        (YamlValue::Number(a), JsonValue::Number(b)) => {
            if a.is_f64() != (number_type(b) == JsonType::Number) {
                return false;
            }
            match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x == y,
                _ => match (a.as_u64(), b.as_u64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => a.is_f64() && a.as_f64() == b.as_f64(),
                },
            }
        }
        (YamlValue::String(a), JsonValue::String(b)) => a == b,
        (YamlValue::Sequence(a), JsonValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| yaml_matches_json(x, y))
        }
        (YamlValue::Mapping(a), JsonValue::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| {
                    k.as_str()
                        .and_then(|k| b.get(k))
                        .is_some_and(|other| yaml_matches_json(v, other))
                })
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_json_scalars() {
        assert_eq!(classify(&json!(null)), Ok(JsonType::Null));
        assert_eq!(classify(&json!(true)), Ok(JsonType::Boolean));
        assert_eq!(classify(&json!("s")), Ok(JsonType::String));
        assert_eq!(classify(&json!([])), Ok(JsonType::Array));
        assert_eq!(classify(&json!({})), Ok(JsonType::Object));
    }

    #[test]
    fn classify_integer_vs_number_by_literal_shape() {
        let int: JsonValue = serde_json::from_str("1").unwrap();
        let negative: JsonValue = serde_json::from_str("-7").unwrap();
        let frac: JsonValue = serde_json::from_str("1.0").unwrap();
        let real: JsonValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(classify(&int), Ok(JsonType::Integer));
        assert_eq!(classify(&negative), Ok(JsonType::Integer));
        assert_eq!(classify(&frac), Ok(JsonType::Number));
        assert_eq!(classify(&real), Ok(JsonType::Number));
    }

    #[test]
    fn literals_without_fractional_separator_are_integers() {
        for text in ["-0", "1e2", "2E+3", "100000000000000000000"] {
            let value: JsonValue = serde_json::from_str(text).unwrap();
            assert_eq!(classify(&value), Ok(JsonType::Integer), "literal {text}");
        }
        let value: JsonValue = serde_json::from_str("1.5e2").unwrap();
        assert_eq!(classify(&value), Ok(JsonType::Number));
    }

    #[test]
    fn json_literal_equality_is_textual() {
        let one: JsonValue = serde_json::from_str("1.0").unwrap();
        let one_again: JsonValue = serde_json::from_str("1.00").unwrap();
        assert!(one.matches_literal(&json!(1.0)));
        assert!(!one_again.matches_literal(&json!(1.0)));
    }

    #[test]
    fn classify_yaml_values() {
        let doc: YamlValue = serde_yaml::from_str("{a: 1, b: 1.0, c: [x], d: ~}").unwrap();
        let members = doc.members().unwrap();
        let types: Vec<_> = members.iter().map(|(_, v)| v.json_type().unwrap()).collect();
        assert_eq!(
            types,
            vec![JsonType::Integer, JsonType::Number, JsonType::Array, JsonType::Null]
        );
    }

    #[test]
    fn yaml_values_outside_the_lattice_are_unsupported() {
        let nan: YamlValue = serde_yaml::from_str(".nan").unwrap();
        let inf: YamlValue = serde_yaml::from_str(".inf").unwrap();
        let tagged: YamlValue = serde_yaml::from_str("!point 3").unwrap();
        let int_key: YamlValue = serde_yaml::from_str("{1: a}").unwrap();
        assert!(nan.json_type().is_err());
        assert!(inf.json_type().is_err());
        assert!(tagged.json_type().is_err());
        assert!(int_key.json_type().is_err());
    }

    #[test]
    fn json_type_from_str() {
        assert_eq!("integer".parse::<JsonType>(), Ok(JsonType::Integer));
        assert_eq!(
            "float".parse::<JsonType>(),
            Err(UnknownTypeName("float".to_string()))
        );
    }

    #[test]
    fn yaml_literal_matching_respects_number_shape() {
        let one: YamlValue = serde_yaml::from_str("1").unwrap();
        let one_point_zero: YamlValue = serde_yaml::from_str("1.0").unwrap();
        assert!(one.matches_literal(&json!(1)));
        assert!(!one.matches_literal(&json!(1.0)));
        assert!(one_point_zero.matches_literal(&json!(1.0)));
        assert!(!one_point_zero.matches_literal(&json!(1)));
    }

    #[test]
    fn yaml_literal_matching_is_structural() {
        let doc: YamlValue = serde_yaml::from_str("{b: [1, x], a: true}").unwrap();
        assert!(doc.matches_literal(&json!({"a": true, "b": [1, "x"]})));
        assert!(!doc.matches_literal(&json!({"a": true, "b": [1, "x"], "c": null})));
        assert!(!doc.matches_literal(&json!({"a": true, "b": ["x", 1]})));
    }

    #[test]
    fn json_members_and_has_member() {
        let obj = json!({"a": 1, "b": 2});
        assert!(obj.has_member("a"));
        assert!(!obj.has_member("z"));
        assert_eq!(obj.members().unwrap().len(), 2);
        assert!(json!([1]).members().is_none());
    }
}
