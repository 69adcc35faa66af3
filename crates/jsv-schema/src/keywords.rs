//! # Schema View
//!
//! A read-only window over a decoded schema object. Each recognized keyword
//! has one accessor returning `Result<Option<T>, SchemaError>`:
//!
//! - `Ok(None)` — the keyword is absent.
//! - `Ok(Some(_))` — present and well-formed.
//! - `Err(_)` — present with the wrong shape (malformed schema).
//!
//! Accessors that yield nested schemas wrap them in another [`SchemaView`]
//! whose location extends this one's, so faults deep in a schema tree point
//! at the exact offending position.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::instance::JsonType;

/// The `type` keyword: one required type or a set of alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// `"type": "integer"`
    Single(JsonType),
    /// `"type": ["integer", "string"]`
    Mixed(Vec<JsonType>),
}

impl TypeSpec {
    /// Whether an instance of type `actual` satisfies this descriptor.
    pub fn admits(&self, actual: JsonType) -> bool {
        match self {
            Self::Single(expected) => *expected == actual,
            Self::Mixed(alternatives) => alternatives.contains(&actual),
        }
    }
}

/// The `items` keyword.
#[derive(Debug, Clone)]
pub enum Items<S> {
    /// One schema for every element (list validation).
    List(S),
    /// One schema per position (tuple validation).
    Tuple(Vec<S>),
}

/// `additionalItems` / `additionalProperties` when present.
///
/// Absence is modeled by the surrounding `Option`, never folded into
/// `Bool(true)`: the two keywords default differently.
#[derive(Debug, Clone)]
pub enum Additional<S> {
    /// `true` admits extras unconditionally, `false` forbids them.
    Bool(bool),
    /// Extras must satisfy this schema.
    Schema(S),
}

/// Borrowed view over one schema object.
#[derive(Debug, Clone)]
pub struct SchemaView<'a> {
    map: &'a Map<String, Value>,
    location: String,
}

/// Outcome of reading one keyword: absent, present, or malformed.
pub type KeywordResult<T> = Result<Option<T>, SchemaError>;

impl<'a> SchemaView<'a> {
    /// View a root schema. Fails if `value` is not a JSON object.
    pub fn new(value: &'a Value) -> Result<Self, SchemaError> {
        Self::at(value, "#".to_string())
    }

    fn at(value: &'a Value, location: String) -> Result<Self, SchemaError> {
        match value {
            Value::Object(map) => Ok(Self { map, location }),
            _ => Err(SchemaError::NotAnObject(location)),
        }
    }

    /// JSON pointer to this schema inside the root document.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Number of keywords (recognized or not) in the schema object.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the schema object is `{}`.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn invalid(&self, keyword: &'static str, expected: &'static str) -> SchemaError {
        SchemaError::InvalidKeyword {
            keyword,
            location: self.location.clone(),
            expected,
        }
    }

    fn child(&self, value: &'a Value, segments: &[&str]) -> Result<SchemaView<'a>, SchemaError> {
        let mut location = self.location.clone();
        for segment in segments {
            location.push('/');
            location.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        Self::at(value, location)
    }

    fn number(&self, keyword: &'static str) -> KeywordResult<f64> {
        match self.map.get(keyword) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(keyword, "a number")),
        }
    }

    fn count(&self, keyword: &'static str) -> KeywordResult<usize> {
        match self.map.get(keyword) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(keyword, "a non-negative integer")),
        }
    }

    fn flag(&self, keyword: &'static str) -> KeywordResult<bool> {
        match self.map.get(keyword) {
            None => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(keyword, "a boolean")),
        }
    }

    fn schema_array(&self, keyword: &'static str) -> KeywordResult<Vec<SchemaView<'a>>> {
        let Some(v) = self.map.get(keyword) else {
            return Ok(None);
        };
        let Value::Array(entries) = v else {
            return Err(self.invalid(keyword, "an array of schemas"));
        };
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                self.child(entry, &[keyword, i.to_string().as_str()])
                    .map_err(|_| self.invalid(keyword, "an array of schemas"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn additional(&self, keyword: &'static str) -> KeywordResult<Additional<SchemaView<'a>>> {
        match self.map.get(keyword) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(Additional::Bool(*b))),
            Some(v @ Value::Object(_)) => Ok(Some(Additional::Schema(self.child(v, &[keyword])?))),
            Some(_) => Err(self.invalid(keyword, "a boolean or a schema")),
        }
    }

    // -- Any instance ------------------------------------------------------

    /// `type`
    pub fn type_spec(&self) -> KeywordResult<TypeSpec> {
        const EXPECTED: &str = "a type name or a non-empty array of type names";
        match self.map.get("type") {
            None => Ok(None),
            Some(Value::String(name)) => name
                .parse()
                .map(|t| Some(TypeSpec::Single(t)))
                .map_err(|_| self.invalid("type", EXPECTED)),
            Some(Value::Array(names)) if !names.is_empty() => names
                .iter()
                .map(|n| n.as_str().and_then(|s| s.parse().ok()))
                .collect::<Option<Vec<JsonType>>>()
                .map(|types| Some(TypeSpec::Mixed(types)))
                .ok_or_else(|| self.invalid("type", EXPECTED)),
            Some(_) => Err(self.invalid("type", EXPECTED)),
        }
    }

    /// `enum`
    pub fn enum_values(&self) -> KeywordResult<&'a [Value]> {
        match self.map.get("enum") {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(values.as_slice())),
            Some(_) => Err(self.invalid("enum", "an array")),
        }
    }

    /// `allOf`
    pub fn all_of(&self) -> KeywordResult<Vec<SchemaView<'a>>> {
        self.schema_array("allOf")
    }

    /// `anyOf`
    pub fn any_of(&self) -> KeywordResult<Vec<SchemaView<'a>>> {
        self.schema_array("anyOf")
    }

    /// `oneOf`
    pub fn one_of(&self) -> KeywordResult<Vec<SchemaView<'a>>> {
        self.schema_array("oneOf")
    }

    /// `not`
    pub fn not(&self) -> KeywordResult<SchemaView<'a>> {
        match self.map.get("not") {
            None => Ok(None),
            Some(v) => self
                .child(v, &["not"])
                .map(Some)
                .map_err(|_| self.invalid("not", "a schema")),
        }
    }

    // -- Numeric -----------------------------------------------------------

    /// `multipleOf`, which must be strictly positive.
    pub fn multiple_of(&self) -> KeywordResult<f64> {
        match self.number("multipleOf")? {
            Some(d) if d <= 0.0 => Err(self.invalid("multipleOf", "a number greater than 0")),
            other => Ok(other),
        }
    }

    /// `maximum`
    pub fn maximum(&self) -> KeywordResult<f64> {
        self.number("maximum")
    }

    /// `exclusiveMaximum`
    pub fn exclusive_maximum(&self) -> KeywordResult<bool> {
        self.flag("exclusiveMaximum")
    }

    /// `minimum`
    pub fn minimum(&self) -> KeywordResult<f64> {
        self.number("minimum")
    }

    /// `exclusiveMinimum`
    pub fn exclusive_minimum(&self) -> KeywordResult<bool> {
        self.flag("exclusiveMinimum")
    }

    // -- String ------------------------------------------------------------

    /// `maxLength`
    pub fn max_length(&self) -> KeywordResult<usize> {
        self.count("maxLength")
    }

    /// `minLength`
    pub fn min_length(&self) -> KeywordResult<usize> {
        self.count("minLength")
    }

    /// `pattern`, as uncompiled source.
    pub fn pattern(&self) -> KeywordResult<&'a str> {
        match self.map.get("pattern") {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid("pattern", "a regular expression string")),
        }
    }

    // -- Array -------------------------------------------------------------

    /// `items`
    pub fn items(&self) -> KeywordResult<Items<SchemaView<'a>>> {
        match self.map.get("items") {
            None => Ok(None),
            Some(v @ Value::Object(_)) => Ok(Some(Items::List(self.child(v, &["items"])?))),
            Some(Value::Array(_)) => self
                .schema_array("items")
                .map(|tuple| tuple.map(Items::Tuple))
                .map_err(|_| self.invalid("items", "a schema or an array of schemas")),
            Some(_) => Err(self.invalid("items", "a schema or an array of schemas")),
        }
    }

    /// `additionalItems`
    pub fn additional_items(&self) -> KeywordResult<Additional<SchemaView<'a>>> {
        self.additional("additionalItems")
    }

    /// `maxItems`
    pub fn max_items(&self) -> KeywordResult<usize> {
        self.count("maxItems")
    }

    /// `minItems`
    pub fn min_items(&self) -> KeywordResult<usize> {
        self.count("minItems")
    }

    /// `uniqueItems`
    pub fn unique_items(&self) -> KeywordResult<bool> {
        self.flag("uniqueItems")
    }

    // -- Object ------------------------------------------------------------

    /// `maxProperties`
    pub fn max_properties(&self) -> KeywordResult<usize> {
        self.count("maxProperties")
    }

    /// `minProperties`
    pub fn min_properties(&self) -> KeywordResult<usize> {
        self.count("minProperties")
    }

    /// `required`
    pub fn required(&self) -> KeywordResult<Vec<&'a str>> {
        const EXPECTED: &str = "an array of strings";
        match self.map.get("required") {
            None => Ok(None),
            Some(Value::Array(names)) => names
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .map(Some)
                .ok_or_else(|| self.invalid("required", EXPECTED)),
            Some(_) => Err(self.invalid("required", EXPECTED)),
        }
    }

    fn schema_map(&self, keyword: &'static str) -> KeywordResult<Vec<(&'a str, SchemaView<'a>)>> {
        const EXPECTED: &str = "an object whose values are schemas";
        let Some(v) = self.map.get(keyword) else {
            return Ok(None);
        };
        let Value::Object(entries) = v else {
            return Err(self.invalid(keyword, EXPECTED));
        };
        entries
            .iter()
            .map(|(name, schema)| {
                self.child(schema, &[keyword, name.as_str()])
                    .map(|view| (name.as_str(), view))
                    .map_err(|_| self.invalid(keyword, EXPECTED))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// `properties`, keyed by property name.
    pub fn properties(&self) -> KeywordResult<Vec<(&'a str, SchemaView<'a>)>> {
        self.schema_map("properties")
    }

    /// `patternProperties`, keyed by uncompiled regular expression source.
    pub fn pattern_properties(&self) -> KeywordResult<Vec<(&'a str, SchemaView<'a>)>> {
        self.schema_map("patternProperties")
    }

    /// `additionalProperties`
    pub fn additional_properties(&self) -> KeywordResult<Additional<SchemaView<'a>>> {
        self.additional("additionalProperties")
    }
}
