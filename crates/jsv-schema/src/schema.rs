//! # Compiled Schema
//!
//! [`Schema::compile`] reads every recognized keyword through a
//! [`SchemaView`] and builds an immutable tree. All shape checks and regex
//! compilation happen here, once; a malformed keyword anywhere in the tree
//! fails the whole compilation. The resulting tree holds no interior
//! mutability and is `Send + Sync`, so one compiled schema can serve any
//! number of concurrent validations.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::error::SchemaError;
use crate::keywords::{Additional, Items, SchemaView, TypeSpec};

/// An immutable, pre-compiled JSON schema node.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) types: Option<TypeSpec>,
    pub(crate) enum_values: Option<Vec<Value>>,
    pub(crate) all_of: Option<Vec<Schema>>,
    pub(crate) any_of: Option<Vec<Schema>>,
    pub(crate) one_of: Option<Vec<Schema>>,
    pub(crate) not: Option<Box<Schema>>,

    pub(crate) multiple_of: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) exclusive_maximum: bool,
    pub(crate) minimum: Option<f64>,
    pub(crate) exclusive_minimum: bool,

    pub(crate) max_length: Option<usize>,
    pub(crate) min_length: Option<usize>,
    pub(crate) pattern: Option<Regex>,

    pub(crate) items: Option<Items<Box<Schema>>>,
    pub(crate) additional_items: Option<Additional<Box<Schema>>>,
    pub(crate) max_items: Option<usize>,
    pub(crate) min_items: Option<usize>,
    pub(crate) unique_items: bool,

    pub(crate) max_properties: Option<usize>,
    pub(crate) min_properties: Option<usize>,
    pub(crate) required: Vec<String>,
    pub(crate) properties: BTreeMap<String, Schema>,
    /// Ordered by pattern source text.
    pub(crate) pattern_properties: Vec<(Regex, Schema)>,
    pub(crate) additional_properties: Option<Additional<Box<Schema>>>,
}

impl Schema {
    /// Compile a decoded schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAnObject`] if `value` (or any nested schema
    /// position) is not an object, [`SchemaError::InvalidKeyword`] if a
    /// recognized keyword is malformed, and [`SchemaError::InvalidPattern`]
    /// if a regular expression does not compile.
    pub fn compile(value: &Value) -> Result<Self, SchemaError> {
        let view = SchemaView::new(value)?;
        let schema = Self::from_view(&view)?;
        tracing::debug!(keywords = view.len(), "compiled schema");
        Ok(schema)
    }

    /// Decode JSON text and compile it.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::compile(&value)
    }

    /// Decode YAML text and compile it.
    ///
    /// The YAML is first mapped onto the JSON data model, so keys must be
    /// strings and numbers must be finite. Anything else is rejected with
    /// [`SchemaError::UnrepresentableYaml`].
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let document: YamlValue = serde_yaml::from_str(text)?;
        let value = yaml_to_json(&document, "#")?;
        Self::compile(&value)
    }

    /// Compile the schema behind a view, recursing into nested schemas.
    pub fn from_view(view: &SchemaView<'_>) -> Result<Self, SchemaError> {
        let items = match view.items()? {
            None => None,
            Some(Items::List(v)) => Some(Items::List(Box::new(Self::from_view(&v)?))),
            Some(Items::Tuple(vs)) => Some(Items::Tuple(
                vs.iter()
                    .map(|v| Self::from_view(v).map(Box::new))
                    .collect::<Result<_, _>>()?,
            )),
        };

        let properties = view
            .properties()?
            .unwrap_or_default()
            .into_iter()
            .map(|(name, v)| Ok((name.to_string(), Self::from_view(&v)?)))
            .collect::<Result<BTreeMap<_, _>, SchemaError>>()?;

        let mut pattern_properties = view
            .pattern_properties()?
            .unwrap_or_default()
            .into_iter()
            .map(|(source, v)| {
                let re = compile_regex("patternProperties", view.location(), source)?;
                Ok((re, Self::from_view(&v)?))
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        pattern_properties.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

        Ok(Self {
            types: view.type_spec()?,
            enum_values: view.enum_values()?.map(<[Value]>::to_vec),
            all_of: compile_all(view.all_of()?)?,
            any_of: compile_all(view.any_of()?)?,
            one_of: compile_all(view.one_of()?)?,
            not: view
                .not()?
                .map(|v| Self::from_view(&v).map(Box::new))
                .transpose()?,

            multiple_of: view.multiple_of()?,
            maximum: view.maximum()?,
            exclusive_maximum: view.exclusive_maximum()?.unwrap_or(false),
            minimum: view.minimum()?,
            exclusive_minimum: view.exclusive_minimum()?.unwrap_or(false),

            max_length: view.max_length()?,
            min_length: view.min_length()?,
            pattern: view
                .pattern()?
                .map(|source| compile_regex("pattern", view.location(), source))
                .transpose()?,

            items,
            additional_items: compile_additional(view.additional_items()?)?,
            max_items: view.max_items()?,
            min_items: view.min_items()?,
            unique_items: view.unique_items()?.unwrap_or(false),

            max_properties: view.max_properties()?,
            min_properties: view.min_properties()?,
            required: view
                .required()?
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
            properties,
            pattern_properties,
            additional_properties: compile_additional(view.additional_properties()?)?,
        })
    }

    /// Schema for the named property, if `properties` declares one.
    pub(crate) fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.get(name)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::compile(value)
    }
}

impl std::str::FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

fn yaml_to_json(value: &YamlValue, location: &str) -> Result<Value, SchemaError> {
    let unrepresentable = |reason| SchemaError::UnrepresentableYaml {
        location: location.to_string(),
        reason,
    };
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| unrepresentable("non-finite float"))?
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json(item, &pointer(location, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut object = Map::new();
            for (key, item) in map {
                let key = key
                    .as_str()
                    .ok_or_else(|| unrepresentable("mapping with non-string key"))?;
                object.insert(key.to_string(), yaml_to_json(item, &pointer(location, key))?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(_) => return Err(unrepresentable("tagged value")),
    })
}

fn pointer(location: &str, segment: &str) -> String {
    format!("{location}/{}", segment.replace('~', "~0").replace('/', "~1"))
}

fn compile_all(views: Option<Vec<SchemaView<'_>>>) -> Result<Option<Vec<Schema>>, SchemaError> {
    views
        .map(|vs| vs.iter().map(Schema::from_view).collect::<Result<Vec<_>, _>>())
        .transpose()
}

fn compile_additional(
    additional: Option<Additional<SchemaView<'_>>>,
) -> Result<Option<Additional<Box<Schema>>>, SchemaError> {
    Ok(match additional {
        None => None,
        Some(Additional::Bool(b)) => Some(Additional::Bool(b)),
        Some(Additional::Schema(v)) => Some(Additional::Schema(Box::new(Schema::from_view(&v)?))),
    })
}

fn compile_regex(keyword: &'static str, location: &str, source: &str) -> Result<Regex, SchemaError> {
    Regex::new(source).map_err(|e| SchemaError::InvalidPattern {
        keyword,
        location: location.to_string(),
        pattern: source.to_string(),
        reason: e.to_string(),
    })
}
