//! # Composition & Dispatch Core
//!
//! The single recursive entry point every schema evaluation goes through.
//! For one `(schema, instance, path)` triple it:
//!
//! 1. classifies the instance (unclassifiable → `UndefinedType`, stop);
//! 2. checks `type`, then `enum`;
//! 3. folds `allOf`, `anyOf`, `oneOf` and `not` from the pass/fail of full,
//!    independent sub-validations;
//! 4. dispatches to the numeric, string, array or object validator by the
//!    classified type.
//!
//! Nothing short-circuits except `anyOf`, which stops at the first passing
//! sub-schema. Array and object validators recurse back into
//! [`Evaluator::validate_into`] for every nested schema, so errors from the
//! whole tree land in one ordered list.

mod array;
mod numeric;
mod object;
mod string;

use crate::config::ValidationOptions;
use crate::error::{ErrorCode, ValidationError};
use crate::instance::{Instance, JsonType};
use crate::keywords::TypeSpec;
use crate::schema::Schema;

/// Validate `instance` against `schema` with default options.
///
/// `path` is the root path prepended to every reported location; pass `""`
/// for an unqualified root. An empty result means the instance is valid.
pub fn validate<I: Instance>(schema: &Schema, instance: &I, path: &str) -> Vec<ValidationError> {
    validate_with(schema, instance, path, &ValidationOptions::default())
}

/// Validate `instance` against `schema` under explicit policy options.
pub fn validate_with<I: Instance>(
    schema: &Schema,
    instance: &I,
    path: &str,
    options: &ValidationOptions,
) -> Vec<ValidationError> {
    Evaluator::new(options).validate(schema, instance, path)
}

/// Recursive evaluator. Holds only borrowed, read-only policy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Evaluator<'o> {
    options: &'o ValidationOptions,
}

impl<'o> Evaluator<'o> {
    pub(crate) fn new(options: &'o ValidationOptions) -> Self {
        Self { options }
    }

    pub(crate) fn options(&self) -> &ValidationOptions {
        self.options
    }

    /// Full error list for one sub-validation.
    pub(crate) fn validate<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.validate_into(schema, instance, path, &mut errors);
        errors
    }

    /// Whether `instance` satisfies `schema` outright. The sub-validation is
    /// evaluated to completion; only its emptiness is used.
    fn passes<I: Instance>(&self, schema: &Schema, instance: &I, path: &str) -> bool {
        self.validate(schema, instance, path).is_empty()
    }

    pub(crate) fn validate_into<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let actual = match instance.json_type() {
            Ok(t) => t,
            Err(e) => {
                tracing::trace!(path, reason = %e, "unclassifiable instance");
                errors.push(ValidationError::new(ErrorCode::UndefinedType, path));
                return;
            }
        };

        self.check_type(schema, actual, path, errors);
        self.check_enum(schema, instance, path, errors);
        self.check_all_of(schema, instance, path, errors);
        self.check_any_of(schema, instance, path, errors);
        self.check_one_of(schema, instance, path, errors);
        self.check_not(schema, instance, path, errors);

        tracing::trace!(path, json_type = %actual, "dispatching");
        match actual {
            JsonType::Integer | JsonType::Number => numeric::validate(schema, instance, path, errors),
            JsonType::String => string::validate(schema, instance, path, errors),
            JsonType::Array => array::validate(self, schema, instance, path, errors),
            JsonType::Object => object::validate(self, schema, instance, path, errors),
            JsonType::Boolean | JsonType::Null => {}
        }
    }

    fn check_type(
        &self,
        schema: &Schema,
        actual: JsonType,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(spec) = &schema.types else {
            return;
        };
        if spec.admits(actual) {
            return;
        }
        let code = match spec {
            TypeSpec::Single(_) => ErrorCode::TypeMismatch,
            TypeSpec::Mixed(_) => ErrorCode::TypesMismatch,
        };
        errors.push(ValidationError::new(code, path));
    }

    fn check_enum<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(values) = &schema.enum_values else {
            return;
        };
        if !values.iter().any(|v| instance.matches_literal(v)) {
            errors.push(ValidationError::new(ErrorCode::Enum, path));
        }
    }

    fn check_all_of<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(all) = &schema.all_of else {
            return;
        };
        for sub in all {
            if !self.passes(sub, instance, path) {
                errors.push(ValidationError::new(ErrorCode::AllOf, path));
            }
        }
    }

    fn check_any_of<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(any) = &schema.any_of else {
            return;
        };
        if !any.iter().any(|sub| self.passes(sub, instance, path)) {
            errors.push(ValidationError::new(ErrorCode::AnyOf, path));
        }
    }

    fn check_one_of<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(one) = &schema.one_of else {
            return;
        };
        let passing = one
            .iter()
            .filter(|sub| self.passes(sub, instance, path))
            .count();
        if passing != 1 {
            errors.push(ValidationError::new(ErrorCode::OneOf, path));
        }
    }

    fn check_not<I: Instance>(
        &self,
        schema: &Schema,
        instance: &I,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(not) = &schema.not {
            if self.passes(not, instance, path) {
                errors.push(ValidationError::new(ErrorCode::Not, path));
            }
        }
    }
}

/// `<path>[<index>]`
pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// `<path>.<name>`
pub(crate) fn member_path(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}
