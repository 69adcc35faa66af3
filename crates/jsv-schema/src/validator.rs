//! # Validator
//!
//! Pairs a compiled [`Schema`] with its [`ValidationOptions`]. Build once,
//! then validate any number of instances, from any number of threads.

use serde_json::Value;

use crate::config::ValidationOptions;
use crate::error::{SchemaError, ValidationError};
use crate::instance::Instance;
use crate::report::ViolationSink;
use crate::schema::Schema;
use crate::validate::Evaluator;

/// A compiled schema ready to validate instances.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    options: ValidationOptions,
}

impl Validator {
    /// Compile `schema` with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the schema is malformed.
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        Self::with_options(schema, ValidationOptions::default())
    }

    /// Compile `schema` under explicit options.
    pub fn with_options(schema: &Value, options: ValidationOptions) -> Result<Self, SchemaError> {
        Ok(Self::from_schema(Schema::compile(schema)?, options))
    }

    /// Wrap an already compiled schema.
    pub fn from_schema(schema: Schema, options: ValidationOptions) -> Self {
        Self { schema, options }
    }

    /// The compiled schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The active policy options.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate from an unqualified root path (`""`).
    pub fn validate<I: Instance>(&self, instance: &I) -> Vec<ValidationError> {
        self.validate_at(instance, "")
    }

    /// Validate, prefixing every reported path with `root`.
    pub fn validate_at<I: Instance>(&self, instance: &I, root: &str) -> Vec<ValidationError> {
        let errors = Evaluator::new(&self.options).validate(&self.schema, instance, root);
        tracing::debug!(root, violations = errors.len(), "validated instance");
        errors
    }

    /// Whether `instance` produces no violations.
    pub fn is_valid<I: Instance>(&self, instance: &I) -> bool {
        self.validate(instance).is_empty()
    }

    /// Validate and hand the complete result to `sink`. Returns whether the
    /// instance was valid.
    pub fn report<I: Instance, S: ViolationSink + ?Sized>(
        &self,
        instance: &I,
        root: &str,
        sink: &mut S,
    ) -> bool {
        let errors = self.validate_at(instance, root);
        sink.accept(&errors);
        errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdditionalItemsPolicy;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn validate_from_empty_root() {
        let validator = Validator::new(&json!({"items": {"type": "integer"}})).unwrap();
        assert_eq!(
            validator.validate(&json!([1, "x"])),
            vec![ValidationError::new(ErrorCode::TypeMismatch, "[1]")]
        );
    }

    #[test]
    fn validate_at_prefixes_root() {
        let validator = Validator::new(&json!({"properties": {"a": {"type": "string"}}})).unwrap();
        assert_eq!(
            validator.validate_at(&json!({"a": 1}), "$"),
            vec![ValidationError::new(ErrorCode::TypeMismatch, "$.a")]
        );
    }

    #[test]
    fn options_change_outcome() {
        let schema = json!({"items": [{"type": "integer"}]});
        let strict = Validator::new(&schema).unwrap();
        let lenient = Validator::with_options(
            &schema,
            ValidationOptions {
                additional_items: AdditionalItemsPolicy::Permit,
                ..ValidationOptions::default()
            },
        )
        .unwrap();
        assert!(!strict.is_valid(&json!([1, 2])));
        assert!(lenient.is_valid(&json!([1, 2])));
    }

    #[test]
    fn report_delivers_full_list_once() {
        let validator = Validator::new(&json!({"required": ["a", "b"]})).unwrap();
        let mut sink: Vec<ValidationError> = Vec::new();
        let valid = validator.report(&json!({}), "doc", &mut sink);
        assert!(!valid);
        assert_eq!(
            sink,
            vec![
                ValidationError::new(ErrorCode::Required, "doc"),
                ValidationError::new(ErrorCode::Required, "doc"),
            ]
        );
    }

    #[test]
    fn malformed_schema_fails_construction() {
        assert!(matches!(
            Validator::new(&json!({"items": 5})),
            Err(SchemaError::InvalidKeyword { keyword: "items", .. })
        ));
    }

    #[test]
    fn validator_is_shareable_across_threads() {
        let validator = std::sync::Arc::new(
            Validator::new(&json!({"type": "array", "items": {"minimum": 0}})).unwrap(),
        );
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let v = std::sync::Arc::clone(&validator);
                std::thread::spawn(move || v.validate(&json!([i, -1])))
            })
            .collect();
        for handle in handles {
            let errors = handle.join().unwrap();
            assert_eq!(errors, vec![ValidationError::new(ErrorCode::Minimum, "[1]")]);
        }
    }
}
