//! Object keywords: `maxProperties`, `minProperties`, `required`, and member
//! dispatch across `properties`, `patternProperties` and
//! `additionalProperties`.
//!
//! Each member goes to exactly one tier, in this order:
//!
//! 1. a `properties` entry with the same name;
//! 2. matching `patternProperties` schemas (first match or all matches,
//!    per [`PatternMatchPolicy`]);
//! 3. an `additionalProperties` schema;
//! 4. `additionalProperties: false` → `undefinedProperty`;
//! 5. otherwise accepted.

use super::{member_path, Evaluator};
use crate::config::{PatternMatchPolicy, RequiredPathPolicy};
use crate::error::{ErrorCode, ValidationError};
use crate::instance::Instance;
use crate::keywords::Additional;
use crate::schema::Schema;

pub(crate) fn validate<I: Instance>(
    eval: &Evaluator<'_>,
    schema: &Schema,
    instance: &I,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(members) = instance.members() else {
        errors.push(ValidationError::new(ErrorCode::ObjectTypeMismatch, path));
        return;
    };

    if let Some(max) = schema.max_properties {
        if members.len() > max {
            errors.push(ValidationError::new(ErrorCode::MaxProperties, path));
        }
    }

    if let Some(min) = schema.min_properties {
        if members.len() < min {
            errors.push(ValidationError::new(ErrorCode::MinProperties, path));
        }
    }

    for name in &schema.required {
        if instance.has_member(name) {
            continue;
        }
        let at = match eval.options().required_path {
            RequiredPathPolicy::Object => path.to_string(),
            RequiredPathPolicy::Property => member_path(path, name),
        };
        errors.push(ValidationError::new(ErrorCode::Required, at));
    }

    for (name, value) in members {
        let sub_path = member_path(path, name);

        if let Some(declared) = schema.property(name) {
            eval.validate_into(declared, value, &sub_path, errors);
            continue;
        }

        if match_patterns(eval, schema, name, value, &sub_path, errors) {
            continue;
        }

        match &schema.additional_properties {
            Some(Additional::Schema(extra)) => eval.validate_into(extra, value, &sub_path, errors),
            Some(Additional::Bool(false)) => {
                errors.push(ValidationError::new(ErrorCode::UndefinedProperty, sub_path));
            }
            Some(Additional::Bool(true)) | None => {}
        }
    }
}

/// Validate `value` against the `patternProperties` schemas whose pattern
/// matches `name`. Returns whether any pattern matched.
fn match_patterns<I: Instance>(
    eval: &Evaluator<'_>,
    schema: &Schema,
    name: &str,
    value: &I,
    path: &str,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let mut matched = false;
    for (pattern, sub) in &schema.pattern_properties {
        if !pattern.is_match(name) {
            continue;
        }
        matched = true;
        eval.validate_into(sub, value, path, errors);
        if eval.options().pattern_properties == PatternMatchPolicy::FirstMatch {
            break;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationOptions;
    use serde_json::{json, Value};

    fn run_with(options: ValidationOptions, schema: Value, instance: Value) -> Vec<ValidationError> {
        let schema = Schema::compile(&schema).unwrap();
        let mut errors = Vec::new();
        validate(&Evaluator::new(&options), &schema, &instance, "p", &mut errors);
        errors
    }

    fn run(schema: Value, instance: Value) -> Vec<ValidationError> {
        run_with(ValidationOptions::default(), schema, instance)
    }

    fn err(code: ErrorCode, path: &str) -> ValidationError {
        ValidationError::new(code, path)
    }

    #[test]
    fn max_min_required() {
        let schema = json!({"maxProperties": 10, "minProperties": 2, "required": ["a", "b"]});
        assert!(run(schema.clone(), json!({"a": 5, "b": 6})).is_empty());
        assert_eq!(
            run(schema, json!({"a": 5})),
            vec![err(ErrorCode::MinProperties, "p"), err(ErrorCode::Required, "p")]
        );
    }

    #[test]
    fn max_properties() {
        assert_eq!(
            run(json!({"maxProperties": 1}), json!({"a": 1, "b": 2})),
            vec![err(ErrorCode::MaxProperties, "p")]
        );
    }

    #[test]
    fn required_reports_one_error_per_missing_name() {
        assert_eq!(
            run(json!({"required": ["x", "y", "z"]}), json!({"y": null})),
            vec![err(ErrorCode::Required, "p"), err(ErrorCode::Required, "p")]
        );
    }

    #[test]
    fn required_path_policy_property() {
        let options = ValidationOptions {
            required_path: RequiredPathPolicy::Property,
            ..ValidationOptions::default()
        };
        assert_eq!(
            run_with(options, json!({"required": ["x", "y"]}), json!({})),
            vec![err(ErrorCode::Required, "p.x"), err(ErrorCode::Required, "p.y")]
        );
    }

    #[test]
    fn declared_properties_are_validated() {
        let schema = json!({"properties": {"a": {"type": "integer"}, "b": {"type": "string"}}});
        assert!(run(schema.clone(), json!({"a": 1, "b": "x", "c": []})).is_empty());
        assert_eq!(
            run(schema, json!({"a": "1", "b": 2})),
            vec![err(ErrorCode::TypeMismatch, "p.a"), err(ErrorCode::TypeMismatch, "p.b")]
        );
    }

    #[test]
    fn precedence_named_then_pattern_then_additional() {
        let schema = json!({
            "properties": {"a": {"type": "integer"}},
            "patternProperties": {"^b": {"type": "string"}},
            "additionalProperties": false
        });
        assert_eq!(
            run(schema.clone(), json!({"a": 1, "b1": "x", "c": 1})),
            vec![err(ErrorCode::UndefinedProperty, "p.c")]
        );
        assert_eq!(
            run(schema, json!({"a": "x", "b1": 1})),
            vec![err(ErrorCode::TypeMismatch, "p.a"), err(ErrorCode::TypeMismatch, "p.b1")]
        );
    }

    #[test]
    fn named_property_wins_over_matching_pattern() {
        let schema = json!({
            "properties": {"bee": {"type": "integer"}},
            "patternProperties": {"^b": {"type": "string"}}
        });
        assert!(run(schema, json!({"bee": 1})).is_empty());
    }

    #[test]
    fn additional_properties_schema() {
        let schema = json!({
            "properties": {"a": {}},
            "additionalProperties": {"type": "boolean"}
        });
        assert!(run(schema.clone(), json!({"a": 1, "x": true})).is_empty());
        assert_eq!(
            run(schema, json!({"a": 1, "x": 0})),
            vec![err(ErrorCode::TypeMismatch, "p.x")]
        );
    }

    #[test]
    fn absent_or_true_additional_properties_accepts_extras() {
        let open = json!({"properties": {"a": {"type": "integer"}}});
        let explicit = json!({"properties": {"a": {"type": "integer"}}, "additionalProperties": true});
        assert!(run(open, json!({"a": 1, "z": "anything"})).is_empty());
        assert!(run(explicit, json!({"a": 1, "z": "anything"})).is_empty());
    }

    #[test]
    fn additional_properties_applies_without_properties_keyword() {
        assert_eq!(
            run(json!({"additionalProperties": false}), json!({"k": 1})),
            vec![err(ErrorCode::UndefinedProperty, "p.k")]
        );
    }

    #[test]
    fn first_match_uses_lexicographic_pattern_order() {
        let schema = json!({
            "patternProperties": {"^ab": {"type": "integer"}, "^a": {"type": "string"}}
        });
        // "^a" sorts before "^ab", so only the string schema applies.
        assert!(run(schema.clone(), json!({"abc": "x"})).is_empty());
        assert_eq!(
            run(schema, json!({"abc": 1})),
            vec![err(ErrorCode::TypeMismatch, "p.abc")]
        );
    }

    #[test]
    fn all_matches_merges_errors_from_every_matching_pattern() {
        let options = ValidationOptions {
            pattern_properties: PatternMatchPolicy::AllMatches,
            ..ValidationOptions::default()
        };
        let schema = json!({
            "patternProperties": {"^a": {"type": "string"}, "c$": {"maxLength": 1}}
        });
        assert_eq!(
            run_with(options, schema.clone(), json!({"abc": "xyz"})),
            vec![err(ErrorCode::MaxLength, "p.abc")]
        );
        assert_eq!(
            run_with(options, schema, json!({"abc": 1})),
            vec![err(ErrorCode::TypeMismatch, "p.abc")]
        );
    }

    #[test]
    fn nested_objects_extend_the_path() {
        let schema = json!({
            "properties": {"outer": {"properties": {"inner": {"type": "null"}}}}
        });
        assert_eq!(
            run(schema, json!({"outer": {"inner": 0}})),
            vec![err(ErrorCode::TypeMismatch, "p.outer.inner")]
        );
    }

    #[test]
    fn non_object_instance_is_a_type_mismatch() {
        assert_eq!(
            run(json!({"required": ["a"]}), json!([])),
            vec![err(ErrorCode::ObjectTypeMismatch, "p")]
        );
    }
}
