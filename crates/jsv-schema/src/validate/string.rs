//! `maxLength`, `minLength`, `pattern`.

use crate::error::{ErrorCode, ValidationError};
use crate::instance::Instance;
use crate::schema::Schema;

/// Lengths count Unicode scalar values, not bytes. `pattern` matches
/// anywhere in the string unless the expression anchors itself.
pub(crate) fn validate<I: Instance>(
    schema: &Schema,
    instance: &I,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(text) = instance.as_str() else {
        errors.push(ValidationError::new(ErrorCode::StringTypeMismatch, path));
        return;
    };
    let length = text.chars().count();

    if let Some(max) = schema.max_length {
        if length > max {
            errors.push(ValidationError::new(ErrorCode::MaxLength, path));
        }
    }

    if let Some(min) = schema.min_length {
        if length < min {
            errors.push(ValidationError::new(ErrorCode::MinLength, path));
        }
    }

    if let Some(pattern) = &schema.pattern {
        if !pattern.is_match(text) {
            errors.push(ValidationError::new(ErrorCode::Pattern, path));
        }
    }
}
