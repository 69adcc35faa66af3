//! `multipleOf`, `maximum`/`exclusiveMaximum`, `minimum`/`exclusiveMinimum`.

use crate::error::{ErrorCode, ValidationError};
use crate::instance::Instance;
use crate::schema::Schema;

/// Every check runs; several violations may be reported for one value.
pub(crate) fn validate<I: Instance>(
    schema: &Schema,
    instance: &I,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let value = match (instance.json_type(), instance.as_f64()) {
        (Ok(t), Some(value)) if t.is_numeric() => value,
        _ => {
            errors.push(ValidationError::new(ErrorCode::NumberTypeMismatch, path));
            return;
        }
    };

    if let Some(divisor) = schema.multiple_of {
        if value % divisor != 0.0 {
            errors.push(ValidationError::new(ErrorCode::MultipleOf, path));
        }
    }

    if let Some(maximum) = schema.maximum {
        if value > maximum {
            errors.push(ValidationError::new(ErrorCode::Maximum, path));
        } else if schema.exclusive_maximum && value == maximum {
            errors.push(ValidationError::new(ErrorCode::ExclusiveMaximum, path));
        }
    }

    if let Some(minimum) = schema.minimum {
        if value < minimum {
            errors.push(ValidationError::new(ErrorCode::Minimum, path));
        } else if schema.exclusive_minimum && value == minimum {
            errors.push(ValidationError::new(ErrorCode::ExclusiveMinimum, path));
        }
    }
}
