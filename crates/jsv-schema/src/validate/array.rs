//! Array keywords: `maxItems`, `minItems`, `uniqueItems`, `items` and
//! `additionalItems`.
//!
//! `items` holding one schema is list validation: every element is checked
//! against it. `items` holding an array is tuple validation: element `i`
//! is checked against schema `i`, and elements past the tuple fall to
//! `additionalItems`.

use super::{index_path, Evaluator};
use crate::config::{AdditionalItemsPolicy, UniqueItemsPolicy};
use crate::error::{ErrorCode, ValidationError};
use crate::instance::Instance;
use crate::keywords::{Additional, Items};
use crate::schema::Schema;

pub(crate) fn validate<I: Instance>(
    eval: &Evaluator<'_>,
    schema: &Schema,
    instance: &I,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(elements) = instance.as_items() else {
        errors.push(ValidationError::new(ErrorCode::ArrayTypeMismatch, path));
        return;
    };

    if let Some(max) = schema.max_items {
        if elements.len() > max {
            errors.push(ValidationError::new(ErrorCode::MaxItems, path));
        }
    }

    if let Some(min) = schema.min_items {
        if elements.len() < min {
            errors.push(ValidationError::new(ErrorCode::MinItems, path));
        }
    }

    if schema.unique_items {
        check_unique(eval.options().unique_items, elements, path, errors);
    }

    match &schema.items {
        None => {}
        Some(Items::List(item)) => {
            for (i, element) in elements.iter().enumerate() {
                eval.validate_into(item, element, &index_path(path, i), errors);
            }
        }
        Some(Items::Tuple(positional)) => {
            for (i, element) in elements.iter().enumerate() {
                let sub_path = index_path(path, i);
                match positional.get(i) {
                    Some(item) => eval.validate_into(item, element, &sub_path, errors),
                    None => additional_item(eval, schema, element, sub_path, errors),
                }
            }
        }
    }
}

fn additional_item<I: Instance>(
    eval: &Evaluator<'_>,
    schema: &Schema,
    element: &I,
    path: String,
    errors: &mut Vec<ValidationError>,
) {
    match &schema.additional_items {
        Some(Additional::Schema(extra)) => eval.validate_into(extra, element, &path, errors),
        Some(Additional::Bool(true)) => {}
        Some(Additional::Bool(false)) => {
            errors.push(ValidationError::new(ErrorCode::AdditionalItems, path));
        }
        None => match eval.options().additional_items {
            AdditionalItemsPolicy::Forbid => {
                errors.push(ValidationError::new(ErrorCode::AdditionalItems, path));
            }
            AdditionalItemsPolicy::Permit => {}
        },
    }
}

fn check_unique<I: Instance>(
    policy: UniqueItemsPolicy,
    elements: &[I],
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    match policy {
        UniqueItemsPolicy::Uniform => {
            let Some((first, rest)) = elements.split_first() else {
                return;
            };
            for (i, element) in rest.iter().enumerate() {
                if element != first {
                    errors.push(ValidationError::new(
                        ErrorCode::UniqueItems,
                        index_path(path, i + 1),
                    ));
                }
            }
        }
        UniqueItemsPolicy::Distinct => {
            for (i, element) in elements.iter().enumerate() {
                if elements[..i].contains(element) {
                    errors.push(ValidationError::new(ErrorCode::UniqueItems, index_path(path, i)));
                }
            }
        }
    }
}
