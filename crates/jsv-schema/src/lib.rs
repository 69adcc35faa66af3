//! # jsv-schema — JSON Schema Validation Engine
//!
//! Validates an already-decoded JSON (or YAML) value against a JSON Schema
//! document and returns every violation, each tagged with a keyword code and
//! the instance path it refers to.
//!
//! ## Pipeline
//!
//! 1. **Schema View** ([`keywords`]) — typed, optional accessors over a raw
//!    schema object; malformed keywords surface as [`SchemaError`].
//! 2. **Compilation** ([`schema`]) — the view is walked once into an
//!    immutable [`Schema`] tree with regexes pre-compiled.
//! 3. **Evaluation** ([`validate`]) — the composition core checks `type`,
//!    `enum`, `allOf`/`anyOf`/`oneOf`/`not`, then dispatches to the numeric,
//!    string, array or object validator by the instance's classified type,
//!    recursing for every nested schema.
//!
//! ## Example
//!
//! ```
//! use jsv_schema::{ErrorCode, Validator};
//! use serde_json::json;
//!
//! let validator = Validator::new(&json!({
//!     "items": [{"type": "integer"}],
//!     "additionalItems": false
//! }))?;
//!
//! let errors = validator.validate_at(&json!([1, "x"]), "root");
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].code(), ErrorCode::AdditionalItems);
//! assert_eq!(errors[0].path(), "root[1]");
//! # Ok::<(), jsv_schema::SchemaError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Validation violations are values, never panics or early returns.
//! - Malformed schemas fail at compilation, not during validation.
//! - No `$ref` resolution: schemas are fully inlined trees.

pub mod config;
pub mod error;
pub mod instance;
pub mod keywords;
pub mod report;
pub mod schema;
pub mod validate;
pub mod validator;

// Re-export primary types.
pub use config::{
    AdditionalItemsPolicy, ConfigError, PatternMatchPolicy, RequiredPathPolicy,
    UniqueItemsPolicy, ValidationOptions,
};
pub use error::{ErrorCode, SchemaError, ValidationError};
pub use instance::{classify, Instance, JsonType, UnsupportedType};
pub use keywords::{Additional, Items, SchemaView, TypeSpec};
pub use report::{TracingSink, ViolationSink};
pub use schema::Schema;
pub use validate::{validate, validate_with};
pub use validator::Validator;
