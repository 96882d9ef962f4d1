//! Conforma Core - structural JSON Schema validation
//!
//! This crate checks whether a parsed JSON value conforms to a
//! JSON-Schema-style constraint document (a practical subset of Draft
//! 2020-12): type checking, enumerations, numeric/string/array/object
//! constraints, and recursive sub-schema application.
//!
//! ## Quick Start
//!
//! ```rust
//! use conforma_core::validate;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {"name": {"type": "string", "minLength": 1}}
//! });
//!
//! let errors = validate(&json!({"name": "widget"}), &schema).unwrap();
//! assert!(errors.is_empty());
//!
//! let errors = validate(&json!({}), &schema).unwrap();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].path, "$");
//! ```
//!
//! ## Failure tiers
//!
//! - **Soft**: keyword mismatches against the instance come back as
//!   [`ValidationError`] entries, in the order one depth-first,
//!   left-to-right, pre-order traversal discovers them. Validation always
//!   completes; an empty sequence means conformance.
//! - **Hard**: malformed input to the call itself - an unparseable
//!   `pattern` regex, a wrong-shaped keyword value, a tripped depth limit -
//!   is an [`Error`], never an entry in the soft sequence.
//!
//! ## Scope
//!
//! Reference resolution (`$ref`/`$defs`), format assertions, conditional
//! keywords (`if`/`then`/`else`, `allOf`/`anyOf`/`oneOf`/`not`), and
//! annotation collection are out of scope; unrecognized keywords are
//! silently ignored rather than rejected.
//!
//! Validation is pure and stateless across calls, so independent callers
//! may validate in parallel with no coordination. Recursion is bounded
//! only by the nesting of the schema/instance pair; see
//! [`Validator::with_max_depth`] for the opt-in guard.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod schema;
pub mod walker;

// Re-export commonly used types for convenience
pub use error::{Error, Result, ValidationError};
pub use schema::{
    json_kind, AdditionalProperties, KeywordSet, Pattern, Schema, SchemaType, TypeConstraint,
};
pub use walker::{validate, Validator};
