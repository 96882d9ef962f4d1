//! The schema walker: recursive structural validation
//!
//! [`Validator::validate`] performs one depth-first, left-to-right,
//! pre-order traversal of the instance, applying the compiled keyword set
//! at every node and collecting soft mismatches in discovery order. The
//! walk is pure and synchronous: no I/O, no shared state, no mutation of
//! the instance. Recursion depth equals the nesting depth of the
//! schema/instance pair being checked simultaneously; a pathologically
//! nested pair can exhaust the call stack. That failure mode is accepted
//! here rather than guarded - embedders that need a bound pass one in via
//! [`Validator::with_max_depth`].
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result, ValidationError};
use crate::schema::{
    json_kind, AdditionalProperties, KeywordSet, Schema, TypeConstraint,
};
use serde_json::{Map, Number, Value};

/// A compiled validator, reusable across instances and threads
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    max_depth: Option<usize>,
}

impl Validator {
    /// Wrap an already-compiled schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            max_depth: None,
        }
    }

    /// Compile a raw schema document and wrap it
    pub fn compile(document: &Value) -> Result<Self> {
        Ok(Self::new(Schema::compile(document)?))
    }

    /// Bound the recursion depth; exceeding the bound is a hard error.
    /// The default is unbounded.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// The compiled schema this validator applies
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate one instance, returning every mismatch in traversal order
    ///
    /// An empty sequence means the instance conforms. The only hard error
    /// a compiled validator can return is [`Error::DepthLimitExceeded`].
    pub fn validate(&self, instance: &Value) -> Result<Vec<ValidationError>> {
        let mut walk = Walk {
            errors: Vec::new(),
            path: Vec::new(),
            max_depth: self.max_depth,
        };
        walk.visit(instance, &self.schema)?;
        tracing::trace!(errors = walk.errors.len(), "validation walk complete");
        Ok(walk.errors)
    }
}

/// Compile `document` and validate `instance` against it in one call
///
/// This is the single operation the core exposes to its collaborators.
pub fn validate(instance: &Value, document: &Value) -> Result<Vec<ValidationError>> {
    Validator::compile(document)?.validate(instance)
}

/// One instance-path token; rendered only when an error is emitted
enum Segment<'a> {
    Property(&'a str),
    Index(usize),
}

struct Walk<'a> {
    errors: Vec<ValidationError>,
    path: Vec<Segment<'a>>,
    max_depth: Option<usize>,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, value: &'a Value, schema: &'a Schema) -> Result<()> {
        if let Some(limit) = self.max_depth {
            if self.path.len() > limit {
                return Err(Error::DepthLimitExceeded {
                    limit,
                    path: self.render_path(),
                });
            }
        }

        let keywords = match schema {
            Schema::Bool(true) => return Ok(()),
            Schema::Bool(false) => {
                self.report("schema is false, no value allowed");
                return Ok(());
            }
            Schema::Keywords(keywords) => keywords,
        };

        if let Some(constraint) = &keywords.ty {
            let matched = self.check_type(value, constraint);
            // A single-name mismatch stops keyword evaluation for this
            // node; a list-form mismatch does not. The asymmetry is part
            // of the contract.
            if !matched && matches!(constraint, TypeConstraint::Single(_)) {
                return Ok(());
            }
        }

        if let Some(allowed) = &keywords.enumeration {
            if !allowed.iter().any(|member| member == value) {
                let members = allowed
                    .iter()
                    .map(render_value)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.report(format!("value must be one of [{}]", members));
            }
        }

        if let Some(expected) = &keywords.constant {
            if expected != value {
                self.report(format!("value must be {}", render_value(expected)));
            }
        }

        match value {
            Value::String(s) => self.check_string(s, keywords),
            Value::Number(n) => self.check_number(n, keywords),
            Value::Array(items) => self.check_array(items, keywords)?,
            Value::Object(object) => self.check_object(object, keywords)?,
            _ => {}
        }

        Ok(())
    }

    fn check_type(&mut self, value: &Value, constraint: &TypeConstraint) -> bool {
        match constraint {
            TypeConstraint::Single(ty) => {
                if ty.matches(value) {
                    true
                } else {
                    self.report(format!("expected {}, got {}", ty, json_kind(value)));
                    false
                }
            }
            TypeConstraint::AnyOf(types) => {
                if types.iter().any(|ty| ty.matches(value)) {
                    true
                } else {
                    let names = types
                        .iter()
                        .map(|ty| ty.name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.report(format!(
                        "expected one of [{}], got {}",
                        names,
                        json_kind(value)
                    ));
                    false
                }
            }
        }
    }

    fn check_string(&mut self, value: &str, keywords: &KeywordSet) {
        // Lengths count Unicode scalar values, not bytes
        let length = value.chars().count() as u64;

        if let Some(min) = keywords.min_length {
            if length < min {
                self.report(format!(
                    "string length {} is less than minimum {}",
                    length, min
                ));
            }
        }
        if let Some(max) = keywords.max_length {
            if length > max {
                self.report(format!("string length {} exceeds maximum {}", length, max));
            }
        }
        if let Some(pattern) = &keywords.pattern {
            if !pattern.regex.is_match(value) {
                self.report(format!(
                    "string does not match pattern {}",
                    pattern.source
                ));
            }
        }
    }

    fn check_number(&mut self, value: &Number, keywords: &KeywordSet) {
        let Some(value) = value.as_f64() else {
            return;
        };

        if let Some(min) = keywords.minimum {
            if value < min {
                self.report(format!("value {} is less than minimum {}", value, min));
            }
        }
        if let Some(max) = keywords.maximum {
            if value > max {
                self.report(format!("value {} exceeds maximum {}", value, max));
            }
        }
        if let Some(bound) = keywords.exclusive_minimum {
            if value <= bound {
                self.report(format!("value {} must be greater than {}", value, bound));
            }
        }
        if let Some(bound) = keywords.exclusive_maximum {
            if value >= bound {
                self.report(format!("value {} must be less than {}", value, bound));
            }
        }
    }

    fn check_array(&mut self, items: &'a [Value], keywords: &'a KeywordSet) -> Result<()> {
        let length = items.len() as u64;

        if let Some(min) = keywords.min_items {
            if length < min {
                self.report(format!(
                    "array length {} is less than minimum {}",
                    length, min
                ));
            }
        }
        if let Some(max) = keywords.max_items {
            if length > max {
                self.report(format!("array length {} exceeds maximum {}", length, max));
            }
        }

        if let Some(item_schema) = &keywords.items {
            for (index, item) in items.iter().enumerate() {
                self.path.push(Segment::Index(index));
                let outcome = self.visit(item, item_schema);
                self.path.pop();
                outcome?;
            }
        }

        if keywords.unique_items {
            // Structural equality, order-insensitive for object keys;
            // every repeat occurrence is reported at its own index.
            for (index, item) in items.iter().enumerate() {
                if items[..index].iter().any(|earlier| earlier == item) {
                    self.path.push(Segment::Index(index));
                    self.report("duplicate item in array with uniqueItems");
                    self.path.pop();
                }
            }
        }

        Ok(())
    }

    fn check_object(&mut self, object: &'a Map<String, Value>, keywords: &'a KeywordSet) -> Result<()> {
        if let Some(required) = &keywords.required {
            for name in required {
                if !object.contains_key(name) {
                    self.report(format!("missing required property \"{}\"", name));
                }
            }
        }

        if let Some(properties) = &keywords.properties {
            // Declared names absent from the value are not errors here;
            // `required` owns that concern.
            for (name, sub_schema) in properties {
                if let Some(property_value) = object.get(name) {
                    self.path.push(Segment::Property(name));
                    let outcome = self.visit(property_value, sub_schema);
                    self.path.pop();
                    outcome?;
                }
            }
        }

        match &keywords.additional_properties {
            Some(AdditionalProperties::Denied) => {
                for name in object.keys() {
                    if !keywords.declares_property(name) {
                        self.report(format!("additional property \"{}\" is not allowed", name));
                    }
                }
            }
            Some(AdditionalProperties::Schema(sub_schema)) => {
                for (name, property_value) in object {
                    if !keywords.declares_property(name) {
                        self.path.push(Segment::Property(name));
                        let outcome = self.visit(property_value, sub_schema);
                        self.path.pop();
                        outcome?;
                    }
                }
            }
            None => {}
        }

        Ok(())
    }

    fn report(&mut self, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(self.render_path(), message));
    }

    fn render_path(&self) -> String {
        let mut rendered = String::from("$");
        for segment in &self.path {
            match segment {
                Segment::Property(name) => {
                    rendered.push('.');
                    rendered.push_str(name);
                }
                Segment::Index(index) => {
                    rendered.push_str(&format!("[{}]", index));
                }
            }
        }
        rendered
    }
}

/// Render a JSON value for an error message
fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[failed to serialize]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors(instance: Value, schema: Value) -> Vec<ValidationError> {
        validate(&instance, &schema).unwrap()
    }

    #[test]
    fn single_type_mismatch_short_circuits() {
        // minLength would also fail if it were evaluated
        let result = errors(json!(42), json!({"type": "string", "minLength": 99}));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "expected string, got number");
    }

    #[test]
    fn list_type_mismatch_does_not_short_circuit() {
        let result = errors(
            json!(10),
            json!({"type": ["string", "null"], "minimum": 100}),
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].message, "expected one of [string, null], got number");
        assert_eq!(result[1].message, "value 10 is less than minimum 100");
    }

    #[test]
    fn null_satisfies_a_list_containing_null() {
        assert!(errors(json!(null), json!({"type": ["string", "null"]})).is_empty());
    }

    #[test]
    fn enum_uses_structural_equality() {
        let schema = json!({"enum": [{"a": 1}, {"a": 2}]});
        assert!(errors(json!({"a": 1}), schema.clone()).is_empty());

        let result = errors(json!({"a": 3}), schema);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].message,
            "value must be one of [{\"a\":1}, {\"a\":2}]"
        );
    }

    #[test]
    fn const_mismatch_reports_expected_value() {
        let result = errors(json!("b"), json!({"const": "a"}));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "value must be \"a\"");
    }

    #[test]
    fn string_length_counts_scalar_values_not_bytes() {
        // four scalar values, twelve bytes
        assert!(errors(json!("日本語字"), json!({"minLength": 4, "maxLength": 4})).is_empty());
    }

    #[test]
    fn pattern_is_an_unanchored_substring_search() {
        assert!(errors(json!("xx-abc-yy"), json!({"pattern": "abc"})).is_empty());
        let result = errors(json!("xyz"), json!({"pattern": "abc"}));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "string does not match pattern abc");
    }

    #[test]
    fn all_four_numeric_bounds_are_independent() {
        let schema = json!({
            "minimum": 5,
            "maximum": 5,
            "exclusiveMinimum": 5,
            "exclusiveMaximum": 5
        });
        let result = errors(json!(5), schema);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].message, "value 5 must be greater than 5");
        assert_eq!(result[1].message, "value 5 must be less than 5");
    }

    #[test]
    fn items_errors_carry_indexed_paths() {
        let result = errors(
            json!([1, "x", 3]),
            json!({"type": "array", "items": {"type": "integer"}}),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "$[1]");
        assert_eq!(result[0].message, "expected integer, got string");
    }

    #[test]
    fn nested_paths_render_dotted_and_bracketed() {
        let schema = json!({
            "properties": {
                "users": {"items": {"properties": {"age": {"type": "integer"}}}}
            }
        });
        let result = errors(json!({"users": [{"age": "old"}]}), schema);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "$.users[0].age");
    }

    #[test]
    fn required_errors_point_at_the_object_itself() {
        let result = errors(json!({}), json!({"required": ["a", "b"]}));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].path, "$");
        assert_eq!(result[0].message, "missing required property \"a\"");
        assert_eq!(result[1].message, "missing required property \"b\"");
    }

    #[test]
    fn additional_properties_false_rejects_undeclared_keys() {
        let schema = json!({
            "properties": {"name": {"type": "string"}},
            "additionalProperties": false
        });
        let result = errors(json!({"name": "ok", "extra": 1}), schema);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "$");
        assert_eq!(result[0].message, "additional property \"extra\" is not allowed");
    }

    #[test]
    fn additional_properties_schema_validates_undeclared_keys() {
        let schema = json!({
            "properties": {"name": {"type": "string"}},
            "additionalProperties": {"type": "integer"}
        });
        // Existing is fine, only the sub-schema applies
        assert!(errors(json!({"name": "ok", "count": 3}), schema.clone()).is_empty());

        let result = errors(json!({"name": "ok", "count": "three"}), schema);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "$.count");
        assert_eq!(result[0].message, "expected integer, got string");
    }

    #[test]
    fn depth_limit_is_a_hard_error() {
        let schema = json!({"items": {"items": true}});
        let validator = Validator::compile(&schema).unwrap().with_max_depth(1);
        let result = validator.validate(&json!([[1]]));
        assert!(matches!(
            result,
            Err(Error::DepthLimitExceeded { limit: 1, ref path }) if path == "$[0][0]"
        ));

        // The same pair passes with a roomier bound
        let validator = Validator::compile(&schema).unwrap().with_max_depth(2);
        assert!(validator.validate(&json!([[1]])).unwrap().is_empty());
    }

    #[test]
    fn properties_are_checked_in_declaration_order() {
        let schema = json!({
            "properties": {
                "zebra": {"type": "integer"},
                "aardvark": {"type": "integer"}
            }
        });
        let result = errors(json!({"aardvark": "x", "zebra": "y"}), schema);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].path, "$.zebra");
        assert_eq!(result[1].path, "$.aardvark");
    }
}
