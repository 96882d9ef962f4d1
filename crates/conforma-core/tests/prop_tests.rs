//! Property-based tests for the validator
//!
//! These verify that validation behaves as a total, deterministic function
//! across a wide range of generated instances.

use conforma_core::{validate, Validator};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map(
                    "[a-zA-Z_][a-zA-Z0-9_]{0,20}",
                    inner,
                    0..5
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// A keyword-rich schema that exercises every constraint family
fn exercising_schema() -> Value {
    json!({
        "type": ["object", "array", "string", "number", "null"],
        "minLength": 3,
        "maxLength": 20,
        "pattern": "[a-z]",
        "minimum": -1000,
        "maximum": 1000,
        "minItems": 1,
        "maxItems": 3,
        "items": {"type": ["integer", "string", "null"]},
        "uniqueItems": true,
        "required": ["id"],
        "properties": {"id": {"type": "string"}},
        "additionalProperties": {"type": ["integer", "string", "null", "boolean", "object", "array"]}
    })
}

proptest! {
    /// Validation never panics, whatever the instance looks like
    #[test]
    fn prop_validate_never_panics(instance in json_value_strategy()) {
        let _ = validate(&instance, &json!(true));
        let _ = validate(&instance, &json!(false));
        let _ = validate(&instance, &exercising_schema());
    }

    /// Two calls with the same inputs return identical sequences
    #[test]
    fn prop_validate_is_deterministic(instance in json_value_strategy()) {
        let validator = Validator::compile(&exercising_schema()).unwrap();
        let first = validator.validate(&instance).unwrap();
        let second = validator.validate(&instance).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The `true` schema accepts every value
    #[test]
    fn prop_true_schema_accepts_everything(instance in json_value_strategy()) {
        let errors = validate(&instance, &json!(true)).unwrap();
        prop_assert!(errors.is_empty());
    }

    /// The `false` schema rejects every value with exactly one error
    #[test]
    fn prop_false_schema_rejects_everything(instance in json_value_strategy()) {
        let errors = validate(&instance, &json!(false)).unwrap();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].path.as_str(), "$");
    }

    /// An instance with no reported errors stays clean on repeated runs,
    /// and one with errors keeps them in a stable order
    #[test]
    fn prop_error_order_is_stable_under_reuse(instances in proptest::collection::vec(json_value_strategy(), 1..4)) {
        let validator = Validator::compile(&exercising_schema()).unwrap();
        for instance in &instances {
            let first = validator.validate(instance).unwrap();
            let second = validator.validate(instance).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
