//! Schema compilation: raw JSON documents into typed keyword sets
//!
//! A schema document is either the literal `true` (matches anything), the
//! literal `false` (matches nothing), or an object mapping keyword names to
//! constraint values. Compilation turns the raw `serde_json::Value` into a
//! [`Schema`] up front so that the walker never re-interprets JSON shapes
//! on the hot path and so that malformed schemas surface as hard errors
//! before any instance is looked at.
//!
//! Unrecognized keywords are collected into [`KeywordSet::ignored`] and are
//! never a compile error; recognized keywords with wrong-shaped values are.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::fmt;

/// A compiled schema document
#[derive(Debug, Clone)]
pub enum Schema {
    /// The boolean schemas: `true` accepts every value, `false` rejects all
    Bool(bool),
    /// An object document, reduced to its recognized keywords
    Keywords(Box<KeywordSet>),
}

impl Schema {
    /// Compile a raw schema document into its typed form
    pub fn compile(document: &Value) -> Result<Schema> {
        match document {
            Value::Bool(accept) => Ok(Schema::Bool(*accept)),
            Value::Object(map) => Ok(Schema::Keywords(Box::new(KeywordSet::compile(map)?))),
            _ => Err(Error::MalformedDocument),
        }
    }
}

/// The recognized keyword subset of one schema object
///
/// Every field is optional and independently meaningful. Sub-schemas
/// (`items`, `properties`, `additionalProperties`) are compiled recursively,
/// so one `KeywordSet` tree mirrors one schema document.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    /// `type`: a single type name or a list of alternatives
    pub ty: Option<TypeConstraint>,
    /// `enum`: the value must structurally equal one member
    pub enumeration: Option<Vec<Value>>,
    /// `const`: the value must structurally equal this
    pub constant: Option<Value>,
    /// `minLength` / `maxLength`, in Unicode scalar values
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    /// `pattern`, matched as an unanchored substring search
    pub pattern: Option<Pattern>,
    /// `minimum` / `maximum`: inclusive numeric bounds
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// `exclusiveMinimum` / `exclusiveMaximum`: strict numeric bounds
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    /// `minItems` / `maxItems`: array length bounds
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    /// `items`: one sub-schema applied to every element
    pub items: Option<Schema>,
    /// `uniqueItems`: reject structurally duplicate elements
    pub unique_items: bool,
    /// `required`: property names that must be present
    pub required: Option<Vec<String>>,
    /// `properties`: sub-schemas per property, in declaration order
    pub properties: Option<Vec<(String, Schema)>>,
    /// `additionalProperties`: policy for undeclared properties
    pub additional_properties: Option<AdditionalProperties>,
    /// Keyword names this validator does not implement
    pub ignored: Vec<String>,
}

impl KeywordSet {
    fn compile(map: &Map<String, Value>) -> Result<KeywordSet> {
        let mut keywords = KeywordSet::default();

        for (name, raw) in map {
            match name.as_str() {
                "type" => keywords.ty = Some(compile_type(raw)?),
                "enum" => keywords.enumeration = Some(expect_array(raw, "enum")?.to_vec()),
                "const" => keywords.constant = Some(raw.clone()),
                "minLength" => keywords.min_length = Some(expect_unsigned(raw, "minLength")?),
                "maxLength" => keywords.max_length = Some(expect_unsigned(raw, "maxLength")?),
                "pattern" => keywords.pattern = Some(compile_pattern(raw)?),
                "minimum" => keywords.minimum = Some(expect_number(raw, "minimum")?),
                "maximum" => keywords.maximum = Some(expect_number(raw, "maximum")?),
                "exclusiveMinimum" => {
                    keywords.exclusive_minimum = Some(expect_number(raw, "exclusiveMinimum")?)
                }
                "exclusiveMaximum" => {
                    keywords.exclusive_maximum = Some(expect_number(raw, "exclusiveMaximum")?)
                }
                "minItems" => keywords.min_items = Some(expect_unsigned(raw, "minItems")?),
                "maxItems" => keywords.max_items = Some(expect_unsigned(raw, "maxItems")?),
                "items" => keywords.items = Some(Schema::compile(raw)?),
                "uniqueItems" => keywords.unique_items = expect_bool(raw, "uniqueItems")?,
                "required" => keywords.required = Some(expect_names(raw, "required")?),
                "properties" => keywords.properties = Some(compile_properties(raw)?),
                "additionalProperties" => {
                    keywords.additional_properties = compile_additional_properties(raw)?
                }
                other => keywords.ignored.push(other.to_string()),
            }
        }

        if !keywords.ignored.is_empty() {
            tracing::debug!(
                keywords = ?keywords.ignored,
                "ignoring unrecognized schema keywords"
            );
        }

        Ok(keywords)
    }

    /// Whether a property name appears in `properties`
    pub fn declares_property(&self, name: &str) -> bool {
        self.properties
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .any(|(declared, _)| declared == name)
    }
}

/// A compiled `pattern` keyword, keeping the source text for diagnostics
#[derive(Debug, Clone)]
pub struct Pattern {
    pub source: String,
    pub regex: Regex,
}

/// The `type` keyword: one name, or any of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeConstraint {
    Single(SchemaType),
    AnyOf(Vec<SchemaType>),
}

/// Policy for object properties not declared under `properties`
#[derive(Debug, Clone)]
pub enum AdditionalProperties {
    /// `additionalProperties: false` - undeclared properties are errors
    Denied,
    /// A sub-schema every undeclared property must satisfy
    Schema(Box<Schema>),
}

/// The canonical schema type names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl SchemaType {
    /// Parse a declared type name
    pub fn from_name(name: &str) -> Option<SchemaType> {
        match name {
            "null" => Some(SchemaType::Null),
            "boolean" => Some(SchemaType::Boolean),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "string" => Some(SchemaType::String),
            "array" => Some(SchemaType::Array),
            "object" => Some(SchemaType::Object),
            _ => None,
        }
    }

    /// Whether a value satisfies this declared type
    ///
    /// `integer` is satisfied by any number with zero fractional part, so
    /// `2.0` counts; every other name requires an exact kind match.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            SchemaType::Null => value.is_null(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Integer => match value {
                Value::Number(n) => is_integral(n),
                _ => false,
            },
            SchemaType::Number => value.is_number(),
            SchemaType::String => value.is_string(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        }
    }

    /// The declared name, as written in schema documents
    pub fn name(self) -> &'static str {
        match self {
            SchemaType::Null => "null",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical kind name of a JSON value, used in "got ..." diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_integral(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
}

fn compile_type(raw: &Value) -> Result<TypeConstraint> {
    match raw {
        Value::String(name) => Ok(TypeConstraint::Single(parse_type_name(name)?)),
        Value::Array(names) => {
            let mut types = Vec::with_capacity(names.len());
            for name in names {
                let name = name.as_str().ok_or(Error::Keyword {
                    keyword: "type",
                    expected: "a type name or a list of type names",
                })?;
                types.push(parse_type_name(name)?);
            }
            Ok(TypeConstraint::AnyOf(types))
        }
        _ => Err(Error::Keyword {
            keyword: "type",
            expected: "a type name or a list of type names",
        }),
    }
}

fn parse_type_name(name: &str) -> Result<SchemaType> {
    SchemaType::from_name(name).ok_or_else(|| Error::UnknownType {
        name: name.to_string(),
    })
}

fn compile_pattern(raw: &Value) -> Result<Pattern> {
    let source = expect_string(raw, "pattern")?;
    let regex = Regex::new(source).map_err(|source_error| Error::Pattern {
        pattern: source.to_string(),
        source: source_error,
    })?;
    Ok(Pattern {
        source: source.to_string(),
        regex,
    })
}

fn compile_properties(raw: &Value) -> Result<Vec<(String, Schema)>> {
    let map = raw.as_object().ok_or(Error::Keyword {
        keyword: "properties",
        expected: "an object of sub-schemas",
    })?;
    let mut properties = Vec::with_capacity(map.len());
    for (name, sub) in map {
        properties.push((name.clone(), Schema::compile(sub)?));
    }
    Ok(properties)
}

fn compile_additional_properties(raw: &Value) -> Result<Option<AdditionalProperties>> {
    match raw {
        Value::Bool(true) => Ok(None),
        Value::Bool(false) => Ok(Some(AdditionalProperties::Denied)),
        Value::Object(_) => Ok(Some(AdditionalProperties::Schema(Box::new(
            Schema::compile(raw)?,
        )))),
        _ => Err(Error::Keyword {
            keyword: "additionalProperties",
            expected: "a boolean or a sub-schema",
        }),
    }
}

fn expect_string<'a>(raw: &'a Value, keyword: &'static str) -> Result<&'a str> {
    raw.as_str().ok_or(Error::Keyword {
        keyword,
        expected: "a string",
    })
}

fn expect_bool(raw: &Value, keyword: &'static str) -> Result<bool> {
    raw.as_bool().ok_or(Error::Keyword {
        keyword,
        expected: "a boolean",
    })
}

fn expect_unsigned(raw: &Value, keyword: &'static str) -> Result<u64> {
    raw.as_u64().ok_or(Error::Keyword {
        keyword,
        expected: "a non-negative integer",
    })
}

fn expect_number(raw: &Value, keyword: &'static str) -> Result<f64> {
    raw.as_f64().ok_or(Error::Keyword {
        keyword,
        expected: "a number",
    })
}

fn expect_array<'a>(raw: &'a Value, keyword: &'static str) -> Result<&'a Vec<Value>> {
    raw.as_array().ok_or(Error::Keyword {
        keyword,
        expected: "an array",
    })
}

fn expect_names(raw: &Value, keyword: &'static str) -> Result<Vec<String>> {
    let values = expect_array(raw, keyword)?;
    values
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or(Error::Keyword {
                keyword,
                expected: "an array of property names",
            })
        })
        .collect()
}
