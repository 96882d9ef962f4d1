//! Error types for schema compilation and validation
//!
//! Two tiers are kept strictly apart: [`Error`] is a hard failure of the
//! call itself (a schema that cannot be compiled, a depth limit tripped),
//! while [`ValidationError`] is a soft, reported mismatch between an
//! instance and a schema keyword. Soft failures never abort a validation
//! call and hard failures never appear in the returned error sequence.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for fallible schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failure: malformed input to the call itself
#[derive(Debug, Error)]
pub enum Error {
    /// A `pattern` keyword holds a regular expression that does not compile
    #[error("invalid regular expression in \"pattern\": {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A recognized keyword holds a value of the wrong shape
    #[error("keyword \"{keyword}\" expects {expected}")]
    Keyword {
        keyword: &'static str,
        expected: &'static str,
    },

    /// A `type` keyword names a type this validator does not know
    #[error("unknown type name \"{name}\" in \"type\"")]
    UnknownType { name: String },

    /// The schema document is neither a boolean nor an object
    #[error("schema document must be a boolean or an object")]
    MalformedDocument,

    /// The walker descended past the caller-supplied depth limit
    #[error("nesting depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: String },
}

/// Soft failure: a single keyword mismatch discovered during traversal
///
/// Errors are accumulated in discovery order by one depth-first,
/// left-to-right, pre-order walk; an empty sequence means conformance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Instance location where the mismatch occurred, rooted at `$`
    pub path: String,
    /// Human-readable description of the mismatch
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
