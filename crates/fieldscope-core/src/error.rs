//! Error types for scope composition
//!
//! Covers:
//! - Malformed overrides arriving as loosely-typed property maps
//! - Reserved keys smuggled into extra attributes
//! - Read-only predicates that fail when resolved

use serde_json::Value;

/// Errors raised while deriving or querying a scope context
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// `name` override is present but not a string
    #[error("scope name must be a string, got {found}")]
    MalformedName {
        /// JSON kind of the offending value
        found: &'static str,
    },

    /// `readOnly` override is neither a boolean nor absent
    #[error("readOnly must be a boolean, a predicate or absent, got {found}")]
    MalformedReadOnly {
        /// JSON kind of the offending value
        found: &'static str,
    },

    /// Reserved key found among the extra attributes
    #[error("'{key}' is reserved and cannot be an extra attribute")]
    ReservedKey {
        /// The reserved key
        key: &'static str,
    },

    /// Read-only predicate failed during resolution
    #[error("read-only predicate failed for '{field}': {source}")]
    Predicate {
        /// Fully qualified name of the field being resolved
        field: String,
        /// Failure reported by the predicate
        #[source]
        source: PredicateError,
    },
}

impl ScopeError {
    /// Create malformed-name error for the offending value
    #[inline]
    #[must_use]
    pub fn malformed_name(value: &Value) -> Self {
        Self::MalformedName {
            found: json_kind(value),
        }
    }

    /// Create malformed-readOnly error for the offending value
    #[inline]
    #[must_use]
    pub fn malformed_read_only(value: &Value) -> Self {
        Self::MalformedReadOnly {
            found: json_kind(value),
        }
    }
}

/// Failure reported by a read-only predicate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    /// Create predicate error with message
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for PredicateError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for PredicateError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Human-readable JSON kind, used in diagnostics
#[must_use]
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
