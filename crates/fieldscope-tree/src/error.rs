//! Error types for declaring and rendering trees
//!
//! Provides error handling for:
//! - Scope composition failures surfaced during a render pass
//! - Runaway nesting
//! - Caller components that fail
//! - Render configuration loading

use fieldscope_core::ScopeError;

/// Errors raised by a render pass
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Malformed override or failing read-only predicate
    #[error("scope error: {0}")]
    Scope(#[from] ScopeError),

    /// Scope nesting went past the configured limit
    #[error("scope nesting exceeded the limit of {limit}")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
    },

    /// A caller component reported a failure
    #[error("component '{component}' failed: {message}")]
    Component {
        /// Component label
        component: String,
        /// Failure description
        message: String,
    },
}

impl TreeError {
    /// Create component failure
    #[inline]
    pub fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Underlying scope error, if any
    #[inline]
    #[must_use]
    pub fn as_scope_error(&self) -> Option<&ScopeError> {
        match self {
            Self::Scope(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors while loading a [`RenderConfig`](crate::RenderConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into a config
    #[error("invalid render config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values are out of range
    #[error("invalid render config: {0}")]
    Invalid(String),
}
