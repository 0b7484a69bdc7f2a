//! Render configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Render pass configuration
///
/// Loadable from TOML:
///
/// ```toml
/// memoize = true
/// memo_capacity = 10000
/// max_depth = 256
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Reuse derived scope contexts whose inputs are unchanged
    pub memoize: bool,
    /// Maximum number of memoized contexts
    pub memo_capacity: u64,
    /// Maximum scope nesting depth
    pub max_depth: usize,
}

impl RenderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With memoization on or off
    #[inline]
    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// With memo capacity
    #[inline]
    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: u64) -> Self {
        self.memo_capacity = capacity;
        self
    }

    /// With maximum nesting depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parse and validate configuration from TOML
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// # Errors
    /// - [`ConfigError::Parse`] for malformed TOML or unknown keys
    /// - [`ConfigError::Invalid`] for out-of-range values
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `max_depth` is zero, or if
    /// memoization is on with a zero capacity
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.memoize && self.memo_capacity == 0 {
            return Err(ConfigError::Invalid(
                "memo_capacity must be at least 1 when memoize is enabled".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            memo_capacity: 10_000,
            max_depth: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert!(config.memoize);
        assert_eq!(config.memo_capacity, 10_000);
        assert_eq!(config.max_depth, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = RenderConfig::new()
            .with_memoize(false)
            .with_memo_capacity(5)
            .with_max_depth(8);
        assert!(!config.memoize);
        assert_eq!(config.memo_capacity, 5);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn from_toml_partial() {
        let config = RenderConfig::from_toml_str("max_depth = 16").unwrap();
        assert_eq!(config.max_depth, 16);
        assert!(config.memoize);
    }

    #[test]
    fn from_toml_rejects_unknown_keys() {
        let err = RenderConfig::from_toml_str("separator = \"/\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_toml_rejects_zero_depth() {
        let err = RenderConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_capacity_allowed_without_memo() {
        let config = RenderConfig::from_toml_str("memoize = false\nmemo_capacity = 0").unwrap();
        assert!(!config.memoize);
    }
}
