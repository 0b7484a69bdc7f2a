//! Scope contexts, overrides and consumer queries
//!
//! A [`ScopeContext`] is the merged `{name, read_only, extra}` value visible
//! at one tree position. Scopes produce a new context from their parent's
//! with [`ScopeContext::derive`]; consumers read it with
//! [`ScopeContext::query`]. Contexts are never mutated after construction.

use crate::attrs::{keys, Attributes};
use crate::error::ScopeError;
use crate::hash::{ContextHash, Fingerprinter};
use crate::name::FieldName;
use crate::read_only::{resolve_read_only, ReadOnly};
use serde_json::Value;

/// Accumulated context at a tree position
///
/// The fingerprint is computed once at construction from the name, the
/// read-only tag and the extra attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeContext {
    name: FieldName,
    read_only: ReadOnly,
    extra: Attributes,
    fingerprint: ContextHash,
}

impl ScopeContext {
    /// Create context from its parts
    #[must_use]
    pub fn new(name: FieldName, read_only: ReadOnly, extra: Attributes) -> Self {
        let fingerprint = Self::fingerprint_of(&name, &read_only, &extra);
        Self {
            name,
            read_only,
            extra,
            fingerprint,
        }
    }

    /// Empty context seen where nothing has been published
    ///
    /// `name: ""`, `read_only: Unset`, `extra: {}`.
    #[must_use]
    pub fn root() -> Self {
        Self::new(FieldName::root(), ReadOnly::Unset, Attributes::new())
    }

    /// Accumulated name prefix
    #[inline]
    #[must_use]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Unresolved inherited read-only flag
    #[inline]
    #[must_use]
    pub fn read_only(&self) -> &ReadOnly {
        &self.read_only
    }

    /// Shared attributes
    #[inline]
    #[must_use]
    pub fn extra(&self) -> &Attributes {
        &self.extra
    }

    /// Look up one shared attribute
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Structural fingerprint
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> &ContextHash {
        &self.fingerprint
    }

    /// Context for the subtree of a scope declared here with `overrides`
    ///
    /// The name is composed, the read-only flag is picked (not evaluated)
    /// and the extra attributes are shallow-merged with the overrides winning.
    #[must_use]
    pub fn derive(&self, overrides: &ScopeOverrides) -> Self {
        Self::new(
            self.name.join(overrides.name.as_deref()),
            resolve_read_only(&overrides.read_only, &self.read_only),
            self.extra.merged(&overrides.extra),
        )
    }

    /// Resolve the identity of a consumer placed directly under this context
    ///
    /// `read_only` is the consumer's own override; when unset the inherited
    /// flag applies. A deferred flag is evaluated here, once, against this
    /// context.
    ///
    /// # Errors
    /// Returns [`ScopeError::Predicate`] if the winning predicate fails
    pub fn query(&self, name: Option<&str>, read_only: &ReadOnly) -> Result<ScopeQuery, ScopeError> {
        let full_name = self.name.join(name);
        let resolved = resolve_read_only(read_only, &self.read_only)
            .evaluate(self)
            .map_err(|source| ScopeError::Predicate {
                field: full_name.to_string(),
                source,
            })?;

        let inherited_props = match resolved {
            Some(flag) => self.extra.clone().with(keys::READ_ONLY, flag),
            None => self.extra.clone(),
        };

        Ok(ScopeQuery {
            full_name,
            inherited_props,
            context_name: self.name.clone(),
            read_only: resolved,
        })
    }

    fn fingerprint_of(name: &FieldName, read_only: &ReadOnly, extra: &Attributes) -> ContextHash {
        let mut fp = Fingerprinter::new("context");
        fp.str(name.as_str());
        read_only.fingerprint_into(&mut fp);
        extra.fingerprint_into(&mut fp);
        fp.finish()
    }
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self::root()
    }
}

/// Local overrides declared by a scope or passed by a consumer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeOverrides {
    /// Local segment to append
    pub name: Option<String>,
    /// Read-only override
    pub read_only: ReadOnly,
    /// Extra shared attributes
    pub extra: Attributes,
}

impl ScopeOverrides {
    /// Create empty overrides
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides contributing only a name segment
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Set the name segment
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the read-only override
    #[inline]
    #[must_use]
    pub fn with_read_only(mut self, read_only: impl Into<ReadOnly>) -> Self {
        self.read_only = read_only.into();
        self
    }

    /// Add an extra shared attribute
    ///
    /// See [`ScopeOverrides::set_attr`] for the reserved keys.
    #[inline]
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set one attribute, routing the reserved keys to their fields
    ///
    /// A string or null `name` sets the name segment and a boolean or null
    /// `readOnly` sets the flag. Any other value for a reserved key is kept
    /// in `extra`, where [`ScopeOverrides::validate`] rejects it.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match (key.as_str(), &value) {
            (keys::NAME, Value::Null) => self.name = None,
            (keys::NAME, Value::String(name)) => self.name = Some(name.clone()),
            (keys::READ_ONLY, Value::Null) => self.read_only = ReadOnly::Unset,
            (keys::READ_ONLY, Value::Bool(flag)) => self.read_only = ReadOnly::Literal(*flag),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Check that `extra` carries no reserved key
    ///
    /// # Errors
    /// - [`ScopeError::MalformedName`] for a non-string `name` in `extra`
    /// - [`ScopeError::MalformedReadOnly`] for a non-boolean `readOnly` in `extra`
    /// - [`ScopeError::ReservedKey`] for a well-typed one placed there directly
    pub fn validate(&self) -> Result<(), ScopeError> {
        if let Some(value) = self.extra.get(keys::NAME) {
            return Err(match value {
                Value::Null | Value::String(_) => ScopeError::ReservedKey { key: keys::NAME },
                other => ScopeError::malformed_name(other),
            });
        }
        if let Some(value) = self.extra.get(keys::READ_ONLY) {
            ReadOnly::from_value(Some(value))?;
            return Err(ScopeError::ReservedKey {
                key: keys::READ_ONLY,
            });
        }
        Ok(())
    }

    /// Split a loosely-typed property map into overrides
    ///
    /// `name` must be a string (or null/absent) and `readOnly` a boolean
    /// (or null/absent). Every other key becomes an extra attribute.
    ///
    /// # Errors
    /// - [`ScopeError::MalformedName`] if `name` has any other type
    /// - [`ScopeError::MalformedReadOnly`] if `readOnly` has any other type
    pub fn from_props(props: &Attributes) -> Result<Self, ScopeError> {
        let name = match props.get(keys::NAME) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => return Err(ScopeError::malformed_name(other)),
        };
        let read_only = ReadOnly::from_props(props)?;
        let extra = props.without(keys::NAME).without(keys::READ_ONLY);

        Ok(Self {
            name,
            read_only,
            extra,
        })
    }

    /// Structural fingerprint, used for change detection
    #[must_use]
    pub fn fingerprint(&self) -> ContextHash {
        let mut fp = Fingerprinter::new("overrides");
        match &self.name {
            Some(name) => fp.tag(1).str(name),
            None => fp.tag(0),
        };
        self.read_only.fingerprint_into(&mut fp);
        self.extra.fingerprint_into(&mut fp);
        fp.finish()
    }
}

/// Identity of a consumer at its tree position
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeQuery {
    /// Ancestor prefix joined with the consumer's own segment
    pub full_name: FieldName,
    /// Shared attributes, plus `readOnly` when it resolved to a value
    pub inherited_props: Attributes,
    /// Ancestor prefix without the consumer's own segment
    pub context_name: FieldName,
    /// Resolved flag; `None` when no level provided one
    pub read_only: Option<bool>,
}

impl ScopeQuery {
    /// Resolved flag with absence meaning "not read-only"
    #[inline]
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }
}
