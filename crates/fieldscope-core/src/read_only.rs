//! Lazily resolved read-only flags
//!
//! A read-only flag travels down the tree unresolved. It is either unset,
//! a literal, or a predicate over the accumulated [`ScopeContext`]. The
//! predicate only runs when a consumer needs a concrete boolean, and it
//! runs against the consumer's context, not the one where it was declared.

use crate::attrs::keys;
use crate::context::ScopeContext;
use crate::error::{PredicateError, ScopeError};
use crate::hash::Fingerprinter;
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

type PredicateFn = dyn Fn(&ScopeContext) -> Result<bool, PredicateError> + Send + Sync;

/// Read-only predicate over the accumulated context
///
/// Two predicates are equal only if they share the same allocation, so
/// re-declaring a scope with a cloned predicate keeps its memoized context.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    /// Wrap an infallible predicate
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ScopeContext) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(move |ctx| Ok(f(ctx))))
    }

    /// Wrap a predicate that may fail
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&ScopeContext) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the predicate
    ///
    /// # Errors
    /// Returns whatever the predicate reports
    #[inline]
    pub fn call(&self, context: &ScopeContext) -> Result<bool, PredicateError> {
        (self.0)(context)
    }

    /// Check if both handles point to the same predicate
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({:#x})", self.id())
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Unresolved read-only flag
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReadOnly {
    /// Not provided at this level; inherit
    #[default]
    Unset,

    /// Explicit value, `false` included
    Literal(bool),

    /// Resolved at the consumer against its accumulated context
    Deferred(Predicate),
}

impl ReadOnly {
    /// Deferred flag from an infallible predicate
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&ScopeContext) -> bool + Send + Sync + 'static,
    {
        Self::Deferred(Predicate::new(f))
    }

    /// Deferred flag from a predicate that may fail
    pub fn try_when<F>(f: F) -> Self
    where
        F: Fn(&ScopeContext) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self::Deferred(Predicate::fallible(f))
    }

    /// Check if a value was provided at this level
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// This flag if set, otherwise `inherited`
    #[inline]
    #[must_use]
    pub fn or_inherit(&self, inherited: &Self) -> Self {
        resolve_read_only(self, inherited)
    }

    /// Produce a concrete value against `context`
    ///
    /// `Unset` stays `None`; callers decide what absence means.
    ///
    /// # Errors
    /// Returns the predicate's error if a deferred flag fails
    pub fn evaluate(&self, context: &ScopeContext) -> Result<Option<bool>, PredicateError> {
        match self {
            Self::Unset => Ok(None),
            Self::Literal(value) => Ok(Some(*value)),
            Self::Deferred(predicate) => predicate.call(context).map(Some),
        }
    }

    /// Parse the `readOnly` entry of a property map
    ///
    /// `null` and a missing entry mean unset. Predicates cannot be
    /// expressed as JSON and must be passed as [`ReadOnly::Deferred`].
    ///
    /// # Errors
    /// Returns [`ScopeError::MalformedReadOnly`] for any non-boolean value
    pub fn from_value(value: Option<&Value>) -> Result<Self, ScopeError> {
        match value {
            None | Some(Value::Null) => Ok(Self::Unset),
            Some(Value::Bool(flag)) => Ok(Self::Literal(*flag)),
            Some(other) => Err(ScopeError::malformed_read_only(other)),
        }
    }

    /// Read the `readOnly` entry of a property map
    ///
    /// # Errors
    /// See [`ReadOnly::from_value`]
    pub fn from_props(props: &crate::Attributes) -> Result<Self, ScopeError> {
        Self::from_value(props.get(keys::READ_ONLY))
    }

    pub(crate) fn fingerprint_into(&self, fp: &mut Fingerprinter) {
        match self {
            Self::Unset => fp.tag(0),
            Self::Literal(false) => fp.tag(1),
            Self::Literal(true) => fp.tag(2),
            Self::Deferred(predicate) => fp.tag(3).bytes(&(predicate.id() as u64).to_le_bytes()),
        };
    }
}

impl From<bool> for ReadOnly {
    fn from(value: bool) -> Self {
        Self::Literal(value)
    }
}

impl From<Option<bool>> for ReadOnly {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::Literal)
    }
}

impl From<Predicate> for ReadOnly {
    fn from(predicate: Predicate) -> Self {
        Self::Deferred(predicate)
    }
}

/// Pick the effective flag for a level
///
/// An explicitly provided `candidate` (including `Literal(false)`) wins over
/// `inherited`. A deferred winner is returned as is, not invoked. If neither
/// is set the result stays [`ReadOnly::Unset`].
#[must_use]
pub fn resolve_read_only(candidate: &ReadOnly, inherited: &ReadOnly) -> ReadOnly {
    if candidate.is_set() {
        candidate.clone()
    } else {
        inherited.clone()
    }
}
