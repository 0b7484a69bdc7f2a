//! Shared attribute maps
//!
//! [`Attributes`] holds the arbitrary key/value attributes that scopes hand
//! down to their descendants and that callers pass to wrapped targets. The
//! map is persistent: cloning is O(1) and a merge never touches either input.

use crate::hash::Fingerprinter;
use im::OrdMap;
use serde_json::{Map, Value};

/// Well-known attribute keys
pub mod keys {
    /// Local name segment / computed fully qualified name
    pub const NAME: &str = "name";
    /// Read-only override / resolved read-only flag
    pub const READ_ONLY: &str = "readOnly";
    /// Fully qualified name forwarded by the legacy full-name adapter
    pub const FULL_NAME: &str = "fullName";
}

/// Immutable, ordered attribute map
///
/// Values are JSON values. Merging is shallow: a key present in the
/// overriding map replaces the whole inherited value, nested objects included.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Attributes(OrdMap<String, Value>);

impl Attributes {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(OrdMap::new())
    }

    /// Build from a JSON object map
    #[must_use]
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        object.into_iter().collect()
    }

    /// Build from any JSON value; `None` unless it is an object
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self::from_json_object(object)),
            _ => None,
        }
    }

    /// Convert to a JSON object
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Number of attributes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up attribute
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up string attribute
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Check if attribute is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert attribute, returning the previous value
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove attribute, returning its value
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Builder-style insert
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Copy of this map without `key`
    #[inline]
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        Self(self.0.without(key))
    }

    /// Shallow merge: keys in `overrides` replace keys in `self`
    #[inline]
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    /// Iterate attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterate keys in order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub(crate) fn fingerprint_into(&self, fp: &mut Fingerprinter) {
        fp.bytes(&(self.0.len() as u64).to_le_bytes());
        for (key, value) in &self.0 {
            fp.str(key).str(&value.to_string());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = im::ordmap::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
