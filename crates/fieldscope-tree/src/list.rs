//! List scopes
//!
//! A [`ListScope`] repeats its template once per item key, each copy inside
//! a scope named `name[index]`. Nested lists yield names such as
//! `array[0].nestedArray[1].foo` without any item spelling out its path.

use crate::node::Node;
use fieldscope_core::{FieldName, ReadOnly, ScopeOverrides};
use serde_json::Value;

/// Indexed scope repeated per item
#[derive(Debug, Clone, Default)]
pub struct ListScope {
    name: String,
    keys: Vec<String>,
    overrides: ScopeOverrides,
    template: Vec<Node>,
}

impl ListScope {
    /// List field `name` with one item per key
    ///
    /// Keys identify items across passes; their position gives the index.
    #[must_use]
    pub fn new<K>(name: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys.into_iter().map(Into::into).collect(),
            overrides: ScopeOverrides::new(),
            template: Vec::new(),
        }
    }

    /// Set the read-only override applied to every item scope
    #[inline]
    #[must_use]
    pub fn read_only(mut self, read_only: impl Into<ReadOnly>) -> Self {
        self.overrides.read_only = read_only.into();
        self
    }

    /// Add a shared attribute to every item scope
    ///
    /// `readOnly` sets the shared flag; item names always come from the list.
    #[inline]
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.set_attr(key, value);
        self
    }

    /// Append a node to the per-item template
    #[inline]
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.template.push(child.into());
        self
    }

    /// List field name (without index)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item keys in order
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Per-item template
    #[inline]
    #[must_use]
    pub fn template(&self) -> &[Node] {
        &self.template
    }

    /// Overrides for each item, paired with its key
    pub(crate) fn items(&self) -> impl Iterator<Item = (&str, ScopeOverrides)> + '_ {
        self.keys.iter().enumerate().map(move |(index, key)| {
            let mut overrides = self.overrides.clone();
            overrides.name = Some(FieldName::indexed(&self.name, index));
            (key.as_str(), overrides)
        })
    }
}
