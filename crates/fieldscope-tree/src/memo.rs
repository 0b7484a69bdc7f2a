//! Memoized scope contexts using moka
//!
//! A scope's published context depends only on its parent context and its
//! own overrides. [`ScopeMemo`] keys derived contexts by the fingerprints of
//! both, so re-rendering an unchanged scope hands out the same
//! `Arc<ScopeContext>` instead of recomputing it.

use fieldscope_core::{ContextHash, ScopeContext, ScopeOverrides};
use moka::sync::Cache;
use std::sync::Arc;

/// Statistics for memo monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Number of entries in the memo
    pub entry_count: u64,
}

/// Fingerprint-keyed memo of derived contexts
#[derive(Debug, Clone)]
pub struct ScopeMemo {
    inner: Cache<ContextHash, Arc<ScopeContext>>,
}

impl ScopeMemo {
    /// Create memo with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Memo key for deriving from `parent` with `overrides`
    #[inline]
    #[must_use]
    pub fn key(parent: &ScopeContext, overrides: &ScopeOverrides) -> ContextHash {
        ContextHash::combine(parent.fingerprint(), &overrides.fingerprint())
    }

    /// Previously derived context, if any
    #[inline]
    #[must_use]
    pub fn get(&self, key: &ContextHash) -> Option<Arc<ScopeContext>> {
        self.inner.get(key)
    }

    /// Derived context for `parent` + `overrides`, reusing a memoized one
    ///
    /// The flag is `true` when the context came from the memo.
    pub fn get_or_derive(
        &self,
        parent: &ScopeContext,
        overrides: &ScopeOverrides,
    ) -> (Arc<ScopeContext>, bool) {
        let key = Self::key(parent, overrides);

        if let Some(cached) = self.inner.get(&key) {
            tracing::trace!(key = %key.short(), name = %cached.name(), "scope context reused");
            return (cached, true);
        }

        let derived = Arc::new(parent.derive(overrides));
        tracing::debug!(key = %key.short(), name = %derived.name(), "scope context derived");
        self.inner.insert(key, Arc::clone(&derived));
        (derived, false)
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get memo statistics
    ///
    /// Counts are approximate until pending maintenance has run.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for ScopeMemo {
    /// Create memo with default capacity (10,000 entries)
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldscope_core::ReadOnly;

    #[test]
    fn unchanged_inputs_reuse_context() {
        let memo = ScopeMemo::new(16);
        let parent = ScopeContext::root();
        let overrides = ScopeOverrides::named("a").with_attr("x", 1);

        let (first, reused_first) = memo.get_or_derive(&parent, &overrides);
        let (second, reused_second) = memo.get_or_derive(&parent, &overrides.clone());

        assert!(!reused_first);
        assert!(reused_second);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_overrides_derive_again() {
        let memo = ScopeMemo::new(16);
        let parent = ScopeContext::root();

        let (a, _) = memo.get_or_derive(&parent, &ScopeOverrides::named("a"));
        let (b, reused) = memo.get_or_derive(&parent, &ScopeOverrides::named("b"));

        assert!(!reused);
        assert_eq!(a.name(), "a");
        assert_eq!(b.name(), "b");
    }

    #[test]
    fn changed_parent_derives_again() {
        let memo = ScopeMemo::new(16);
        let overrides = ScopeOverrides::named("leaf");
        let p1 = ScopeContext::root().derive(&ScopeOverrides::named("p1"));
        let p2 = ScopeContext::root().derive(&ScopeOverrides::named("p2"));

        let (c1, _) = memo.get_or_derive(&p1, &overrides);
        let (c2, reused) = memo.get_or_derive(&p2, &overrides);

        assert!(!reused);
        assert_eq!(c1.name(), "p1.leaf");
        assert_eq!(c2.name(), "p2.leaf");
    }

    #[test]
    fn predicate_identity_is_part_of_the_key() {
        let memo = ScopeMemo::new(16);
        let parent = ScopeContext::root();
        let flag = ReadOnly::when(|_| true);
        let same = ScopeOverrides::new().with_read_only(flag.clone());

        let _ = memo.get_or_derive(&parent, &same);
        let (_, reused) = memo.get_or_derive(&parent, &ScopeOverrides::new().with_read_only(flag));
        assert!(reused);

        let other = ScopeOverrides::new().with_read_only(ReadOnly::when(|_| true));
        let (_, reused) = memo.get_or_derive(&parent, &other);
        assert!(!reused);
    }

    #[test]
    fn invalidate_all_forgets() {
        let memo = ScopeMemo::new(16);
        let parent = ScopeContext::root();
        let overrides = ScopeOverrides::named("a");
        let key = ScopeMemo::key(&parent, &overrides);

        let _ = memo.get_or_derive(&parent, &overrides);
        assert!(memo.get(&key).is_some());

        memo.invalidate_all();
        assert!(memo.get(&key).is_none());
    }
}
