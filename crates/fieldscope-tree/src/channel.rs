//! Tree-scoped context channel
//!
//! [`ContextStack`] is threaded through a render pass. A scope pushes its
//! context before visiting its children and pops it afterwards, so the
//! value is visible to its subtree only. Readers always see the innermost
//! published context, or the empty root when nothing is published.

use crate::error::TreeError;
use fieldscope_core::ScopeContext;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Frame {
    context: Arc<ScopeContext>,
    key: Option<String>,
}

/// Stack of published contexts for one render pass
#[derive(Debug, Clone)]
pub struct ContextStack {
    root: Arc<ScopeContext>,
    frames: Vec<Frame>,
    max_depth: usize,
}

impl ContextStack {
    /// Create empty stack over the default root context
    #[inline]
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self::with_root(Arc::new(ScopeContext::root()), max_depth)
    }

    /// Create empty stack over a caller-supplied root context
    #[inline]
    #[must_use]
    pub fn with_root(root: Arc<ScopeContext>, max_depth: usize) -> Self {
        Self {
            root,
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Innermost published context
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Arc<ScopeContext> {
        self.frames
            .last()
            .map_or(&self.root, |frame| &frame.context)
    }

    /// Key of the innermost list item enclosing this position
    #[must_use]
    pub fn item_key(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| frame.key.as_deref())
    }

    /// Number of published contexts
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Publish a context for the subtree about to be visited
    ///
    /// # Errors
    /// Returns [`TreeError::DepthExceeded`] if the stack is already full
    pub fn push(&mut self, context: Arc<ScopeContext>, key: Option<String>) -> Result<(), TreeError> {
        if self.frames.len() >= self.max_depth {
            return Err(TreeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.frames.push(Frame { context, key });
        Ok(())
    }

    /// Withdraw the innermost context once its subtree is done
    #[inline]
    pub fn pop(&mut self) -> Option<Arc<ScopeContext>> {
        self.frames.pop().map(|frame| frame.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldscope_core::ScopeOverrides;

    fn named(name: &str) -> Arc<ScopeContext> {
        Arc::new(ScopeContext::root().derive(&ScopeOverrides::named(name)))
    }

    #[test]
    fn empty_stack_reads_root() {
        let stack = ContextStack::new(4);
        assert_eq!(stack.current().as_ref(), &ScopeContext::root());
        assert_eq!(stack.depth(), 0);
        assert!(stack.item_key().is_none());
    }

    #[test]
    fn innermost_wins_and_pop_restores() {
        let mut stack = ContextStack::new(4);
        stack.push(named("outer"), None).unwrap();
        stack.push(named("inner"), None).unwrap();
        assert_eq!(stack.current().name(), "inner");

        stack.pop();
        assert_eq!(stack.current().name(), "outer");
        stack.pop();
        assert!(stack.current().name().is_empty());
    }

    #[test]
    fn item_key_reaches_through_plain_frames() {
        let mut stack = ContextStack::new(4);
        stack.push(named("list"), Some("k1".into())).unwrap();
        stack.push(named("group"), None).unwrap();
        assert_eq!(stack.item_key(), Some("k1"));
    }

    #[test]
    fn push_past_limit_fails() {
        let mut stack = ContextStack::new(1);
        stack.push(named("a"), None).unwrap();
        let err = stack.push(named("b"), None).unwrap_err();
        assert!(matches!(err, TreeError::DepthExceeded { limit: 1 }));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn custom_root() {
        let stack = ContextStack::with_root(named("form"), 4);
        assert_eq!(stack.current().name(), "form");
    }
}
