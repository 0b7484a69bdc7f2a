//! Render passes
//!
//! [`Renderer::render`] walks a tree once, top-down. Scopes derive and
//! publish contexts on a fresh [`ContextStack`], components read the
//! nearest one through a [`Scope`] handle, and elements are collected in
//! document order.
//!
//! # Architecture
//!
//! ```text
//! Node ──visit──► ScopeNode ──derive/memo──► ContextStack ──read──► Scope ──► Component
//!                                                                              │
//!                                  Rendered ◄──────── Element ◄────────────────┘
//! ```

use crate::channel::ContextStack;
use crate::config::RenderConfig;
use crate::error::TreeError;
use crate::memo::ScopeMemo;
use crate::node::{Element, Node};
use fieldscope_core::{ReadOnly, ScopeContext, ScopeOverrides, ScopeQuery};
use std::sync::Arc;

/// Counters for one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Scope contexts computed in this pass
    pub scopes_derived: usize,
    /// Scope contexts taken unchanged from the memo
    pub scopes_reused: usize,
    /// Context reads performed by components
    pub context_reads: usize,
    /// Elements emitted
    pub elements: usize,
}

/// Output of a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    elements: Vec<Element>,
    stats: RenderStats,
}

impl Rendered {
    /// Emitted elements in document order
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consume into the emitted elements
    #[inline]
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// `name` of every element that has one, in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.elements.iter().filter_map(Element::name).collect()
    }

    /// First element with the given `name`
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.name() == Some(name))
    }

    /// Pass counters
    #[inline]
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Number of emitted elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if nothing was emitted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Handle given to components during a render pass
///
/// Every call to [`Scope::context`], [`Scope::use_scope`] or
/// [`Scope::use_scope_with`] counts as one context read.
#[derive(Debug)]
pub struct Scope<'p> {
    stack: &'p ContextStack,
    stats: &'p mut RenderStats,
}

impl<'p> Scope<'p> {
    /// Nearest published context
    #[must_use]
    pub fn context(&mut self) -> Arc<ScopeContext> {
        self.stats.context_reads += 1;
        let context = Arc::clone(self.stack.current());
        tracing::trace!(context = %context.name(), "context read");
        context
    }

    /// Identity of a consumer named `name` at this position
    ///
    /// # Errors
    /// Returns [`TreeError::Scope`] if an inherited predicate fails
    pub fn use_scope(&mut self, name: Option<&str>) -> Result<ScopeQuery, TreeError> {
        self.use_scope_with(name, &ReadOnly::Unset)
    }

    /// Identity of a consumer with its own read-only override
    ///
    /// # Errors
    /// Returns [`TreeError::Scope`] if the winning predicate fails
    pub fn use_scope_with(
        &mut self,
        name: Option<&str>,
        read_only: &ReadOnly,
    ) -> Result<ScopeQuery, TreeError> {
        Ok(self.context().query(name, read_only)?)
    }

    /// Key of the enclosing list item, if any
    #[inline]
    #[must_use]
    pub fn item_key(&self) -> Option<&str> {
        self.stack.item_key()
    }

    /// Current scope nesting depth
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}

/// Renders trees, keeping memoized scope contexts across passes
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    memo: Option<ScopeMemo>,
}

impl Renderer {
    /// Create renderer with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create renderer with configuration
    #[must_use]
    pub fn with_config(config: RenderConfig) -> Self {
        let memo = config
            .memoize
            .then(|| ScopeMemo::new(config.memo_capacity));
        Self { config, memo }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Memo, when memoization is enabled
    #[inline]
    #[must_use]
    pub fn memo(&self) -> Option<&ScopeMemo> {
        self.memo.as_ref()
    }

    /// Render a tree with nothing published above it
    ///
    /// # Errors
    /// Returns the first [`TreeError`] raised while visiting the tree
    pub fn render(&self, root: &Node) -> Result<Rendered, TreeError> {
        self.render_in(Arc::new(ScopeContext::root()), root)
    }

    /// Render a tree below an existing context
    ///
    /// # Errors
    /// Returns the first [`TreeError`] raised while visiting the tree
    pub fn render_in(&self, context: Arc<ScopeContext>, root: &Node) -> Result<Rendered, TreeError> {
        let span = tracing::debug_span!("render_pass", root = %context.name());
        let _guard = span.enter();

        let mut pass = Pass {
            memo: self.memo.as_ref(),
            stack: ContextStack::with_root(context, self.config.max_depth),
            elements: Vec::new(),
            stats: RenderStats::default(),
        };
        pass.visit(root)?;

        let Pass {
            elements, mut stats, ..
        } = pass;
        stats.elements = elements.len();
        tracing::debug!(
            elements = stats.elements,
            derived = stats.scopes_derived,
            reused = stats.scopes_reused,
            reads = stats.context_reads,
            "render pass complete"
        );
        Ok(Rendered { elements, stats })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

struct Pass<'r> {
    memo: Option<&'r ScopeMemo>,
    stack: ContextStack,
    elements: Vec<Element>,
    stats: RenderStats,
}

impl Pass<'_> {
    fn visit(&mut self, node: &Node) -> Result<(), TreeError> {
        match node {
            Node::Empty => Ok(()),
            Node::Element(element) => {
                self.elements.push(element.clone());
                Ok(())
            }
            Node::Fragment(children) => self.visit_all(children),
            Node::Scope(scope) => self.visit_scoped(scope.overrides(), None, scope.nodes()),
            Node::List(list) => {
                for (key, overrides) in list.items() {
                    self.visit_scoped(&overrides, Some(key), list.template())?;
                }
                Ok(())
            }
            Node::Component(component) => {
                let subtree = {
                    let mut scope = Scope {
                        stack: &self.stack,
                        stats: &mut self.stats,
                    };
                    component.render(&mut scope)?
                };
                tracing::trace!(component = component.label(), "component rendered");
                self.visit(&subtree)
            }
        }
    }

    fn visit_all(&mut self, nodes: &[Node]) -> Result<(), TreeError> {
        nodes.iter().try_for_each(|node| self.visit(node))
    }

    fn visit_scoped(
        &mut self,
        overrides: &ScopeOverrides,
        key: Option<&str>,
        children: &[Node],
    ) -> Result<(), TreeError> {
        overrides.validate()?;
        let context = self.derive(overrides);
        self.stack.push(context, key.map(str::to_owned))?;
        let result = self.visit_all(children);
        self.stack.pop();
        result
    }

    fn derive(&mut self, overrides: &ScopeOverrides) -> Arc<ScopeContext> {
        let parent = self.stack.current();
        match self.memo {
            Some(memo) => {
                let (context, reused) = memo.get_or_derive(parent, overrides);
                if reused {
                    self.stats.scopes_reused += 1;
                } else {
                    self.stats.scopes_derived += 1;
                }
                context
            }
            None => {
                let context = Arc::new(parent.derive(overrides));
                self.stats.scopes_derived += 1;
                context
            }
        }
    }
}
