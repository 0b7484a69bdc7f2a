//! fieldscope tree
//!
//! Declarative trees whose scopes publish contexts to their descendants.
//!
//! # Core Operations
//!
//! - **Declare**: build a [`Node`] tree from [`ScopeNode`]s, [`ListScope`]s,
//!   components and elements
//! - **Consume**: components call [`Scope::use_scope`] for their full name
//!   and inherited attributes; [`with_scope`] does this for any constructor
//! - **Render**: [`Renderer::render`] walks the tree once and returns the
//!   emitted [`Element`]s
//!
//! # Architecture
//!
//! ```text
//! ScopeNode ──derive──► ScopeMemo (fingerprint-keyed) ──► ContextStack ──► Scope ──► with_scope(target)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fieldscope_core::Attributes;
//! use fieldscope_tree::{with_scope, ListScope, Node, Renderer, ScopeNode};
//!
//! let field = with_scope("Field", |props| Ok(Node::element("input", props)));
//!
//! let tree: Node = ListScope::new("array", ["a"])
//!     .child(
//!         ListScope::new("nestedArray", ["x", "y"])
//!             .child(field.node(Attributes::new().with("name", "foo"))),
//!     )
//!     .into();
//!
//! let rendered = Renderer::new().render(&tree)?;
//! assert_eq!(
//!     rendered.names(),
//!     vec!["array[0].nestedArray[0].foo", "array[0].nestedArray[1].foo"]
//! );
//! # Ok::<(), fieldscope_tree::TreeError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod adapter;
pub mod channel;
pub mod config;
pub mod error;
pub mod list;
pub mod memo;
pub mod node;
pub mod render;

// Re-exports for convenience
#[allow(deprecated)]
pub use adapter::{with_full_name, WithFullName};
pub use adapter::{with_scope, Constructor, WithScope};
pub use channel::ContextStack;
pub use config::RenderConfig;
pub use error::{ConfigError, TreeError};
pub use list::ListScope;
pub use memo::{MemoStats, ScopeMemo};
pub use node::{Component, Element, Node, ScopeNode};
pub use render::{RenderStats, Rendered, Renderer, Scope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring and rendering trees
    pub use crate::adapter::{with_scope, WithScope};
    pub use crate::error::TreeError;
    pub use crate::list::ListScope;
    pub use crate::node::{Element, Node, ScopeNode};
    pub use crate::render::{Rendered, Renderer, Scope};
    pub use fieldscope_core::{Attributes, ReadOnly, ScopeContext, ScopeOverrides, ScopeQuery};
}
