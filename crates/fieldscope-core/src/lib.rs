//! fieldscope core
//!
//! Pure composition rules for scoped field identity.
//!
//! # Core Concepts
//!
//! - [`compose`] / [`FieldName`]: dot-joined names accumulated root to leaf
//! - [`ReadOnly`]: unset, literal or deferred read-only flag
//! - [`Attributes`]: persistent map of shared attributes (shallow merge)
//! - [`ScopeContext`]: immutable `{name, read_only, extra}` at a tree position
//! - [`ScopeOverrides`]: what a scope or consumer declares locally
//! - [`ScopeQuery`]: a consumer's resolved identity
//!
//! # Example
//!
//! ```rust
//! use fieldscope_core::{ReadOnly, ScopeContext, ScopeOverrides};
//!
//! let ctx = ScopeContext::root()
//!     .derive(&ScopeOverrides::named("array").with_read_only(true))
//!     .derive(&ScopeOverrides::named("nestedArray"));
//!
//! let query = ctx.query(Some("foo"), &ReadOnly::Unset).unwrap();
//! assert_eq!(query.full_name.as_str(), "array.nestedArray.foo");
//! assert_eq!(query.context_name.as_str(), "array.nestedArray");
//! assert!(query.is_read_only());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod attrs;
mod context;
mod error;
mod hash;
mod name;
mod read_only;

// Re-exports
pub use attrs::{keys, Attributes};
pub use context::{ScopeContext, ScopeOverrides, ScopeQuery};
pub use error::{PredicateError, ScopeError};
pub use hash::ContextHash;
pub use name::{compose, FieldName, SEPARATOR};
pub use read_only::{resolve_read_only, Predicate, ReadOnly};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
