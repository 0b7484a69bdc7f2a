//! Context fingerprints
//!
//! Provides [`ContextHash`], a 32-byte Blake3 digest identifying the
//! structural content of a scope context or a set of overrides. Used as
//! the change-detection key when memoizing derived contexts.

use std::fmt::{self, Display, Formatter};

/// A 32-byte fingerprint (Blake3)
///
/// Immutable and cheap to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextHash([u8; 32]);

impl ContextHash {
    /// Create a new `ContextHash` from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Fingerprint of a child derived from `parent` with `overrides`
    #[inline]
    #[must_use]
    pub fn combine(parent: &Self, overrides: &Self) -> Self {
        let mut hasher = Fingerprinter::new("derive");
        hasher.bytes(&parent.0).bytes(&overrides.0);
        hasher.finish()
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContextHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl serde::Serialize for ContextHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Incremental fingerprint builder
///
/// Every field is length-prefixed so adjacent fields never run together.
#[derive(Debug, Clone)]
pub(crate) struct Fingerprinter {
    inner: blake3::Hasher,
}

impl Fingerprinter {
    /// Start a fingerprint in the given domain
    pub(crate) fn new(domain: &str) -> Self {
        let mut fp = Self {
            inner: blake3::Hasher::new(),
        };
        fp.str(domain);
        fp
    }

    pub(crate) fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
        self
    }

    pub(crate) fn str(&mut self, data: &str) -> &mut Self {
        self.bytes(data.as_bytes())
    }

    pub(crate) fn tag(&mut self, tag: u8) -> &mut Self {
        self.inner.update(&[tag]);
        self
    }

    pub(crate) fn finish(&self) -> ContextHash {
        ContextHash::new(*self.inner.finalize().as_bytes())
    }
}
