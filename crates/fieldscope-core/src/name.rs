//! Dot-joined field names
//!
//! Provides [`compose`] for joining an accumulated prefix with a local
//! segment, and [`FieldName`], the typed accumulated name carried by scopes.

use std::fmt::{self, Display, Formatter};

/// Separator placed between a non-empty prefix and a non-empty segment
pub const SEPARATOR: char = '.';

/// Join an accumulated prefix and a local segment
///
/// - absent or empty `segment` → `prefix`
/// - absent or empty `prefix` → `segment`
/// - otherwise → `prefix.segment`
///
/// Nothing is trimmed and no other separator is ever inserted.
///
/// # Examples
/// ```
/// use fieldscope_core::compose;
///
/// assert_eq!(compose(None, Some("a")), "a");
/// assert_eq!(compose(Some("a"), None), "a");
/// assert_eq!(compose(Some("a"), Some("b")), "a.b");
/// assert_eq!(compose(Some(""), Some("")), "");
/// ```
#[must_use]
pub fn compose(prefix: Option<&str>, segment: Option<&str>) -> String {
    let prefix = prefix.unwrap_or_default();
    match segment {
        None | Some("") => prefix.to_owned(),
        Some(segment) if prefix.is_empty() => segment.to_owned(),
        Some(segment) => {
            let mut joined = String::with_capacity(prefix.len() + 1 + segment.len());
            joined.push_str(prefix);
            joined.push(SEPARATOR);
            joined.push_str(segment);
            joined
        }
    }
}

/// Accumulated dotted name at a tree position
///
/// Empty at the root. Grows strictly root-to-leaf through [`FieldName::join`].
///
/// # Examples
/// - root + `array[0]` → `array[0]`
/// - `array[0]` + `nestedArray[1]` + `foo` → `array[0].nestedArray[1].foo`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Create name from an already-composed string
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Empty name (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Name as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Check if name is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a local segment, returning new name
    ///
    /// See [`compose`] for the joining rules.
    #[inline]
    #[must_use]
    pub fn join(&self, segment: Option<&str>) -> Self {
        Self(compose(Some(self.0.as_str()), segment))
    }

    /// Append a single non-optional segment
    #[inline]
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        self.join(Some(segment))
    }

    /// Segment addressing one item of a list field: `segment[index]`
    #[must_use]
    pub fn indexed(segment: &str, index: usize) -> String {
        format!("{segment}[{index}]")
    }

    /// Iterator over dot-separated segments from root to leaf
    ///
    /// A segment that itself contained a dot when it was joined is
    /// reported as several segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Everything before the last separator, if there is one
    #[inline]
    #[must_use]
    pub fn parent_prefix(&self) -> Option<&str> {
        self.0.rsplit_once(SEPARATOR).map(|(prefix, _)| prefix)
    }

    /// Last dot-separated segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Check if this name is `other` or one of its dotted ancestors
    ///
    /// The root is a prefix of every name. `a` is a prefix of `a.b` but not of `ab`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.is_empty() {
            return true;
        }
        match other.0.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
            None => false,
        }
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
