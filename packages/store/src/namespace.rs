//! Namespace type with the canonical trailing-separator form.

use std::fmt;

/// Separator between namespace segments and before local keys.
pub const SEPARATOR: char = '/';

/// A canonical module namespace.
///
/// The namespace index and every qualified getter/mutation/action key are
/// built from this form, so there is exactly one valid spelling per module:
/// either the empty string (the root) or a segment path ending with exactly
/// one `/`. `normalize` is total and idempotent; an already-canonical input
/// is a fixed point.
///
/// # Examples
///
/// ```rust
/// use trellis_store::Namespace;
///
/// assert_eq!(Namespace::normalize(Some("cart")).as_str(), "cart/");
/// assert_eq!(Namespace::normalize(Some("cart/")).as_str(), "cart/");
/// assert_eq!(Namespace::normalize(None).as_str(), "");
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// The root namespace (no module scoping).
    pub fn root() -> Self {
        Namespace(String::new())
    }

    /// Canonicalize an optional namespace argument.
    ///
    /// A missing argument or an empty string is the root, never a lone
    /// separator, which would read as a spurious path segment. Anything
    /// else keeps its spelling and gains a trailing separator if it does
    /// not already end with one.
    pub fn normalize(namespace: Option<&str>) -> Self {
        match namespace {
            None | Some("") => Self::root(),
            Some(s) if s.ends_with(SEPARATOR) => Namespace(s.to_string()),
            Some(s) => Namespace(format!("{}{}", s, SEPARATOR)),
        }
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the root namespace.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Qualify a local key with this namespace.
    ///
    /// This is how local getter/mutation/action names become keys into the
    /// store's global tables: `"cart/" + "add"` → `"cart/add"`. At the root
    /// the local key is already the qualified key.
    pub fn join(&self, key: &str) -> String {
        format!("{}{}", self.0, key)
    }

    /// Iterate over the path segments, separator-free.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Number of path segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Namespace {
    fn from(s: &str) -> Self {
        Namespace::normalize(Some(s))
    }
}

/// Macro for writing namespaces inline.
///
/// # Example
///
/// ```rust
/// use trellis_store::ns;
///
/// let n = ns!("cart/items");
/// assert_eq!(n.as_str(), "cart/items/");
/// ```
#[macro_export]
macro_rules! ns {
    ($s:expr) => {
        $crate::Namespace::normalize(Some($s))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_separator() {
        assert_eq!(Namespace::normalize(Some("foo")).as_str(), "foo/");
        assert_eq!(Namespace::normalize(Some("foo/bar")).as_str(), "foo/bar/");
    }

    #[test]
    fn normalize_keeps_existing_separator() {
        assert_eq!(Namespace::normalize(Some("foo/")).as_str(), "foo/");
    }

    #[test]
    fn normalize_absent_is_root() {
        assert_eq!(Namespace::normalize(None), Namespace::root());
        assert!(Namespace::normalize(None).is_root());
    }

    #[test]
    fn empty_string_stays_empty() {
        // "" must not become a bare "/" - that would be a phantom segment
        assert_eq!(Namespace::normalize(Some("")).as_str(), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = Namespace::normalize(Some("a/b"));
        let twice = Namespace::normalize(Some(once.as_str()));
        assert_eq!(once, twice);
    }

    #[test]
    fn join_qualifies_local_keys() {
        assert_eq!(ns!("cart").join("add"), "cart/add");
        assert_eq!(Namespace::root().join("add"), "add");
    }

    #[test]
    fn segments_skip_separators() {
        let n = ns!("a/b/c");
        let segments: Vec<&str> = n.segments().collect();
        assert_eq!(segments, vec!["a", "b", "c"]);
        assert_eq!(n.depth(), 3);
    }

    #[test]
    fn root_has_no_segments() {
        assert_eq!(Namespace::root().depth(), 0);
    }

    #[test]
    fn display_matches_as_str() {
        let n = ns!("cart/items");
        assert_eq!(format!("{}", n), "cart/items/");
    }

    #[test]
    fn from_str_normalizes() {
        let n: Namespace = "cart".into();
        assert_eq!(n.as_str(), "cart/");
    }

    #[test]
    fn ord_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ns!("a"));
        set.insert(ns!("b"));
        set.insert(ns!("a/")); // same canonical form
        assert_eq!(set.len(), 2);
        assert!(ns!("a") < ns!("b"));
    }
}
