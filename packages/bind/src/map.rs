//! Binding map normalization.
//!
//! Consumers describe what to bind either as an ordered list of keys or as
//! an ordered mapping of local key to source. Both shapes normalize into
//! the same ordered sequence of entries; generation and invocation only
//! ever see the normalized form.

use std::fmt;
use std::sync::Arc;

use trellis_store::{ModuleContext, Value};

/// A custom resolver: receives the caller's module context and the
/// forwarded call arguments, returns the derived value.
pub type ResolverFn = dyn Fn(&ModuleContext<'_>, &[Value]) -> Value + Send + Sync;

/// Where a binding gets its value from.
///
/// `Key` aliases a store member directly; `Resolver` computes a derived or
/// composed value inline. Which variant applies is decided by pattern match
/// at accessor-invocation time, not at bind time.
#[derive(Clone)]
pub enum Source {
    /// A path into the sub-store's state/getters/actions/mutations.
    Key(String),
    /// A custom function over the resolved context.
    Resolver(Arc<ResolverFn>),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Source::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// One normalized binding: the local name and its source.
#[derive(Clone, Debug)]
pub struct Entry {
    /// Local name exposed to the consumer.
    pub key: String,
    /// Where the generated accessor reads from or dispatches to.
    pub source: Source,
}

/// An ordered set of bindings, normalized from either input shape.
///
/// List form: each element is both key and source.
/// Mapping form: pairs of key and source, in the order given.
///
/// # Example
///
/// ```rust
/// use trellis_bind::BindingMap;
///
/// // List form
/// let from_list = BindingMap::from(["count", "label"]);
/// assert_eq!(from_list.len(), 2);
///
/// // Mapping form with aliases and an inline resolver
/// let mapped = BindingMap::new()
///     .alias("total", "count")
///     .resolver("doubled", |scope, _| {
///         let count = scope
///             .state_member("count")
///             .and_then(|v| v.as_i64())
///             .unwrap_or(0);
///         trellis_bind::Value::from(count * 2)
///     });
/// assert_eq!(mapped.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BindingMap {
    entries: Vec<Entry>,
}

impl BindingMap {
    /// An empty map, to be filled with the builder methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list-form entry: the key doubles as its own source.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.entries.push(Entry {
            source: Source::Key(key.clone()),
            key,
        });
        self
    }

    /// Add a mapping-form entry with a string source.
    pub fn alias(mut self, key: impl Into<String>, source: impl Into<String>) -> Self {
        self.entries.push(Entry {
            key: key.into(),
            source: Source::Key(source.into()),
        });
        self
    }

    /// Add a mapping-form entry with a custom resolver source.
    pub fn resolver(
        mut self,
        key: impl Into<String>,
        resolver: impl Fn(&ModuleContext<'_>, &[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.entries.push(Entry {
            key: key.into(),
            source: Source::Resolver(Arc::new(resolver)),
        });
        self
    }

    /// The normalized entries, in input order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// List form: ordered keys, each its own source.

impl<const N: usize> From<[&str; N]> for BindingMap {
    fn from(keys: [&str; N]) -> Self {
        keys.iter().fold(BindingMap::new(), |map, k| map.key(*k))
    }
}

impl From<&[&str]> for BindingMap {
    fn from(keys: &[&str]) -> Self {
        keys.iter().fold(BindingMap::new(), |map, k| map.key(*k))
    }
}

impl From<Vec<&str>> for BindingMap {
    fn from(keys: Vec<&str>) -> Self {
        keys.into_iter().fold(BindingMap::new(), |map, k| map.key(k))
    }
}

impl From<Vec<String>> for BindingMap {
    fn from(keys: Vec<String>) -> Self {
        keys.into_iter().fold(BindingMap::new(), |map, k| map.key(k))
    }
}

// Mapping form: ordered key/source pairs.

impl<const N: usize> From<[(&str, &str); N]> for BindingMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .iter()
            .fold(BindingMap::new(), |map, (k, s)| map.alias(*k, *s))
    }
}

impl From<Vec<(&str, &str)>> for BindingMap {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        pairs
            .into_iter()
            .fold(BindingMap::new(), |map, (k, s)| map.alias(k, s))
    }
}

impl From<Vec<(String, Source)>> for BindingMap {
    fn from(pairs: Vec<(String, Source)>) -> Self {
        BindingMap {
            entries: pairs
                .into_iter()
                .map(|(key, source)| Entry { key, source })
                .collect(),
        }
    }
}
