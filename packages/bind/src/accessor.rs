//! Accessor generation and invocation.
//!
//! A generated accessor bridges a consumer's local name to a store
//! operation. It is created once, closed over its kind, namespace, key and
//! source, and invoked arbitrarily often; every invocation independently
//! re-resolves its module context so that dynamic registration is always
//! observed.

use trellis_store::{Namespace, Store, Value};

use crate::map::{BindingMap, Source};
use crate::resolve::resolve_module;

/// The binding kinds the generator produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Read a raw state member or compute a derived read over state.
    State,
    /// Read a namespace-qualified getter.
    Getter,
    /// Combined accessor: getter if one exists, state otherwise.
    Inject,
    /// Dispatch an action.
    Action,
    /// Commit a mutation.
    Mutation,
}

impl Kind {
    /// Helper name used in diagnostics.
    pub fn helper_name(self) -> &'static str {
        match self {
            Kind::State => "map_state",
            Kind::Getter => "map_getters",
            Kind::Inject => "inject",
            Kind::Action => "map_actions",
            Kind::Mutation => "map_mutations",
        }
    }

    /// True for kinds that are pure derived reads.
    ///
    /// Introspection tag only (tooling distinguishes reads from
    /// dispatchers); invocation behavior does not branch on it.
    pub fn is_read(self) -> bool {
        matches!(self, Kind::State | Kind::Getter | Kind::Inject)
    }
}

/// A generated accessor.
///
/// Calls take the store explicitly: bindings hold no store reference, so a
/// set of bindings outlives any particular store and the module it targets
/// may appear or disappear between calls. A call returns `None` when the
/// namespace is unresolved, when a getter key is unknown, or when a
/// dispatch target is missing - never an error.
pub struct Accessor {
    kind: Kind,
    namespace: Namespace,
    key: String,
    source: Source,
}

impl Accessor {
    /// The kind this accessor was generated for.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The namespace the accessor resolves at every call.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The consumer-facing local name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True when this accessor is a pure derived read.
    pub fn is_read(&self) -> bool {
        self.kind.is_read()
    }

    /// Invoke the accessor against a store.
    ///
    /// `args` are forwarded: `Key` dispatch sources take the first argument
    /// as the payload (`Null` when absent); `Resolver` sources receive the
    /// whole slice.
    pub fn call(&self, store: &Store, args: &[Value]) -> Option<Value> {
        let scope = if self.namespace.is_root() {
            store.root_context()
        } else {
            resolve_module(store, self.kind.helper_name(), &self.namespace)?
        };

        match (self.kind, &self.source) {
            (Kind::State, Source::Key(key)) => scope.state_member(key),
            (Kind::State, Source::Resolver(resolver)) => Some(resolver(&scope, args)),

            (Kind::Getter, Source::Key(key)) => {
                let qualified = self.namespace.join(key);
                let value = store.getter(&qualified);
                if value.is_none() && cfg!(debug_assertions) {
                    tracing::warn!(getter = %qualified, "unknown getter");
                }
                value
            }
            (Kind::Getter, Source::Resolver(resolver)) => Some(resolver(&scope, args)),

            (Kind::Inject, Source::Key(key)) => {
                let qualified = self.namespace.join(key);
                if store.has_getter(&qualified) {
                    store.getter(&qualified)
                } else {
                    scope.state_member(key)
                }
            }
            (Kind::Inject, Source::Resolver(resolver)) => Some(resolver(&scope, args)),

            (Kind::Action, Source::Key(key)) => {
                match scope.dispatch(key, first_arg(args)) {
                    Ok(result) => Some(result),
                    Err(err) => {
                        if cfg!(debug_assertions) {
                            tracing::warn!(key = %key, error = %err, "dispatch through binding failed");
                        }
                        None
                    }
                }
            }
            (Kind::Action, Source::Resolver(resolver)) => Some(resolver(&scope, args)),

            (Kind::Mutation, Source::Key(key)) => match scope.commit(key, first_arg(args)) {
                Ok(()) => Some(Value::Null),
                Err(err) => {
                    if cfg!(debug_assertions) {
                        tracing::warn!(key = %key, error = %err, "commit through binding failed");
                    }
                    None
                }
            },
            (Kind::Mutation, Source::Resolver(resolver)) => Some(resolver(&scope, args)),
        }
    }
}

fn first_arg(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

/// An ordered mapping of local key to generated accessor.
///
/// Preserves the binding map's order; supports by-key lookup and direct
/// call-through.
pub struct Bindings {
    entries: Vec<(String, Accessor)>,
}

impl Bindings {
    pub(crate) fn generate(kind: Kind, namespace: Option<&str>, map: BindingMap) -> Self {
        let namespace = Namespace::normalize(namespace);
        let entries = map
            .into_entries()
            .into_iter()
            .map(|entry| {
                let accessor = Accessor {
                    kind,
                    namespace: namespace.clone(),
                    key: entry.key.clone(),
                    source: entry.source,
                };
                (entry.key, accessor)
            })
            .collect();
        Bindings { entries }
    }

    /// Look up an accessor by its local key.
    pub fn get(&self, key: &str) -> Option<&Accessor> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, accessor)| accessor)
    }

    /// Call the accessor bound under `key`; `None` if the key is unbound.
    pub fn call(&self, key: &str, store: &Store, args: &[Value]) -> Option<Value> {
        self.get(key)?.call(store, args)
    }

    /// Local keys, in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Key/accessor pairs, in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Accessor)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Number of generated accessors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
