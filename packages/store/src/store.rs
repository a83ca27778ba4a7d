//! The Store: root state tree, handler tables, and the dynamic namespace
//! index that module resolution reads at call time.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::Error;
use crate::module::{ActionFn, GetterFn, Module, MutationFn};
use crate::namespace::Namespace;
use crate::value::Value;

/// What a module registration installed, recorded for clean removal.
#[derive(Default)]
struct Installed {
    getters: Vec<String>,
    mutations: Vec<String>,
    actions: Vec<String>,
}

/// The root state container.
///
/// Owns the state tree, the getter/mutation/action tables (keyed by
/// namespace-qualified names), and the namespace index of registered
/// modules. Modules register and unregister dynamically; consumers that
/// hold bindings against a namespace observe whatever is registered at the
/// moment they invoke an accessor, not at the moment they bound it.
///
/// State sits behind an `RwLock` so commits work through a shared
/// reference; everything handed out to callers is a snapshot.
///
/// # Example
///
/// ```rust
/// use trellis_store::{Module, Store, Value};
///
/// let mut store = Store::new(Module::new(Value::map()));
/// store
///     .register_module(
///         "counter",
///         Module::new(Value::map()).mutation("increment", |state, payload| {
///             let step = payload.as_i64().unwrap_or(1);
///             let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
///             state.set_in(&["count"], Value::from(count + step)).ok();
///         }),
///     )
///     .unwrap();
///
/// store.commit("counter/increment", Value::from(5i64)).unwrap();
/// assert_eq!(
///     store.state().get_in(&["counter", "count"]),
///     Some(&Value::Integer(5))
/// );
/// ```
pub struct Store {
    state: RwLock<Value>,
    getters: BTreeMap<String, (Namespace, GetterFn)>,
    mutations: BTreeMap<String, (Namespace, MutationFn)>,
    actions: BTreeMap<String, (Namespace, ActionFn)>,
    // The namespace index. Lookups go through `module()` fresh every time;
    // contexts are never cached across calls.
    modules: BTreeMap<Namespace, Installed>,
}

impl Store {
    /// Create a store from a root module.
    ///
    /// Root handlers are installed under their plain names; the root is not
    /// an entry in the namespace index.
    pub fn new(root: Module) -> Self {
        let Module {
            state,
            getters,
            mutations,
            actions,
        } = root;
        let mut store = Store {
            state: RwLock::new(state),
            getters: BTreeMap::new(),
            mutations: BTreeMap::new(),
            actions: BTreeMap::new(),
            modules: BTreeMap::new(),
        };
        store.install(&Namespace::root(), getters, mutations, actions);
        store
    }

    fn install(
        &mut self,
        namespace: &Namespace,
        getters: Vec<(String, GetterFn)>,
        mutations: Vec<(String, MutationFn)>,
        actions: Vec<(String, ActionFn)>,
    ) -> Installed {
        let mut installed = Installed::default();
        for (name, handler) in getters {
            let key = namespace.join(&name);
            self.getters.insert(key.clone(), (namespace.clone(), handler));
            installed.getters.push(key);
        }
        for (name, handler) in mutations {
            let key = namespace.join(&name);
            self.mutations
                .insert(key.clone(), (namespace.clone(), handler));
            installed.mutations.push(key);
        }
        for (name, handler) in actions {
            let key = namespace.join(&name);
            self.actions.insert(key.clone(), (namespace.clone(), handler));
            installed.actions.push(key);
        }
        installed
    }

    /// Register a module under a namespace.
    ///
    /// Mounts the module's state into the root tree at the namespace path
    /// (creating intermediate maps), installs its handlers under qualified
    /// keys, and records the namespace in the index. Bindings created
    /// earlier against this namespace start resolving on their next call.
    pub fn register_module(&mut self, namespace: &str, module: Module) -> Result<(), Error> {
        let ns = Namespace::normalize(Some(namespace));
        if ns.is_root() {
            return Err(Error::InvalidNamespace {
                input: namespace.to_string(),
                message: "module namespace must be non-empty".to_string(),
            });
        }
        if self.modules.contains_key(&ns) {
            return Err(Error::DuplicateModule { namespace: ns });
        }

        let Module {
            state,
            getters,
            mutations,
            actions,
        } = module;
        {
            let segments: Vec<&str> = ns.segments().collect();
            let mut root = self.state.write().expect("state lock poisoned");
            root.set_in(&segments, state)?;
        }
        let installed = self.install(&ns, getters, mutations, actions);
        tracing::debug!(namespace = %ns, "module registered");
        self.modules.insert(ns, installed);
        Ok(())
    }

    /// Unregister the module at a namespace.
    ///
    /// Removes its handlers, drops it from the index, and prunes its state
    /// subtree. Existing bindings against the namespace degrade to no-ops.
    pub fn unregister_module(&mut self, namespace: &str) -> Result<(), Error> {
        let ns = Namespace::normalize(Some(namespace));
        let installed = self
            .modules
            .remove(&ns)
            .ok_or_else(|| Error::UnknownModule {
                namespace: ns.clone(),
            })?;
        for key in installed.getters {
            self.getters.remove(&key);
        }
        for key in installed.mutations {
            self.mutations.remove(&key);
        }
        for key in installed.actions {
            self.actions.remove(&key);
        }
        let segments: Vec<&str> = ns.segments().collect();
        let mut root = self.state.write().expect("state lock poisoned");
        root.remove_in(&segments);
        drop(root);
        tracing::debug!(namespace = %ns, "module unregistered");
        Ok(())
    }

    /// Exact lookup in the namespace index.
    ///
    /// Returns a fresh context each time. The root namespace is not in the
    /// index; use [`root_context`](Store::root_context) for it.
    pub fn module(&self, namespace: &Namespace) -> Option<ModuleContext<'_>> {
        if self.modules.contains_key(namespace) {
            Some(ModuleContext {
                store: self,
                namespace: namespace.clone(),
            })
        } else {
            None
        }
    }

    /// Context over the root state and unqualified keys.
    pub fn root_context(&self) -> ModuleContext<'_> {
        ModuleContext {
            store: self,
            namespace: Namespace::root(),
        }
    }

    /// Registered module namespaces, in index order.
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.modules.keys().cloned().collect()
    }

    /// Snapshot of the whole state tree.
    pub fn state(&self) -> Value {
        self.state.read().expect("state lock poisoned").clone()
    }

    fn state_at(&self, namespace: &Namespace) -> Value {
        let root = self.state.read().expect("state lock poisoned");
        if namespace.is_root() {
            root.clone()
        } else {
            let segments: Vec<&str> = namespace.segments().collect();
            root.get_in(&segments).cloned().unwrap_or(Value::Null)
        }
    }

    /// Evaluate a getter by fully-qualified key.
    ///
    /// Getters run fresh on every call against a snapshot of their module's
    /// local state; results are never memoized. `None` means no getter is
    /// registered under the key.
    pub fn getter(&self, key: &str) -> Option<Value> {
        let (ns, handler) = self.getters.get(key)?;
        let local = self.state_at(ns);
        let view = Getters {
            store: self,
            namespace: ns.clone(),
        };
        Some(handler(&local, &view))
    }

    /// True if a getter handler is registered under this qualified key.
    pub fn has_getter(&self, key: &str) -> bool {
        self.getters.contains_key(key)
    }

    /// Commit a mutation by fully-qualified key.
    ///
    /// The handler receives its module's local subtree and runs under the
    /// state write lock; handlers must not re-enter the store.
    pub fn commit(&self, key: &str, payload: Value) -> Result<(), Error> {
        let (ns, handler) = self
            .mutations
            .get(key)
            .ok_or_else(|| Error::UnknownMutation {
                key: key.to_string(),
            })?;
        let mut root = self.state.write().expect("state lock poisoned");
        let target = if ns.is_root() {
            &mut *root
        } else {
            let segments: Vec<&str> = ns.segments().collect();
            root.get_in_mut(&segments)
                .ok_or_else(|| Error::UnknownModule {
                    namespace: ns.clone(),
                })?
        };
        handler(target, payload);
        Ok(())
    }

    /// Dispatch an action by fully-qualified key.
    ///
    /// The action runs with no locks held and receives a context scoped to
    /// its module, so it may commit and dispatch freely. Whatever it
    /// returns is handed back; nothing is awaited.
    pub fn dispatch(&self, key: &str, payload: Value) -> Result<Value, Error> {
        let (ns, handler) = self.actions.get(key).ok_or_else(|| Error::UnknownAction {
            key: key.to_string(),
        })?;
        let context = ModuleContext {
            store: self,
            namespace: ns.clone(),
        };
        Ok(handler(&context, payload))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Module::default())
    }
}

/// A view of the store scoped to one namespace.
///
/// This is the sub-store context: local state snapshots, local getter
/// lookup, and commit/dispatch that qualify local keys before hitting the
/// global tables. Contexts borrow the store and are built fresh per use;
/// holding one across module registration changes is not meaningful.
#[derive(Clone)]
pub struct ModuleContext<'a> {
    store: &'a Store,
    namespace: Namespace,
}

impl<'a> ModuleContext<'a> {
    /// The namespace this context is scoped to (root for the root context).
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The underlying store.
    pub fn store(&self) -> &'a Store {
        self.store
    }

    /// Snapshot of this module's local state (the whole tree at the root).
    pub fn state(&self) -> Value {
        self.store.state_at(&self.namespace)
    }

    /// A single member of the local state.
    pub fn state_member(&self, key: &str) -> Option<Value> {
        let root = self.store.state.read().expect("state lock poisoned");
        let mut segments: Vec<&str> = self.namespace.segments().collect();
        segments.push(key);
        root.get_in(&segments).cloned()
    }

    /// Evaluate a getter by local name.
    pub fn getter(&self, name: &str) -> Option<Value> {
        self.store.getter(&self.namespace.join(name))
    }

    /// Local getter view, as handed to getter handlers.
    pub fn getters(&self) -> Getters<'a> {
        Getters {
            store: self.store,
            namespace: self.namespace.clone(),
        }
    }

    /// Commit a mutation by local key.
    pub fn commit(&self, key: &str, payload: Value) -> Result<(), Error> {
        self.store.commit(&self.namespace.join(key), payload)
    }

    /// Dispatch an action by local key.
    pub fn dispatch(&self, key: &str, payload: Value) -> Result<Value, Error> {
        self.store.dispatch(&self.namespace.join(key), payload)
    }
}

/// Read-only view over getters, resolving local names first.
///
/// Getter handlers receive this so derived values can build on sibling
/// getters; unqualified root getters remain reachable as a fallback.
pub struct Getters<'a> {
    store: &'a Store,
    namespace: Namespace,
}

impl Getters<'_> {
    /// Evaluate a getter by local name, falling back to a root lookup.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.getter(&self.namespace.join(name)) {
            Some(value) => Some(value),
            None if self.namespace.is_root() => None,
            None => self.store.getter(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns;

    fn counter_module(initial: i64) -> Module {
        let mut state = Value::map();
        state.set_in(&["count"], Value::from(initial)).unwrap();
        Module::new(state)
            .getter("double", |state, _| {
                let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
                Value::from(count * 2)
            })
            .mutation("increment", |state, payload| {
                let step = payload.as_i64().unwrap_or(1);
                let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
                state.set_in(&["count"], Value::from(count + step)).ok();
            })
            .action("bump", |ctx, payload| {
                ctx.commit("increment", payload).ok();
                ctx.state().get("count").cloned().unwrap_or(Value::Null)
            })
    }

    #[test]
    fn register_mounts_state() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(3)).unwrap();

        assert_eq!(
            store.state().get_in(&["counter", "count"]),
            Some(&Value::Integer(3))
        );
        assert_eq!(store.namespaces(), vec![ns!("counter")]);
    }

    #[test]
    fn register_duplicate_fails() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(0)).unwrap();
        let result = store.register_module("counter/", counter_module(0));
        assert!(matches!(result, Err(Error::DuplicateModule { .. })));
    }

    #[test]
    fn register_root_namespace_fails() {
        let mut store = Store::default();
        let result = store.register_module("", Module::default());
        assert!(matches!(result, Err(Error::InvalidNamespace { .. })));
    }

    #[test]
    fn unregister_removes_everything() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(1)).unwrap();
        store.unregister_module("counter").unwrap();

        assert!(store.module(&ns!("counter")).is_none());
        assert!(store.state().get("counter").is_none());
        assert!(!store.has_getter("counter/double"));
        assert!(matches!(
            store.commit("counter/increment", Value::Null),
            Err(Error::UnknownMutation { .. })
        ));
    }

    #[test]
    fn unregister_unknown_fails() {
        let mut store = Store::default();
        assert!(matches!(
            store.unregister_module("ghost"),
            Err(Error::UnknownModule { .. })
        ));
    }

    #[test]
    fn module_lookup_is_exact() {
        let mut store = Store::default();
        store.register_module("a/b", Module::default()).unwrap();

        assert!(store.module(&ns!("a/b")).is_some());
        assert!(store.module(&ns!("a")).is_none());
        assert!(store.module(&ns!("a/b/c")).is_none());
    }

    #[test]
    fn commit_scopes_to_local_state() {
        let mut store = Store::default();
        store.register_module("left", counter_module(10)).unwrap();
        store.register_module("right", counter_module(20)).unwrap();

        store.commit("left/increment", Value::from(5i64)).unwrap();

        let state = store.state();
        assert_eq!(state.get_in(&["left", "count"]), Some(&Value::Integer(15)));
        assert_eq!(state.get_in(&["right", "count"]), Some(&Value::Integer(20)));
    }

    #[test]
    fn getter_evaluates_fresh() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(2)).unwrap();

        assert_eq!(store.getter("counter/double"), Some(Value::Integer(4)));
        store.commit("counter/increment", Value::from(1i64)).unwrap();
        assert_eq!(store.getter("counter/double"), Some(Value::Integer(6)));
    }

    #[test]
    fn getter_unknown_key_is_none() {
        let store = Store::default();
        assert_eq!(store.getter("nope"), None);
    }

    #[test]
    fn getters_view_resolves_siblings() {
        let mut store = Store::default();
        let module = counter_module(5).getter("quadruple", |_, getters| {
            let double = getters
                .get("double")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            Value::from(double * 2)
        });
        store.register_module("counter", module).unwrap();

        assert_eq!(store.getter("counter/quadruple"), Some(Value::Integer(20)));
    }

    #[test]
    fn getters_view_falls_back_to_root() {
        let root = Module::default().getter("version", |_, _| Value::from("1.0"));
        let mut store = Store::new(root);
        let module = Module::default().getter("report", |_, getters| {
            getters.get("version").unwrap_or(Value::Null)
        });
        store.register_module("sub", module).unwrap();

        assert_eq!(store.getter("sub/report"), Some(Value::from("1.0")));
    }

    #[test]
    fn dispatch_returns_action_result() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(1)).unwrap();

        let result = store
            .dispatch("counter/bump", Value::from(4i64))
            .unwrap();
        assert_eq!(result, Value::Integer(5));
        assert_eq!(
            store.state().get_in(&["counter", "count"]),
            Some(&Value::Integer(5))
        );
    }

    #[test]
    fn dispatch_unknown_fails() {
        let store = Store::default();
        assert!(matches!(
            store.dispatch("ghost/run", Value::Null),
            Err(Error::UnknownAction { .. })
        ));
    }

    #[test]
    fn action_can_dispatch_sibling() {
        let mut store = Store::default();
        let module = counter_module(0).action("bump_twice", |ctx, payload| {
            ctx.dispatch("bump", payload.clone()).ok();
            ctx.dispatch("bump", payload).unwrap_or(Value::Null)
        });
        store.register_module("counter", module).unwrap();

        let result = store
            .dispatch("counter/bump_twice", Value::from(3i64))
            .unwrap();
        assert_eq!(result, Value::Integer(6));
    }

    #[test]
    fn root_context_sees_whole_tree() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(7)).unwrap();

        let root = store.root_context();
        assert!(root.namespace().is_root());
        assert_eq!(
            root.state().get_in(&["counter", "count"]),
            Some(&Value::Integer(7))
        );
        assert!(root.state_member("counter").is_some());
    }

    #[test]
    fn module_context_is_scoped() {
        let mut store = Store::default();
        store.register_module("counter", counter_module(9)).unwrap();

        let context = store.module(&ns!("counter")).unwrap();
        assert_eq!(context.state_member("count"), Some(Value::Integer(9)));
        assert_eq!(context.getter("double"), Some(Value::Integer(18)));
        context.commit("increment", Value::from(1i64)).unwrap();
        assert_eq!(context.state_member("count"), Some(Value::Integer(10)));
    }

    #[test]
    fn nested_module_state_lives_under_parent() {
        let mut store = Store::default();
        store.register_module("a", Module::default()).unwrap();
        store.register_module("a/b", counter_module(1)).unwrap();

        assert_eq!(
            store.state().get_in(&["a", "b", "count"]),
            Some(&Value::Integer(1))
        );
        let context = store.module(&ns!("a/b")).unwrap();
        assert_eq!(context.state_member("count"), Some(Value::Integer(1)));
    }

    #[test]
    fn root_module_handlers_use_plain_keys() {
        let root = Module::default()
            .mutation("set_title", |state, payload| {
                state.set_in(&["title"], payload).ok();
            })
            .getter("title", |state, _| {
                state.get("title").cloned().unwrap_or(Value::Null)
            });
        let store = Store::new(root);

        store.commit("set_title", Value::from("hello")).unwrap();
        assert_eq!(store.getter("title"), Some(Value::from("hello")));
        assert!(store.namespaces().is_empty());
    }
}
