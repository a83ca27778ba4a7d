//! Module declarations: initial local state plus named handlers.

use std::sync::Arc;

use crate::store::{Getters, ModuleContext};
use crate::value::Value;

/// Getter handler: derives a value from the module's local state snapshot
/// and a view over sibling getters.
pub type GetterFn = Arc<dyn Fn(&Value, &Getters<'_>) -> Value + Send + Sync>;

/// Mutation handler: mutates the module's local state subtree.
///
/// Runs under the state write lock; it must not re-enter the store.
pub type MutationFn = Arc<dyn Fn(&mut Value, Value) + Send + Sync>;

/// Action handler: receives a context scoped to its module and may commit
/// or dispatch through it. The returned value is handed back to whoever
/// dispatched; nothing is awaited.
pub type ActionFn = Arc<dyn Fn(&ModuleContext<'_>, Value) -> Value + Send + Sync>;

/// A module declaration: local state and the handlers registered with it.
///
/// Declarations are inert until handed to [`Store::register_module`] (or
/// [`Store::new`] for the root), which mounts the state into the root tree
/// and installs the handlers under namespace-qualified keys. Handler
/// registration order is preserved.
///
/// [`Store::register_module`]: crate::Store::register_module
/// [`Store::new`]: crate::Store::new
///
/// # Example
///
/// ```rust
/// use trellis_store::{Module, Value};
///
/// let counter = Module::new(Value::map())
///     .mutation("increment", |state, payload| {
///         let step = payload.as_i64().unwrap_or(1);
///         let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
///         state.set_in(&["count"], Value::from(count + step)).ok();
///     })
///     .getter("count", |state, _| {
///         state.get("count").cloned().unwrap_or(Value::Integer(0))
///     });
/// # let _ = counter;
/// ```
pub struct Module {
    pub(crate) state: Value,
    pub(crate) getters: Vec<(String, GetterFn)>,
    pub(crate) mutations: Vec<(String, MutationFn)>,
    pub(crate) actions: Vec<(String, ActionFn)>,
}

impl Module {
    /// Create a module with the given initial local state.
    pub fn new(state: Value) -> Self {
        Self {
            state,
            getters: Vec::new(),
            mutations: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a named getter.
    pub fn getter(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&Value, &Getters<'_>) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.getters.push((name.into(), Arc::new(handler)));
        self
    }

    /// Add a named mutation.
    pub fn mutation(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut Value, Value) + Send + Sync + 'static,
    ) -> Self {
        self.mutations.push((name.into(), Arc::new(handler)));
        self
    }

    /// Add a named action.
    pub fn action(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&ModuleContext<'_>, Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.actions.push((name.into(), Arc::new(handler)));
        self
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new(Value::map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_registration_order() {
        let module = Module::default()
            .getter("b", |_, _| Value::Null)
            .getter("a", |_, _| Value::Null)
            .mutation("m", |_, _| {})
            .action("act", |_, _| Value::Null);

        let names: Vec<&str> = module.getters.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(module.mutations.len(), 1);
        assert_eq!(module.actions.len(), 1);
    }

    #[test]
    fn default_state_is_empty_map() {
        let module = Module::default();
        assert!(module.state.is_map());
    }
}
