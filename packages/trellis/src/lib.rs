//! Trellis: generated bindings over a namespaced, tree-structured state store.
//!
//! One surface over the two layers: the store collaborator
//! (`trellis-store`) and the binding engine (`trellis-bind`). Consumers
//! declare modules, register them under namespaces, and bind local names to
//! state, getters, actions, and mutations; the generated accessors resolve
//! their module at call time, so binding order and registration order are
//! independent.

pub use trellis_bind::{
    create_namespaced_helpers, inject, map_actions, map_getters, map_mutations, map_state,
    resolve_module, Accessor, BindingMap, Bindings, Entry, Kind, NamespacedHelpers, ResolverFn,
    Source,
};
pub use trellis_store::{
    from_value, json_to_value, ns, to_value, value_to_json, ActionFn, Error, GetterFn, Getters,
    Module, ModuleContext, MutationFn, Namespace, Store, Value, SEPARATOR,
};

/// Version string of the trellis packages.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
