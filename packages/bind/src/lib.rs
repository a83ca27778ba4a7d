//! Trellis binding engine.
//!
//! Connects consumer components to a namespaced state store by generating
//! callable accessors for state slices, getters, actions, and mutations:
//! - `BindingMap`: normalizes list- and mapping-shaped binding inputs
//! - `resolve_module`: call-time namespace resolution (never cached)
//! - `Accessor` / `Bindings`: the generated callables, one per entry
//! - the five generators plus `create_namespaced_helpers`
//!
//! Accessors are deliberately forgiving: binding before the target module
//! registers is fine, and every recoverable miss degrades to `None`.
//!
//! # Example
//!
//! ```rust
//! use trellis_bind::{map_state, map_mutations, Value};
//! use trellis_store::{Module, Store};
//!
//! let mut store = Store::default();
//! let mut state = Value::map();
//! state.set_in(&["count"], Value::from(0i64)).unwrap();
//! store
//!     .register_module(
//!         "counter",
//!         Module::new(state).mutation("add", |state, payload| {
//!             let step = payload.as_i64().unwrap_or(0);
//!             let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
//!             state.set_in(&["count"], Value::from(count + step)).ok();
//!         }),
//!     )
//!     .unwrap();
//!
//! let reads = map_state(Some("counter"), ["count"]);
//! let writes = map_mutations(Some("counter"), ["add"]);
//!
//! writes.call("add", &store, &[Value::from(2i64)]);
//! assert_eq!(reads.call("count", &store, &[]), Some(Value::Integer(2)));
//! ```

mod accessor;
mod helpers;
mod map;
mod resolve;

pub use accessor::{Accessor, Bindings, Kind};
pub use helpers::{
    create_namespaced_helpers, inject, map_actions, map_getters, map_mutations, map_state,
    NamespacedHelpers,
};
pub use map::{BindingMap, Entry, ResolverFn, Source};
pub use resolve::resolve_module;

// Re-export store types for convenience
pub use trellis_store::{ModuleContext, Namespace, Store, Value};
