//! Trellis store layer: the state-tree collaborator the binding engine
//! resolves against.
//!
//! - `Value`: tree-shaped state, getter results, and payloads
//! - `Namespace`: canonical module path (empty, or trailing-separator form)
//! - `Store`: state tree, qualified handler tables, dynamic namespace index
//! - `ModuleContext`: the namespace-scoped view handed to actions, custom
//!   resolvers, and anything else that needs scoped commit/dispatch
//!
//! # Example
//!
//! ```rust
//! use trellis_store::{ns, Module, Store, Value};
//!
//! let mut store = Store::default();
//! store
//!     .register_module(
//!         "session",
//!         Module::new(Value::map()).mutation("open", |state, user| {
//!             state.set_in(&["user"], user).ok();
//!         }),
//!     )
//!     .unwrap();
//!
//! store.commit("session/open", Value::from("alice")).unwrap();
//! let context = store.module(&ns!("session")).unwrap();
//! assert_eq!(context.state_member("user"), Some(Value::from("alice")));
//! ```

mod error;
mod json;
mod module;
mod namespace;
mod store;
mod value;

pub use error::Error;
pub use json::{from_value, json_to_value, to_value, value_to_json};
pub use module::{ActionFn, GetterFn, Module, MutationFn};
pub use namespace::{Namespace, SEPARATOR};
pub use store::{Getters, ModuleContext, Store};
pub use value::Value;
