//! The binding entry points.
//!
//! Five generators, one per binding kind, plus a factory that curries a
//! namespace over all of them. Each generator normalizes its namespace and
//! map arguments, then produces one accessor per entry.

use trellis_store::Namespace;

use crate::accessor::{Bindings, Kind};
use crate::map::BindingMap;

/// Bind local names to raw state members or derived reads over state.
///
/// # Example
///
/// ```rust
/// use trellis_bind::{map_state, Value};
/// use trellis_store::{Module, Store};
///
/// let mut store = Store::default();
/// let mut state = Value::map();
/// state.set_in(&["count"], Value::from(1i64)).unwrap();
/// store.register_module("counter", Module::new(state)).unwrap();
///
/// let bindings = map_state(Some("counter"), ["count"]);
/// assert_eq!(bindings.call("count", &store, &[]), Some(Value::Integer(1)));
/// ```
pub fn map_state<M: Into<BindingMap>>(namespace: Option<&str>, map: M) -> Bindings {
    Bindings::generate(Kind::State, namespace, map.into())
}

/// Bind local names to namespace-qualified getters.
pub fn map_getters<M: Into<BindingMap>>(namespace: Option<&str>, map: M) -> Bindings {
    Bindings::generate(Kind::Getter, namespace, map.into())
}

/// Bind local names to the combined accessor: a getter when one exists
/// under the qualified key, the raw state member otherwise.
pub fn inject<M: Into<BindingMap>>(namespace: Option<&str>, map: M) -> Bindings {
    Bindings::generate(Kind::Inject, namespace, map.into())
}

/// Bind local names to action dispatchers.
pub fn map_actions<M: Into<BindingMap>>(namespace: Option<&str>, map: M) -> Bindings {
    Bindings::generate(Kind::Action, namespace, map.into())
}

/// Bind local names to mutation committers.
pub fn map_mutations<M: Into<BindingMap>>(namespace: Option<&str>, map: M) -> Bindings {
    Bindings::generate(Kind::Mutation, namespace, map.into())
}

/// The five generators, pre-bound to one namespace.
///
/// Produced populated and ready to use; each method behaves exactly like
/// its free-function counterpart called with this namespace.
pub struct NamespacedHelpers {
    namespace: Namespace,
}

/// Curry a namespace over all five generators.
///
/// # Example
///
/// ```rust
/// use trellis_bind::create_namespaced_helpers;
///
/// let helpers = create_namespaced_helpers("cart");
/// let bindings = helpers.map_state(["items"]);
/// assert_eq!(bindings.get("items").unwrap().namespace().as_str(), "cart/");
/// ```
pub fn create_namespaced_helpers(namespace: &str) -> NamespacedHelpers {
    NamespacedHelpers {
        namespace: Namespace::normalize(Some(namespace)),
    }
}

impl NamespacedHelpers {
    /// The namespace every helper is bound to.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Namespace-bound [`map_state`].
    pub fn map_state<M: Into<BindingMap>>(&self, map: M) -> Bindings {
        map_state(Some(self.namespace.as_str()), map)
    }

    /// Namespace-bound [`map_getters`].
    pub fn map_getters<M: Into<BindingMap>>(&self, map: M) -> Bindings {
        map_getters(Some(self.namespace.as_str()), map)
    }

    /// Namespace-bound [`inject`].
    pub fn inject<M: Into<BindingMap>>(&self, map: M) -> Bindings {
        inject(Some(self.namespace.as_str()), map)
    }

    /// Namespace-bound [`map_actions`].
    pub fn map_actions<M: Into<BindingMap>>(&self, map: M) -> Bindings {
        map_actions(Some(self.namespace.as_str()), map)
    }

    /// Namespace-bound [`map_mutations`].
    pub fn map_mutations<M: Into<BindingMap>>(&self, map: M) -> Bindings {
        map_mutations(Some(self.namespace.as_str()), map)
    }
}
