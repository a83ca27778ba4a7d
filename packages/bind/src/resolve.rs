//! Call-time module resolution.

use trellis_store::{ModuleContext, Namespace, Store};

/// Look up the module registered under `namespace`.
///
/// Resolution happens on every accessor invocation, never at bind time:
/// modules come and go dynamically, and a component is allowed to bind
/// before its target module finishes registering. A miss is therefore
/// advisory - a diagnostic in non-production builds, `None` to the caller,
/// who treats it as "skip this entry".
pub fn resolve_module<'a>(
    store: &'a Store,
    helper: &str,
    namespace: &Namespace,
) -> Option<ModuleContext<'a>> {
    let context = store.module(namespace);
    if context.is_none() && cfg!(debug_assertions) {
        tracing::warn!(
            helper,
            namespace = %namespace,
            "module namespace not found"
        );
    }
    context
}
