//! Error types for the store layer.

use thiserror::Error;

use crate::namespace::Namespace;

/// Errors raised by the store collaborator.
///
/// Binding accessors never surface these; they degrade to a no-op value.
/// Direct store callers (module registration, commit/dispatch) get them
/// as ordinary `Result`s.
#[derive(Debug, Error)]
pub enum Error {
    /// A namespace argument was not usable for the operation.
    #[error("invalid namespace '{input}': {message}")]
    InvalidNamespace { input: String, message: String },

    /// A module is already registered under this namespace.
    #[error("module already registered at '{namespace}'")]
    DuplicateModule { namespace: Namespace },

    /// No module is registered under this namespace.
    #[error("no module registered at '{namespace}'")]
    UnknownModule { namespace: Namespace },

    /// Commit of a mutation key with no registered handler.
    #[error("unknown mutation: {key}")]
    UnknownMutation { key: String },

    /// Dispatch of an action key with no registered handler.
    #[error("unknown action: {key}")]
    UnknownAction { key: String },

    /// A state-tree path could not be navigated or written.
    #[error("state path '{path}': {message}")]
    StatePath { path: String, message: String },

    /// JSON conversion failure.
    #[error("json conversion: {message}")]
    Json { message: String },
}

impl Error {
    pub(crate) fn state_path(segments: &[&str], message: impl Into<String>) -> Self {
        Error::StatePath {
            path: segments.join("/"),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns;

    #[test]
    fn display_includes_namespace() {
        let err = Error::UnknownModule {
            namespace: ns!("cart/items"),
        };
        assert!(err.to_string().contains("cart/items/"));
    }

    #[test]
    fn display_unknown_mutation() {
        let err = Error::UnknownMutation {
            key: "counter/increment".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("unknown mutation"));
        assert!(display.contains("counter/increment"));
    }

    #[test]
    fn state_path_joins_segments() {
        let err = Error::state_path(&["a", "b"], "not a container");
        let display = err.to_string();
        assert!(display.contains("a/b"));
        assert!(display.contains("not a container"));
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::UnknownAction {
            key: "x".to_string(),
        });
        let _ = err.to_string();
    }
}
