//! Menu tree error types.
//!
//! Raised only while building or loading a tree. Resolution against a built
//! tree never fails; it degrades to `None` or an empty key path instead.

use thiserror::Error;

/// Errors that can occur while building or loading a [`MenuTree`](super::MenuTree).
#[derive(Debug, Error)]
pub enum TreeError {
    /// Base path must look like `/interno`.
    #[error("invalid base path '{0}': must start with '/' and must not end with '/'")]
    InvalidBasePath(String),

    /// Keys form dot paths, so they must be non-empty and free of `.` and `/`.
    #[error("menu key '{key}' under '{parent}' is invalid: keys must be non-empty and contain no '.' or '/'")]
    InvalidKey { parent: String, key: String },

    /// Two siblings share a key.
    #[error("duplicate menu key '{key}' under '{parent}'")]
    DuplicateKey { parent: String, key: String },

    /// Two nodes canonicalize to the same path.
    #[error("menu nodes '{first}' and '{second}' both resolve to '{path}'")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    /// A node sits one segment below a dynamic node, whose parameter would
    /// swallow the node's route.
    #[error("menu node '{node}' at '{path}' is unreachable: dynamic node '{dynamic}' captures that segment")]
    CapturedByDynamic {
        path: String,
        dynamic: String,
        node: String,
    },

    /// Menu file extension is not one of `.yml`, `.yaml`, `.json`.
    #[error("unsupported menu file format: {path} (expected .yml, .yaml or .json)")]
    UnsupportedFormat { path: String },

    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid menu JSON: {0}")]
    Json(#[from] serde_json::Error),
}
