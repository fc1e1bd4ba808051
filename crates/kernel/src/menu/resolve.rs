//! Route resolution: node key -> canonical path and back.

use tracing::trace;

use super::tree::MenuTree;

/// A dynamic segment captured by a parametric match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParam {
    /// The node's `dynamicId` (e.g. `anuncioId`).
    pub name: String,
    /// The consumed segment (e.g. `MLB123`).
    pub value: String,
}

/// Chain of keys from a root to the node a path belongs to.
///
/// Empty when the path matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    keys: Vec<String>,
    param: Option<RouteParam>,
}

impl KeyPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The matched node's own key.
    pub fn leaf(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }

    /// `a.b.c`, or `None` for an unmatched path.
    pub fn dot_path(&self) -> Option<String> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.join("."))
        }
    }

    /// Every proper prefix of the dot path, shortest first: `["a", "a.b"]`.
    pub fn parent_dot_paths(&self) -> Vec<String> {
        (1..self.keys.len())
            .map(|end| self.keys[..end].join("."))
            .collect()
    }

    /// Set when the match consumed a dynamic segment.
    pub fn param(&self) -> Option<&RouteParam> {
        self.param.as_ref()
    }
}

impl MenuTree {
    /// Canonical path of the first node (declaration order, any depth) whose
    /// key is `key`.
    pub fn relative_path(&self, key: &str) -> Option<String> {
        self.index()
            .iter()
            .find(|entry| entry.leaf_key() == key)
            .map(|entry| entry.path.clone())
    }

    /// Find the node a requested path belongs to.
    ///
    /// A node matches when its canonical path equals `requested_path`, or
    /// when it declares a `dynamicId` and `requested_path` is its path plus
    /// exactly one more segment. `/interno/anuncios/MLB1/editar` does not
    /// match the `anuncios` detail route. The first match in declaration
    /// order wins.
    pub fn find_key_path(&self, requested_path: &str) -> KeyPath {
        for entry in self.index() {
            if entry.path == requested_path {
                trace!(path = %requested_path, node = %entry.keys.join("."), "exact route match");
                return KeyPath {
                    keys: entry.keys.clone(),
                    param: None,
                };
            }

            let Some(name) = &entry.dynamic_id else {
                continue;
            };
            let remainder = requested_path
                .strip_prefix(entry.path.as_str())
                .and_then(|rest| rest.strip_prefix('/'));
            if let Some(value) = remainder
                && !value.contains('/')
            {
                trace!(path = %requested_path, node = %entry.keys.join("."), "parametric route match");
                return KeyPath {
                    keys: entry.keys.clone(),
                    param: Some(RouteParam {
                        name: name.clone(),
                        value: value.to_string(),
                    }),
                };
            }
        }

        KeyPath::empty()
    }

    /// Path to one instance of a dynamic node: `<relative_path>/<value>`.
    ///
    /// `None` when the key is unknown, the node takes no dynamic segment, or
    /// `value` is not a single non-empty segment.
    pub fn path_with_param(&self, key: &str, value: &str) -> Option<String> {
        if value.is_empty() || value.contains('/') {
            return None;
        }
        let entry = self.index().iter().find(|entry| entry.leaf_key() == key)?;
        if entry.dynamic_id.is_none() {
            return None;
        }
        Some(format!("{}/{value}", entry.path))
    }
}
