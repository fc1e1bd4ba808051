//! Navigation permissions.
//!
//! A [`PermissionMap`] is the per-principal snapshot sent by the profile
//! service: `{ "<key>": { "access": true|false }, ... }`. Top-level keys are
//! always present when granted; nested keys only when the service chooses to
//! send them. The map is read-only here and never merged into the tree.

mod evaluator;
mod merge;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use evaluator::{AccessEvaluator, SPECIAL_ROUTE_SEGMENTS, check_item_access, special_routes};
pub use merge::{MergedNode, merged_tree, visible_menu};

/// One permission entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    #[serde(default)]
    pub access: bool,
}

/// Flat map of node keys (not dot paths) to access flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap {
    entries: HashMap<String, Access>,
}

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builder: explicit `true` for `key`.
    pub fn grant(mut self, key: impl Into<String>) -> Self {
        self.set(key, true);
        self
    }

    /// Builder: explicit `false` for `key`.
    pub fn deny(mut self, key: impl Into<String>) -> Self {
        self.set(key, false);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, access: bool) {
        self.entries.insert(key.into(), Access { access });
    }

    /// The explicit entry for `key`, if the service sent one.
    pub fn entry(&self, key: &str) -> Option<bool> {
        self.entries.get(key).map(|a| a.access)
    }

    /// `true` only for an explicit `true` entry.
    pub fn allows(&self, key: &str) -> bool {
        self.entry(key).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, access) in iter {
            map.set(key, access);
        }
        map
    }
}
