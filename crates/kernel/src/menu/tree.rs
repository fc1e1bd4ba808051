//! Validated, indexed menu forest.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use super::error::TreeError;
use super::node::{Forest, ForestRef, MenuNode};

/// Label used for the top level in error messages.
const ROOT_LABEL: &str = "<root>";

/// One node of the forest, flattened.
#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    /// Keys from the root to this node, inclusive.
    pub(crate) keys: Vec<String>,
    /// Canonical path.
    pub(crate) path: String,
    /// Parameter name when the node accepts a dynamic segment.
    pub(crate) dynamic_id: Option<String>,
}

impl IndexEntry {
    pub(crate) fn leaf_key(&self) -> &str {
        self.keys.last().map(String::as_str).unwrap_or_default()
    }
}

/// Borrowed view of an indexed node.
#[derive(Debug, Clone, Copy)]
pub struct TreeEntry<'a> {
    pub keys: &'a [String],
    pub path: &'a str,
    pub dynamic_id: Option<&'a str>,
}

impl<'a> TreeEntry<'a> {
    pub fn key(&self) -> &'a str {
        self.keys.last().map(String::as_str).unwrap_or_default()
    }

    pub fn dot_path(&self) -> String {
        self.keys.join(".")
    }

    pub fn depth(&self) -> usize {
        self.keys.len()
    }
}

/// The static menu forest.
///
/// Built once and never mutated. Construction validates the key and path
/// invariants and flattens the forest in declaration order (pre-order), so
/// every lookup is "first match in declaration order".
#[derive(Debug, Clone)]
pub struct MenuTree {
    base_path: String,
    roots: Vec<MenuNode>,
    index: Vec<IndexEntry>,
}

impl MenuTree {
    /// Validate and index a forest under `base_path` (e.g. `/interno`).
    ///
    /// Besides key and path uniqueness, no node may sit exactly one segment
    /// below a dynamic node: `/colaboradores/:colaboradorId` leaves no room
    /// for a `/colaboradores/novo` screen.
    pub fn new(base_path: impl Into<String>, roots: Vec<MenuNode>) -> Result<Self, TreeError> {
        let base_path = base_path.into();
        if !base_path.starts_with('/') || base_path.ends_with('/') {
            return Err(TreeError::InvalidBasePath(base_path));
        }

        let mut index = Vec::new();
        let mut seen_paths = HashMap::new();
        let mut chain = Vec::new();
        index_level(
            &roots,
            &base_path,
            &mut chain,
            &mut index,
            &mut seen_paths,
        )?;
        check_dynamic_captures(&index)?;

        debug!(base = %base_path, nodes = index.len(), "built menu tree");

        Ok(Self {
            base_path,
            roots,
            index,
        })
    }

    pub fn from_yaml_str(base_path: impl Into<String>, yaml: &str) -> Result<Self, TreeError> {
        let forest: Forest = serde_yml::from_str(yaml)?;
        Self::new(base_path, forest.0)
    }

    pub fn from_json_str(base_path: impl Into<String>, json: &str) -> Result<Self, TreeError> {
        let forest: Forest = serde_json::from_str(json)?;
        Self::new(base_path, forest.0)
    }

    /// Load a menu file, choosing the format from its extension.
    pub fn from_file(base_path: impl Into<String>, path: &Path) -> Result<Self, TreeError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yml" | "yaml") => Self::from_yaml_str(base_path, &read_menu_file(path)?),
            Some("json") => Self::from_json_str(base_path, &read_menu_file(path)?),
            _ => Err(TreeError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, TreeError> {
        Ok(serde_yml::to_string(&ForestRef(&self.roots))?)
    }

    pub fn to_json_string(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(&ForestRef(&self.roots))?)
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Top-level nodes in declaration order.
    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Every node in declaration order (pre-order).
    pub fn entries(&self) -> impl Iterator<Item = TreeEntry<'_>> {
        self.index.iter().map(|e| TreeEntry {
            keys: &e.keys,
            path: &e.path,
            dynamic_id: e.dynamic_id.as_deref(),
        })
    }

    /// Look up a node by its full dot path (`atendimento.mercado_livre`).
    pub fn get(&self, dot_path: &str) -> Option<&MenuNode> {
        let mut keys = dot_path.split('.');
        let first = keys.next()?;
        let mut node = self.roots.iter().find(|n| n.key == first)?;
        for key in keys {
            node = node.dropdown.iter().find(|n| n.key == key)?;
        }
        Some(node)
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub(crate) fn index(&self) -> &[IndexEntry] {
        &self.index
    }
}

fn read_menu_file(path: &Path) -> Result<String, TreeError> {
    std::fs::read_to_string(path).map_err(|source| TreeError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Path of a child under `parent`; empty segments collapse onto the parent.
pub(crate) fn child_path(parent: &str, segment: &str) -> String {
    if segment.is_empty() {
        parent.to_string()
    } else {
        format!("{parent}/{segment}")
    }
}

fn parent_label(chain: &[String]) -> String {
    if chain.is_empty() {
        ROOT_LABEL.to_string()
    } else {
        chain.join(".")
    }
}

/// Reject nodes whose canonical path is a one-segment extension of a
/// dynamic node's path.
fn check_dynamic_captures(index: &[IndexEntry]) -> Result<(), TreeError> {
    let dynamic: HashMap<&str, &IndexEntry> = index
        .iter()
        .filter(|e| e.dynamic_id.is_some())
        .map(|e| (e.path.as_str(), e))
        .collect();
    if dynamic.is_empty() {
        return Ok(());
    }

    for entry in index {
        let Some((prefix, _)) = entry.path.rsplit_once('/') else {
            continue;
        };
        if let Some(owner) = dynamic.get(prefix) {
            return Err(TreeError::CapturedByDynamic {
                path: entry.path.clone(),
                dynamic: owner.keys.join("."),
                node: entry.keys.join("."),
            });
        }
    }

    Ok(())
}

fn index_level(
    nodes: &[MenuNode],
    parent_path: &str,
    chain: &mut Vec<String>,
    index: &mut Vec<IndexEntry>,
    seen_paths: &mut HashMap<String, String>,
) -> Result<(), TreeError> {
    let mut sibling_keys = HashSet::new();
    for node in nodes {
        if node.key.is_empty() || node.key.contains(['.', '/']) {
            return Err(TreeError::InvalidKey {
                parent: parent_label(chain),
                key: node.key.clone(),
            });
        }
        if !sibling_keys.insert(node.key.as_str()) {
            return Err(TreeError::DuplicateKey {
                parent: parent_label(chain),
                key: node.key.clone(),
            });
        }

        chain.push(node.key.clone());
        let path = child_path(parent_path, node.segment());
        let dot_path = chain.join(".");

        if let Some(first) = seen_paths.insert(path.clone(), dot_path.clone()) {
            return Err(TreeError::PathCollision {
                path,
                first,
                second: dot_path,
            });
        }

        index.push(IndexEntry {
            keys: chain.clone(),
            path: path.clone(),
            dynamic_id: node.dynamic_id.clone(),
        });

        index_level(&node.dropdown, &path, chain, index, seen_paths)?;
        chain.pop();
    }

    Ok(())
}
