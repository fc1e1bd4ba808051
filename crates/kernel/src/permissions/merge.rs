//! Permission-decorated view of the menu tree.
//!
//! Builds a new tree per call, borrowing the static configuration. The
//! shared [`MenuTree`] is never modified, so concurrent renders can each
//! merge their own permission snapshot.

use super::PermissionMap;
use super::evaluator::check_item_access;
use crate::menu::{MenuNode, MenuTree, child_path};

/// A menu node together with its resolved visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedNode<'a> {
    pub node: &'a MenuNode,
    /// Dot path from the root (`atendimento.mercado_livre`).
    pub dot_path: String,
    /// Canonical path.
    pub path: String,
    /// The node's own entry in the permission map, if any.
    pub entry: Option<bool>,
    /// Result of [`check_item_access`] for this node.
    pub visible: bool,
    pub children: Vec<MergedNode<'a>>,
}

/// Decorate every node of `tree` with its item visibility.
pub fn merged_tree<'a>(tree: &'a MenuTree, permissions: Option<&PermissionMap>) -> Vec<MergedNode<'a>> {
    merge_level(tree.roots(), None, tree.base_path(), permissions)
}

/// Like [`merged_tree`], keeping only visible nodes. A hidden node hides its
/// whole subtree.
pub fn visible_menu<'a>(tree: &'a MenuTree, permissions: Option<&PermissionMap>) -> Vec<MergedNode<'a>> {
    prune(merged_tree(tree, permissions))
}

fn merge_level<'a>(
    nodes: &'a [MenuNode],
    parent_dot_path: Option<&str>,
    parent_path: &str,
    permissions: Option<&PermissionMap>,
) -> Vec<MergedNode<'a>> {
    nodes
        .iter()
        .map(|node| {
            let dot_path = match parent_dot_path {
                Some(parent) => format!("{parent}.{}", node.key),
                None => node.key.clone(),
            };
            let path = child_path(parent_path, node.segment());
            let children = merge_level(&node.dropdown, Some(&dot_path), &path, permissions);

            MergedNode {
                node,
                entry: permissions.and_then(|p| p.entry(&node.key)),
                visible: check_item_access(&node.key, parent_dot_path, permissions),
                dot_path,
                path,
                children,
            }
        })
        .collect()
}

fn prune(nodes: Vec<MergedNode<'_>>) -> Vec<MergedNode<'_>> {
    nodes
        .into_iter()
        .filter(|n| n.visible)
        .map(|mut n| {
            n.children = prune(std::mem::take(&mut n.children));
            n
        })
        .collect()
}
