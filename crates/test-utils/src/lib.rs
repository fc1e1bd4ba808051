#![allow(clippy::expect_used)]
//! Vitrine test utilities.
//!
//! Fixtures for navigation tests: small menu trees, permission maps,
//! principals, and assertion helpers for route resolution.

use std::sync::Arc;

use vitrine_kernel::{AccessEvaluator, MenuNode, MenuTree, PermissionMap, Principal, Role};

/// Base path used by every fixture tree.
pub const BASE: &str = "/interno";

/// A compact tree covering root, nested, and dynamic nodes.
///
/// ```text
/// inicio            /interno
/// anuncios          /interno/anuncios/:anuncioId
/// a                 /interno/a
///   b               /interno/a/b
/// atendimento       /interno/atendimento
///   mercado_livre   /interno/atendimento/mercado_livre
///     perguntas_ml  /interno/atendimento/mercado_livre/perguntas
/// ```
pub fn test_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::new("inicio", "Início").path("/"),
        MenuNode::new("anuncios", "Anúncios")
            .path("/anuncios")
            .dynamic_id("anuncioId"),
        MenuNode::new("a", "A").child(MenuNode::new("b", "B").path("/b")),
        MenuNode::new("atendimento", "Atendimento").child(
            MenuNode::new("mercado_livre", "Mercado Livre")
                .child(MenuNode::new("perguntas_ml", "Perguntas").path("/perguntas")),
        ),
    ]
}

/// [`test_menu`] indexed under [`BASE`].
pub fn test_tree() -> MenuTree {
    MenuTree::new(BASE, test_menu()).expect("fixture tree is valid")
}

/// Evaluator over [`test_tree`] with the standard special routes.
pub fn test_evaluator() -> AccessEvaluator {
    AccessEvaluator::new(Arc::new(test_tree()))
}

/// Build a permission map from `(key, access)` pairs.
pub fn permissions(entries: &[(&str, bool)]) -> PermissionMap {
    entries.iter().map(|(key, access)| (*key, *access)).collect()
}

/// Collaborator holding the given permission entries.
pub fn collaborator(entries: &[(&str, bool)]) -> Principal {
    Principal::new("colaborador", Role::Collaborator).with_permissions(permissions(entries))
}

/// Collaborator with no permission map loaded yet.
pub fn collaborator_without_map() -> Principal {
    Principal::new("colaborador", Role::Collaborator)
}

/// Master account, optionally carrying a (ignored) permission map.
pub fn master(entries: &[(&str, bool)]) -> Principal {
    Principal::new("dono", Role::Master).with_permissions(permissions(entries))
}

/// Assertion helpers for route resolution.
pub mod assert {
    use vitrine_kernel::MenuTree;

    /// Assert that `path` resolves to the node at `dot_path`.
    pub fn resolves_to(tree: &MenuTree, path: &str, dot_path: &str) {
        let actual = tree.find_key_path(path).dot_path();
        assert_eq!(
            actual.as_deref(),
            Some(dot_path),
            "Expected '{path}' to resolve to '{dot_path}', got: {actual:?}"
        );
    }

    /// Assert that `path` matches no node.
    pub fn unresolved(tree: &MenuTree, path: &str) {
        let actual = tree.find_key_path(path);
        assert!(
            actual.is_empty(),
            "Expected '{path}' to match nothing, got: {:?}",
            actual.dot_path()
        );
    }
}
