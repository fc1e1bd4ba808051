//! Route and menu-item access decisions.
//!
//! The two checks intentionally use different defaults:
//! - [`AccessEvaluator::check_route_access`] gates whole screens. Every key in
//!   the matched chain needs an explicit `true`; unknown routes and missing
//!   entries deny.
//! - [`check_item_access`] decides whether a menu entry is shown. Once the
//!   top-level key is granted, nested items without their own entry are shown
//!   unless an intermediate ancestor is explicitly denied.
//!
//! A nested item can therefore be listed in the menu while its screen is
//! refused by the route gate. Both behaviors are covered by tests; do not
//! unify them without a product decision.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::PermissionMap;
use crate::menu::MenuTree;

/// Screens outside the menu that every signed-in principal may open.
///
/// Joined under the base path: `/interno/perfil`, `/interno/assinatura`,
/// `/interno/planos`, `/interno/selecionar-conta`.
pub const SPECIAL_ROUTE_SEGMENTS: &[&str] = &["perfil", "assinatura", "planos", "selecionar-conta"];

/// Full special routes under `base_path`.
pub fn special_routes(base_path: &str) -> Vec<String> {
    SPECIAL_ROUTE_SEGMENTS
        .iter()
        .map(|segment| format!("{base_path}/{segment}"))
        .collect()
}

/// Route-level permission gate over a shared menu tree.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    tree: Arc<MenuTree>,
    special_routes: HashSet<String>,
}

impl AccessEvaluator {
    /// Evaluator with the standard special routes under the tree's base path.
    pub fn new(tree: Arc<MenuTree>) -> Self {
        let special_routes = special_routes(tree.base_path()).into_iter().collect();
        Self {
            tree,
            special_routes,
        }
    }

    /// Add more always-allowed routes.
    pub fn with_extra_special_routes(mut self, routes: impl IntoIterator<Item = String>) -> Self {
        self.special_routes.extend(routes);
        self
    }

    pub fn tree(&self) -> &Arc<MenuTree> {
        &self.tree
    }

    pub fn is_special_route(&self, path: &str) -> bool {
        self.special_routes.contains(path)
    }

    /// Whether a principal holding `permissions` may open the screen at `path`.
    pub fn check_route_access(&self, path: &str, permissions: Option<&PermissionMap>) -> bool {
        if self.is_special_route(path) {
            return true;
        }

        let Some(permissions) = permissions else {
            debug!(path = %path, "route denied: no permission map");
            return false;
        };

        let key_path = self.tree.find_key_path(path);
        if key_path.is_empty() {
            debug!(path = %path, "route denied: not in menu");
            return false;
        }

        match key_path.keys().iter().find(|key| !permissions.allows(key)) {
            Some(key) => {
                debug!(path = %path, key = %key, "route denied: key not granted");
                false
            }
            None => true,
        }
    }
}

/// Whether the menu entry `item_key` under `parent_dot_path` is shown.
///
/// `parent_dot_path` is `None` for top-level entries and otherwise the dot
/// path of the item's parent (`atendimento.mercado_livre`).
pub fn check_item_access(
    item_key: &str,
    parent_dot_path: Option<&str>,
    permissions: Option<&PermissionMap>,
) -> bool {
    let Some(permissions) = permissions else {
        return false;
    };

    let Some(parent_dot_path) = parent_dot_path else {
        return permissions.allows(item_key);
    };

    // An item's own entry overrides anything inherited, in both directions.
    if let Some(access) = permissions.entry(item_key) {
        return access;
    }

    let mut ancestors = parent_dot_path.split('.');
    let top_level = ancestors.next().unwrap_or_default();
    if !permissions.allows(top_level) {
        return false;
    }

    !ancestors.any(|key| permissions.entry(key) == Some(false))
}
