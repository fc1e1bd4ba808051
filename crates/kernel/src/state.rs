//! Navigation state shared by every request.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::seller_tree;
use crate::config::NavConfig;
use crate::guard::RouteGuard;
use crate::landing::{Principal, first_allowed_route};
use crate::menu::MenuTree;
use crate::permissions::AccessEvaluator;
use crate::screen::{MaintenanceFlags, NoMaintenance, StaticMaintenance};

/// Navigation state. Cheap to clone.
#[derive(Clone)]
pub struct NavState {
    inner: Arc<NavStateInner>,
}

struct NavStateInner {
    /// Menu tree, immutable for the process lifetime.
    tree: Arc<MenuTree>,

    /// Route permission gate.
    evaluator: AccessEvaluator,

    /// Maintenance-aware route guard.
    guard: RouteGuard,

    /// Fallback landing route.
    default_route: String,
}

impl NavState {
    /// Build state from configuration, loading the menu file if one is set.
    pub fn new(config: &NavConfig) -> Result<Self> {
        let tree = match &config.menu_file {
            Some(path) => MenuTree::from_file(config.base_path.as_str(), path)
                .with_context(|| format!("failed to load menu file {}", path.display()))?,
            None => seller_tree(&config.base_path).context("failed to build built-in menu")?,
        };

        info!(
            base = %tree.base_path(),
            nodes = tree.len(),
            maintenance = config.maintenance_screens.len(),
            "menu tree loaded"
        );

        let maintenance = StaticMaintenance::new(config.maintenance_screens.iter().cloned());
        let flags: Arc<dyn MaintenanceFlags> = if maintenance.is_empty() {
            Arc::new(NoMaintenance)
        } else {
            Arc::new(maintenance)
        };

        Ok(Self::with_tree(
            tree,
            config.extra_special_routes.iter().cloned(),
            flags,
            config.default_route.clone(),
        ))
    }

    /// Build state around an existing tree.
    pub fn with_tree(
        tree: MenuTree,
        extra_special_routes: impl IntoIterator<Item = String>,
        flags: Arc<dyn MaintenanceFlags>,
        default_route: String,
    ) -> Self {
        let tree = Arc::new(tree);
        let evaluator =
            AccessEvaluator::new(Arc::clone(&tree)).with_extra_special_routes(extra_special_routes);
        let guard = RouteGuard::new(evaluator.clone(), flags);

        Self {
            inner: Arc::new(NavStateInner {
                tree,
                evaluator,
                guard,
                default_route,
            }),
        }
    }

    /// Get the menu tree.
    pub fn tree(&self) -> &Arc<MenuTree> {
        &self.inner.tree
    }

    /// Get the route permission gate.
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.inner.evaluator
    }

    /// Get the route guard.
    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    pub fn default_route(&self) -> &str {
        &self.inner.default_route
    }

    /// Landing route for `principal` under this state's menu.
    pub fn landing_route(&self, principal: Option<&Principal>) -> String {
        first_allowed_route(&self.inner.tree, principal, &self.inner.default_route)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::guard::GuardDecision;
    use crate::landing::Role;
    use crate::permissions::PermissionMap;

    #[test]
    fn default_config_uses_seller_menu() {
        let state = NavState::new(&NavConfig::default()).unwrap();
        assert_eq!(state.tree().base_path(), "/interno");
        assert!(state.tree().relative_path("calculadora").is_some());
        assert_eq!(state.default_route(), "/interno");
    }

    #[test]
    fn configured_maintenance_reaches_guard() {
        let config = NavConfig {
            maintenance_screens: vec!["calculadora".to_string()],
            ..NavConfig::default()
        };
        let state = NavState::new(&config).unwrap();
        let master = Principal::new("dono", Role::Master);
        assert_eq!(
            state.guard().decide("/interno/calculadora", Some(&master)),
            GuardDecision::Maintenance {
                screen_id: "calculadora".to_string()
            }
        );
    }

    #[test]
    fn no_maintenance_screens_leaves_every_screen_open() {
        let state = NavState::new(&NavConfig::default()).unwrap();
        let master = Principal::new("dono", Role::Master);
        assert_eq!(
            state.guard().decide("/interno/calculadora", Some(&master)),
            GuardDecision::Allow
        );
    }

    #[test]
    fn configured_special_routes_reach_evaluator() {
        let config = NavConfig {
            extra_special_routes: vec!["/interno/ajuda".to_string()],
            ..NavConfig::default()
        };
        let state = NavState::new(&config).unwrap();
        assert!(state.evaluator().check_route_access("/interno/ajuda", None));
    }

    #[test]
    fn landing_route_uses_configured_default() {
        let config = NavConfig {
            default_route: "/interno/perfil".to_string(),
            ..NavConfig::default()
        };
        let state = NavState::new(&config).unwrap();
        let ana = Principal::new("ana", Role::Collaborator)
            .with_permissions(PermissionMap::new().deny("inicio"));
        assert_eq!(state.landing_route(Some(&ana)), "/interno/perfil");
    }

    #[test]
    fn missing_menu_file_is_an_error() {
        let config = NavConfig {
            menu_file: Some("/nonexistent/menu.yml".into()),
            ..NavConfig::default()
        };
        let err = NavState::new(&config).err().unwrap();
        assert!(err.to_string().contains("failed to load menu file"));
    }
}
