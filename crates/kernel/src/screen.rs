//! Screen ids for the maintenance-flag service.
//!
//! A screen id is the dot path of the menu node a route belongs to
//! (`atendimento.mercado_livre.perguntas_ml`). The flag service itself is an
//! external collaborator behind [`MaintenanceFlags`].

use std::collections::HashSet;

use crate::menu::MenuTree;

/// Screen id for a requested path, or `None` if the path is not in the menu.
pub fn screen_id_for_route(tree: &MenuTree, path: &str) -> Option<String> {
    tree.find_key_path(path).dot_path()
}

/// Answers whether a screen is currently disabled for maintenance.
pub trait MaintenanceFlags: Send + Sync {
    fn is_under_maintenance(&self, screen_id: &str) -> bool;
}

/// No screen is ever under maintenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMaintenance;

impl MaintenanceFlags for NoMaintenance {
    fn is_under_maintenance(&self, _screen_id: &str) -> bool {
        false
    }
}

/// A fixed set of flagged screens.
///
/// Flagging a section also covers everything below it: `atendimento`
/// disables `atendimento.mercado_livre.perguntas_ml`.
#[derive(Debug, Clone, Default)]
pub struct StaticMaintenance {
    screens: HashSet<String>,
}

impl StaticMaintenance {
    pub fn new<I, S>(screens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            screens: screens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl MaintenanceFlags for StaticMaintenance {
    fn is_under_maintenance(&self, screen_id: &str) -> bool {
        if self.screens.contains(screen_id) {
            return true;
        }
        screen_id
            .match_indices('.')
            .any(|(end, _)| self.screens.contains(&screen_id[..end]))
    }
}
