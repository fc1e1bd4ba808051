//! Per-navigation route guard.
//!
//! Combines the maintenance flags, the elevated-role bypass, and the
//! route permission gate into one decision for the hosting UI.

use std::sync::Arc;

use tracing::debug;

use crate::landing::Principal;
use crate::permissions::AccessEvaluator;
use crate::screen::{MaintenanceFlags, screen_id_for_route};

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny,
    /// The screen exists but is disabled for maintenance.
    Maintenance { screen_id: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Route guard over a shared evaluator and maintenance-flag source.
#[derive(Clone)]
pub struct RouteGuard {
    evaluator: AccessEvaluator,
    flags: Arc<dyn MaintenanceFlags>,
}

impl RouteGuard {
    pub fn new(evaluator: AccessEvaluator, flags: Arc<dyn MaintenanceFlags>) -> Self {
        Self { evaluator, flags }
    }

    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    /// Decide whether `principal` may open `path`.
    ///
    /// Maintenance applies to everyone, masters included. Masters then skip
    /// the permission map; everyone else goes through the route gate.
    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> GuardDecision {
        if let Some(screen_id) = screen_id_for_route(self.evaluator.tree(), path)
            && self.flags.is_under_maintenance(&screen_id)
        {
            debug!(path = %path, screen = %screen_id, "screen under maintenance");
            return GuardDecision::Maintenance { screen_id };
        }

        if principal.is_some_and(Principal::is_elevated) {
            return GuardDecision::Allow;
        }

        let permissions = principal.and_then(|p| p.permissions.as_ref());
        if self.evaluator.check_route_access(path, permissions) {
            GuardDecision::Allow
        } else {
            GuardDecision::Deny
        }
    }
}
