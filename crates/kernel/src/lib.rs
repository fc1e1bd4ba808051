//! Vitrine Kernel Library
//!
//! Navigation core of the Vitrine seller back office: the static menu tree,
//! route resolution, navigation permissions, landing route selection and
//! maintenance screen ids. Everything here is pure and synchronous; the
//! permission map and maintenance flags come from outside collaborators.
//!
//! The `vitrine` binary is an operator CLI over this library.

pub mod catalog;
pub mod config;
pub mod guard;
pub mod landing;
pub mod menu;
pub mod permissions;
pub mod screen;
pub mod state;

pub use config::NavConfig;
pub use guard::{GuardDecision, RouteGuard};
pub use landing::{Principal, Role, first_allowed_route};
pub use menu::{IconId, IconRegistry, KeyPath, MenuNode, MenuTree, RouteParam, TreeError};
pub use permissions::{AccessEvaluator, MergedNode, PermissionMap, check_item_access, merged_tree, visible_menu};
pub use screen::{MaintenanceFlags, NoMaintenance, StaticMaintenance, screen_id_for_route};
pub use state::NavState;
