//! Landing route selection for a freshly loaded principal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::menu::MenuTree;
use crate::permissions::PermissionMap;

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Account owner; bypasses navigation permissions.
    Master,
    /// Collaborator account; limited by its permission map.
    #[default]
    Collaborator,
}

impl Role {
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Master)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::Collaborator => "collaborator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role '{0}' (expected 'master' or 'collaborator')")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "master" => Ok(Role::Master),
            "collaborator" => Ok(Role::Collaborator),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The signed-in account as seen by navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub permissions: Option<PermissionMap>,
}

impl Principal {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionMap) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn is_elevated(&self) -> bool {
        self.role.is_elevated()
    }
}

/// First top-level section the principal may open, in declaration order.
///
/// The route is the key's [`MenuTree::relative_path`], so a top-level key
/// that is also declared inside an earlier section lands on that first
/// declaration.
///
/// Falls back to `default_route` when there is no principal, the principal
/// is elevated, has no permission map, or is granted no top-level key.
pub fn first_allowed_route(
    tree: &MenuTree,
    principal: Option<&Principal>,
    default_route: &str,
) -> String {
    let Some(principal) = principal else {
        return default_route.to_string();
    };
    if principal.is_elevated() {
        return default_route.to_string();
    }
    let Some(permissions) = principal.permissions.as_ref() else {
        debug!(principal = %principal.name, "no permission map, using default route");
        return default_route.to_string();
    };

    let landing = tree
        .roots()
        .iter()
        .find(|node| permissions.allows(&node.key))
        .and_then(|node| tree.relative_path(&node.key));

    match landing {
        Some(path) => path,
        None => {
            debug!(principal = %principal.name, "no top-level section granted, using default route");
            default_route.to_string()
        }
    }
}
