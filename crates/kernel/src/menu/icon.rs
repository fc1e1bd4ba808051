//! Menu icons.
//!
//! Menu nodes name their icon with a closed [`IconId`]; the rendering layer
//! supplies the actual graphics through an [`IconRegistry`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Icon identifiers known to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    Home,
    Listings,
    Calculator,
    Support,
    Questions,
    Complaints,
    Reports,
    Collaborators,
    Settings,
    Taxes,
    Integrations,
}

impl IconId {
    pub const ALL: &'static [IconId] = &[
        IconId::Home,
        IconId::Listings,
        IconId::Calculator,
        IconId::Support,
        IconId::Questions,
        IconId::Complaints,
        IconId::Reports,
        IconId::Collaborators,
        IconId::Settings,
        IconId::Taxes,
        IconId::Integrations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconId::Home => "home",
            IconId::Listings => "listings",
            IconId::Calculator => "calculator",
            IconId::Support => "support",
            IconId::Questions => "questions",
            IconId::Complaints => "complaints",
            IconId::Reports => "reports",
            IconId::Collaborators => "collaborators",
            IconId::Settings => "settings",
            IconId::Taxes => "taxes",
            IconId::Integrations => "integrations",
        }
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown icon '{0}'")]
pub struct UnknownIcon(pub String);

impl FromStr for IconId {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconId::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

/// Explicit mapping from icon ids to renderable graphics.
#[derive(Debug, Clone)]
pub struct IconRegistry<G> {
    graphics: HashMap<IconId, G>,
}

impl<G> IconRegistry<G> {
    pub fn new() -> Self {
        Self {
            graphics: HashMap::new(),
        }
    }

    /// Register a graphic, returning the one it replaced.
    pub fn register(&mut self, id: IconId, graphic: G) -> Option<G> {
        self.graphics.insert(id, graphic)
    }

    /// Look up the graphic for an icon.
    pub fn render(&self, id: IconId) -> Option<&G> {
        self.graphics.get(&id)
    }

    /// Icons with no registered graphic, in declaration order.
    pub fn missing(&self) -> Vec<IconId> {
        IconId::ALL
            .iter()
            .copied()
            .filter(|id| !self.graphics.contains_key(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }
}

impl<G> Default for IconRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> FromIterator<(IconId, G)> for IconRegistry<G> {
    fn from_iter<I: IntoIterator<Item = (IconId, G)>>(iter: I) -> Self {
        Self {
            graphics: iter.into_iter().collect(),
        }
    }
}
