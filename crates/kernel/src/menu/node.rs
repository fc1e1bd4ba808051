//! Menu node model.
//!
//! A menu file is an ordered mapping of node keys to node bodies, nested
//! through `dropdown`:
//!
//! ```yaml
//! atendimento:
//!   label: Atendimento
//!   dropdown:
//!     mercado_livre:
//!       label: Mercado Livre
//!       dropdown:
//!         perguntas_ml:
//!           label: Perguntas
//!           path: /perguntas
//! ```
//!
//! Keys live in the mapping, not in the body, so the in-memory [`MenuNode`]
//! carries its key and the (de)serializers below translate between the two
//! shapes. Declaration order is preserved.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::icon::IconId;

/// A navigable node in the menu configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    /// Key, unique among siblings.
    pub key: String,
    /// Display label (opaque to resolution).
    pub label: String,
    /// Own path segment. Leading slashes are stripped; `"/"` maps the node
    /// onto its parent's path (or the base path at the top level).
    pub path: Option<String>,
    /// Name of the path parameter for a single-instance child route
    /// (e.g. `anuncioId` for `/interno/anuncios/<id>`).
    pub dynamic_id: Option<String>,
    /// Icon shown next to the label.
    pub icon: Option<IconId>,
    /// Children in declaration order.
    pub dropdown: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            path: None,
            dynamic_id: None,
            icon: None,
            dropdown: Vec::new(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn dynamic_id(mut self, name: impl Into<String>) -> Self {
        self.dynamic_id = Some(name.into());
        self
    }

    pub fn icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn child(mut self, child: MenuNode) -> Self {
        self.dropdown.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = MenuNode>) -> Self {
        self.dropdown.extend(children);
        self
    }

    /// The segment this node contributes to its canonical path.
    ///
    /// Empty for a `"/"` path; the raw key when the path is unset or empty.
    pub fn segment(&self) -> &str {
        match &self.path {
            Some(path) if !path.is_empty() => path.trim_start_matches('/'),
            _ => &self.key,
        }
    }

    /// Whether this node accepts one extra dynamic segment.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic_id.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.dropdown.is_empty()
    }
}

/// A node as written in a menu file (key held by the enclosing mapping).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeBody {
    #[serde(default)]
    label: String,
    #[serde(default)]
    path: Option<String>,
    #[serde(default, alias = "dynamic_id")]
    dynamic_id: Option<String>,
    #[serde(default)]
    icon: Option<IconId>,
    #[serde(default)]
    dropdown: Option<Forest>,
}

impl NodeBody {
    fn into_node(self, key: String) -> MenuNode {
        MenuNode {
            key,
            label: self.label,
            path: self.path,
            dynamic_id: self.dynamic_id,
            icon: self.icon,
            dropdown: self.dropdown.map(|f| f.0).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeBodyRef<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<IconId>,
    #[serde(skip_serializing_if = "ForestRef::is_empty")]
    dropdown: ForestRef<'a>,
}

impl<'a> From<&'a MenuNode> for NodeBodyRef<'a> {
    fn from(node: &'a MenuNode) -> Self {
        Self {
            label: &node.label,
            path: node.path.as_deref(),
            dynamic_id: node.dynamic_id.as_deref(),
            icon: node.icon,
            dropdown: ForestRef(&node.dropdown),
        }
    }
}

/// Ordered sibling list read from a `key -> node` mapping.
#[derive(Debug, Default)]
pub(crate) struct Forest(pub(crate) Vec<MenuNode>);

impl<'de> Deserialize<'de> for Forest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ForestVisitor;

        impl<'de> Visitor<'de> for ForestVisitor {
            type Value = Forest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of menu keys to menu nodes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Forest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut nodes: Vec<MenuNode> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, body)) = map.next_entry::<String, NodeBody>()? {
                    if nodes.iter().any(|n| n.key == key) {
                        return Err(de::Error::custom(format_args!(
                            "duplicate menu key `{key}`"
                        )));
                    }
                    nodes.push(body.into_node(key));
                }
                Ok(Forest(nodes))
            }
        }

        deserializer.deserialize_map(ForestVisitor)
    }
}

/// Borrowed sibling list written back as a `key -> node` mapping.
pub(crate) struct ForestRef<'a>(pub(crate) &'a [MenuNode]);

impl ForestRef<'_> {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ForestRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for node in self.0 {
            map.serialize_entry(&node.key, &NodeBodyRef::from(node))?;
        }
        map.end()
    }
}
