//! Menu tree for navigation and route resolution.
//!
//! The menu is a static forest of [`MenuNode`]s. A built [`MenuTree`]
//! provides:
//! - Canonical paths for node keys (`relative_path`)
//! - Mapping of requested paths back to key chains (`find_key_path`),
//!   including single-segment dynamic routes
//! - Icon ids resolved through an explicit [`IconRegistry`]

mod error;
mod icon;
mod node;
mod resolve;
mod tree;

pub use error::TreeError;
pub use icon::{IconId, IconRegistry, UnknownIcon};
pub use node::MenuNode;
pub use resolve::{KeyPath, RouteParam};
pub use tree::{MenuTree, TreeEntry};

pub(crate) use tree::child_path;
