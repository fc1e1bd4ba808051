//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Default base prefix for in-app routes.
pub const DEFAULT_BASE_PATH: &str = "/interno";

/// Navigation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavConfig {
    /// Prefix of every in-app route (default: /interno).
    pub base_path: String,

    /// Landing route when nothing better is allowed (default: the base path).
    pub default_route: String,

    /// YAML or JSON menu file. When None, the built-in seller menu is used.
    pub menu_file: Option<PathBuf>,

    /// Routes allowed for everyone in addition to the built-in special routes.
    pub extra_special_routes: Vec<String>,

    /// Screen ids flagged as under maintenance.
    pub maintenance_screens: Vec<String>,
}

impl NavConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_path = lookup("VITRINE_BASE_PATH")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());
        if !base_path.starts_with('/') || base_path.ends_with('/') {
            bail!("VITRINE_BASE_PATH must start with '/' and must not end with '/', got '{base_path}'");
        }

        let default_route = lookup("VITRINE_DEFAULT_ROUTE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| base_path.clone());
        if !default_route.starts_with('/') {
            bail!("VITRINE_DEFAULT_ROUTE must start with '/', got '{default_route}'");
        }

        let menu_file = lookup("VITRINE_MENU_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let extra_special_routes = split_list(lookup("VITRINE_EXTRA_SPECIAL_ROUTES"));
        let maintenance_screens = split_list(lookup("VITRINE_MAINTENANCE_SCREENS"));

        Ok(Self {
            base_path,
            default_route,
            menu_file,
            extra_special_routes,
            maintenance_screens,
        })
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            default_route: DEFAULT_BASE_PATH.to_string(),
            menu_file: None,
            extra_special_routes: Vec::new(),
            maintenance_screens: Vec::new(),
        }
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<NavConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NavConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), NavConfig::default());
    }

    #[test]
    fn default_route_follows_base_path() {
        let config = load(&[("VITRINE_BASE_PATH", "/painel")]).unwrap();
        assert_eq!(config.base_path, "/painel");
        assert_eq!(config.default_route, "/painel");
    }

    #[test]
    fn lists_are_trimmed_and_filtered() {
        let config = load(&[
            ("VITRINE_MAINTENANCE_SCREENS", " anuncios , ,atendimento.shopee"),
            ("VITRINE_EXTRA_SPECIAL_ROUTES", "/interno/ajuda"),
            ("VITRINE_MENU_FILE", "menu.yml"),
        ])
        .unwrap();
        assert_eq!(config.maintenance_screens, ["anuncios", "atendimento.shopee"]);
        assert_eq!(config.extra_special_routes, ["/interno/ajuda"]);
        assert_eq!(config.menu_file, Some(PathBuf::from("menu.yml")));
    }

    #[test]
    fn rejects_bad_base_path() {
        assert!(load(&[("VITRINE_BASE_PATH", "interno")]).is_err());
        assert!(load(&[("VITRINE_BASE_PATH", "/interno/")]).is_err());
    }

    #[test]
    fn rejects_relative_default_route() {
        assert!(load(&[("VITRINE_DEFAULT_ROUTE", "inicio")]).is_err());
    }
}
