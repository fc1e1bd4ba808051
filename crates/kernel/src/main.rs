//! Vitrine navigation CLI
//!
//! Inspects the menu tree and answers navigation questions the way the back
//! office does: route resolution, route and menu-item access, landing routes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_kernel::menu::TreeEntry;
use vitrine_kernel::{
    IconId, IconRegistry, MergedNode, NavConfig, NavState, PermissionMap, Principal, Role,
    check_item_access, merged_tree, screen_id_for_route, visible_menu,
};

#[derive(Parser)]
#[command(name = "vitrine", about = "Vitrine navigation tools")]
struct Cli {
    /// Menu file (YAML or JSON); overrides VITRINE_MENU_FILE.
    #[arg(long, global = true)]
    menu: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct PrincipalArgs {
    /// Permission map JSON file (`{"key": {"access": true}}`).
    #[arg(long)]
    permissions: Option<PathBuf>,

    /// Principal role.
    #[arg(long, default_value = "collaborator")]
    role: Role,

    /// Principal name (for logs).
    #[arg(long, default_value = "cli")]
    name: String,

    /// Evaluate with no principal at all.
    #[arg(long, conflicts_with_all = ["permissions", "role"])]
    anonymous: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List every node with its canonical path.
    Paths,
    /// Resolve a requested path to its key chain.
    Resolve { path: String },
    /// Guard a navigation to a path.
    Check {
        path: String,
        #[command(flatten)]
        principal: PrincipalArgs,
    },
    /// Decide whether a menu item is shown.
    Item {
        key: String,
        /// Dot path of the item's parent; omit for top-level items.
        #[arg(long)]
        parent: Option<String>,
        /// Permission map JSON file.
        #[arg(long)]
        permissions: Option<PathBuf>,
    },
    /// Print the landing route.
    Landing {
        #[command(flatten)]
        principal: PrincipalArgs,
    },
    /// Print the menu as the principal sees it.
    Menu {
        /// Permission map JSON file.
        #[arg(long)]
        permissions: Option<PathBuf>,
        /// Include hidden entries, marked with `-`.
        #[arg(long)]
        all: bool,
    },
    /// Write the menu tree to stdout.
    Export {
        #[arg(long, value_enum, default_value = "yaml")]
        format: ExportFormat,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = NavConfig::from_env().context("failed to load configuration")?;
    if cli.menu.is_some() {
        config.menu_file = cli.menu;
    }
    let state = NavState::new(&config).context("failed to initialize navigation state")?;

    match cli.command {
        Command::Paths => {
            for entry in state.tree().entries() {
                println!("{}", describe_entry(&entry));
            }
        }
        Command::Resolve { path } => {
            let key_path = state.tree().find_key_path(&path);
            match key_path.dot_path() {
                Some(dot_path) => {
                    println!("node:    {dot_path}");
                    println!("parents: {}", key_path.parent_dot_paths().join(", "));
                    if let Some(param) = key_path.param() {
                        println!("param:   {} = {}", param.name, param.value);
                    }
                    if let Some(screen_id) = screen_id_for_route(state.tree(), &path) {
                        println!("screen:  {screen_id}");
                    }
                }
                None => println!("no menu node matches {path}"),
            }
        }
        Command::Check { path, principal } => {
            let principal = principal.load()?;
            let decision = state.guard().decide(&path, principal.as_ref());
            info!(path = %path, decision = ?decision, "route checked");
            println!("{decision:?}");
        }
        Command::Item {
            key,
            parent,
            permissions,
        } => {
            let permissions = load_permissions(permissions.as_ref())?;
            let shown = check_item_access(&key, parent.as_deref(), permissions.as_ref());
            println!("{}", if shown { "shown" } else { "hidden" });
        }
        Command::Landing { principal } => {
            let principal = principal.load()?;
            println!("{}", state.landing_route(principal.as_ref()));
        }
        Command::Menu { permissions, all } => {
            let permissions = load_permissions(permissions.as_ref())?;
            let icons = text_icons();
            let menu = if all {
                merged_tree(state.tree(), permissions.as_ref())
            } else {
                visible_menu(state.tree(), permissions.as_ref())
            };
            print_menu(&menu, &icons, 0);
        }
        Command::Export { format } => {
            let out = match format {
                ExportFormat::Yaml => state.tree().to_yaml_string(),
                ExportFormat::Json => state.tree().to_json_string(),
            }
            .context("failed to serialize menu")?;
            println!("{out}");
        }
    }

    Ok(())
}

impl PrincipalArgs {
    fn load(self) -> Result<Option<Principal>> {
        if self.anonymous {
            return Ok(None);
        }
        let mut principal = Principal::new(self.name, self.role);
        if let Some(permissions) = load_permissions(self.permissions.as_ref())? {
            principal = principal.with_permissions(permissions);
        }
        debug!(
            principal = %principal.name,
            role = %principal.role,
            has_map = principal.permissions.is_some(),
            "principal loaded"
        );
        Ok(Some(principal))
    }
}

fn load_permissions(path: Option<&PathBuf>) -> Result<Option<PermissionMap>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read permission map {}", path.display()))?;
    let map = PermissionMap::from_json_str(&json)
        .with_context(|| format!("invalid permission map {}", path.display()))?;
    Ok(Some(map))
}

fn describe_entry(entry: &TreeEntry<'_>) -> String {
    let label = format!("{}{}", "  ".repeat(entry.depth().saturating_sub(1)), entry.key());
    match entry.dynamic_id {
        Some(param) => format!("{label:<45} {}/:{param}", entry.path),
        None => format!("{label:<45} {}", entry.path),
    }
}

fn text_icons() -> IconRegistry<&'static str> {
    [
        (IconId::Home, "⌂"),
        (IconId::Listings, "▤"),
        (IconId::Calculator, "±"),
        (IconId::Support, "☏"),
        (IconId::Questions, "?"),
        (IconId::Complaints, "!"),
        (IconId::Reports, "▦"),
        (IconId::Collaborators, "☺"),
        (IconId::Settings, "⚙"),
        (IconId::Taxes, "%"),
        (IconId::Integrations, "⇄"),
    ]
    .into_iter()
    .collect()
}

fn print_menu(nodes: &[MergedNode<'_>], icons: &IconRegistry<&'static str>, depth: usize) {
    for node in nodes {
        let icon = node
            .node
            .icon
            .and_then(|id| icons.render(id).copied())
            .unwrap_or(" ");
        let marker = if node.visible { ' ' } else { '-' };
        println!(
            "{marker} {indent}{icon} {label}  {path}",
            indent = "  ".repeat(depth),
            label = node.node.label,
            path = node.path,
        );
        print_menu(&node.children, icons, depth + 1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,vitrine_kernel=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
