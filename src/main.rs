//! `layouts`: command-line entry point for the workspace layout manager.
//!
//! Layout intents are written to stdout as JSON Lines for the host to
//! execute. Prompts, notifications and logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use layout_manager::config::error::ConfigError;
use layout_manager::config::loader::ConfigLoader;
use layout_manager::config::schema::Config;
use layout_manager::config::{default, xdg};
use layout_manager::error::HostError;
use layout_manager::host::{CommandTable, ConsolePrompter, DispatchHost, SplitHost};
use layout_manager::layout::{self, LayoutConfig};
use layout_manager::manager::{LayoutManager, Managed};
use layout_manager::store::LayoutStore;
use layout_manager::{logging, Result};

/// Named workspace layouts
#[derive(Parser)]
#[command(name = "layouts")]
#[command(version, about = "Apply and manage named workspace layouts")]
struct Cli {
    /// Workspace whose settings file holds the custom layouts
    #[arg(long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the layouts CLI
#[derive(Subcommand)]
enum Commands {
    /// List every layout
    List,
    /// List invocable action ids
    Actions {
        /// List intent keys and the host commands they map to instead
        #[arg(long)]
        intents: bool,
    },
    /// Apply a layout by name, key or action id
    Apply {
        /// Layout name, key or action id
        target: String,
    },
    /// Pick a layout interactively and apply it
    Select,
    /// Create a custom layout with the wizard
    Create,
    /// Edit or delete a custom layout
    Manage,
    /// Edit a custom layout with the wizard
    Edit {
        /// Layout name
        name: String,
    },
    /// Delete a custom layout
    Delete {
        /// Layout name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

type ConsoleHost = SplitHost<
    DispatchHost<tokio::io::Stdout>,
    ConsolePrompter<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stderr>,
>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Config { action } = &cli.command {
        return run_config_command(action, cli.config.as_deref());
    }

    let config = ConfigLoader::load(cli.config.as_deref())?;
    logging::init(config.log.level);

    let store = LayoutStore::for_workspace(&cli.workspace, &config.store);
    tracing::debug!(path = ?store.path(), "Using settings file");

    match cli.command {
        Commands::List => {
            let custom = store.load_custom()?;
            print_layouts(&store, layout::default_layouts().iter().chain(&custom));
            Ok(())
        }
        Commands::Actions { intents: true } => {
            for (key, id) in CommandTable::with_overrides(&config.commands).entries() {
                println!("{key:<26} {id}");
            }
            Ok(())
        }
        Commands::Actions { intents: false } => {
            let manager = LayoutManager::load(store)?;
            for id in manager.registrar().actions() {
                println!("{id}");
            }
            Ok(())
        }
        command => {
            let manager = LayoutManager::load(store)?;
            let host = console_host(&config)?;
            block_on(run_interactive(command, manager, host))
        }
    }
}

async fn run_interactive(
    command: Commands,
    mut manager: LayoutManager,
    mut host: ConsoleHost,
) -> Result<()> {
    match command {
        Commands::Apply { target } => {
            manager.apply(&mut host, &target).await?;
        }
        Commands::Select => {
            manager.select_layout(&mut host).await?;
        }
        Commands::Create => {
            manager.create_layout(&mut host.prompter).await?;
        }
        Commands::Manage => match manager.manage_layouts(&mut host.prompter).await? {
            Some(Managed::Edited(layout)) => tracing::debug!(layout = %layout.name, "Edited"),
            Some(Managed::Deleted(name)) => tracing::debug!(layout = %name, "Deleted"),
            None => {}
        },
        Commands::Edit { name } => {
            manager.edit_layout(&mut host.prompter, &name).await?;
        }
        Commands::Delete { name, yes } => {
            manager.delete_layout(&mut host.prompter, &name, yes).await?;
        }
        Commands::List | Commands::Actions { .. } | Commands::Config { .. } => {}
    }
    Ok(())
}

fn console_host(config: &Config) -> Result<ConsoleHost> {
    let delay = config
        .host
        .command_delay()
        .map_err(|e| ConfigError::InvalidValue {
            field: "host.command_delay",
            message: e.to_string(),
        })?;
    let table = CommandTable::with_overrides(&config.commands);
    Ok(SplitHost::new(
        DispatchHost::new(tokio::io::stdout(), table, delay),
        ConsolePrompter::stdio(),
    ))
}

fn block_on<F: std::future::Future<Output = Result<()>>>(future: F) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(HostError::from)?;
    rt.block_on(future)
}

fn print_layouts<'a>(store: &LayoutStore, layouts: impl Iterator<Item = &'a LayoutConfig>) {
    for layout in layouts {
        let marker = if store.is_built_in(&layout.name) {
            "[built-in]"
        } else {
            "[custom]"
        };
        println!("{marker:<10} {:<16} {}", layout.name, layout.summary());
    }
}

fn run_config_command(action: &ConfigAction, path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let written = default::create_default_config(path, *force)?;
            println!("Created configuration at {}", written.display());
        }
        ConfigAction::Path => {
            let shown = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", shown.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(path)?;
            println!("Configuration is valid");
            println!("{config:#?}");
        }
    }
    Ok(())
}
