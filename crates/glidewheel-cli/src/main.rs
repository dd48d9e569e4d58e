use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glidewheel_core::{config::expand_tilde, AppConfig};

mod commands;
mod watcher;

#[derive(Parser)]
#[command(name = "glidewheel")]
#[command(author, version, about = "Smooth, animated mouse wheel scrolling for every window")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of ~/.config/glidewheel/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start smooth scrolling (default)
    Run,
    /// Inspect or reset the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Overwrite the configuration file with defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(|path| expand_tilde(&path))
        .unwrap_or_else(AppConfig::config_path);

    // Reset must work even when the current file no longer parses
    if let Some(Commands::Config {
        action: ConfigAction::Reset,
    }) = cli.command
    {
        return commands::config::reset(&config_path);
    }

    let config = AppConfig::load_or_init(&config_path)?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, config_path).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Reset => commands::config::reset(&config_path),
        },
    }
}
