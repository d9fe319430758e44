use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use backend_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "inventory-backend")]
#[command(about = "Inventory Backend Server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Import a spreadsheet (.xlsx, .xls, .ods, .csv) or a JSON array of rows
    Import { path: PathBuf },
    /// Export the inventory as .xlsx to a file or directory
    Export { path: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let config = AppConfig::load().await?;
    let _log_guard = backend_bootstrap::logging::init_tracing(&config)?;
    let config_path = AppConfig::config_path();
    if config_path.exists() {
        info!("loaded config from {}", config_path.display());
    } else {
        warn!("{} not found, using defaults", config_path.display());
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => backend_bootstrap::run_standalone(config).await,
        Command::Import { path } => backend_bootstrap::batch::run_import(config, &path).await,
        Command::Export { path } => backend_bootstrap::batch::run_export(config, path).await,
    }
}
