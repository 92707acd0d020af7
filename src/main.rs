//! Scriptpad command-line host
//!
//! Runs the editor engine headless against script files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use scriptpad::commands::{HighlightCommand, NormalizeCommand, TokensCommand};
use scriptpad::core::{AppConfig, APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(name = "scriptpad", version, about, long_about = None)]
struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print the highlight spans of every line
    Highlight {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Print the highlight spans as JSON
    Tokens {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Load a script and save it back with normalized line endings
    Normalize {
        #[arg(value_name = "IN")]
        input: PathBuf,
        #[arg(value_name = "OUT")]
        output: PathBuf,
    },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("{} v{} starting...", APP_NAME, VERSION);

    let mut config = load_config(cli.config.as_deref()).await;

    match cli.command {
        CliCommand::Highlight { path } => {
            print!("{}", HighlightCommand { path }.execute(&config).await?);
        }
        CliCommand::Tokens { path } => {
            println!("{}", TokensCommand { path }.execute(&config).await?);
        }
        CliCommand::Normalize { input, output } => {
            let saved = NormalizeCommand { input, output }.execute(&config).await?;
            println!("{}", saved.display());

            config.add_recent_file(saved);
            let stored = match cli.config.as_deref() {
                Some(path) => config.save_to(path).await,
                None => config.save().await,
            };
            if let Err(e) = stored {
                warn!("Could not update recent files: {}", e);
            }
        }
    }

    Ok(())
}

/// Load application configuration, falling back to defaults
async fn load_config(path: Option<&Path>) -> AppConfig {
    let loaded = match path {
        Some(path) => AppConfig::load_from(path).await,
        None => AppConfig::load().await,
    };
    loaded.unwrap_or_else(|e| {
        warn!("{}; using defaults", e.user_message());
        AppConfig::default()
    })
}
