// SPDX-FileCopyrightText: 2026 Remoteconf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! remoteconf - Fetch and resolve a remote application configuration.
//!
//! This is the binary entry point for the remoteconf client.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// remoteconf - Fetch and resolve a remote application configuration.
#[derive(Parser, Debug)]
#[command(name = "remoteconf", version, about, long_about = None)]
struct Cli {
    /// Settings file to use instead of the standard search locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Request the configuration and print the resolved update decision.
    Fetch {
        /// Print the resolved state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the last cached configuration without fetching.
    Cached,
    /// Request the configuration and discard its recommended update.
    Discard,
    /// Erase the cached configuration and the discard record.
    ClearCache,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => remoteconf_config::load_and_validate_path(path),
        None => remoteconf_config::load_and_validate(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(errors) => {
            remoteconf_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&settings.logging.level);

    let result = match cli.command {
        Commands::Fetch { json } => commands::run_fetch(&settings, json).await,
        Commands::Cached => commands::run_cached(&settings),
        Commands::Discard => commands::run_discard(&settings).await,
        Commands::ClearCache => commands::run_clear_cache(&settings),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber; logs go to stderr.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("remoteconf={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
