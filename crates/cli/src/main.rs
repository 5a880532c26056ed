//! Tap list CLI - Database migrations and backups.
//!
//! # Usage
//!
//! ```bash
//! # Create the data directory, apply migrations and seed settings
//! taplist-cli migrate
//!
//! # Snapshot the database and uploads into ./backups
//! taplist-cli backup
//!
//! # Snapshot into a specific directory
//! taplist-cli backup --out /var/backups/taplist
//! ```
//!
//! Both commands read the same `TAPLIST_*` environment variables as the
//! server (see `taplist_server::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "taplist-cli")]
#[command(author, version, about = "Tap list CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations and seed default settings
    Migrate,
    /// Write a consistent snapshot of the database and uploaded images
    Backup {
        /// Directory the timestamped backup folder is created in
        #[arg(short, long, default_value = "backups")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Backup { out } => {
            commands::backup::run(&out).await?;
        }
    }
    Ok(())
}
