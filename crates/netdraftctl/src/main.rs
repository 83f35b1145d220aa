//! Netdraft Control - CLI client for the network design assistant.
//!
//! Drives the design generator and exporters locally; talks to the daemon
//! for chat-based intake.

use anyhow::Result;
use clap::{Parser, Subcommand};
use netdraftctl::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netdraftctl")]
#[command(about = "Netdraft - network design assistant for SMEs", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL (default: $NETDRAFT_URL or http://127.0.0.1:7870)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a design from a requirements file and write all exports
    Design {
        /// Requirements TOML file
        #[arg(long)]
        input: PathBuf,

        /// Output directory for reports and export artifacts
        #[arg(long, default_value = "netdraft-out")]
        out: PathBuf,

        /// Raster scale factor for the PNG/PDF exports
        #[arg(long, default_value_t = 2.0)]
        scale: f32,
    },

    /// Chat with the assistant to collect requirements interactively
    Chat,

    /// Show the device catalog and price table
    Catalog,

    /// Show daemon health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Design { input, out, scale } => commands::design(&input, &out, scale),
        Commands::Chat => commands::chat(cli.url.as_deref()).await,
        Commands::Catalog => commands::catalog(),
        Commands::Status => commands::status(cli.url.as_deref()).await,
    }
}
