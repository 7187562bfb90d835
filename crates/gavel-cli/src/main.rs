//! Gavel command line.
//!
//! A replicated auction: every replica keeps its own ledger, and
//! the client fans each bid out to all of them.
//!
//! # Quick Start
//!
//! ```bash
//! # One terminal per replica
//! gavel replica --id 0
//! gavel replica --id 1
//! gavel replica --id 2
//!
//! # Bid from another terminal
//! gavel client --bidder alice
//! > bid 10
//! > result
//! ```

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::config::OutputFormat;

/// Gavel - a replicated auction house.
#[derive(Parser)]
#[command(name = "gavel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Run one auction replica until Ctrl+C.
    Replica {
        /// Replica index; it listens on base_port + id.
        #[arg(short, long)]
        id: u16,

        /// Project directory holding gavel.toml.
        #[arg(short, long, default_value = ".")]
        project: String,
    },

    /// Connect to every replica and read bids from stdin.
    Client {
        /// Name the bids are placed under.
        #[arg(short, long)]
        bidder: String,

        /// Project directory holding gavel.toml.
        #[arg(short, long, default_value = ".")]
        project: String,
    },

    /// Configuration commands.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        /// Project directory holding gavel.toml.
        #[arg(short, long, default_value = ".")]
        project: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    style::set_no_color(cli.no_color);

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Replica { id, project } => commands::replica::run(id, &project),
        Commands::Client { bidder, project } => commands::client::run(&bidder, &project),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { project, format } => commands::config::show(&project, format),
        },
    }
}
