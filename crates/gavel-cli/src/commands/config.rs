//! Configuration management commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use gavel_config::GavelConfig;

use crate::style::{print_header, print_labeled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Toml,
    Json,
}

/// Show the merged configuration.
pub fn show(project: &str, format: OutputFormat) -> Result<()> {
    let config = GavelConfig::load_from_dir(project).context("Failed to load configuration")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Toml => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        OutputFormat::Text => {
            print_header("Gavel Configuration");
            println!();

            println!("Auction:");
            print_labeled("Duration", &format!("{}s", config.auction.duration_secs));
            println!();

            println!("Cluster:");
            print_labeled("Host", &config.cluster.host.to_string());
            print_labeled("Base port", &config.cluster.base_port.to_string());
            print_labeled("Replicas", &config.cluster.replicas.to_string());
            print_labeled("Endpoints", &config.cluster.endpoints()?.join(", "));
            println!();

            println!("Frontend:");
            print_labeled(
                "Connect timeout",
                &format!("{}ms", config.frontend.connect_timeout_ms),
            );
            print_labeled("Call timeout", &format!("{}ms", config.frontend.call_timeout_ms));
        }
    }

    Ok(())
}
