//! Client command - the frontend shell over every configured replica.

use anyhow::{Context, Result};
use gavel_client::ClientConfig;
use gavel_config::GavelConfig;
use gavel_router::{Router, RouterConfig};
use gavel_types::BidderId;
use tokio::io::BufReader;
use tokio::signal;

use super::shell::Shell;
use crate::style::{print_header, print_hint, print_labeled};

pub fn run(bidder: &str, project: &str) -> Result<()> {
    let bidder = BidderId::new(bidder).context("Invalid bidder name")?;
    let config = GavelConfig::load_from_dir(project).context("Failed to load configuration")?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let result = runtime.block_on(serve(bidder, config));
    // The stdin reader may still be parked on a blocking read.
    runtime.shutdown_background();
    result
}

async fn serve(bidder: BidderId, config: GavelConfig) -> Result<()> {
    let endpoints = config.cluster.endpoints()?;
    let client_config = ClientConfig {
        connect_timeout: config.frontend.connect_timeout(),
        request_timeout: config.frontend.call_timeout(),
        ..ClientConfig::default()
    };
    let router_config = RouterConfig {
        call_timeout: config.frontend.call_timeout(),
    };

    let router = Router::connect_all(endpoints.clone(), client_config, router_config)
        .await
        .context("Failed to connect to replicas")?;

    println!();
    print_header("Gavel auction client");
    print_labeled("Bidder", bidder.as_str());
    print_labeled("Replicas", &endpoints.join(", "));
    println!();
    print_hint("Commands: bid <amount>, result. Ctrl+C or end of input to quit.");
    println!();

    let shell = Shell::new(router, bidder);
    let session = tokio::spawn(shell.run(BufReader::new(tokio::io::stdin())));

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            println!();
            print_hint("Goodbye.");
        }
        joined = session => {
            joined.context("Shell task failed")??;
        }
    }

    Ok(())
}
