//! Replica command - serves one auction replica until Ctrl+C.

use anyhow::{Context, Result};
use gavel_config::GavelConfig;
use gavel_server::{ReplicaServer, ServerConfig};
use gavel_types::ReplicaId;
use tokio::signal;
use tracing::info;

use crate::style::{print_header, print_hint, print_labeled, print_success};

pub fn run(id: u16, project: &str) -> Result<()> {
    let config = GavelConfig::load_from_dir(project).context("Failed to load configuration")?;
    let replica = ReplicaId::new(id);
    let bind_addr = config
        .cluster
        .replica_address(replica)
        .with_context(|| format!("No address for {replica}"))?;

    let server_config =
        ServerConfig::new(replica, bind_addr).with_auction_duration(config.auction.duration());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(serve(server_config))
}

async fn serve(server_config: ServerConfig) -> Result<()> {
    let replica = server_config.replica_id;
    let duration = server_config.auction_duration;

    let server = ReplicaServer::bind(server_config)
        .await
        .context("Failed to start replica")?;
    let addr = server.local_addr()?;

    println!();
    print_header("Gavel replica");
    print_labeled("Replica", &replica.to_string());
    print_labeled("Address", &addr.to_string());
    print_labeled("Auction", &format!("closes {}s after the first bid", duration.as_secs()));
    println!();
    print_hint("Press Ctrl+C to stop.");
    println!();

    let shutdown = server.shutdown_handle();
    let task = tokio::spawn(server.run());

    signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!(%replica, "shutting down");
    shutdown.shutdown();
    task.await.context("Replica task failed")??;

    println!();
    print_success("Replica stopped.");
    Ok(())
}
