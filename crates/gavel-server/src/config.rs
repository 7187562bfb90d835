//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use gavel_types::ReplicaId;

/// Default time between the first accepted bid and the close of bidding.
pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(60);

/// Default size of each connection's read buffer.
const DEFAULT_READ_BUFFER_SIZE: usize = 4 * 1024;

/// Configuration for a single replica server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Identity used in logs.
    pub replica_id: ReplicaId,
    /// Address to listen on. Port 0 picks a free port.
    pub bind_addr: SocketAddr,
    /// How long bidding stays open after the first accepted bid.
    pub auction_duration: Duration,
    /// Initial capacity of per-connection read buffers.
    pub read_buffer_size: usize,
}

impl ServerConfig {
    pub fn new(replica_id: ReplicaId, bind_addr: SocketAddr) -> Self {
        Self {
            replica_id,
            bind_addr,
            auction_duration: DEFAULT_AUCTION_DURATION,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn with_auction_duration(mut self, duration: Duration) -> Self {
        self.auction_duration = duration;
        self
    }
}
