//! # gavel-client: Async client for a `Gavel` replica
//!
//! One [`ReplicaClient`] holds one TCP connection to one replica and speaks
//! the binary protocol defined in `gavel-wire`. Requests on a connection are
//! serialized; each one is bounded by [`ClientConfig::request_timeout`].
//!
//! A connection that fails or times out is marked broken and every later
//! request fails fast with [`ClientError::ConnectionClosed`]. Replicas do not
//! come back, so the client never reconnects.
//!
//! ## Usage
//!
//! ```ignore
//! use gavel_client::{ClientConfig, ReplicaClient};
//!
//! let client = ReplicaClient::connect("127.0.0.1:5000", ClientConfig::default()).await?;
//! let status = client.place_bid(&BidderId::new("alice")?, Amount::new(10)).await?;
//! let outcome = client.get_outcome().await?;
//! ```

mod client;
mod error;

pub use client::{ClientConfig, ReplicaClient};
pub use error::{ClientError, ClientResult};
