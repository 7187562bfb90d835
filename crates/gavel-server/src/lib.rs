//! # gavel-server: `Gavel` auction replica
//!
//! Each replica holds its own copy of the auction ledger and serves the
//! binary protocol defined in `gavel-wire` over TCP. Replicas never talk to
//! each other; the frontend keeps them in step by sending every bid to all
//! of them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      gavel-server                         │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────┐  │
//! │  │  Listener   │ → │ Connections │ → │ ReplicaService │  │
//! │  │  (TCP)      │   │ (1 task ea.)│   │ (Mutex<Ledger>)│  │
//! │  └─────────────┘   └─────────────┘   └────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use gavel_server::{ReplicaServer, ServerConfig};
//!
//! let config = ServerConfig::new(ReplicaId::new(0), "127.0.0.1:5000".parse()?);
//! let server = ReplicaServer::bind(config).await?;
//! server.run().await?;
//! ```

mod config;
mod connection;
mod error;
mod handler;
mod server;
mod service;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use server::{ReplicaServer, ShutdownHandle};
pub use service::ReplicaService;
