//! # gavel-router: Frontend for a set of `Gavel` replicas
//!
//! The router holds an ordered list of live replicas. Bids go to every
//! replica; outcome queries go to the head of the list. A replica that fails
//! a call is dropped for good, and the list only ever shrinks. A request that
//! is refused while the replica stays healthy drops nothing.
//!
//! ```text
//!                 ┌──────────── broadcast_bid ───────────┐
//!                 │                  │                    │
//!                 ▼                  ▼                    ▼
//!           ┌──────────┐      ┌──────────┐         ┌──────────┐
//!  query →  │ replica0 │      │ replica1 │   ...   │ replicaN │
//!           └──────────┘      └──────────┘         └──────────┘
//!             on failure: drop head, ask the next one
//! ```
//!
//! Transport is behind the [`ReplicaHandle`] trait so routing policy can be
//! tested without sockets.

mod config;
mod error;
mod handle;
mod router;

pub use config::RouterConfig;
pub use error::{RouterError, RouterResult};
pub use handle::{CallError, ReplicaHandle, TransportError};
pub use router::Router;
