//! # gavel-kernel: Functional core of a `Gavel` replica
//!
//! The kernel is the pure, deterministic heart of a replica. It receives
//! bids and the closing signal, and produces state changes plus effects to
//! execute.
//!
//! ## Key Principles
//!
//! - **No IO**: The kernel never touches the network or any timer
//! - **No clocks**: The closing deadline is scheduled by the runtime, not the kernel
//! - **Deterministic**: Same input sequence always produces the same ledger and winner
//! - **Pure functions**: `place_bid(ledger, bidder, amount) -> (ledger, status, effects)`
//!
//! ## Architecture
//!
//! - [`ledger`]: The in-memory bid ledger and its read accessors
//! - [`effects`]: Effects for the runtime to execute (`ScheduleClose`, `AuctionClosed`)
//! - [`kernel`]: The `place_bid` and `close` transitions
//!
//! ## Example
//!
//! ```
//! use gavel_kernel::{Effect, Ledger, place_bid};
//! use gavel_types::{Amount, BidStatus, BidderId};
//!
//! let ledger = Ledger::new();
//! let alice = BidderId::new("alice").unwrap();
//!
//! let (ledger, status, effects) = place_bid(ledger, alice, Amount::new(10));
//! assert_eq!(status, BidStatus::Accepted);
//! assert_eq!(effects, vec![Effect::ScheduleClose]);
//! assert_eq!(ledger.highest_bid(), Amount::new(10));
//! ```

pub mod effects;
pub mod kernel;
pub mod ledger;

#[cfg(test)]
mod tests;

pub use effects::Effect;
pub use kernel::{close, place_bid};
pub use ledger::{AcceptedBid, Ledger, Phase};
