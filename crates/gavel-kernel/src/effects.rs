//! Effects produced by the kernel.
//!
//! Effects represent side effects that the runtime must execute after a
//! transition is applied. The kernel is pure - it produces effects but
//! never executes them directly.

use gavel_types::Outcome;
use serde::{Deserialize, Serialize};

/// An effect to be executed by the runtime.
///
/// Effects are produced by [`super::kernel::place_bid`] and
/// [`super::kernel::close`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Start the auction-closing timer.
    ///
    /// Emitted at most once per ledger, by the first accepted bid. The
    /// runtime must arrange for [`super::kernel::close`] to be applied once
    /// the configured duration has elapsed.
    ScheduleClose,

    /// The auction transitioned from open to closed with this outcome.
    AuctionClosed(Outcome),
}
