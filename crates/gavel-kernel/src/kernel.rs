//! The kernel - pure functional core of a replica.
//!
//! The kernel applies bids and the closing signal to produce a new ledger
//! and effects. It is completely pure: no IO, no clocks, no randomness.
//! Callers that share a ledger between tasks must apply each transition
//! under a single lock, so the read-compare-write in [`place_bid`] and the
//! start-once check for the closing timer happen atomically.

use gavel_types::{Amount, BidStatus, BidderId};

use crate::effects::Effect;
use crate::ledger::{Ledger, Phase};

/// Applies a bid to the ledger, producing the new ledger, the bid's status,
/// and effects.
///
/// Takes ownership of the ledger, returns the new ledger. A rejected bid
/// returns the ledger unchanged.
pub fn place_bid(ledger: Ledger, bidder: BidderId, amount: Amount) -> (Ledger, BidStatus, Vec<Effect>) {
    let mut effects = Vec::new();

    if !ledger.is_open() {
        return (ledger, BidStatus::RejectedClosed, effects);
    }

    // Equal bids are accepted; only strictly lower ones are rejected.
    let current = ledger.highest_bid();
    if amount < current {
        return (ledger, BidStatus::RejectedTooLow, effects);
    }

    let mut ledger = ledger;
    if !ledger.closing_scheduled() {
        // Precondition: only an empty ledger can be without a timer
        debug_assert!(ledger.is_empty());
        ledger = ledger.with_closing_scheduled();
        effects.push(Effect::ScheduleClose);
    }

    let ledger = ledger.with_accepted(bidder, amount);

    // Postcondition: the maximum never decreases
    assert!(
        ledger.highest_bid() >= current,
        "highest bid decreased: was {current}, now {}",
        ledger.highest_bid()
    );
    debug_assert_eq!(ledger.highest_bid(), amount);

    (ledger, BidStatus::Accepted, effects)
}

/// Closes the auction.
///
/// Closing is idempotent: a closed ledger is returned unchanged with no
/// effects. An auction without bids has no winner to report, so closing an
/// empty ledger leaves it open.
pub fn close(ledger: Ledger) -> (Ledger, Vec<Effect>) {
    if !ledger.is_open() || ledger.is_empty() {
        return (ledger, Vec::new());
    }

    let ledger = ledger.with_phase(Phase::Closed);
    let outcome = ledger.outcome();

    // Postcondition: a closed ledger always names a winner
    debug_assert!(outcome.is_final());

    (ledger, vec![Effect::AuctionClosed(outcome)])
}
