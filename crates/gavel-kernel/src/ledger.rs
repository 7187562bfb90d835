//! Bid ledger state.
//!
//! The ledger tracks every accepted bid in acceptance order, each bidder's
//! latest accepted amount, and whether the auction is still open. State
//! transitions are done by taking ownership and returning a new ledger
//! (builder pattern).

use std::collections::BTreeMap;

use gavel_types::{Amount, BidderId, Outcome};
use serde::{Deserialize, Serialize};

/// Lifecycle phase of an auction.
///
/// `Open` is initial; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Open,
    Closed,
}

/// One accepted bid, as recorded in the acceptance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedBid {
    pub bidder: BidderId,
    pub amount: Amount,
}

/// The per-replica bid ledger.
///
/// Invariants:
/// - While open, accepted amounts are non-decreasing in acceptance order,
///   so the maximum never goes down.
/// - Once closed, nothing changes.
/// - Only a ledger with at least one accepted bid can be closed.
/// - `entries[b]` is the amount of the last log event for `b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ledger {
    /// Append-only log of accepted bids, in acceptance order.
    log: Vec<AcceptedBid>,
    /// Latest accepted amount per bidder.
    entries: BTreeMap<BidderId, Amount>,
    phase: Phase,
    /// Set by the first accepted bid; never cleared.
    closing_scheduled: bool,
}

impl Ledger {
    /// Creates a new, open, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Returns true once the closing timer has been requested.
    pub fn closing_scheduled(&self) -> bool {
        self.closing_scheduled
    }

    /// Returns the highest amount across all bidders, or zero if empty.
    pub fn highest_bid(&self) -> Amount {
        self.entries.values().copied().max().unwrap_or(Amount::ZERO)
    }

    /// Returns the latest accepted amount for a bidder.
    pub fn entry(&self, bidder: &BidderId) -> Option<Amount> {
        self.entries.get(bidder).copied()
    }

    /// Number of distinct bidders with an accepted bid.
    pub fn bidder_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of accepted bids, including repeat bids from the same bidder.
    pub fn accepted_count(&self) -> usize {
        self.log.len()
    }

    /// Returns the accepted bids in acceptance order.
    pub fn accepted(&self) -> &[AcceptedBid] {
        &self.log
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Returns the earliest bidder, by acceptance order, whose bid reached
    /// the current maximum.
    ///
    /// Several bidders can be tied at the maximum because equal bids are
    /// accepted. Scanning the acceptance log rather than the entries map
    /// makes the choice independent of map iteration order.
    pub fn leading_bidder(&self) -> Option<&BidderId> {
        let highest = self.highest_bid();
        self.log
            .iter()
            .find(|bid| bid.amount == highest)
            .map(|bid| &bid.bidder)
    }

    /// Returns the current outcome.
    ///
    /// The winner is only reported once the auction has closed.
    pub fn outcome(&self) -> Outcome {
        match (self.phase, self.leading_bidder()) {
            (Phase::Closed, Some(winner)) => Outcome::closed(self.highest_bid(), winner.clone()),
            _ => Outcome::running(self.highest_bid()),
        }
    }

    /// Records an accepted bid and returns the updated ledger.
    ///
    /// Internal to the kernel - external code should use `place_bid`
    /// which handles validation and effects.
    pub(crate) fn with_accepted(mut self, bidder: BidderId, amount: Amount) -> Self {
        self.entries.insert(bidder.clone(), amount);
        self.log.push(AcceptedBid { bidder, amount });
        self
    }

    pub(crate) fn with_closing_scheduled(mut self) -> Self {
        self.closing_scheduled = true;
        self
    }

    pub(crate) fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }
}
