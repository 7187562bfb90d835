//! # gavel-types: Core types for `Gavel`
//!
//! This crate contains the value types shared across the `Gavel` system:
//! - Identities ([`BidderId`], [`ReplicaId`])
//! - Money ([`Amount`])
//! - Bid acknowledgements ([`BidStatus`])
//! - Auction results ([`Outcome`])

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing or parsing core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Bidder identities must be non-empty; the empty string means "no winner".
    #[error("bidder id must not be empty")]
    EmptyBidderId,

    /// A status string did not match any known acknowledgement.
    #[error("unknown bid status: {0:?}")]
    UnknownBidStatus(String),
}

// ============================================================================
// Identities
// ============================================================================

/// Opaque identity of a bidder.
///
/// Replicas never interpret the identity beyond equality; it is only used
/// to key the ledger and to report the winner. The empty string is reserved
/// on the wire to mean "no winner yet", so it is rejected here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BidderId(String);

impl BidderId {
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyBidderId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BidderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BidderId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Index of a replica within the configured cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReplicaId(u16);

impl ReplicaId {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Display for ReplicaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "replica-{}", self.0)
    }
}

impl From<u16> for ReplicaId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

// ============================================================================
// Amount
// ============================================================================

/// A bid amount.
///
/// Uses `u64` internally so amounts are never negative by construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

// ============================================================================
// Bid Status
// ============================================================================

/// Acknowledgement returned by a replica for a single bid.
///
/// Rejections are ordinary results, not errors: the replica always answers
/// with one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidStatus {
    /// The bid was recorded as the bidder's latest amount.
    Accepted,
    /// The bid was below the current maximum and was not recorded.
    RejectedTooLow,
    /// The auction had already closed.
    RejectedClosed,
}

impl BidStatus {
    /// Returns the textual status used by the replica protocol.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            BidStatus::Accepted => "success",
            BidStatus::RejectedTooLow => "fail - bid too low",
            BidStatus::RejectedClosed => "fail - bidding is over",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, BidStatus::Accepted)
    }
}

impl Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for BidStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(BidStatus::Accepted),
            "fail - bid too low" => Ok(BidStatus::RejectedTooLow),
            "fail - bidding is over" => Ok(BidStatus::RejectedClosed),
            other => Err(TypeError::UnknownBidStatus(other.to_string())),
        }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// The result of an auction as reported by one replica.
///
/// `winner` is present iff the auction has closed. While the auction is
/// open, `highest_bid` is the running maximum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub highest_bid: Amount,
    pub winner: Option<BidderId>,
}

impl Outcome {
    /// An in-progress outcome with no winner.
    pub fn running(highest_bid: Amount) -> Self {
        Self {
            highest_bid,
            winner: None,
        }
    }

    /// A final outcome. A closed auction always has a winner.
    pub fn closed(highest_bid: Amount, winner: BidderId) -> Self {
        Self {
            highest_bid,
            winner: Some(winner),
        }
    }

    /// Returns true if this outcome names a winner.
    pub fn is_final(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns the winner as text, or the empty string if there is none yet.
    pub fn winner_label(&self) -> &str {
        self.winner.as_ref().map_or("", BidderId::as_str)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.winner {
            Some(winner) => write!(f, "winner {winner} with {}", self.highest_bid),
            None => write!(f, "highest bid {}", self.highest_bid),
        }
    }
}
