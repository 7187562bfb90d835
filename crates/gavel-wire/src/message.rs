//! Request and response messages.
//!
//! Field values on the wire are plain text and integers so that any peer can
//! speak the protocol; the typed views live in `gavel-types` and are reached
//! through the conversion helpers below.

use std::fmt::{self, Display};

use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use serde::{Deserialize, Serialize};

use crate::error::{WireError, WireResult};
use crate::frame::{Frame, MAX_FRAME_SIZE};

// ============================================================================
// Request
// ============================================================================

/// Correlates a response with the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub payload: RequestPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestPayload {
    PlaceBid(PlaceBidRequest),
    GetOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBidRequest {
    pub bidder: String,
    pub amount: u64,
}

impl PlaceBidRequest {
    pub fn new(bidder: &BidderId, amount: Amount) -> Self {
        Self {
            bidder: bidder.as_str().to_string(),
            amount: amount.as_u64(),
        }
    }

    /// Validates the bidder and returns the typed view.
    pub fn parts(&self) -> WireResult<(BidderId, Amount)> {
        let bidder = BidderId::new(self.bidder.clone())?;
        Ok((bidder, Amount::new(self.amount)))
    }
}

impl Request {
    pub fn new(id: RequestId, payload: RequestPayload) -> Self {
        Self { id, payload }
    }

    pub fn to_frame(&self) -> WireResult<Frame> {
        encode(self).map(Frame::new)
    }

    pub fn from_frame(frame: &Frame) -> WireResult<Self> {
        decode(frame)
    }
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub request_id: RequestId,
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponsePayload {
    PlaceBid(PlaceBidResponse),
    GetOutcome(GetOutcomeResponse),
    Error(ErrorResponse),
}

/// Status of a bid as one of the three fixed status strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceBidResponse {
    pub status: String,
}

impl PlaceBidResponse {
    pub fn from_status(status: BidStatus) -> Self {
        Self {
            status: status.as_wire_str().to_string(),
        }
    }

    pub fn status(&self) -> WireResult<BidStatus> {
        Ok(self.status.parse()?)
    }
}

/// Snapshot of the auction. An empty `winner` means no winner yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOutcomeResponse {
    pub highest_bid: u64,
    pub winner: String,
}

impl GetOutcomeResponse {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self {
            highest_bid: outcome.highest_bid.as_u64(),
            winner: outcome.winner_label().to_string(),
        }
    }

    pub fn outcome(&self) -> WireResult<Outcome> {
        let highest_bid = Amount::new(self.highest_bid);
        if self.winner.is_empty() {
            return Ok(Outcome::running(highest_bid));
        }
        let winner = BidderId::new(self.winner.clone())?;
        Ok(Outcome::closed(highest_bid, winner))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The request carried a value the replica cannot accept.
    InvalidRequest,
    /// The replica failed while handling a valid request.
    Internal,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidRequest => write!(f, "invalid request"),
            ErrorCode::Internal => write!(f, "internal error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl Response {
    pub fn new(request_id: RequestId, payload: ResponsePayload) -> Self {
        Self {
            request_id,
            payload,
        }
    }

    pub fn error(request_id: RequestId, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(
            request_id,
            ResponsePayload::Error(ErrorResponse {
                code,
                message: message.into(),
            }),
        )
    }

    pub fn to_frame(&self) -> WireResult<Frame> {
        encode(self).map(Frame::new)
    }

    pub fn from_frame(frame: &Frame) -> WireResult<Self> {
        decode(frame)
    }
}

/// Serializes a message, refusing payloads no peer would accept.
fn encode<T: Serialize>(message: &T) -> WireResult<Vec<u8>> {
    let payload =
        postcard::to_allocvec(message).map_err(|e| WireError::Serialization(e.to_string()))?;
    if payload.len() > MAX_FRAME_SIZE {
        return Err(WireError::FrameTooLarge {
            size: payload.len(),
            max: MAX_FRAME_SIZE,
        });
    }
    Ok(payload)
}

fn decode<'a, T: Deserialize<'a>>(frame: &'a Frame) -> WireResult<T> {
    postcard::from_bytes(&frame.payload).map_err(|e| WireError::Deserialization(e.to_string()))
}
