//! # gavel-wire: Binary wire protocol for `Gavel`
//!
//! Every replica speaks the same two-operation protocol:
//!
//! | Operation    | Request               | Response                          |
//! |--------------|-----------------------|-----------------------------------|
//! | `PlaceBid`   | bidder, amount        | status text                       |
//! | `GetOutcome` | (none)                | highest bid, winner (empty = none)|
//!
//! ## Framing
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────────┐
//! │ length (u32) │ crc32 (u32)  │ payload (postcard)      │
//! │ big-endian   │ of payload   │ `Request` / `Response`  │
//! └──────────────┴──────────────┴─────────────────────────┘
//! ```
//!
//! Responses echo the id of the request they answer.

mod error;
mod frame;
mod message;

pub use error::{WireError, WireResult};
pub use frame::{FRAME_HEADER_SIZE, Frame, MAX_FRAME_SIZE};
pub use message::{
    ErrorCode, ErrorResponse, GetOutcomeResponse, PlaceBidRequest, PlaceBidResponse, Request,
    RequestId, RequestPayload, Response, ResponsePayload,
};
