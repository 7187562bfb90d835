//! Wire protocol error types.

use gavel_types::TypeError;
use thiserror::Error;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised while framing, encoding or decoding protocol messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// A frame header announced a payload larger than allowed.
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The payload checksum did not match the header.
    #[error("checksum mismatch: header says {expected:#010x}, payload is {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Message could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Payload bytes could not be decoded into a message.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// A decoded field held a value outside its domain.
    #[error("invalid field: {0}")]
    InvalidField(#[from] TypeError),
}
