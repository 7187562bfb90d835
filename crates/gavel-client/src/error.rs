//! Client error types.

use std::time::Duration;

use gavel_wire::{ErrorCode, RequestId, WireError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to a replica.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The replica could not be reached.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: std::io::Error,
    },

    /// I/O error on an established connection.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be encoded, so nothing was sent.
    #[error("request not sent: {0}")]
    InvalidRequest(#[source] WireError),

    /// Wire protocol error.
    #[error("wire protocol error: {0}")]
    Wire(#[from] WireError),

    /// The replica did not answer in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection was closed by the replica or broken by an earlier error.
    #[error("connection closed")]
    ConnectionClosed,

    /// A response answered a different request.
    #[error("response mismatch: expected {expected}, got {actual}")]
    ResponseMismatch {
        expected: RequestId,
        actual: RequestId,
    },

    /// The replica rejected the request.
    #[error("server error ({code}): {message}")]
    Server { code: ErrorCode, message: String },

    /// The response payload did not match the request kind.
    #[error("unexpected response: expected {expected}")]
    UnexpectedResponse { expected: &'static str },
}

impl ClientError {
    /// Returns true if the replica itself failed or stopped answering.
    ///
    /// A request refused before sending, or rejected by a replica that
    /// answered, leaves the connection usable.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::InvalidRequest(_) | Self::Server { .. })
    }
}
