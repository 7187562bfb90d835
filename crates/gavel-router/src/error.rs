//! Router error types.

use gavel_client::ClientError;
use thiserror::Error;

/// Result type for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    /// Every replica has failed and been removed.
    #[error("all replicas are unreachable")]
    AllReplicasUnreachable,

    /// The request was refused without any replica failing.
    #[error("request rejected by {endpoint}: {reason}")]
    Rejected { endpoint: String, reason: String },

    /// A configured replica could not be reached at startup.
    #[error("replica {endpoint} unreachable at startup: {source}")]
    Startup {
        endpoint: String,
        #[source]
        source: ClientError,
    },
}
