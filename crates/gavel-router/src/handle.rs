//! The seam between routing policy and transport.

use std::future::Future;
use std::time::Duration;

use gavel_client::{ClientError, ReplicaClient};
use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use thiserror::Error;

/// A call to one replica could not complete.
#[derive(Debug, Clone, Error)]
#[error("{endpoint}: {reason}")]
pub struct TransportError {
    pub endpoint: String,
    pub reason: String,
}

impl TransportError {
    pub fn new(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub fn timeout(endpoint: impl Into<String>, after: Duration) -> Self {
        Self::new(endpoint, format!("no response within {after:?}"))
    }
}

/// Why a call to one replica produced no answer.
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// The replica failed or stopped answering. It is removed from the list.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request was refused while the replica stayed healthy: it could
    /// not be encoded, or the replica answered with an error.
    #[error("{endpoint}: request rejected: {reason}")]
    Rejected { endpoint: String, reason: String },
}

impl CallError {
    pub fn rejected(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    fn from_client(endpoint: &str, error: &ClientError) -> Self {
        if error.is_transport() {
            TransportError::new(endpoint, error.to_string()).into()
        } else {
            Self::rejected(endpoint, error.to_string())
        }
    }
}

/// A live connection to one replica.
pub trait ReplicaHandle: Send + Sync {
    /// Address used in logs.
    fn endpoint(&self) -> &str;

    fn place_bid(
        &self,
        bidder: &BidderId,
        amount: Amount,
    ) -> impl Future<Output = Result<BidStatus, CallError>> + Send;

    fn get_outcome(&self) -> impl Future<Output = Result<Outcome, CallError>> + Send;
}

impl ReplicaHandle for ReplicaClient {
    fn endpoint(&self) -> &str {
        ReplicaClient::endpoint(self)
    }

    async fn place_bid(&self, bidder: &BidderId, amount: Amount) -> Result<BidStatus, CallError> {
        ReplicaClient::place_bid(self, bidder, amount)
            .await
            .map_err(|e| CallError::from_client(ReplicaClient::endpoint(self), &e))
    }

    async fn get_outcome(&self) -> Result<Outcome, CallError> {
        ReplicaClient::get_outcome(self)
            .await
            .map_err(|e| CallError::from_client(ReplicaClient::endpoint(self), &e))
    }
}
