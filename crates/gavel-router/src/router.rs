//! Fan-out bidding and failover queries over the live replica list.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use gavel_client::{ClientConfig, ReplicaClient};
use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::handle::{CallError, ReplicaHandle, TransportError};

/// Routes bids and queries to an ordered, shrink-only list of replicas.
///
/// All mutation goes through `&mut self`, so removals from one fan-out are
/// applied in a single step after every response has been observed.
#[derive(Debug)]
pub struct Router<R> {
    replicas: Vec<R>,
    config: RouterConfig,
}

impl Router<ReplicaClient> {
    /// Connects to every endpoint in order.
    ///
    /// Any endpoint that cannot be reached is a fatal startup error.
    pub async fn connect_all<I, S>(
        endpoints: I,
        client_config: ClientConfig,
        config: RouterConfig,
    ) -> RouterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut replicas = Vec::new();
        for endpoint in endpoints {
            let endpoint = endpoint.into();
            let client = ReplicaClient::connect(endpoint.clone(), client_config.clone())
                .await
                .map_err(|source| RouterError::Startup { endpoint, source })?;
            replicas.push(client);
        }

        info!(replicas = replicas.len(), "connected to all replicas");
        Ok(Self::new(replicas, config))
    }
}

impl<R: ReplicaHandle> Router<R> {
    pub fn new(replicas: Vec<R>, config: RouterConfig) -> Self {
        Self { replicas, config }
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    /// Endpoints still in the list, in order.
    pub fn live_endpoints(&self) -> Vec<&str> {
        self.replicas.iter().map(ReplicaHandle::endpoint).collect()
    }

    /// Sends the bid to every live replica and reports one status.
    ///
    /// The reported status is that of the last replica in list order that
    /// answered. Statuses from other replicas are observed but not
    /// reconciled. Replicas that fail are removed once every call has
    /// finished. A rejected request removes nothing and is reported only
    /// if no replica answered.
    pub async fn broadcast_bid(&mut self, bidder: &BidderId, amount: Amount) -> RouterResult<BidStatus> {
        let timeout = self.config.call_timeout;
        let calls = self.replicas.iter().map(|replica| {
            bounded(replica.endpoint(), timeout, replica.place_bid(bidder, amount))
        });
        let results = join_all(calls).await;

        let mut status = None;
        let mut rejected = None;
        let mut failed = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(s) => {
                    debug!(endpoint = self.replicas[index].endpoint(), status = %s, "bid answered");
                    status = Some(s);
                }
                Err(CallError::Transport(e)) => failed.push((index, e)),
                Err(CallError::Rejected { endpoint, reason }) => {
                    warn!(%endpoint, %reason, "bid rejected");
                    rejected = Some(RouterError::Rejected { endpoint, reason });
                }
            }
        }

        self.prune(failed);
        if let Some(status) = status {
            return Ok(status);
        }
        Err(rejected.unwrap_or(RouterError::AllReplicasUnreachable))
    }

    /// Asks the head of the list for the outcome, failing over in order.
    ///
    /// Each replica that fails is removed before the next one is tried. A
    /// rejected query is returned as is.
    pub async fn query_outcome(&mut self) -> RouterResult<Outcome> {
        let timeout = self.config.call_timeout;

        while let Some(head) = self.replicas.first() {
            match bounded(head.endpoint(), timeout, head.get_outcome()).await {
                Ok(outcome) => {
                    debug!(endpoint = head.endpoint(), %outcome, "outcome answered");
                    return Ok(outcome);
                }
                Err(CallError::Transport(e)) => self.prune(vec![(0, e)]),
                Err(CallError::Rejected { endpoint, reason }) => {
                    return Err(RouterError::Rejected { endpoint, reason });
                }
            }
        }

        Err(RouterError::AllReplicasUnreachable)
    }

    /// Removes the replicas at the given indices. Indices must be ascending.
    fn prune(&mut self, failed: Vec<(usize, TransportError)>) {
        debug_assert!(failed.windows(2).all(|w| w[0].0 < w[1].0));

        for (index, error) in failed.into_iter().rev() {
            let replica = self.replicas.remove(index);
            warn!(
                endpoint = replica.endpoint(),
                reason = %error.reason,
                remaining = self.replicas.len(),
                "replica unreachable, removed"
            );
        }
    }
}

async fn bounded<T>(
    endpoint: &str,
    timeout: Duration,
    call: impl Future<Output = Result<T, CallError>>,
) -> Result<T, CallError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::timeout(endpoint, timeout).into()),
    }
}
