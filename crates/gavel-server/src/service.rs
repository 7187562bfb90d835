//! The replica service: a ledger behind a lock plus the effect executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gavel_kernel::{Effect, Ledger, close, place_bid};
use gavel_types::{Amount, BidStatus, BidderId, Outcome, ReplicaId};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// One replica's auction state.
///
/// Every transition runs under the ledger lock, so concurrent bids are
/// applied one at a time and the closing timer is started at most once.
/// Clones share the same ledger.
#[derive(Debug, Clone)]
pub struct ReplicaService {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    id: ReplicaId,
    ledger: Mutex<Ledger>,
    auction_duration: Duration,
    timers_started: AtomicUsize,
}

impl ReplicaService {
    pub fn new(id: ReplicaId, auction_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                id,
                ledger: Mutex::new(Ledger::new()),
                auction_duration,
                timers_started: AtomicUsize::new(0),
            }),
        }
    }

    pub fn id(&self) -> ReplicaId {
        self.inner.id
    }

    pub fn auction_duration(&self) -> Duration {
        self.inner.auction_duration
    }

    /// Applies a bid and returns its status.
    ///
    /// The first accepted bid starts the closing timer.
    pub async fn place_bid(&self, bidder: BidderId, amount: Amount) -> BidStatus {
        let (status, effects) = {
            let mut ledger = self.inner.ledger.lock().await;
            let (next, status, effects) =
                place_bid(std::mem::take(&mut *ledger), bidder.clone(), amount);
            *ledger = next;
            (status, effects)
        };

        debug!(replica = %self.id(), %bidder, %amount, %status, "bid applied");
        self.execute(effects);
        status
    }

    /// Number of closing timers this replica has started. At most one.
    pub fn closing_timers_started(&self) -> usize {
        self.inner.timers_started.load(Ordering::Acquire)
    }

    /// Current snapshot of the auction.
    pub async fn outcome(&self) -> Outcome {
        self.inner.ledger.lock().await.outcome()
    }

    /// Closes bidding immediately. Closing twice is a no-op, and an auction
    /// without bids stays open.
    pub async fn close(&self) {
        let effects = {
            let mut ledger = self.inner.ledger.lock().await;
            let (next, effects) = close(std::mem::take(&mut *ledger));
            *ledger = next;
            effects
        };

        self.execute(effects);
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleClose => {
                    let duration = self.auction_duration();
                    let started = self.inner.timers_started.fetch_add(1, Ordering::AcqRel) + 1;
                    debug_assert_eq!(started, 1, "closing timer started twice");
                    info!(
                        replica = %self.id(),
                        seconds = duration.as_secs_f64(),
                        "first bid accepted, closing timer started"
                    );
                    let service = self.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(duration).await;
                        service.close().await;
                    });
                }
                Effect::AuctionClosed(outcome) => {
                    info!(
                        replica = %self.id(),
                        highest_bid = %outcome.highest_bid,
                        winner = outcome.winner_label(),
                        "auction closed"
                    );
                }
            }
        }
    }
}
