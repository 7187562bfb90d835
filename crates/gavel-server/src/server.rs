//! TCP accept loop and shutdown control.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use gavel_types::ReplicaId;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::connection::Connection;
use crate::error::{ServerError, ServerResult};
use crate::handler::RequestHandler;
use crate::service::ReplicaService;

/// Pause after a failed `accept`, so a persistent error such as `EMFILE`
/// does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Stops a running [`ReplicaServer`] and all of its connections.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

/// A replica bound to a TCP address.
pub struct ReplicaServer {
    config: ServerConfig,
    listener: TcpListener,
    handler: RequestHandler,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl ReplicaServer {
    /// Binds the listener. Port 0 picks a free port; see [`Self::local_addr`].
    pub async fn bind(config: ServerConfig) -> ServerResult<Self> {
        let listener =
            TcpListener::bind(config.bind_addr)
                .await
                .map_err(|source| ServerError::BindFailed {
                    addr: config.bind_addr,
                    source,
                })?;

        let service = ReplicaService::new(config.replica_id, config.auction_duration);
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            config,
            listener,
            handler: RequestHandler::new(service),
            shutdown_tx: Arc::new(shutdown_tx),
        })
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn service(&self) -> &ReplicaService {
        self.handler.service()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    /// Accepts connections until shutdown.
    pub async fn run(self) -> ServerResult<()> {
        let mut shutdown = self.shutdown_tx.subscribe();
        let replica = self.config.replica_id;

        info!(
            %replica,
            addr = %self.local_addr()?,
            auction_secs = self.config.auction_duration.as_secs_f64(),
            "replica listening"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let accepted = tokio::select! {
                _ = shutdown.changed() => break,
                accepted = self.listener.accept() => accepted,
            };

            let (stream, peer) = match accepted {
                Ok(pair) => pair,
                Err(e) => {
                    if back_off_after_accept_error(replica, &e, &mut shutdown).await {
                        continue;
                    }
                    break;
                }
            };

            let connection = Connection::new(stream, peer, self.config.read_buffer_size);
            let handler = self.handler.clone();
            let conn_shutdown = self.shutdown_tx.subscribe();
            debug!(%replica, peer = %connection.peer(), "connection accepted");

            tokio::spawn(async move {
                if let Err(e) = connection.serve(handler, conn_shutdown).await {
                    warn!(%replica, %peer, error = %e, "connection error");
                }
            });
        }

        info!(%replica, "replica stopped");
        Ok(())
    }
}

/// Logs a failed accept and waits out [`ACCEPT_BACKOFF`].
///
/// Returns `false` if shutdown was signalled while waiting.
async fn back_off_after_accept_error(
    replica: ReplicaId,
    error: &std::io::Error,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    warn!(%replica, %error, backoff = ?ACCEPT_BACKOFF, "accept failed");
    tokio::select! {
        _ = shutdown.changed() => false,
        () = tokio::time::sleep(ACCEPT_BACKOFF) => true,
    }
}
