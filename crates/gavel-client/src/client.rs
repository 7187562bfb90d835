//! Replica client implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::BytesMut;
use gavel_types::{Amount, BidStatus, BidderId, Outcome};
use gavel_wire::{
    Frame, PlaceBidRequest, Request, RequestId, RequestPayload, Response, ResponsePayload,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound on establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Upper bound on one request/response exchange.
    pub request_timeout: Duration,
    /// Initial capacity of the read and write buffers.
    pub buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(2),
            buffer_size: 4 * 1024,
        }
    }
}

/// A connection to one replica.
#[derive(Debug)]
pub struct ReplicaClient {
    endpoint: String,
    config: ClientConfig,
    conn: Mutex<Connection>,
    next_request_id: AtomicU64,
}

#[derive(Debug)]
struct Connection {
    stream: TcpStream,
    read_buf: BytesMut,
    write_buf: BytesMut,
    broken: bool,
}

impl ReplicaClient {
    /// Connects to the replica at `endpoint` (`host:port`).
    pub async fn connect(endpoint: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        let endpoint = endpoint.into();

        let stream = match tokio::time::timeout(
            config.connect_timeout,
            TcpStream::connect(endpoint.as_str()),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ClientError::Connect { endpoint, source }),
            Err(_) => {
                return Err(ClientError::Connect {
                    endpoint,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("no answer within {:?}", config.connect_timeout),
                    ),
                });
            }
        };
        stream.set_nodelay(true)?;

        debug!(%endpoint, "connected to replica");

        Ok(Self {
            conn: Mutex::new(Connection {
                stream,
                read_buf: BytesMut::with_capacity(config.buffer_size),
                write_buf: BytesMut::with_capacity(config.buffer_size),
                broken: false,
            }),
            endpoint,
            config,
            next_request_id: AtomicU64::new(1),
        })
    }

    /// The `host:port` this client is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits a bid and returns the replica's verdict.
    pub async fn place_bid(&self, bidder: &BidderId, amount: Amount) -> ClientResult<BidStatus> {
        let payload = RequestPayload::PlaceBid(PlaceBidRequest::new(bidder, amount));
        match self.request(payload).await? {
            ResponsePayload::PlaceBid(response) => Ok(response.status()?),
            ResponsePayload::Error(e) => Err(ClientError::Server {
                code: e.code,
                message: e.message,
            }),
            ResponsePayload::GetOutcome(_) => {
                Err(ClientError::UnexpectedResponse { expected: "PlaceBid" })
            }
        }
    }

    /// Fetches the replica's current view of the auction.
    pub async fn get_outcome(&self) -> ClientResult<Outcome> {
        match self.request(RequestPayload::GetOutcome).await? {
            ResponsePayload::GetOutcome(response) => Ok(response.outcome()?),
            ResponsePayload::Error(e) => Err(ClientError::Server {
                code: e.code,
                message: e.message,
            }),
            ResponsePayload::PlaceBid(_) => Err(ClientError::UnexpectedResponse {
                expected: "GetOutcome",
            }),
        }
    }

    async fn request(&self, payload: RequestPayload) -> ClientResult<ResponsePayload> {
        let id = RequestId(self.next_request_id.fetch_add(1, Ordering::Relaxed));
        let frame = Request::new(id, payload)
            .to_frame()
            .map_err(ClientError::InvalidRequest)?;

        let mut conn = self.conn.lock().await;
        if conn.broken {
            return Err(ClientError::ConnectionClosed);
        }

        let result = match tokio::time::timeout(
            self.config.request_timeout,
            conn.exchange(&frame),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.config.request_timeout)),
        };

        // A failed exchange can leave half a frame on either side of the
        // stream, so the connection is never reused after one.
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                conn.broken = true;
                return Err(e);
            }
        };

        if response.request_id != id {
            conn.broken = true;
            return Err(ClientError::ResponseMismatch {
                expected: id,
                actual: response.request_id,
            });
        }

        Ok(response.payload)
    }
}

impl Connection {
    async fn exchange(&mut self, frame: &Frame) -> ClientResult<Response> {
        self.write_buf.clear();
        frame.encode(&mut self.write_buf);
        self.stream.write_all(&self.write_buf).await?;

        loop {
            if let Some(frame) = Frame::decode(&mut self.read_buf)? {
                return Ok(Response::from_frame(&frame)?);
            }
            if self.stream.read_buf(&mut self.read_buf).await? == 0 {
                return Err(ClientError::ConnectionClosed);
            }
        }
    }
}
