//! Per-connection state and the request loop.

use std::net::SocketAddr;

use bytes::BytesMut;
use gavel_wire::{Frame, Request, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tracing::debug;

use crate::error::ServerResult;
use crate::handler::RequestHandler;

/// A client connection.
pub(crate) struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    read_buf: BytesMut,
    write_buf: BytesMut,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, buffer_size: usize) -> Self {
        Self {
            stream,
            peer,
            read_buf: BytesMut::with_capacity(buffer_size),
            write_buf: BytesMut::with_capacity(buffer_size),
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Serves requests until the peer disconnects or shutdown is signalled.
    ///
    /// Requests on one connection are answered in order.
    pub async fn serve(
        mut self,
        handler: RequestHandler,
        mut shutdown: watch::Receiver<bool>,
    ) -> ServerResult<()> {
        if *shutdown.borrow() {
            return Ok(());
        }

        loop {
            while let Some(request) = self.try_decode_request()? {
                let response = handler.handle(request).await;
                self.queue_response(&response)?;
            }

            if !self.write_buf.is_empty() {
                self.stream.write_all(&self.write_buf).await?;
                self.write_buf.clear();
            }

            tokio::select! {
                _ = shutdown.changed() => {
                    debug!(peer = %self.peer, "closing connection on shutdown");
                    return Ok(());
                }
                read = self.stream.read_buf(&mut self.read_buf) => {
                    if read? == 0 {
                        debug!(peer = %self.peer, "peer closed connection");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Attempts to decode a request from the read buffer.
    fn try_decode_request(&mut self) -> ServerResult<Option<Request>> {
        match Frame::decode(&mut self.read_buf)? {
            Some(frame) => Ok(Some(Request::from_frame(&frame)?)),
            None => Ok(None),
        }
    }

    /// Queues a response to be sent.
    fn queue_response(&mut self, response: &Response) -> ServerResult<()> {
        let frame = response.to_frame()?;
        frame.encode(&mut self.write_buf);
        Ok(())
    }
}
