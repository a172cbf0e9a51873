use std::any::Any;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufWriter, ReadHalf, WriteHalf};
use tracing::debug;

use crate::config::Config;
use crate::http::budget::{limited, ByteBudget, LimitedReader};
use crate::http::handler::Handler;
use crate::http::parser::{read_request, ParseError};
use crate::http::response::ResponseWriter;
use crate::http::writer::write_response;

/// Where a connection is in its request loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitRequest,
    ParsingRequest,
    Dispatching,
    Flushing,
    Closed,
}

/// One accepted client stream and the keep-alive loop that serves it.
pub struct Connection<S, H> {
    reader: LimitedReader<ReadHalf<S>>,
    writer: BufWriter<WriteHalf<S>>,
    peer: SocketAddr,
    header_limit: u64,
    handler: Arc<H>,
    state: ConnectionState,
}

impl<S, H> Connection<S, H>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    H: Handler,
{
    pub fn new(stream: S, peer: SocketAddr, handler: Arc<H>, cfg: &Config) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: limited(read_half, cfg.header_limit, cfg.buffer_size),
            writer: BufWriter::with_capacity(cfg.buffer_size, write_half),
            peer,
            header_limit: cfg.header_limit,
            handler,
            state: ConnectionState::AwaitRequest,
        }
    }

    /// Serves requests until the peer disconnects or something fails.
    ///
    /// Consumes the connection so the stream is released on every return
    /// path. A clean disconnect between requests yields `Ok(())`; parse
    /// failures, write failures and handler panics yield an error.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let outcome = loop {
            let pass = AssertUnwindSafe(self.serve_one()).catch_unwind().await;
            match pass {
                Ok(Ok(())) if self.state == ConnectionState::Closed => break Ok(()),
                Ok(Ok(())) => continue,
                Ok(Err(err)) => break Err(err),
                Err(panic) => {
                    break Err(anyhow::anyhow!(
                        "panic while serving request: {}",
                        panic_message(&*panic)
                    ));
                }
            }
        };

        self.close().await;
        outcome
    }

    /// One pass through the loop: parse, dispatch, write, flush.
    async fn serve_one(&mut self) -> anyhow::Result<()> {
        self.state = ConnectionState::ParsingRequest;
        self.reader.rearm(self.header_limit);

        let mut req = match read_request(&mut self.reader, self.peer).await {
            Ok(req) => req,
            Err(ParseError::Closed) => {
                debug!(peer = %self.peer, "peer closed connection");
                self.state = ConnectionState::Closed;
                return Ok(());
            }
            Err(err) => {
                self.state = ConnectionState::Closed;
                return Err(err.into());
            }
        };

        debug!(
            peer = %self.peer,
            method = %req.method,
            target = %req.target,
            "request parsed"
        );

        self.state = ConnectionState::Dispatching;
        let mut resp = ResponseWriter::new();
        self.handler.serve(&mut resp, &mut req).await;

        // Unread body bytes must not be mistaken for the next request line
        let skipped = req.body.drain().await?;
        if skipped > 0 {
            debug!(peer = %self.peer, skipped, "discarded unread request body");
        }
        drop(req);

        self.state = ConnectionState::Flushing;
        write_response(&mut self.writer, &resp).await?;
        self.writer.flush().await?;

        self.state = ConnectionState::AwaitRequest;
        Ok(())
    }

    async fn close(&mut self) {
        self.state = ConnectionState::Closed;
        if let Err(err) = self.writer.shutdown().await {
            debug!(peer = %self.peer, error = %err, "shutdown failed");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
