//! HTTP/1.1 request engine.
//!
//! Turns an accepted duplex byte stream into a sequence of parsed requests
//! and drives the keep-alive loop for that stream.
//!
//! # Architecture
//!
//! - **`line`**: CRLF line reading with reassembly of lines longer than the buffer
//! - **`budget`**: byte ceiling on the request head, lifted before the body
//! - **`header`**: header map and header block parsing
//! - **`parser`**: request line, target, query string and body framing
//! - **`request`**: the parsed request, its body and lazily parsed cookies
//! - **`response`**: status codes and the per-request response writer
//! - **`writer`**: serialises a response onto the connection
//! - **`handler`**: the application hook called for every request
//! - **`connection`**: the per-connection loop
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │  AwaitRequest    │ ← header budget re-armed
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ ParsingRequest   │ ── parse error / peer gone ──┐
//!        └──────┬───────────┘                              │
//!               │ Request parsed                           │
//!               ▼                                          │
//!        ┌──────────────────┐                              │
//!        │   Dispatching    │ ← handler runs               │
//!        └──────┬───────────┘                              │
//!               ▼                                          │
//!        ┌──────────────────┐                              │
//!        │    Flushing      │ ── write error ──────────────┤
//!        └──────┬───────────┘                              ▼
//!               └─ ok → AwaitRequest                    Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wicket::config::Config;
//! use wicket::http::connection::Connection;
//! use wicket::server::echo::Echo;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::default();
//!     let listener = TcpListener::bind(&cfg.listen_addr).await?;
//!     let handler = Arc::new(Echo);
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let conn = Connection::new(socket, peer, handler.clone(), &cfg);
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod budget;
pub mod connection;
pub mod handler;
pub mod header;
pub mod line;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
