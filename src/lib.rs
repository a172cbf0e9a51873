//! Wicket - minimal HTTP/1.1 server engine
//!
//! Request parsing and keep-alive connection handling over tokio streams.

pub mod config;
pub mod http;
pub mod server;
