use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::AsyncRead;
use url::Url;

use crate::http::budget::{ByteBudget, LimitedReader};
use crate::http::header::read_headers;
use crate::http::line::{read_line, LineError};
use crate::http::request::{Body, Method, Request};

/// Base used to resolve origin-form targets such as `/search?q=rust`.
const ORIGIN_BASE: &str = "http://localhost";

#[derive(Debug, Error)]
pub enum ParseError {
    /// The peer closed the connection before sending a request line.
    #[error("connection closed by peer")]
    Closed,
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("invalid request target {target:?}: {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("stream ended before the request head was complete")]
    UnexpectedEof,
    #[error("request head exceeded the header byte limit")]
    HeaderTooLarge,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads one request from `reader`.
///
/// The header budget must already be armed. It is lifted once the headers
/// are in, and the returned request's body borrows `reader`.
pub async fn read_request<R>(
    reader: &mut LimitedReader<R>,
    remote_addr: SocketAddr,
) -> Result<Request<'_>, ParseError>
where
    R: AsyncRead + Unpin + Send,
{
    let line = match read_line(reader).await {
        Ok(line) => String::from_utf8_lossy(&line).into_owned(),
        Err(LineError::Eof) => return Err(ParseError::Closed),
        Err(LineError::UnexpectedEof) if reader.exhausted() => return Err(ParseError::HeaderTooLarge),
        Err(LineError::UnexpectedEof) => return Err(ParseError::UnexpectedEof),
        Err(LineError::Io(err)) => return Err(ParseError::Io(err)),
    };

    let mut parts = line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version), None) => (method, target, version),
        _ => return Err(ParseError::MalformedRequestLine(line.clone())),
    };

    let url = resolve_target(target)?;
    let method = Method::parse(method);
    let target = target.to_string();
    let version = version.to_string();

    let headers = match read_headers(reader).await {
        Ok(headers) => headers,
        Err(ParseError::UnexpectedEof) if reader.exhausted() => return Err(ParseError::HeaderTooLarge),
        Err(err) => return Err(err),
    };

    reader.lift();

    let body = match headers.get("Content-Length") {
        Some(len) if method.carries_body() => match len.parse::<u64>() {
            Ok(len) => Body::sized(reader, len),
            Err(_) => Body::empty(),
        },
        _ => Body::empty(),
    };

    Ok(Request::new(method, target, url, version, headers, body, remote_addr))
}

/// Resolves a request target: origin-form paths against a fixed base, and
/// anything else as an absolute URL. The asterisk form has no locator.
pub fn resolve_target(target: &str) -> Result<Option<Url>, ParseError> {
    if target == "*" {
        return Ok(None);
    }

    let parsed = if target.starts_with('/') {
        Url::parse(ORIGIN_BASE).and_then(|base| base.join(target))
    } else {
        Url::parse(target)
    };

    parsed.map(Some).map_err(|err| ParseError::InvalidTarget {
        target: target.to_string(),
        reason: err.to_string(),
    })
}
