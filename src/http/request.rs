use std::collections::HashMap;
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncReadExt, ReadBuf, Take};
use url::Url;

use crate::http::header::Headers;

/// HTTP request methods.
///
/// Methods are case-sensitive tokens. Anything outside the well-known set is
/// kept verbatim in [`Method::Extension`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    PATCH,
    CONNECT,
    TRACE,
    Extension(String),
}

impl Method {
    /// Parses a method token. Never fails; unknown tokens become extensions.
    ///
    /// ```
    /// # use wicket::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Extension("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            "CONNECT" => Method::CONNECT,
            "TRACE" => Method::TRACE,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::CONNECT => "CONNECT",
            Method::TRACE => "TRACE",
            Method::Extension(token) => token,
        }
    }

    /// Only POST and PUT requests get a body read from the wire.
    pub fn carries_body(&self) -> bool {
        matches!(self, Method::POST | Method::PUT)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Source<'c> = &'c mut (dyn AsyncBufRead + Unpin + Send);

/// Request body.
///
/// Either always empty, or a window of exactly `Content-Length` bytes over
/// the connection's buffered reader. Bytes past the window stay on the
/// connection for the next request.
pub struct Body<'c> {
    inner: Option<Take<Source<'c>>>,
}

impl<'c> Body<'c> {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn sized(source: Source<'c>, len: u64) -> Self {
        Self {
            inner: Some(source.take(len)),
        }
    }

    /// Bytes of the body not yet read.
    pub fn remaining(&self) -> u64 {
        self.inner.as_ref().map_or(0, Take::limit)
    }

    pub async fn read_to_bytes(&mut self) -> io::Result<Bytes> {
        let mut buf = Vec::with_capacity(self.remaining().min(64 << 10) as usize);
        self.read_to_end(&mut buf).await?;
        Ok(Bytes::from(buf))
    }

    /// Discards whatever the handler left unread.
    pub async fn drain(&mut self) -> io::Result<u64> {
        match self.inner.as_mut() {
            Some(inner) => tokio::io::copy(inner, &mut tokio::io::sink()).await,
            None => Ok(0),
        }
    }
}

impl AsyncRead for Body<'_> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().inner.as_mut() {
            Some(inner) => Pin::new(inner).poll_read(cx, buf),
            None => Poll::Ready(Ok(())),
        }
    }
}

impl fmt::Debug for Body<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// One parsed HTTP request.
///
/// Borrows the connection's reader through its body, so it lives no longer
/// than a single pass of the connection loop.
#[derive(Debug)]
pub struct Request<'c> {
    pub method: Method,
    /// Request target exactly as it appeared on the request line.
    pub target: String,
    /// Resolved locator; `None` for the asterisk form `*`.
    pub url: Option<Url>,
    pub version: String,
    pub headers: Headers,
    pub body: Body<'c>,
    pub remote_addr: SocketAddr,
    query: HashMap<String, String>,
    cookies: Option<HashMap<String, String>>,
}

impl<'c> Request<'c> {
    pub(crate) fn new(
        method: Method,
        target: String,
        url: Option<Url>,
        version: String,
        headers: Headers,
        body: Body<'c>,
        remote_addr: SocketAddr,
    ) -> Self {
        let query = raw_query(&target).map(parse_query).unwrap_or_default();
        Self {
            method,
            target,
            url,
            version,
            headers,
            body,
            remote_addr,
            query,
            cookies: None,
        }
    }

    pub fn path(&self) -> &str {
        self.url.as_ref().map_or(self.target.as_str(), Url::path)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers.get_all(name)
    }

    /// Declared `Content-Length`, if present and a valid unsigned integer.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-Length").and_then(|v| v.parse().ok())
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn query_pairs(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Looks up a cookie, parsing the `Cookie` headers on first use.
    pub fn cookie(&mut self, name: &str) -> Option<&str> {
        self.cookies().get(name).map(String::as_str)
    }

    pub fn cookies(&mut self) -> &HashMap<String, String> {
        let headers = &self.headers;
        self.cookies
            .get_or_insert_with(|| parse_cookies(headers.get_all("Cookie")))
    }
}

/// Query component of a request target as sent, without any fragment.
pub fn raw_query(target: &str) -> Option<&str> {
    let (_, query) = target.split_once('?')?;
    Some(query.split_once('#').map_or(query, |(query, _)| query))
}

/// Splits a raw query string into key/value pairs.
///
/// Pairs without `=`, or with nothing after it, are skipped. Later
/// duplicates replace earlier ones.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    for part in raw.split('&') {
        match part.split_once('=') {
            Some((key, value)) if !value.is_empty() => {
                pairs.insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => continue,
        }
    }
    pairs
}

pub fn parse_cookies(values: &[String]) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        for piece in value.split(';') {
            if let Some((name, val)) = piece.split_once('=') {
                cookies.insert(name.trim().to_string(), val.trim().to_string());
            }
        }
    }
    cookies
}
