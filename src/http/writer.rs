use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::ResponseWriter;

const HTTP_VERSION: &str = "HTTP/1.1";

pub fn serialize_response(resp: &ResponseWriter) -> Vec<u8> {
    let body = resp.body();
    let mut buf = Vec::with_capacity(128 + body.len());

    // Status line
    let status = resp.status();
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in resp.headers() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    if !resp.has_header("Content-Length") {
        buf.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(body);

    buf
}

/// Writes the response into `out`. The caller decides when to flush.
pub async fn write_response<W>(out: &mut W, resp: &ResponseWriter) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(&serialize_response(resp)).await
}
