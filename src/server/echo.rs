//! Handler used by the `wicket` binary: describes the request back to the
//! client as plain text.

use std::fmt::Write;

use tracing::warn;

use crate::http::handler::Handler;
use crate::http::request::Request;
use crate::http::response::{ResponseWriter, StatusCode};

pub struct Echo;

impl Handler for Echo {
    async fn serve(&self, w: &mut ResponseWriter, req: &mut Request<'_>) {
        let body = match req.body.read_to_bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(peer = %req.remote_addr, error = %err, "failed to read request body");
                w.set_status(StatusCode::BadRequest);
                w.write(b"unreadable body\n");
                return;
            }
        };

        w.header("Content-Type", "text/plain; charset=utf-8");
        let _ = writeln!(w, "{} {} {}", req.method, req.path(), req.version);

        let mut query: Vec<_> = req.query_pairs().iter().collect();
        query.sort();
        for (key, value) in query {
            let _ = writeln!(w, "query {key}={value}");
        }

        let mut cookies: Vec<_> = req.cookies().iter().collect();
        cookies.sort();
        for (name, value) in cookies {
            let _ = writeln!(w, "cookie {name}={value}");
        }

        if !body.is_empty() {
            w.write(b"\n");
            w.write(&body);
        }
    }
}
