use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::Handler;

pub async fn run<H: Handler>(cfg: &Config, handler: Arc<H>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let conn = Connection::new(socket, peer, handler.clone(), cfg);
        tokio::spawn(async move {
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
