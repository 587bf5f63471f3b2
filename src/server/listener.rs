use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ReadOptions};
use crate::http::error::ParseError;
use crate::server::Handler;

pub async fn run<H: Handler>(cfg: &Config, handler: Arc<H>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, ReadOptions::from(cfg), handler).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve<H: Handler>(
    listener: TcpListener,
    options: ReadOptions,
    handler: Arc<H>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        let options = options.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer.to_string(), options);
            if let Err(e) = conn.run(handler.as_ref()).await {
                match e.downcast_ref::<ParseError>() {
                    Some(parse_error) => {
                        tracing::warn!(%peer, error = %parse_error, "Could not parse request");
                    }
                    None => tracing::error!("Connection error from {}: {:#}", peer, e),
                }
            }
        });
    }
}
