use std::sync::Arc;

use httpfromtcp::config::Config;
use httpfromtcp::handler::DemoHandler;
use httpfromtcp::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let handler = Arc::new(DemoHandler::new(cfg.chunk_interval()));

    tokio::select! {
        res = server::listener::run(&cfg, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
