//! Netdraft Daemon - network design assistant API.
//!
//! Serves the chat proxy and the design generator over HTTP.

use anyhow::Result;
use netdraft_common::config::NetdraftConfig;
use netdraftd::server::{self, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Netdraft Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = NetdraftConfig::load();
    if config.gemini.api_key.is_none() {
        warn!("No Gemini API key configured; /v1/chat will refuse requests");
    }

    let state = AppState::new(&config)?;
    server::run(config, state).await
}
