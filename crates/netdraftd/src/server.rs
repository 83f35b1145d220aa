//! HTTP server for netdraftd.

use crate::gemini::GeminiClient;
use crate::routes;
use anyhow::Result;
use axum::Router;
use netdraft_common::config::NetdraftConfig;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub gemini: GeminiClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &NetdraftConfig) -> Result<Self> {
        Ok(Self {
            gemini: GeminiClient::new(config.gemini.clone())?,
            start_time: Instant::now(),
        })
    }
}

/// Run the HTTP server
pub async fn run(config: NetdraftConfig, state: AppState) -> Result<()> {
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::chat_routes())
        .merge(routes::design_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("  Listening on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
