//! Daemon client - HTTP client for talking to netdraftd.

use anyhow::{anyhow, Context, Result};
use netdraft_common::rpc::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use std::time::Duration;

pub struct DaemonClient {
    base_url: String,
    client: reqwest::Client,
}

impl DaemonClient {
    /// Discover the daemon base URL with a fallback chain
    ///
    /// Priority:
    /// 1. Explicit --url flag (passed as argument)
    /// 2. $NETDRAFT_URL environment variable
    /// 3. http://127.0.0.1:7870 (default)
    pub fn discover_base_url(explicit_url: Option<&str>) -> String {
        if let Some(url) = explicit_url {
            return url.trim_end_matches('/').to_string();
        }

        if let Ok(url) = std::env::var("NETDRAFT_URL") {
            return url.trim_end_matches('/').to_string();
        }

        "http://127.0.0.1:7870".to_string()
    }

    pub fn new(explicit_url: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: Self::discover_base_url(explicit_url),
            client,
        })
    }

    /// Send one chat turn. Upstream errors come back as the daemon's error
    /// body, surfaced here as a single message.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .client
            .post(format!("{}/v1/chat", self.base_url))
            .json(request)
            .send()
            .await
            .context("daemon unavailable")?;

        if !response.status().is_success() {
            let status = response.status();
            let error: ErrorResponse = response
                .json()
                .await
                .unwrap_or_else(|_| ErrorResponse::new(format!("HTTP {status}")));
            return Err(anyhow!("{}", error.error));
        }

        Ok(response.json().await.context("malformed chat response")?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .context("daemon unavailable")?;

        if !response.status().is_success() {
            return Err(anyhow!("daemon returned HTTP {}", response.status()));
        }

        Ok(response.json().await.context("malformed health response")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins_and_is_trimmed() {
        let url = DaemonClient::discover_base_url(Some("http://example.test:9999/"));
        assert_eq!(url, "http://example.test:9999");
    }
}
