//! Error types for Netdraft.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetdraftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Requirements error: {0}")]
    Requirements(String),

    #[error("Upstream model error: {0}")]
    Upstream(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
