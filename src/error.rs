// error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("device request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("unknown led {0:?}")]
    UnknownLed(String),
    #[error("unknown panel field {0:?}")]
    UnknownField(String),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}
