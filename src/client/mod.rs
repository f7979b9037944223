// client/mod.rs
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ServerSettings;
use crate::error::PanelError;
use crate::models::{ButtonReply, LedReply, LedState};

/// Seam to the external GPIO web service. The endpoints are an external
/// contract; tests substitute their own implementation.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    async fn set_led_state(&self, led: &str, state: LedState) -> Result<LedReply, PanelError>;
    async fn push_button(&self) -> Result<ButtonReply, PanelError>;
}

/// HTTP implementation backed by the configured base URL.
pub struct HttpDevice {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDevice {
    pub fn new(settings: &ServerSettings) -> Result<Self, PanelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn led_url(&self, led: &str, state: LedState) -> String {
        format!("{}/led/{}/state/{}", self.base_url, led, state.as_digit())
    }

    fn button_url(&self) -> String {
        format!("{}/push-button", self.base_url)
    }
}

#[async_trait]
impl DeviceApi for HttpDevice {
    async fn set_led_state(&self, led: &str, state: LedState) -> Result<LedReply, PanelError> {
        let body = self
            .http
            .get(self.led_url(led, state))
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn push_button(&self) -> Result<ButtonReply, PanelError> {
        let body = self.http.get(self.button_url()).send().await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
