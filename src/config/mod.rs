// config/mod.rs
use config::Config;
use serde::Deserialize;
use validator::Validate;

use crate::models::StatusColor;

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub leds: LedSettings,
    #[serde(default)]
    #[validate(nested)]
    pub button: ButtonSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ServerSettings {
    /// Base URL of the GPIO web service, e.g. `http://raspberrypi:5000`.
    #[validate(length(min = 1))]
    pub base_url: String,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LedSettings {
    /// Identifiers the selector offers. Must match what the server knows.
    #[validate(length(min = 1))]
    pub ids: Vec<String>,
    /// Initially selected identifier.
    #[validate(length(min = 1))]
    pub default: String,
    /// Panel field the LED feature writes to.
    #[validate(length(min = 1))]
    pub message_field: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ButtonSettings {
    /// Panel field the button feature writes to.
    #[validate(length(min = 1))]
    pub status_field: String,
    /// Name of the control whose activation triggers a refresh, if any.
    pub refresh_control: Option<String>,
    /// Fetch the press state once at startup.
    pub auto_fetch_on_load: bool,
    /// Periodic refresh, disabled when unset.
    #[validate(range(min = 1))]
    pub poll_interval_secs: Option<u64>,
    /// Color of the fixed fetch-failure message.
    pub error_color: StatusColor,
}

#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl Default for LedSettings {
    fn default() -> Self {
        Self {
            ids: vec!["0".to_string(), "1".to_string(), "2".to_string()],
            default: "0".to_string(),
            message_field: "led-message".to_string(),
        }
    }
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            status_field: "button-status".to_string(),
            refresh_control: Some("refresh".to_string()),
            auto_fetch_on_load: true,
            poll_interval_secs: None,
            error_color: StatusColor::Gray,
        }
    }
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9100,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(config::File::with_name("config/config").required(false))
            .add_source(config::Environment::with_prefix("PANEL").separator("__"))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(settings)
    }
}
