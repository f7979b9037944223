// handlers.rs

use std::sync::Arc;

use metrics::counter;
use tracing::error;

use crate::client::DeviceApi;
use crate::error::PanelError;
use crate::models::{LedReply, LedState, StatusColor};
use crate::panel::{FieldHandle, Selector};

/// LED control feature: two fixed entry points over one state-change call.
/// The target LED is read from the selector at call time.
#[derive(Clone)]
pub struct LedControl {
    device: Arc<dyn DeviceApi>,
    selector: Arc<Selector>,
    message: Arc<FieldHandle>,
}

impl LedControl {
    pub fn new(
        device: Arc<dyn DeviceApi>,
        selector: Arc<Selector>,
        message: Arc<FieldHandle>,
    ) -> Self {
        Self {
            device,
            selector,
            message,
        }
    }

    pub async fn select(&self, id: &str) -> Result<(), PanelError> {
        self.selector.select(id).await
    }

    pub async fn turn_led_on(&self) {
        self.set_led_state(LedState::On).await;
    }

    pub async fn turn_led_off(&self) {
        self.set_led_state(LedState::Off).await;
    }

    pub async fn set_led_state(&self, state: LedState) {
        let led = self.selector.value().await;
        let ticket = self.message.begin();
        counter!("panel_led_requests").increment(1);

        match self.device.set_led_state(&led, state).await {
            Ok(LedReply::Ok { led, state }) => {
                let shown = if state == 1 { LedState::On } else { LedState::Off };
                self.message
                    .apply(
                        &ticket,
                        format!("LED {} state: {}", led, shown),
                        StatusColor::Green,
                    )
                    .await;
            }
            Ok(LedReply::Failure { error }) => {
                counter!("panel_led_failures").increment(1);
                self.message
                    .apply(&ticket, format!("Error: {}", error), StatusColor::Red)
                    .await;
            }
            Err(err) => {
                counter!("panel_led_failures").increment(1);
                error!("LED {} request failed: {}", led, err);
                self.message
                    .apply(&ticket, "Error toggling LED.", StatusColor::Red)
                    .await;
            }
        }
    }
}

/// Button status feature: a stateless one-shot query reflected in one
/// status field. The fetch-failure color is configurable.
#[derive(Clone)]
pub struct ButtonStatus {
    device: Arc<dyn DeviceApi>,
    status: Arc<FieldHandle>,
    error_color: StatusColor,
}

impl ButtonStatus {
    pub fn new(
        device: Arc<dyn DeviceApi>,
        status: Arc<FieldHandle>,
        error_color: StatusColor,
    ) -> Self {
        Self {
            device,
            status,
            error_color,
        }
    }

    pub async fn check_status(&self) {
        let ticket = self.status.begin();
        counter!("panel_button_requests").increment(1);

        match self.device.push_button().await {
            Ok(reply) if reply.pressed => {
                self.status
                    .apply(&ticket, "Button is pressed!", StatusColor::Red)
                    .await;
            }
            Ok(_) => {
                self.status
                    .apply(&ticket, "Button is not pressed.", StatusColor::Green)
                    .await;
            }
            Err(err) => {
                counter!("panel_button_failures").increment(1);
                error!("Button status request failed: {}", err);
                self.status
                    .apply(&ticket, "Error fetching status.", self.error_color)
                    .await;
            }
        }
    }
}
