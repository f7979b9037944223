// events/mod.rs
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::handlers::{ButtonStatus, LedControl};

/// UI triggers flowing into the dispatcher. Each one is handled
/// fire-and-forget: overlapping requests are permitted, ordering of their
/// results is resolved by the panel's generation guard.
#[derive(Debug, Clone)]
pub enum UiEvent {
    TurnLedOn,
    TurnLedOff,
    SelectLed(String),
    ControlPressed(String),
    RefreshStatus,
}

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl Dispatcher {
    pub fn emit(&self, event: UiEvent) {
        // A send only fails once the run loop is gone, i.e. at shutdown.
        let _ = self.tx.send(event);
    }
}

/// Wiring of the two features plus the trigger configuration.
pub struct Wiring {
    pub led: LedControl,
    pub button: ButtonStatus,
    /// Control name that triggers a status refresh when pressed, if any.
    pub refresh_control: Option<String>,
    /// Fetch the press state once at startup.
    pub auto_fetch_on_load: bool,
    /// Periodic status refresh, disabled when `None`.
    pub poll_interval: Option<Duration>,
}

/// Starts the dispatcher loop and the configured startup triggers.
pub fn spawn(wiring: Wiring) -> Dispatcher {
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher { tx };
    tokio::spawn(run(rx, wiring, dispatcher.clone()));
    dispatcher
}

async fn run(mut rx: mpsc::UnboundedReceiver<UiEvent>, wiring: Wiring, dispatcher: Dispatcher) {
    if wiring.auto_fetch_on_load {
        let button = wiring.button.clone();
        tokio::spawn(async move { button.check_status().await });
    }

    if let Some(every) = wiring.poll_interval {
        info!("Polling button status every {:?}", every);
        let poller = dispatcher.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // The immediate first tick duplicates the startup fetch.
            interval.tick().await;
            loop {
                interval.tick().await;
                poller.emit(UiEvent::RefreshStatus);
            }
        });
    }

    while let Some(event) = rx.recv().await {
        match event {
            UiEvent::TurnLedOn => {
                let led = wiring.led.clone();
                tokio::spawn(async move { led.turn_led_on().await });
            }
            UiEvent::TurnLedOff => {
                let led = wiring.led.clone();
                tokio::spawn(async move { led.turn_led_off().await });
            }
            UiEvent::SelectLed(id) => {
                if let Err(err) = wiring.led.select(&id).await {
                    warn!("Ignoring selection: {}", err);
                }
            }
            UiEvent::ControlPressed(name) => {
                if wiring.refresh_control.as_deref() == Some(name.as_str()) {
                    let button = wiring.button.clone();
                    tokio::spawn(async move { button.check_status().await });
                } else {
                    debug!("No action wired to control {:?}", name);
                }
            }
            UiEvent::RefreshStatus => {
                let button = wiring.button.clone();
                tokio::spawn(async move { button.check_status().await });
            }
        }
    }
}
