// main.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use raspi_panel::client::HttpDevice;
use raspi_panel::config::Settings;
use raspi_panel::events::{self, UiEvent, Wiring};
use raspi_panel::handlers::{ButtonStatus, LedControl};
use raspi_panel::metrics::setup_metrics;
use raspi_panel::panel::{Panel, Selector};
use raspi_panel::utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    if settings.metrics.enabled {
        setup_metrics(settings.metrics.port);
    }

    let device = Arc::new(HttpDevice::new(&settings.server)?);
    let panel = Arc::new(Panel::new());

    let led_message = panel.register(&settings.leds.message_field);
    let selector = Arc::new(Selector::new(
        settings.leds.ids.clone(),
        &settings.leds.default,
    )?);
    let led = LedControl::new(device.clone(), selector, led_message);

    let button_field = panel.register(&settings.button.status_field);
    let button = ButtonStatus::new(device, button_field, settings.button.error_color);

    let dispatcher = events::spawn(Wiring {
        led,
        button,
        refresh_control: settings.button.refresh_control.clone(),
        auto_fetch_on_load: settings.button.auto_fetch_on_load,
        poll_interval: settings.button.poll_interval_secs.map(Duration::from_secs),
    });

    info!("Panel connected to {}", settings.server.base_url);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, Some(arg.trim())),
            None => (line, None),
        };
        match (command, arg) {
            ("on", _) => dispatcher.emit(UiEvent::TurnLedOn),
            ("off", _) => dispatcher.emit(UiEvent::TurnLedOff),
            ("select", Some(id)) => dispatcher.emit(UiEvent::SelectLed(id.to_string())),
            ("press", Some(name)) => dispatcher.emit(UiEvent::ControlPressed(name.to_string())),
            ("refresh", _) => dispatcher.emit(UiEvent::RefreshStatus),
            ("show", _) => {
                for (name, field) in panel.snapshot().await {
                    println!("{}: {}", name, utils::paint(&field));
                }
            }
            ("quit" | "exit", _) => break,
            ("", _) => {}
            _ => print_help(),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands: on | off | select <led> | press <control> | refresh | show | quit");
}
