//! End-to-end scenarios against an in-process mock of the GPIO web
//! service. The endpoints are an external contract; the mock implements
//! exactly the reply shapes the real server produces.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use raspi_panel::client::{DeviceApi, HttpDevice};
use raspi_panel::config::ServerSettings;
use raspi_panel::events::{self, UiEvent, Wiring};
use raspi_panel::handlers::{ButtonStatus, LedControl};
use raspi_panel::models::StatusColor;
use raspi_panel::panel::{FieldHandle, Panel, Selector};

#[derive(Default)]
struct MockGpio {
    /// Request paths seen by the LED endpoint, in arrival order.
    led_paths: Mutex<Vec<String>>,
    /// When set, the LED endpoint reports this error in its body.
    led_error: Mutex<Option<String>>,
    pressed: Mutex<bool>,
}

async fn led_endpoint(
    State(gpio): State<Arc<MockGpio>>,
    Path((led, state)): Path<(u8, u8)>,
) -> Json<serde_json::Value> {
    gpio.led_paths
        .lock()
        .unwrap()
        .push(format!("/led/{}/state/{}", led, state));
    if let Some(error) = gpio.led_error.lock().unwrap().clone() {
        return Json(json!({ "error": error }));
    }
    Json(json!({ "success": true, "led": led, "state": state }))
}

async fn button_endpoint(State(gpio): State<Arc<MockGpio>>) -> Json<serde_json::Value> {
    Json(json!({ "pressed": *gpio.pressed.lock().unwrap() }))
}

async fn start_mock_gpio(gpio: Arc<MockGpio>) -> SocketAddr {
    let app = Router::new()
        .route("/led/{led}/state/{state}", get(led_endpoint))
        .route("/push-button", get(button_endpoint))
        .with_state(gpio);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn device_for(addr: SocketAddr) -> Arc<dyn DeviceApi> {
    Arc::new(
        HttpDevice::new(&ServerSettings {
            base_url: format!("http://{}", addr),
            request_timeout_ms: Some(2000),
        })
        .unwrap(),
    )
}

fn led_control(device: Arc<dyn DeviceApi>, selected: &str) -> (LedControl, Arc<FieldHandle>) {
    let panel = Panel::new();
    let message = panel.register("led-message");
    let selector = Arc::new(
        Selector::new(
            vec!["0".to_string(), "1".to_string(), "2".to_string()],
            selected,
        )
        .unwrap(),
    );
    (LedControl::new(device, selector, message.clone()), message)
}

fn button_status(device: Arc<dyn DeviceApi>) -> (ButtonStatus, Arc<FieldHandle>) {
    let panel = Panel::new();
    let status = panel.register("button-status");
    (
        ButtonStatus::new(device, status.clone(), StatusColor::Gray),
        status,
    )
}

/// Polls a field until it holds some text, so tests don't race the spawned
/// request tasks.
async fn wait_for_text(field: &FieldHandle) -> raspi_panel::panel::StatusField {
    for _ in 0..100 {
        let current = field.read().await;
        if !current.text.is_empty() {
            return current;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("field {} never updated", field.name());
}

#[tokio::test]
async fn turning_on_selected_led_hits_the_right_path_and_reports_on() {
    let gpio = Arc::new(MockGpio::default());
    let addr = start_mock_gpio(gpio.clone()).await;
    let (control, message) = led_control(device_for(addr), "0");

    control.select("1").await.unwrap();
    control.turn_led_on().await;

    assert_eq!(*gpio.led_paths.lock().unwrap(), vec!["/led/1/state/1"]);
    let field = message.read().await;
    assert_eq!(field.text, "LED 1 state: ON");
    assert_eq!(field.color, StatusColor::Green);
}

#[tokio::test]
async fn turning_off_reports_off() {
    let gpio = Arc::new(MockGpio::default());
    let addr = start_mock_gpio(gpio.clone()).await;
    let (control, message) = led_control(device_for(addr), "2");

    control.turn_led_off().await;

    assert_eq!(*gpio.led_paths.lock().unwrap(), vec!["/led/2/state/0"]);
    let field = message.read().await;
    assert_eq!(field.text, "LED 2 state: OFF");
    assert_eq!(field.color, StatusColor::Green);
}

#[tokio::test]
async fn server_reported_error_is_rendered_verbatim() {
    let gpio = Arc::new(MockGpio::default());
    *gpio.led_error.lock().unwrap() = Some("GPIO busy".to_string());
    let addr = start_mock_gpio(gpio.clone()).await;
    let (control, message) = led_control(device_for(addr), "0");

    control.turn_led_off().await;

    let field = message.read().await;
    assert_eq!(field.text, "Error: GPIO busy");
    assert_eq!(field.color, StatusColor::Red);
}

#[tokio::test]
async fn unreachable_server_shows_fixed_led_error() {
    // Nothing listens on port 1.
    let device: Arc<dyn DeviceApi> = Arc::new(
        HttpDevice::new(&ServerSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_ms: Some(500),
        })
        .unwrap(),
    );
    let (control, message) = led_control(device, "0");

    control.turn_led_on().await;

    let field = message.read().await;
    assert_eq!(field.text, "Error toggling LED.");
    assert_eq!(field.color, StatusColor::Red);
}

#[tokio::test]
async fn non_json_body_counts_as_transport_failure() {
    let app = Router::new()
        .route("/led/{led}/state/{state}", get(|| async { "<!doctype html>" }))
        .route("/push-button", get(|| async { "<!doctype html>" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (control, message) = led_control(device_for(addr), "0");
    control.turn_led_on().await;
    let field = message.read().await;
    assert_eq!(field.text, "Error toggling LED.");
    assert_eq!(field.color, StatusColor::Red);

    let (button, status) = button_status(device_for(addr));
    button.check_status().await;
    let field = status.read().await;
    assert_eq!(field.text, "Error fetching status.");
    assert_eq!(field.color, StatusColor::Gray);
}

#[tokio::test]
async fn button_states_render_pressed_and_released() {
    let gpio = Arc::new(MockGpio::default());
    let addr = start_mock_gpio(gpio.clone()).await;
    let (button, status) = button_status(device_for(addr));

    *gpio.pressed.lock().unwrap() = true;
    button.check_status().await;
    let field = status.read().await;
    assert_eq!(field.text, "Button is pressed!");
    assert_eq!(field.color, StatusColor::Red);

    *gpio.pressed.lock().unwrap() = false;
    button.check_status().await;
    let field = status.read().await;
    assert_eq!(field.text, "Button is not pressed.");
    assert_eq!(field.color, StatusColor::Green);
}

#[tokio::test]
async fn startup_auto_fetch_populates_button_status() {
    let gpio = Arc::new(MockGpio::default());
    let addr = start_mock_gpio(gpio.clone()).await;
    let device = device_for(addr);

    let panel = Panel::new();
    let message = panel.register("led-message");
    let status = panel.register("button-status");
    let selector = Arc::new(
        Selector::new(vec!["0".to_string(), "1".to_string(), "2".to_string()], "0").unwrap(),
    );

    let _dispatcher = events::spawn(Wiring {
        led: LedControl::new(device.clone(), selector, message),
        button: ButtonStatus::new(device, status.clone(), StatusColor::Gray),
        refresh_control: Some("refreshBtn".to_string()),
        auto_fetch_on_load: true,
        poll_interval: None,
    });

    let field = wait_for_text(&status).await;
    assert_eq!(field.text, "Button is not pressed.");
    assert_eq!(field.color, StatusColor::Green);
}

#[tokio::test]
async fn refresh_control_press_refreshes_status() {
    let gpio = Arc::new(MockGpio::default());
    *gpio.pressed.lock().unwrap() = true;
    let addr = start_mock_gpio(gpio.clone()).await;
    let device = device_for(addr);

    let panel = Panel::new();
    let message = panel.register("led-message");
    let status = panel.register("button-status");
    let selector = Arc::new(
        Selector::new(vec!["0".to_string(), "1".to_string(), "2".to_string()], "0").unwrap(),
    );

    let dispatcher = events::spawn(Wiring {
        led: LedControl::new(device.clone(), selector, message),
        button: ButtonStatus::new(device, status.clone(), StatusColor::Gray),
        refresh_control: Some("refreshBtn".to_string()),
        auto_fetch_on_load: false,
        poll_interval: None,
    });

    dispatcher.emit(UiEvent::ControlPressed("refreshBtn".to_string()));

    let field = wait_for_text(&status).await;
    assert_eq!(field.text, "Button is pressed!");
    assert_eq!(field.color, StatusColor::Red);
}
