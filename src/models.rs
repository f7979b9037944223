// models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired LED state on the request side. The wire encoding is the bare
/// digit in the request path (`/led/{id}/state/{0|1}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    Off,
    On,
}

impl LedState {
    pub fn as_digit(self) -> u8 {
        match self {
            LedState::Off => 0,
            LedState::On => 1,
        }
    }
}

impl fmt::Display for LedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedState::On => write!(f, "ON"),
            LedState::Off => write!(f, "OFF"),
        }
    }
}

/// Reply body of `GET /led/{id}/state/{state}`.
///
/// The server reports failures inside the body via an `error` field, so the
/// `Failure` variant comes first: a body carrying `error` takes that branch
/// no matter what else it contains. Success bodies may carry extra fields
/// (the reference server adds `success: true`); those are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedReply {
    Failure { error: String },
    Ok { led: u8, state: u8 },
}

/// Reply body of `GET /push-button`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonReply {
    pub pressed: bool,
}

/// Color channel of a panel status field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Red,
    Gray,
    #[default]
    Unstyled,
}
