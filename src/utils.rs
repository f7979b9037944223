// utils.rs
use crate::models::StatusColor;
use crate::panel::StatusField;

fn ansi_code(color: StatusColor) -> Option<&'static str> {
    match color {
        StatusColor::Green => Some("\x1b[32m"),
        StatusColor::Red => Some("\x1b[31m"),
        StatusColor::Gray => Some("\x1b[90m"),
        StatusColor::Unstyled => None,
    }
}

/// Renders a field's text in its color for terminal output.
pub fn paint(field: &StatusField) -> String {
    match ansi_code(field.color) {
        Some(code) => format!("{}{}\x1b[0m", code, field.text),
        None => field.text.clone(),
    }
}
