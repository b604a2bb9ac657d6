//! ANSI color helper utilities for terminal output.

use crate::models::ServiceStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Badge color per status: pending yellow, assigned blue, done green.
pub fn color_for_status(status: ServiceStatus) -> &'static str {
    match status {
        ServiceStatus::SentToInspector => YELLOW,
        ServiceStatus::SentToContractor => BLUE,
        ServiceStatus::Completed => GREEN,
    }
}

/// GREY for empty placeholders ("--"), RESET otherwise.
pub fn color_for_optional_field(value: &str) -> &'static str {
    if value.trim().is_empty() || value.trim() == "--" {
        GREY
    } else {
        RESET
    }
}
