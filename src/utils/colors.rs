/// ANSI color helper utilities for terminal output.
use crate::models::status::Status;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Present → green, Absent → red, Late → yellow, Leave → magenta,
/// not marked → grey.
pub fn color_for_status(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Present) => GREEN,
        Some(Status::Absent) => RED,
        Some(Status::Late) => YELLOW,
        Some(Status::OnLeave) => MAGENTA,
        None => GREY,
    }
}

pub fn colorize_status(status: Option<Status>) -> String {
    let label = crate::models::status::status_label(status);
    format!("{}{label}{RESET}", color_for_status(status))
}

/// Attendance rate color: >= 90 green, >= 75 yellow, below red.
pub fn color_for_rate(rate: f64) -> &'static str {
    if rate >= 90.0 {
        GREEN
    } else if rate >= 75.0 {
        YELLOW
    } else {
        RED
    }
}
