//! Terminal notifications: the CLI counterpart of toast messages.

use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{BLUE}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

/// Errors go to stderr so that scripted runs can tell them apart.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// Section header above roster tables and reports.
pub fn header<T: fmt::Display>(msg: T) {
    println!("\n{BLUE}{BOLD}=== {msg} ==={RESET}\n");
}
