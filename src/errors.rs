//! Unified application error type.
//! Every layer (store, editor, gate, db, cli) returns AppError so that the
//! session boundary can turn any failure into a single notification.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid attendance status: {0}")]
    InvalidStatus(String),

    #[error("Invalid roster kind: {0}")]
    InvalidKind(String),

    #[error("Invalid status assignment '{0}' (expected ID=STATUS)")]
    InvalidAssignment(String),

    // ---------------------------
    // Roster lifecycle
    // ---------------------------
    #[error("Failed to load roster: {0}")]
    Load(String),

    #[error("Failed to save attendance: {0}")]
    Save(String),

    #[error("Nothing to submit: the roster is empty")]
    EmptyRoster,

    #[error("Some records are unmarked: {}", join_ids(.unmarked))]
    IncompleteAttendance { unmarked: Vec<u32> },

    #[error("No person with id {0} in the current roster")]
    UnknownPerson(u32),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type AppResult<T> = Result<T, AppError>;
