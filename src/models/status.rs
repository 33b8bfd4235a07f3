use serde::{Deserialize, Serialize};

/// Attendance mark for one person on one day.
///
/// "Not marked yet" is not a variant: rosters carry `Option<Status>` and
/// `None` is the unmarked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Present,
    Absent,
    Late,
    #[serde(rename = "leave")]
    OnLeave,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Present, Status::Absent, Status::Late, Status::OnLeave];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Present => "present",
            Status::Absent => "absent",
            Status::Late => "late",
            Status::OnLeave => "leave",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Status::Present),
            "absent" => Some(Status::Absent),
            "late" => Some(Status::Late),
            "leave" => Some(Status::OnLeave),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI.
    /// Accepts the full name (any case) or the single-letter code P/A/L/O.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "p" | "present" => Some(Status::Present),
            "a" | "absent" => Some(Status::Absent),
            "l" | "late" => Some(Status::Late),
            "o" | "leave" | "onleave" | "on-leave" => Some(Status::OnLeave),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
            Status::Late => "Late",
            Status::OnLeave => "On Leave",
        }
    }
}

/// Label used by tables for an optional status.
pub fn status_label(status: Option<Status>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("Not Marked")
}
