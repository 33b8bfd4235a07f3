use super::person::Person;
use super::roster::{RosterCriteria, RosterKind};
use super::status::Status;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One saved attendance mark (a row of the `attendance` table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,          // ⇔ attendance.date (TEXT "YYYY-MM-DD")
    pub kind: RosterKind,         // ⇔ attendance.kind ('students' | 'staff')
    pub group_name: String,       // ⇔ attendance.group_name (class, department or 'all')
    pub section: String,          // ⇔ attendance.section ('' for staff)
    pub department: String,       // ⇔ attendance.department ('' for students)
    pub person_id: u32,           // ⇔ attendance.person_id
    pub display_name: String,     // ⇔ attendance.display_name
    pub identifier: String,       // ⇔ attendance.identifier
    pub designation: String,      // ⇔ attendance.designation ('' for students)
    pub status: Status,           // ⇔ attendance.status
    pub saved_at: String,         // ⇔ attendance.saved_at (ISO8601)
}

impl AttendanceRecord {
    /// Build a record from a marked person. Unmarked people have no record.
    pub fn from_person(criteria: &RosterCriteria, person: &Person) -> Option<Self> {
        let status = person.status?;

        Some(Self {
            date: criteria.as_of,
            kind: criteria.kind,
            group_name: criteria.class_or_department.clone(),
            section: criteria.section_str().to_string(),
            department: person.department().unwrap_or("").to_string(),
            person_id: person.id,
            display_name: person.display_name.clone(),
            identifier: person.identifier.clone(),
            designation: person.designation().unwrap_or("").to_string(),
            status,
            saved_at: Local::now().to_rfc3339(),
        })
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// "Class 1 / Section A" for students, the person's department for staff.
    pub fn group_label(&self) -> String {
        match self.kind {
            RosterKind::Students if !self.section.is_empty() => {
                format!("{} / {}", self.group_name, self.section)
            }
            RosterKind::Staff if !self.department.is_empty() => self.department.clone(),
            _ => self.group_name.clone(),
        }
    }
}
