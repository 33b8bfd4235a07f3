use crate::models::record::AttendanceRecord;
use serde::Serialize;

/// Flat row for exporting saved attendance.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub date: String,
    pub kind: String,
    pub group: String,
    pub section: String,
    pub department: String,
    pub person_id: u32,
    pub name: String,
    pub identifier: String,
    pub designation: String,
    pub status: String,
    pub saved_at: String,
}

impl From<&AttendanceRecord> for RecordExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date_str(),
            kind: r.kind.to_db_str().to_string(),
            group: r.group_name.clone(),
            section: r.section.clone(),
            department: r.department.clone(),
            person_id: r.person_id,
            name: r.display_name.clone(),
            identifier: r.identifier.clone(),
            designation: r.designation.clone(),
            status: r.status.label().to_string(),
            saved_at: r.saved_at.clone(),
        }
    }
}

/// Header shared by CSV and XLSX, same order as the struct fields.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "kind",
        "group",
        "section",
        "department",
        "person_id",
        "name",
        "identifier",
        "designation",
        "status",
        "saved_at",
    ]
}

pub(crate) fn record_to_row(r: &RecordExport) -> Vec<String> {
    vec![
        r.date.clone(),
        r.kind.clone(),
        r.group.clone(),
        r.section.clone(),
        r.department.clone(),
        r.person_id.to_string(),
        r.name.clone(),
        r.identifier.clone(),
        r.designation.clone(),
        r.status.clone(),
        r.saved_at.clone(),
    ]
}
