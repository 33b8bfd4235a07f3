use super::status::Status;
use serde::Serialize;

/// Fields that only one kind of roster carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PersonDetails {
    Student,
    Staff {
        department: String,
        designation: String,
    },
}

/// One row of a roster: a student (roll number) or a staff member (employee id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: u32,
    pub display_name: String,
    pub identifier: String, // roll number | employee id
    pub status: Option<Status>,
    pub details: PersonDetails,
}

impl Person {
    pub fn student(id: u32, display_name: &str, roll_number: &str) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            identifier: roll_number.to_string(),
            status: None,
            details: PersonDetails::Student,
        }
    }

    pub fn staff(
        id: u32,
        display_name: &str,
        employee_id: &str,
        department: &str,
        designation: &str,
    ) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            identifier: employee_id.to_string(),
            status: None,
            details: PersonDetails::Staff {
                department: department.to_string(),
                designation: designation.to_string(),
            },
        }
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn is_marked(&self) -> bool {
        self.status.is_some()
    }

    pub fn designation(&self) -> Option<&str> {
        match &self.details {
            PersonDetails::Staff { designation, .. } => Some(designation),
            PersonDetails::Student => None,
        }
    }

    pub fn department(&self) -> Option<&str> {
        match &self.details {
            PersonDetails::Staff { department, .. } => Some(department),
            PersonDetails::Student => None,
        }
    }
}
