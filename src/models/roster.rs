use super::person::Person;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RosterKind {
    Students,
    Staff,
}

impl RosterKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RosterKind::Students => "students",
            RosterKind::Staff => "staff",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "students" => Some(RosterKind::Students),
            "staff" => Some(RosterKind::Staff),
            _ => None,
        }
    }
}

/// What a roster was loaded for: a class/section or a department, on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterCriteria {
    pub kind: RosterKind,
    pub class_or_department: String,
    pub section: Option<String>,
    pub as_of: NaiveDate,
}

impl RosterCriteria {
    pub fn students(class: &str, section: &str, as_of: NaiveDate) -> Self {
        Self {
            kind: RosterKind::Students,
            class_or_department: class.to_string(),
            section: Some(section.to_string()),
            as_of,
        }
    }

    pub fn staff(department: &str, as_of: NaiveDate) -> Self {
        Self {
            kind: RosterKind::Staff,
            class_or_department: department.to_string(),
            section: None,
            as_of,
        }
    }

    /// Section as stored in the DB ('' for staff rosters).
    pub fn section_str(&self) -> &str {
        self.section.as_deref().unwrap_or("")
    }

    pub fn date_str(&self) -> String {
        self.as_of.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for RosterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = match &self.section {
            Some(section) => format!("{} - {}", self.class_or_department, section),
            None if self.class_or_department.eq_ignore_ascii_case("all") => {
                "All Departments".to_string()
            }
            None => self.class_or_department.clone(),
        };
        write!(
            f,
            "{} attendance for {}",
            group,
            self.as_of.format("%B %-d, %Y")
        )
    }
}

/// Ordered collection of people, replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub criteria: Option<RosterCriteria>,
    pub people: Vec<Person>,
}

impl Roster {
    pub fn new(criteria: RosterCriteria, people: Vec<Person>) -> Self {
        Self {
            criteria: Some(criteria),
            people,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.people.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Ids still carrying no status, in roster order.
    pub fn unmarked_ids(&self) -> Vec<u32> {
        self.people
            .iter()
            .filter(|p| !p.is_marked())
            .map(|p| p.id)
            .collect()
    }

    pub fn marked_count(&self) -> usize {
        self.people.iter().filter(|p| p.is_marked()).count()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::Status;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn unmarked_ids_keep_roster_order() {
        let roster = Roster::new(
            RosterCriteria::students("Class 1", "Section A", date()),
            vec![
                Person::student(3, "Student 3", "R-1002"),
                Person::student(1, "Student 1", "R-1000").with_status(Some(Status::Late)),
                Person::student(2, "Student 2", "R-1001"),
            ],
        );
        assert_eq!(roster.unmarked_ids(), vec![3, 2]);
        assert_eq!(roster.marked_count(), 1);
    }

    #[test]
    fn criteria_display_names_the_group_and_date() {
        let c = RosterCriteria::students("Class 2", "Section B", date());
        assert_eq!(
            c.to_string(),
            "Class 2 - Section B attendance for September 1, 2025"
        );
        let all = RosterCriteria::staff("all", date());
        assert!(all.to_string().starts_with("All Departments"));
    }
}
