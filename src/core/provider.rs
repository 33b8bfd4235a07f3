use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::roster::{RosterCriteria, RosterKind};
use std::thread;
use std::time::Duration;

pub const CLASSES: [&str; 6] = ["Class 1", "Class 2", "Class 3", "Class 4", "Class 5", "Class 6"];
pub const SECTIONS: [&str; 3] = ["Section A", "Section B", "Section C"];
pub const DEPARTMENTS: [&str; 5] = [
    "Administration",
    "Teaching",
    "Support Staff",
    "Maintenance",
    "IT",
];
pub const DESIGNATIONS: [&str; 6] = [
    "Teacher",
    "Assistant Teacher",
    "Administrator",
    "Counselor",
    "Librarian",
    "IT Support",
];

/// Source of roster data. A real deployment would query the school's
/// roster service here.
pub trait RosterProvider {
    fn fetch(&self, criteria: &RosterCriteria) -> AppResult<Vec<Person>>;
}

/// In-memory generator used until a roster service exists.
#[derive(Debug, Clone)]
pub struct MockRosterProvider {
    pub student_count: u32,
    pub staff_count: u32,
    pub latency: Duration,
}

impl Default for MockRosterProvider {
    fn default() -> Self {
        Self {
            student_count: 25,
            staff_count: 12,
            latency: Duration::from_millis(600),
        }
    }
}

impl MockRosterProvider {
    pub fn without_latency(mut self) -> Self {
        self.latency = Duration::ZERO;
        self
    }

    fn check_group(criteria: &RosterCriteria) -> AppResult<()> {
        let group = criteria.class_or_department.as_str();
        match criteria.kind {
            RosterKind::Students => {
                if !CLASSES.iter().any(|c| c.eq_ignore_ascii_case(group)) {
                    return Err(AppError::Load(format!("unknown class '{group}'")));
                }
                let section = criteria.section_str();
                if !SECTIONS.iter().any(|s| s.eq_ignore_ascii_case(section)) {
                    return Err(AppError::Load(format!("unknown section '{section}'")));
                }
            }
            RosterKind::Staff => {
                if !group.eq_ignore_ascii_case("all")
                    && !DEPARTMENTS.iter().any(|d| d.eq_ignore_ascii_case(group))
                {
                    return Err(AppError::Load(format!("unknown department '{group}'")));
                }
            }
        }
        Ok(())
    }

    fn generate_students(&self) -> Vec<Person> {
        (1..=self.student_count)
            .map(|i| {
                Person::student(
                    i,
                    &format!("Student {i}"),
                    &format!("R-{}", 1000 + i - 1),
                )
            })
            .collect()
    }

    fn generate_staff(&self, department: &str) -> Vec<Person> {
        (1..=self.staff_count)
            .map(|i| {
                let idx = (i - 1) as usize;
                let dept = if department.eq_ignore_ascii_case("all") {
                    DEPARTMENTS[idx % DEPARTMENTS.len()]
                } else {
                    department
                };
                Person::staff(
                    i,
                    &format!("Staff Member {i}"),
                    &format!("EMP-{}", 2000 + i - 1),
                    dept,
                    DESIGNATIONS[idx % DESIGNATIONS.len()],
                )
            })
            .collect()
    }
}

impl RosterProvider for MockRosterProvider {
    fn fetch(&self, criteria: &RosterCriteria) -> AppResult<Vec<Person>> {
        Self::check_group(criteria)?;

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        Ok(match criteria.kind {
            RosterKind::Students => self.generate_students(),
            RosterKind::Staff => self.generate_staff(&criteria.class_or_department),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn generates_twenty_five_unmarked_students() {
        let provider = MockRosterProvider::default().without_latency();
        let people = provider
            .fetch(&RosterCriteria::students("Class 3", "Section B", as_of()))
            .unwrap();
        assert_eq!(people.len(), 25);
        assert_eq!(people[0].display_name, "Student 1");
        assert_eq!(people[0].identifier, "R-1000");
        assert_eq!(people[24].identifier, "R-1024");
        assert!(people.iter().all(|p| p.status.is_none()));
    }

    #[test]
    fn all_departments_cycle_through_the_list() {
        let provider = MockRosterProvider::default().without_latency();
        let people = provider.fetch(&RosterCriteria::staff("all", as_of())).unwrap();
        assert_eq!(people.len(), 12);
        assert_eq!(people[0].identifier, "EMP-2000");
        assert_eq!(people[0].department(), Some("Administration"));
        assert_eq!(people[4].department(), Some("IT"));
        assert_eq!(people[5].department(), Some("Administration"));
        assert_eq!(people[5].designation(), Some("IT Support"));
    }

    #[test]
    fn unknown_groups_fail_with_load_error() {
        let provider = MockRosterProvider::default().without_latency();
        let err = provider
            .fetch(&RosterCriteria::students("Class 9", "Section A", as_of()))
            .unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
        assert!(
            provider
                .fetch(&RosterCriteria::staff("Kitchen", as_of()))
                .is_err()
        );
    }
}
