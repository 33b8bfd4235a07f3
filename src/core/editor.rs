//! Status transitions on a roster.
//!
//! Every operation takes the roster by value and hands back the updated
//! one. Unknown ids are ignored: a stale or filtered-out id is not an error.

use crate::core::filter;
use crate::models::roster::Roster;
use crate::models::status::Status;
use serde::{Deserialize, Serialize};

/// Which records a bulk action touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkScope {
    /// Every record, whatever the search filter shows.
    #[default]
    All,
    /// Only the records matching the current search query.
    Visible,
}

pub fn set_status(roster: Roster, person_id: u32, status: Status) -> Roster {
    update(roster, person_id, Some(status))
}

/// Back to "not marked".
pub fn clear_status(roster: Roster, person_id: u32) -> Roster {
    update(roster, person_id, None)
}

/// Mark every record in the roster, ignoring any search filter.
pub fn set_all_status(mut roster: Roster, status: Status) -> Roster {
    for person in roster.people.iter_mut() {
        person.status = Some(status);
    }
    roster
}

/// Bulk mark with an explicit scope. `query` only matters for `Visible`.
pub fn set_all_status_scoped(
    mut roster: Roster,
    status: Status,
    scope: BulkScope,
    query: &str,
) -> Roster {
    let needle = query.trim().to_lowercase();
    if scope == BulkScope::All || needle.is_empty() {
        return set_all_status(roster, status);
    }

    for person in roster.people.iter_mut() {
        if filter::matches(person, &needle) {
            person.status = Some(status);
        }
    }
    roster
}

fn update(mut roster: Roster, person_id: u32, status: Option<Status>) -> Roster {
    if let Some(person) = roster.people.iter_mut().find(|p| p.id == person_id) {
        person.status = status;
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::Person;
    use crate::models::roster::RosterCriteria;
    use chrono::NaiveDate;

    fn students(n: u32) -> Roster {
        let as_of = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let people = (1..=n)
            .map(|i| Person::student(i, &format!("Student {i}"), &format!("R-{}", 999 + i)))
            .collect();
        Roster::new(RosterCriteria::students("Class 1", "Section A", as_of), people)
    }

    #[test]
    fn set_status_touches_only_the_target() {
        let before = students(5);
        let after = set_status(before.clone(), 3, Status::Late);

        assert_eq!(after.len(), before.len());
        for (a, b) in after.iter().zip(before.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.display_name, b.display_name);
            assert_eq!(a.identifier, b.identifier);
            if a.id == 3 {
                assert_eq!(a.status, Some(Status::Late));
            } else {
                assert_eq!(a.status, b.status);
            }
        }
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let r = set_status(students(2), 1, Status::Absent);
        let r = set_status(r, 1, Status::Absent);
        let r = set_status(r, 1, Status::OnLeave);
        assert_eq!(r.get(1).unwrap().status, Some(Status::OnLeave));
    }

    #[test]
    fn clear_after_set_round_trips_to_unmarked() {
        let original = students(4);
        let cleared = clear_status(set_status(original.clone(), 2, Status::Present), 2);
        assert_eq!(cleared, original);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let original = students(3);
        assert_eq!(set_status(original.clone(), 42, Status::Present), original);
        assert_eq!(clear_status(original.clone(), 42), original);
    }

    #[test]
    fn bulk_marks_the_full_roster() {
        let r = set_all_status(students(6), Status::Absent);
        assert!(r.iter().all(|p| p.status == Some(Status::Absent)));
    }

    #[test]
    fn bulk_with_all_scope_ignores_the_query() {
        let r = set_all_status_scoped(students(12), Status::Present, BulkScope::All, "Student 1");
        assert_eq!(r.marked_count(), 12);
    }

    #[test]
    fn bulk_with_visible_scope_follows_the_query() {
        // "student 1" matches 1, 10, 11, 12
        let r = set_all_status_scoped(students(12), Status::Late, BulkScope::Visible, "student 1");
        let marked: Vec<u32> = r.iter().filter(|p| p.is_marked()).map(|p| p.id).collect();
        assert_eq!(marked, vec![1, 10, 11, 12]);
    }

    #[test]
    fn scope_defaults_to_all() {
        assert_eq!(BulkScope::default(), BulkScope::All);
    }
}
