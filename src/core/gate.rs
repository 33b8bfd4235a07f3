use crate::errors::{AppError, AppResult};
use crate::models::roster::Roster;
use chrono::NaiveDate;

/// Where a complete roster ends up. Implementations must not keep a
/// half-written roster around when they fail.
pub trait AttendanceRepository {
    fn save(&mut self, roster: &Roster, as_of: NaiveDate) -> AppResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub saved: usize,
    pub as_of: NaiveDate,
}

/// True iff the roster is non-empty and every record is marked.
pub fn can_submit(roster: &Roster) -> bool {
    !roster.is_empty() && roster.iter().all(|p| p.is_marked())
}

/// Explain why `can_submit` is false.
pub fn check_complete(roster: &Roster) -> AppResult<()> {
    if roster.is_empty() {
        return Err(AppError::EmptyRoster);
    }

    let unmarked = roster.unmarked_ids();
    if !unmarked.is_empty() {
        return Err(AppError::IncompleteAttendance { unmarked });
    }

    Ok(())
}

/// Validate, then hand the roster to the repository.
///
/// The roster is only borrowed: on any failure it is exactly what the caller
/// had, so a retry does not need re-marking.
pub fn submit<R: AttendanceRepository + ?Sized>(
    roster: &Roster,
    repository: &mut R,
    as_of: NaiveDate,
) -> AppResult<SubmitReceipt> {
    check_complete(roster)?;

    repository.save(roster, as_of).map_err(|e| match e {
        AppError::Save(_) => e,
        other => AppError::Save(other.to_string()),
    })?;

    Ok(SubmitReceipt {
        saved: roster.len(),
        as_of,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::{set_all_status, set_status};
    use crate::models::person::Person;
    use crate::models::roster::RosterCriteria;
    use crate::models::status::Status;

    #[derive(Default)]
    struct MemoryRepository {
        saved: Vec<(Roster, NaiveDate)>,
        offline: bool,
    }

    impl AttendanceRepository for MemoryRepository {
        fn save(&mut self, roster: &Roster, as_of: NaiveDate) -> AppResult<()> {
            if self.offline {
                return Err(AppError::Other("connection refused".into()));
            }
            self.saved.push((roster.clone(), as_of));
            Ok(())
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn staff(n: u32) -> Roster {
        let people = (1..=n)
            .map(|i| {
                Person::staff(
                    i,
                    &format!("Staff Member {i}"),
                    &format!("EMP-{}", 1999 + i),
                    "IT",
                    "IT Support",
                )
            })
            .collect();
        Roster::new(RosterCriteria::staff("IT", as_of()), people)
    }

    #[test]
    fn empty_roster_cannot_be_submitted() {
        let empty = Roster::default();
        assert!(!can_submit(&empty));
        let mut repo = MemoryRepository::default();
        assert!(matches!(
            submit(&empty, &mut repo, as_of()),
            Err(AppError::EmptyRoster)
        ));
        assert!(repo.saved.is_empty());
    }

    #[test]
    fn one_unmarked_record_blocks_submission() {
        let roster = set_all_status(staff(4), Status::Present);
        assert!(can_submit(&roster));

        let mut roster = roster;
        roster.people[2].status = None;
        assert!(!can_submit(&roster));
    }

    #[test]
    fn unmarked_staff_are_all_named() {
        let roster = staff(12);
        let mut repo = MemoryRepository::default();
        match submit(&roster, &mut repo, as_of()) {
            Err(AppError::IncompleteAttendance { unmarked }) => {
                assert_eq!(unmarked, (1..=12).collect::<Vec<_>>());
            }
            other => panic!("expected IncompleteAttendance, got {other:?}"),
        }
        assert!(repo.saved.is_empty());
        assert_eq!(roster, staff(12));
    }

    #[test]
    fn repository_failure_becomes_save_error_and_keeps_roster() {
        let roster = set_status(set_all_status(staff(3), Status::Late), 2, Status::Absent);
        let snapshot = roster.clone();
        let mut repo = MemoryRepository {
            offline: true,
            ..Default::default()
        };

        let err = submit(&roster, &mut repo, as_of()).unwrap_err();
        assert!(matches!(err, AppError::Save(ref m) if m.contains("connection refused")));
        assert_eq!(roster, snapshot);

        repo.offline = false;
        let receipt = submit(&roster, &mut repo, as_of()).unwrap();
        assert_eq!(receipt.saved, 3);
        assert_eq!(repo.saved.len(), 1);
    }
}
