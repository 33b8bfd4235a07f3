//! One attendance-marking session: the boundary where failures become
//! notifications.
//!
//! A session owns a single roster, the provider it is loaded from and the
//! repository it is saved to. Nothing here returns an error: every outcome is
//! a [`Notice`], already printed, and the roster stays at its last good state.

use crate::core::editor::{self, BulkScope};
use crate::core::filter;
use crate::core::gate::{self, AttendanceRepository};
use crate::core::provider::RosterProvider;
use crate::core::store::{LoadOutcome, LoadTicket, RosterStore};
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::roster::{Roster, RosterCriteria, RosterKind};
use crate::models::status::Status;
use crate::ui::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.level, Level::Warning | Level::Error)
    }

    pub fn emit(&self) {
        match self.level {
            Level::Info => messages::info(&self.message),
            Level::Success => messages::success(&self.message),
            Level::Warning => messages::warning(&self.message),
            Level::Error => messages::error(&self.message),
        }
    }
}

pub struct AttendanceSession<P, R> {
    store: RosterStore,
    provider: P,
    repository: R,
    query: String,
    bulk_scope: BulkScope,
    quiet: bool,
}

impl<P: RosterProvider, R: AttendanceRepository> AttendanceSession<P, R> {
    pub fn new(provider: P, repository: R) -> Self {
        Self {
            store: RosterStore::new(),
            provider,
            repository,
            query: String::new(),
            bulk_scope: BulkScope::default(),
            quiet: false,
        }
    }

    pub fn with_bulk_scope(mut self, scope: BulkScope) -> Self {
        self.bulk_scope = scope;
        self
    }

    /// Keep notices off the terminal (library callers, tests).
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn roster(&self) -> &Roster {
        self.store.roster()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        gate::can_submit(self.store.roster())
    }

    // ---------------------------
    // Loading
    // ---------------------------

    pub fn load(&mut self, criteria: RosterCriteria) -> Notice {
        let ticket = self.begin_load(criteria);
        let result = self.provider.fetch(&ticket.criteria);
        self.complete_load(ticket, result)
    }

    pub fn begin_load(&mut self, criteria: RosterCriteria) -> LoadTicket {
        self.store.begin_load(criteria)
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, result: AppResult<Vec<Person>>) -> Notice {
        let kind = ticket.criteria.kind;
        let notice = match self.store.complete_load(ticket, result) {
            Ok(LoadOutcome::Applied { count }) => Notice::new(
                Level::Success,
                format!("Loaded {count} {}", plural(kind, count)),
            ),
            Ok(LoadOutcome::Stale) => {
                Notice::new(Level::Info, "Discarded an outdated roster load")
            }
            Err(e) => self.describe(&e),
        };
        self.publish(notice)
    }

    // ---------------------------
    // Search
    // ---------------------------

    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&Person> {
        filter::filter(self.store.roster(), &self.query)
    }

    // ---------------------------
    // Editing
    // ---------------------------

    pub fn mark(&mut self, person_id: u32, status: Status) -> Notice {
        if !self.store.roster().contains(person_id) {
            let notice = self.describe(&AppError::UnknownPerson(person_id));
            return self.publish(notice);
        }
        self.store
            .update(|r| editor::set_status(r, person_id, status));
        self.publish(Notice::new(
            Level::Info,
            format!("#{person_id} marked {}", status.label()),
        ))
    }

    pub fn clear(&mut self, person_id: u32) -> Notice {
        let marked = self
            .store
            .roster()
            .get(person_id)
            .map(|p| p.is_marked());
        match marked {
            None => {
                let notice = self.describe(&AppError::UnknownPerson(person_id));
                self.publish(notice)
            }
            Some(false) => self.publish(Notice::new(
                Level::Info,
                format!("#{person_id} is not marked"),
            )),
            Some(true) => {
                self.store.update(|r| editor::clear_status(r, person_id));
                self.publish(Notice::new(
                    Level::Info,
                    format!("#{person_id} status removed"),
                ))
            }
        }
    }

    pub fn mark_all(&mut self, status: Status) -> Notice {
        let scope = self.bulk_scope;
        let query = self.query.clone();
        self.store
            .update(|r| editor::set_all_status_scoped(r, status, scope, &query));

        let target = match scope {
            BulkScope::Visible if !query.trim().is_empty() => "all visible records",
            _ => "all records",
        };
        self.publish(Notice::new(
            Level::Info,
            format!("Marked {target} {}", status.label()),
        ))
    }

    // ---------------------------
    // Submission
    // ---------------------------

    pub fn submit(&mut self) -> Notice {
        let roster = self.store.roster();
        let Some(criteria) = roster.criteria.as_ref() else {
            let notice = self.describe(&AppError::EmptyRoster);
            return self.publish(notice);
        };
        let kind = criteria.kind;

        let notice = match gate::submit(roster, &mut self.repository, criteria.as_of) {
            Ok(receipt) => Notice::new(
                Level::Success,
                format!(
                    "{} attendance saved successfully ({} records, {})",
                    match kind {
                        RosterKind::Students => "Student",
                        RosterKind::Staff => "Staff",
                    },
                    receipt.saved,
                    receipt.as_of.format("%Y-%m-%d")
                ),
            ),
            Err(e) => self.describe(&e),
        };
        self.publish(notice)
    }

    fn describe(&self, err: &AppError) -> Notice {
        let kind = self
            .store
            .roster()
            .criteria
            .as_ref()
            .map(|c| c.kind)
            .unwrap_or(RosterKind::Students);

        match err {
            AppError::IncompleteAttendance { unmarked } => Notice::new(
                Level::Warning,
                format!(
                    "Some {} do not have attendance marked: {}",
                    plural(kind, 2),
                    unmarked
                        .iter()
                        .map(|id| format!("#{id}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            AppError::EmptyRoster => Notice::new(
                Level::Warning,
                format!("No {} loaded: nothing to save", plural(kind, 2)),
            ),
            AppError::UnknownPerson(_) => Notice::new(Level::Warning, err.to_string()),
            AppError::Save(_) => Notice::new(
                Level::Error,
                format!("{err}. Marks are kept, retry when ready"),
            ),
            _ => Notice::new(Level::Error, err.to_string()),
        }
    }

    fn publish(&self, notice: Notice) -> Notice {
        if !self.quiet {
            notice.emit();
        }
        notice
    }
}

fn plural(kind: RosterKind, count: usize) -> &'static str {
    match (kind, count) {
        (RosterKind::Students, 1) => "student",
        (RosterKind::Students, _) => "students",
        (RosterKind::Staff, 1) => "staff member",
        (RosterKind::Staff, _) => "staff members",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::MockRosterProvider;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct Recorder {
        saves: usize,
        fail: bool,
    }

    impl AttendanceRepository for Recorder {
        fn save(&mut self, _roster: &Roster, _as_of: NaiveDate) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Save("repository unavailable".into()));
            }
            self.saves += 1;
            Ok(())
        }
    }

    fn session() -> AttendanceSession<MockRosterProvider, Recorder> {
        AttendanceSession::new(
            MockRosterProvider::default().without_latency(),
            Recorder::default(),
        )
        .quiet()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    #[test]
    fn mark_all_then_one_absent_is_submittable() {
        let mut s = session();
        let n = s.load(RosterCriteria::students("Class 1", "Section A", as_of()));
        assert_eq!(n.message, "Loaded 25 students");

        s.mark_all(Status::Present);
        s.mark(5, Status::Absent);

        let absent: Vec<u32> = s
            .roster()
            .iter()
            .filter(|p| p.status == Some(Status::Absent))
            .map(|p| p.id)
            .collect();
        assert_eq!(absent, vec![5]);
        assert_eq!(
            s.roster()
                .iter()
                .filter(|p| p.status == Some(Status::Present))
                .count(),
            24
        );
        assert!(s.can_submit());
        assert_eq!(s.submit().level, Level::Success);
        assert_eq!(s.repository().saves, 1);
    }

    #[test]
    fn unmarked_staff_submission_is_a_warning_naming_ids() {
        let mut s = session();
        s.load(RosterCriteria::staff("IT", as_of()));
        let notice = s.submit();
        assert_eq!(notice.level, Level::Warning);
        assert!(notice.message.starts_with("Some staff members do not have attendance marked"));
        for id in 1..=12 {
            assert!(notice.message.contains(&format!("#{id}")));
        }
        assert_eq!(s.roster().marked_count(), 0);
        assert_eq!(s.repository().saves, 0);
    }

    #[test]
    fn submitting_before_loading_reports_empty_roster() {
        let mut s = session();
        let notice = s.submit();
        assert_eq!(notice.level, Level::Warning);
        assert!(notice.message.contains("nothing to save"));
    }

    #[test]
    fn failed_save_keeps_marks_for_retry() {
        let mut s = session();
        s.load(RosterCriteria::staff("Teaching", as_of()));
        s.mark_all(Status::Late);
        s.repository_mut().fail = true;

        let notice = s.submit();
        assert_eq!(notice.level, Level::Error);
        assert!(notice.message.contains("retry"));
        assert_eq!(s.roster().marked_count(), 12);

        s.repository_mut().fail = false;
        assert_eq!(s.submit().level, Level::Success);
    }

    #[test]
    fn bulk_action_ignores_search_by_default() {
        let mut s = session();
        s.load(RosterCriteria::students("Class 2", "Section C", as_of()));
        s.search("Student 2");
        assert_eq!(s.visible().len(), 7); // 2, 20..=25
        s.mark_all(Status::OnLeave);
        assert_eq!(s.roster().marked_count(), 25);
    }

    #[test]
    fn visible_scope_limits_bulk_action() {
        let mut s = session().with_bulk_scope(BulkScope::Visible);
        s.load(RosterCriteria::students("Class 2", "Section C", as_of()));
        s.search("Student 2");
        s.mark_all(Status::Present);
        assert_eq!(s.roster().marked_count(), 7);
        assert!(!s.can_submit());
    }

    #[test]
    fn unknown_ids_warn_and_change_nothing() {
        let mut s = session();
        s.load(RosterCriteria::staff("IT", as_of()));
        let before = s.roster().clone();
        assert_eq!(s.mark(99, Status::Present).level, Level::Warning);
        assert_eq!(s.clear(99).level, Level::Warning);
        assert_eq!(s.roster(), &before);
    }

    #[test]
    fn clear_on_unmarked_record_is_informational() {
        let mut s = session();
        s.load(RosterCriteria::staff("IT", as_of()));
        assert_eq!(s.clear(3).level, Level::Info);
        s.mark(3, Status::Absent);
        s.clear(3);
        assert!(s.roster().get(3).unwrap().status.is_none());
    }

    #[test]
    fn load_failure_keeps_last_good_roster() {
        let mut s = session();
        s.load(RosterCriteria::staff("IT", as_of()));
        s.mark(1, Status::Present);
        let notice = s.load(RosterCriteria::staff("Kitchen", as_of()));
        assert_eq!(notice.level, Level::Error);
        assert_eq!(s.roster().len(), 12);
        assert_eq!(s.roster().get(1).unwrap().status, Some(Status::Present));
    }
}
