//! Roster ownership and load sequencing.
//!
//! Loads are two-phase: `begin_load` hands out a ticket carrying a
//! monotonically increasing token, `complete_load` applies a result only if
//! its ticket is the newest one issued. Completions may therefore arrive in
//! any order and the roster always reflects the last-issued load.

use crate::core::provider::RosterProvider;
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::roster::{Roster, RosterCriteria};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    pub criteria: RosterCriteria,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The roster was replaced with `count` records.
    Applied { count: usize },
    /// A newer load was issued after this one; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct RosterStore {
    roster: Roster,
    issued: u64,
    settled: u64,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// True while the newest ticket has not completed.
    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }

    pub fn begin_load(&mut self, criteria: RosterCriteria) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            token: self.issued,
            criteria,
        }
    }

    /// Settle a ticket with the provider's answer.
    ///
    /// Stale tickets are dropped whether they succeeded or failed. A failure
    /// on the newest ticket leaves the previous roster in place.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: AppResult<Vec<Person>>,
    ) -> AppResult<LoadOutcome> {
        if ticket.token != self.issued {
            return Ok(LoadOutcome::Stale);
        }
        self.settled = ticket.token;

        let mut people = result.map_err(|e| match e {
            AppError::Load(_) => e,
            other => AppError::Load(other.to_string()),
        })?;
        validate(&people)?;

        // fresh rosters start unmarked
        for p in people.iter_mut() {
            p.status = None;
        }

        let count = people.len();
        self.roster = Roster::new(ticket.criteria, people);
        Ok(LoadOutcome::Applied { count })
    }

    /// Begin, fetch and complete in one go.
    pub fn load<P: RosterProvider + ?Sized>(
        &mut self,
        provider: &P,
        criteria: RosterCriteria,
    ) -> AppResult<LoadOutcome> {
        let ticket = self.begin_load(criteria);
        let result = provider.fetch(&ticket.criteria);
        self.complete_load(ticket, result)
    }

    /// Apply an editor operation to the owned roster.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(Roster) -> Roster,
    {
        let current = std::mem::take(&mut self.roster);
        self.roster = edit(current);
    }
}

/// Reject provider data that would break roster invariants.
fn validate(people: &[Person]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(people.len());
    for p in people {
        if !seen.insert(p.id) {
            return Err(AppError::Load(format!(
                "malformed roster: duplicate id {}",
                p.id
            )));
        }
        if p.display_name.trim().is_empty() || p.identifier.trim().is_empty() {
            return Err(AppError::Load(format!(
                "malformed roster: record {} has no name or identifier",
                p.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor;
    use crate::models::status::Status;
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn people(prefix: &str, n: u32) -> Vec<Person> {
        (1..=n)
            .map(|i| Person::student(i, &format!("{prefix} {i}"), &format!("{prefix}-{i}")))
            .collect()
    }

    #[test]
    fn stale_completion_never_overwrites_newer_load() {
        let mut store = RosterStore::new();
        let a = store.begin_load(RosterCriteria::students("Class 1", "Section A", as_of()));
        let b = store.begin_load(RosterCriteria::students("Class 2", "Section B", as_of()));
        assert!(store.is_loading());

        // newer finishes first
        let applied = store.complete_load(b, Ok(people("B", 3))).unwrap();
        assert_eq!(applied, LoadOutcome::Applied { count: 3 });
        let stale = store.complete_load(a, Ok(people("A", 5))).unwrap();
        assert_eq!(stale, LoadOutcome::Stale);

        assert!(!store.is_loading());
        assert_eq!(store.roster().len(), 3);
        assert_eq!(
            store.roster().criteria.as_ref().unwrap().class_or_department,
            "Class 2"
        );
    }

    #[test]
    fn older_completion_arriving_first_is_dropped_too() {
        let mut store = RosterStore::new();
        let a = store.begin_load(RosterCriteria::staff("IT", as_of()));
        let b = store.begin_load(RosterCriteria::staff("Teaching", as_of()));

        assert_eq!(
            store.complete_load(a, Ok(people("A", 2))).unwrap(),
            LoadOutcome::Stale
        );
        assert!(store.roster().is_empty());
        assert!(store.is_loading());

        store.complete_load(b, Ok(people("B", 4))).unwrap();
        assert_eq!(store.roster().people[0].display_name, "B 1");
    }

    #[test]
    fn failed_load_keeps_previous_roster() {
        let mut store = RosterStore::new();
        let t = store.begin_load(RosterCriteria::staff("IT", as_of()));
        store.complete_load(t, Ok(people("S", 2))).unwrap();
        store.update(|r| editor::set_status(r, 1, Status::Present));
        let before = store.roster().clone();

        let t = store.begin_load(RosterCriteria::staff("Teaching", as_of()));
        let err = store
            .complete_load(t, Err(AppError::Other("unreachable".into())))
            .unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
        assert_eq!(store.roster(), &before);
        assert!(!store.is_loading());
    }

    #[test]
    fn stale_failure_is_silent() {
        let mut store = RosterStore::new();
        let a = store.begin_load(RosterCriteria::staff("IT", as_of()));
        let _b = store.begin_load(RosterCriteria::staff("IT", as_of()));
        let outcome = store
            .complete_load(a, Err(AppError::Load("timeout".into())))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let mut store = RosterStore::new();
        let t = store.begin_load(RosterCriteria::staff("IT", as_of()));
        let mut dup = people("S", 2);
        dup[1].id = 1;
        let err = store.complete_load(t, Ok(dup)).unwrap_err();
        assert!(err.to_string().contains("duplicate id 1"));
        assert!(store.roster().is_empty());
    }

    #[test]
    fn reload_replaces_marks_wholesale() {
        let mut store = RosterStore::new();
        let t = store.begin_load(RosterCriteria::staff("IT", as_of()));
        store.complete_load(t, Ok(people("S", 3))).unwrap();
        store.update(|r| editor::set_all_status(r, Status::Absent));

        let t = store.begin_load(RosterCriteria::staff("IT", as_of()));
        let premarked = people("S", 3)
            .into_iter()
            .map(|p| p.with_status(Some(Status::Late)))
            .collect();
        store.complete_load(t, Ok(premarked)).unwrap();
        assert_eq!(store.roster().marked_count(), 0);
    }
}
