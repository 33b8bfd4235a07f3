//! SQLite-backed attendance repository.

use crate::core::gate::AttendanceRepository;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::models::roster::{Roster, RosterCriteria, RosterKind};
use chrono::NaiveDate;
use rusqlite::params;
use std::thread;
use std::time::Duration;

pub struct SqliteAttendanceRepository {
    pool: DbPool,
    latency: Duration,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            latency: Duration::ZERO,
        }
    }

    /// Simulated round-trip before each save.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn write(&mut self, records: &[AttendanceRecord], as_of: NaiveDate) -> AppResult<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let date_str = as_of.format("%Y-%m-%d").to_string();

        let tx = self.pool.conn.transaction()?;

        // a re-save replaces the earlier marks of the same roster and day
        tx.execute(
            "DELETE FROM attendance
             WHERE date = ?1 AND kind = ?2 AND group_name = ?3 AND section = ?4",
            params![
                date_str,
                first.kind.to_db_str(),
                first.group_name,
                first.section
            ],
        )?;

        {
            // a staff member has one mark per day, whichever roster saved it
            let mut replace_staff = tx.prepare_cached(
                "DELETE FROM attendance
                 WHERE date = ?1 AND kind = 'staff' AND department = ?2 AND identifier = ?3",
            )?;
            let mut stmt = tx.prepare_cached(
                "INSERT INTO attendance
                    (date, kind, group_name, section, department, person_id,
                     display_name, identifier, designation, status, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for r in records {
                if r.kind == RosterKind::Staff {
                    replace_staff.execute(params![date_str, r.department, r.identifier])?;
                }
                stmt.execute(params![
                    date_str,
                    r.kind.to_db_str(),
                    r.group_name,
                    r.section,
                    r.department,
                    r.person_id,
                    r.display_name,
                    r.identifier,
                    r.designation,
                    r.status.to_db_str(),
                    r.saved_at,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl AttendanceRepository for SqliteAttendanceRepository {
    fn save(&mut self, roster: &Roster, as_of: NaiveDate) -> AppResult<()> {
        let criteria = roster
            .criteria
            .clone()
            .ok_or_else(|| AppError::Save("roster has no load criteria".into()))?;
        let criteria = RosterCriteria { as_of, ..criteria };

        let records: Vec<AttendanceRecord> = roster
            .iter()
            .filter_map(|p| AttendanceRecord::from_person(&criteria, p))
            .collect();

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        self.write(&records, as_of)
            .map_err(|e| AppError::Save(e.to_string()))?;

        ttlog_or_warn(
            &self.pool.conn,
            "save",
            criteria.kind.to_db_str(),
            &format!("{} ({} records)", criteria, records.len()),
        );
        Ok(())
    }
}
