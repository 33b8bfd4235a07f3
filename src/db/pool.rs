//! SQLite connection wrapper (one connection per CLI run).

use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Open and bring the schema up to date.
    pub fn open_migrated(path: &str) -> AppResult<Self> {
        let pool = Self::new(path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(pool)
    }

    /// In-memory database with the full schema (tests, dry runs).
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }
}
