use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema up to date and record the initialization.
/// Tables are only ever created by migrations.
pub fn init_db(conn: &Connection, db_path: &str) -> AppResult<()> {
    run_pending_migrations(conn)?;
    ttlog(conn, "init", db_path, "Database initialized")?;
    Ok(())
}
