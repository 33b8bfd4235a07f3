use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `attendance` table. One row per person, roster and day.
/// Staff rows keep the person's own department; an "all departments"
/// roster stores `all` as its group.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            kind          TEXT NOT NULL CHECK(kind IN ('students','staff')),
            group_name    TEXT NOT NULL,
            section       TEXT NOT NULL DEFAULT '',
            department    TEXT NOT NULL DEFAULT '',
            person_id     INTEGER NOT NULL,
            display_name  TEXT NOT NULL,
            identifier    TEXT NOT NULL,
            designation   TEXT NOT NULL DEFAULT '',
            status        TEXT NOT NULL CHECK(status IN ('present','absent','late','leave')),
            saved_at      TEXT NOT NULL,
            UNIQUE(date, kind, group_name, section, person_id)
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_date_kind ON attendance(date, kind);
        CREATE INDEX IF NOT EXISTS idx_attendance_staff
            ON attendance(date, kind, department, identifier);
        "#,
    )?;
    Ok(())
}

type Step = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const STEPS: [Step; 1] = [(
    "20250901_0001_create_attendance",
    "Created attendance table",
    create_attendance_table,
)];

/// Public entry point: run all pending migrations. Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in STEPS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn)?;
        mark_applied(conn, version, message)?;
        success(format!("Migration applied: {version}"));
    }

    Ok(())
}
