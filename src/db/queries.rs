use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::models::roster::RosterKind;
use crate::models::status::Status;
use crate::utils::period::Bounds;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, ToSql};

const SELECT_COLUMNS: &str = "SELECT date, kind, group_name, section, department, person_id,
        display_name, identifier, designation, status, saved_at
 FROM attendance";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

/// Mapping DB → AttendanceRecord (shared by every query below).
pub fn map_record(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let kind_str: String = row.get("kind")?;
    let kind = RosterKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidKind(kind_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = Status::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(9, AppError::InvalidStatus(status_str.clone())))?;

    Ok(AttendanceRecord {
        date,
        kind,
        group_name: row.get("group_name")?,
        section: row.get("section")?,
        department: row.get("department")?,
        person_id: row.get("person_id")?,
        display_name: row.get("display_name")?,
        identifier: row.get("identifier")?,
        designation: row.get("designation")?,
        status,
        saved_at: row.get("saved_at")?,
    })
}

/// Saved records within `bounds` (inclusive), optionally for one roster kind.
pub fn load_records(
    conn: &Connection,
    bounds: Bounds,
    kind: Option<RosterKind>,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some((start, end)) = bounds {
        clauses.push("date BETWEEN ? AND ?");
        params.push(Box::new(start.format("%Y-%m-%d").to_string()));
        params.push(Box::new(end.format("%Y-%m-%d").to_string()));
    }
    if let Some(k) = kind {
        clauses.push("kind = ?");
        params.push(Box::new(k.to_db_str()));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "{SELECT_COLUMNS}{where_sql}
         ORDER BY date ASC, kind ASC, group_name ASC, section ASC, person_id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
        map_record,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_records_by_date(
    conn: &Connection,
    date: &NaiveDate,
    kind: Option<RosterKind>,
) -> AppResult<Vec<AttendanceRecord>> {
    load_records(conn, Some((*date, *date)), kind)
}

/// Number of saved rows, first and last saved day.
pub fn record_span(conn: &Connection) -> AppResult<(i64, Option<String>, Option<String>)> {
    let span: (i64, Option<String>, Option<String>) = conn.query_row(
        "SELECT COUNT(*), MIN(date), MAX(date) FROM attendance",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    Ok(span)
}
