//! `--period` parsing shared by list, report and export.

use crate::errors::{AppError, AppResult};
use crate::utils::date::last_day_of_month;
use chrono::NaiveDate;

/// Inclusive date bounds; `None` means "everything".
pub type Bounds = Option<(NaiveDate, NaiveDate)>;

/// Parse a period expression.
///
/// Supported:
/// - `all` (or nothing) → no bounds
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `start:end` with both sides in the same one of those formats
pub fn parse_period(p: Option<&str>) -> AppResult<Bounds> {
    let Some(raw) = p.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = raw.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{raw} (start and end must have the same format)"
            )));
        }
        let (from, _) = single(start)?;
        let (_, to) = single(end)?;
        if from > to {
            return Err(AppError::InvalidDate(format!("{raw} (start after end)")));
        }
        return Ok(Some((from, to)));
    }

    single(raw).map(Some)
}

fn single(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(s.to_string());

    match s.len() {
        // YYYY
        4 => {
            let y: i32 = s.parse().map_err(|_| bad())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let (y, m) = s.split_once('-').ok_or_else(bad)?;
            let y: i32 = y.parse().map_err(|_| bad())?;
            let m: u32 = m.parse().map_err(|_| bad())?;
            let last = last_day_of_month(y, m).ok_or_else(bad)?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| bad())?;
            Ok((d, d))
        }
        _ => Err(bad()),
    }
}

/// Human title for a period, used by report headers and XLSX sheet titles.
pub fn describe_period(p: Option<&str>) -> String {
    let Some(p) = p.map(str::trim).filter(|p| !p.eq_ignore_ascii_case("all")) else {
        return "all saved days".to_string();
    };

    match p.len() {
        4 => format!("year {p}"),
        7 => {
            let month = crate::utils::date::month_name(&p[5..7]);
            format!("{} {}", month, &p[0..4])
        }
        10 => p.to_string(),
        _ => match p.split_once(':') {
            Some((a, b)) => format!("{a} to {b}"),
            None => p.to_string(),
        },
    }
}
