use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_records_by_date;
use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use crate::models::roster::RosterKind;
use crate::ui::messages::{header, warning};
use crate::utils::colors::colorize_status;
use crate::utils::date::date_or_today;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date, kind } = cmd {
        let day = date_or_today(date).map_err(AppError::InvalidDate)?;
        let pool = DbPool::open_migrated(&cfg.database)?;
        let records = load_records_by_date(&pool.conn, &day, *kind)?;

        if records.is_empty() {
            warning(format!(
                "No attendance saved for {}",
                day.format("%Y-%m-%d")
            ));
            return Ok(());
        }

        // one block per saved roster; rows come sorted by kind, group and section
        for group in records.chunk_by(|a, b| {
            a.kind == b.kind && a.group_name == b.group_name && a.section == b.section
        }) {
            print_group(group, cfg.separator());
        }
    }
    Ok(())
}

fn print_group(group: &[AttendanceRecord], separator: char) {
    let first = &group[0];
    header(format!(
        "{} {} ({})",
        roster_label(first),
        first.date.format("%B %-d, %Y"),
        group.len()
    ));

    let staff = first.kind == RosterKind::Staff;
    let mut columns = vec![
        Column::new("ID", 3),
        Column::new("Name", 16),
        Column::new("Identifier", 10),
    ];
    if staff {
        columns.push(Column::new("Department", 12));
        columns.push(Column::new("Designation", 12));
    }
    columns.push(Column::new("Status", 10));

    let mut table = Table::new(columns).with_separator(separator);
    for r in group {
        let mut row = vec![
            r.person_id.to_string(),
            r.display_name.clone(),
            r.identifier.clone(),
        ];
        if staff {
            row.push(r.department.clone());
            row.push(r.designation.clone());
        }
        row.push(colorize_status(Some(r.status)));
        table.add_row(row);
    }
    print!("{}", table.render());
}

fn roster_label(r: &AttendanceRecord) -> String {
    match r.kind {
        RosterKind::Staff if r.group_name.eq_ignore_ascii_case("all") => {
            "All Departments".to_string()
        }
        RosterKind::Staff => r.group_name.clone(),
        RosterKind::Students => r.group_label(),
    }
}
