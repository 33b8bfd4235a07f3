use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::{AttendanceSummary, DEFAULT_TOP, summarize};
use crate::db::pool::DbPool;
use crate::db::queries::load_records;
use crate::errors::AppResult;
use crate::models::roster::RosterKind;
use crate::models::status::Status;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_rate, color_for_status};
use crate::utils::formatting::percent;
use crate::utils::period::{describe_period, parse_period};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { kind, period, top } = cmd {
        let bounds = parse_period(period.as_deref())?;
        let pool = DbPool::open_migrated(&cfg.database)?;
        let records = load_records(&pool.conn, bounds, *kind)?;

        let summary = summarize(&records, top.unwrap_or(DEFAULT_TOP));
        let title = format!(
            "{} attendance report for {}",
            match kind {
                Some(RosterKind::Students) => "Student",
                Some(RosterKind::Staff) => "Staff",
                None => "School",
            },
            describe_period(period.as_deref())
        );

        if summary.is_empty() {
            warning(format!("No saved attendance for {}", describe_period(period.as_deref())));
            return Ok(());
        }

        header(&title);
        println!(
            "{} marks over {} day(s)\n",
            summary.overall.total(),
            summary.days
        );

        let sep = cfg.separator();
        print_overall(&summary, sep);
        print_groups(&summary, sep);
        print_most_absent(&summary, sep);
    }
    Ok(())
}

fn print_overall(summary: &AttendanceSummary, sep: char) {
    let mut table = Table::new(vec![
        Column::new("Status", 10),
        Column::new("Count", 6),
        Column::new("Rate", 7),
    ])
    .with_separator(sep);

    for status in Status::ALL {
        table.add_row(vec![
            format!("{}{}{RESET}", color_for_status(Some(status)), status.label()),
            summary.overall.count(status).to_string(),
            percent(summary.overall.rate(status)),
        ]);
    }
    print!("{}", table.render());
}

fn print_groups(summary: &AttendanceSummary, sep: char) {
    header("By group");
    let mut table = Table::new(vec![
        Column::new("Group", 20),
        Column::new("Present", 7),
        Column::new("Absent", 6),
        Column::new("Late", 4),
        Column::new("Leave", 5),
        Column::new("Present %", 9),
    ])
    .with_separator(sep);

    for g in &summary.groups {
        let rate = g.counts.rate(Status::Present);
        table.add_row(vec![
            g.label.clone(),
            g.counts.present.to_string(),
            g.counts.absent.to_string(),
            g.counts.late.to_string(),
            g.counts.leave.to_string(),
            format!("{}{}{RESET}", color_for_rate(rate), percent(rate)),
        ]);
    }
    print!("{}", table.render());
}

fn print_most_absent(summary: &AttendanceSummary, sep: char) {
    header("Frequently absent");
    if summary.most_absent.is_empty() {
        println!("Nobody was absent in this period.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Name", 16),
        Column::new("Identifier", 10),
        Column::new("Group", 20),
        Column::new("Absences", 8),
        Column::new("Absence %", 9),
    ])
    .with_separator(sep);

    for e in &summary.most_absent {
        table.add_row(vec![
            e.display_name.clone(),
            e.identifier.clone(),
            e.group.clone(),
            e.absences.to_string(),
            percent(e.absence_rate()),
        ]);
    }
    print!("{}", table.render());
}
