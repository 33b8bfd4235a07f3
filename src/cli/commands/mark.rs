use crate::cli::parser::{MarkArgs, MarkTarget};
use crate::config::Config;
use crate::core::gate::AttendanceRepository;
use crate::core::provider::{CLASSES, DEPARTMENTS, MockRosterProvider, RosterProvider, SECTIONS};
use crate::core::session::AttendanceSession;
use crate::db::SqliteAttendanceRepository;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::roster::{RosterCriteria, RosterKind};
use crate::models::status::Status;
use crate::ui::messages::header;
use crate::utils::colors::colorize_status;
use crate::utils::date::date_or_today;
use crate::utils::table::{Column, Table};

/// Edits requested on the command line, validated before anything is loaded.
struct EditPlan {
    all: Option<Status>,
    set: Vec<(u32, Status)>,
    clear: Vec<u32>,
}

impl EditPlan {
    fn from_args(args: &MarkArgs) -> AppResult<Self> {
        let all = match &args.all {
            Some(code) => Some(parse_status(code)?),
            None => None,
        };
        let set = args
            .set
            .iter()
            .map(|a| parse_assignment(a))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            all,
            set,
            clear: args.clear.clone(),
        })
    }
}

fn parse_status(code: &str) -> AppResult<Status> {
    Status::from_code(code).ok_or_else(|| AppError::InvalidStatus(code.to_string()))
}

/// "5=A" → (5, Absent)
fn parse_assignment(raw: &str) -> AppResult<(u32, Status)> {
    let (id, code) = raw
        .split_once('=')
        .ok_or_else(|| AppError::InvalidAssignment(raw.to_string()))?;
    let id: u32 = id
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidAssignment(raw.to_string()))?;
    Ok((id, parse_status(code.trim())?))
}

/// Match `raw` against known names, accepting the bare suffix ("3" for "Class 3").
fn canonical(known: &[&str], prefix: &str, raw: &str) -> String {
    let raw = raw.trim();
    let prefixed = format!("{prefix} {raw}");
    known
        .iter()
        .find(|k| k.eq_ignore_ascii_case(raw) || k.eq_ignore_ascii_case(&prefixed))
        .map(|k| k.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn criteria_for(target: &MarkTarget) -> AppResult<(RosterCriteria, &MarkArgs)> {
    let (MarkTarget::Students { edits, .. } | MarkTarget::Staff { edits, .. }) = target;
    let as_of = date_or_today(&edits.date).map_err(AppError::InvalidDate)?;

    let criteria = match target {
        MarkTarget::Students { class, section, .. } => RosterCriteria::students(
            &canonical(&CLASSES, "Class", class),
            &canonical(&SECTIONS, "Section", section),
            as_of,
        ),
        MarkTarget::Staff { department, .. } if department.trim().eq_ignore_ascii_case("all") => {
            RosterCriteria::staff("all", as_of)
        }
        MarkTarget::Staff { department, .. } => {
            RosterCriteria::staff(&canonical(&DEPARTMENTS, "", department), as_of)
        }
    };
    Ok((criteria, edits))
}

pub fn handle(target: &MarkTarget, cfg: &Config) -> AppResult<()> {
    let (criteria, args) = criteria_for(target)?;
    let plan = EditPlan::from_args(args)?;

    let provider = MockRosterProvider {
        student_count: cfg.student_roster_size,
        staff_count: cfg.staff_roster_size,
        latency: cfg.load_latency(),
    };
    let pool = DbPool::open_migrated(&cfg.database)?;
    let repository = SqliteAttendanceRepository::new(pool).with_latency(cfg.save_latency());

    let mut session = AttendanceSession::new(provider, repository).with_bulk_scope(cfg.bulk_scope);
    run_session(&mut session, criteria, args, &plan, cfg.separator());
    Ok(())
}

/// Load, edit, show and optionally save. Failures are reported as notices.
fn run_session<P: RosterProvider>(
    session: &mut AttendanceSession<P, SqliteAttendanceRepository>,
    criteria: RosterCriteria,
    args: &MarkArgs,
    plan: &EditPlan,
    separator: char,
) {
    header(&criteria);
    let kind = criteria.kind;
    let title = criteria.to_string();

    if session.load(criteria).is_failure() {
        return;
    }
    ttlog_or_warn(
        &session.repository().pool().conn,
        "load",
        kind.to_db_str(),
        &format!("{title} ({} people)", session.roster().len()),
    );

    if let Some(q) = &args.search {
        session.search(q);
    }

    if let Some(status) = plan.all {
        session.mark_all(status);
    }
    for (id, status) in &plan.set {
        session.mark(*id, *status);
    }
    for id in &plan.clear {
        session.clear(*id);
    }

    print_roster(session, kind, separator);

    if args.save {
        session.submit();
    }
}

fn print_roster<P: RosterProvider, R: AttendanceRepository>(
    session: &AttendanceSession<P, R>,
    kind: RosterKind,
    separator: char,
) {
    let visible = session.visible();
    let roster = session.roster();

    let mut columns = vec![
        Column::new("ID", 3),
        Column::new("Name", 16),
        Column::new(
            match kind {
                RosterKind::Students => "Roll No",
                RosterKind::Staff => "Employee ID",
            },
            8,
        ),
    ];
    if kind == RosterKind::Staff {
        columns.push(Column::new("Department", 12));
        columns.push(Column::new("Designation", 12));
    }
    columns.push(Column::new("Status", 10));

    let mut table = Table::new(columns).with_separator(separator);
    for p in &visible {
        table.add_row(row_for(p, kind));
    }

    println!();
    if visible.is_empty() {
        println!("No records match \"{}\"", session.query().trim());
    } else {
        print!("{}", table.render());
    }
    println!();

    if !session.query().trim().is_empty() {
        println!("Showing {} of {}", visible.len(), roster.len());
    }
    println!(
        "Marked: {}/{} ({} unmarked)\n",
        roster.marked_count(),
        roster.len(),
        roster.len() - roster.marked_count()
    );
}

fn row_for(p: &Person, kind: RosterKind) -> Vec<String> {
    let mut row = vec![
        p.id.to_string(),
        p.display_name.clone(),
        p.identifier.clone(),
    ];
    if kind == RosterKind::Staff {
        row.push(p.department().unwrap_or("").to_string());
        row.push(p.designation().unwrap_or("").to_string());
    }
    row.push(colorize_status(p.status));
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_parse_codes_and_names() {
        assert_eq!(parse_assignment("5=A").unwrap(), (5, Status::Absent));
        assert_eq!(parse_assignment(" 7 = late").unwrap(), (7, Status::Late));
        assert!(matches!(
            parse_assignment("5"),
            Err(AppError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("x=P"),
            Err(AppError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("5=Z"),
            Err(AppError::InvalidStatus(_))
        ));
    }

    #[test]
    fn short_group_names_are_expanded() {
        assert_eq!(canonical(&CLASSES, "Class", "3"), "Class 3");
        assert_eq!(canonical(&CLASSES, "Class", "class 2"), "Class 2");
        assert_eq!(canonical(&SECTIONS, "Section", "b"), "Section B");
        assert_eq!(canonical(&DEPARTMENTS, "", "it"), "IT");
        assert_eq!(canonical(&CLASSES, "Class", "Class 9"), "Class 9");
    }

    #[test]
    fn staff_rows_carry_department_and_designation() {
        let p = Person::staff(1, "Staff Member 1", "EMP-2000", "IT", "Clerk");
        let row = row_for(&p, RosterKind::Staff);
        assert_eq!(row.len(), 6);
        assert_eq!(row[3], "IT");
        assert_eq!(row[4], "Clerk");
    }
}
