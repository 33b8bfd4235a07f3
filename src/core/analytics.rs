//! Attendance analytics over saved records: per-group distribution,
//! overall rates and the most frequently absent people.

use crate::models::record::AttendanceRecord;
use crate::models::roster::RosterKind;
use crate::models::status::Status;
use crate::utils::formatting::rate;
use std::collections::BTreeMap;

pub const DEFAULT_TOP: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusCounts {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub leave: usize,
}

impl StatusCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Present => self.present += 1,
            Status::Absent => self.absent += 1,
            Status::Late => self.late += 1,
            Status::OnLeave => self.leave += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.late + self.leave
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Present => self.present,
            Status::Absent => self.absent,
            Status::Late => self.late,
            Status::OnLeave => self.leave,
        }
    }

    /// Percentage of `status` among all marks, one decimal.
    pub fn rate(&self, status: Status) -> f64 {
        rate(self.count(status), self.total())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub kind: RosterKind,
    pub label: String,
    pub counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbsenceEntry {
    pub kind: RosterKind,
    pub display_name: String,
    pub identifier: String,
    pub group: String,
    pub absences: usize,
    pub marked_days: usize,
}

impl AbsenceEntry {
    pub fn absence_rate(&self) -> f64 {
        rate(self.absences, self.marked_days)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub days: usize,
    pub overall: StatusCounts,
    pub groups: Vec<GroupSummary>,
    pub most_absent: Vec<AbsenceEntry>,
}

impl AttendanceSummary {
    pub fn is_empty(&self) -> bool {
        self.overall.total() == 0
    }
}

/// Summarize `records`, keeping at most `top` entries in the absence list.
pub fn summarize(records: &[AttendanceRecord], top: usize) -> AttendanceSummary {
    let mut overall = StatusCounts::default();
    let mut groups: BTreeMap<(RosterKind, String), StatusCounts> = BTreeMap::new();
    let mut people: BTreeMap<(RosterKind, String, String), AbsenceEntry> = BTreeMap::new();
    let mut days: Vec<_> = records.iter().map(|r| r.date).collect();
    days.sort();
    days.dedup();

    for r in records {
        overall.add(r.status);

        let label = r.group_label();
        groups
            .entry((r.kind, label.clone()))
            .or_default()
            .add(r.status);

        // roll numbers and employee ids are only unique within a group
        let entry = people
            .entry((r.kind, label.clone(), r.identifier.clone()))
            .or_insert_with(|| AbsenceEntry {
                kind: r.kind,
                display_name: r.display_name.clone(),
                identifier: r.identifier.clone(),
                group: label,
                absences: 0,
                marked_days: 0,
            });
        entry.marked_days += 1;
        if r.status == Status::Absent {
            entry.absences += 1;
        }
    }

    let groups = groups
        .into_iter()
        .map(|((kind, label), counts)| GroupSummary {
            kind,
            label,
            counts,
        })
        .collect();

    let mut most_absent: Vec<AbsenceEntry> = people
        .into_values()
        .filter(|e| e.absences > 0)
        .collect();
    most_absent.sort_by(|a, b| {
        b.absences
            .cmp(&a.absences)
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.group.cmp(&b.group))
    });
    most_absent.truncate(top);

    AttendanceSummary {
        days: days.len(),
        overall,
        groups,
        most_absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(
        day: u32,
        kind: RosterKind,
        group: &str,
        name: &str,
        status: Status,
    ) -> AttendanceRecord {
        let (section, department) = match kind {
            RosterKind::Students => ("Section A".to_string(), String::new()),
            RosterKind::Staff => (String::new(), group.to_string()),
        };
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            kind,
            group_name: group.to_string(),
            section,
            department,
            person_id: 1,
            display_name: name.to_string(),
            identifier: format!("ID-{name}"),
            designation: String::new(),
            status,
            saved_at: String::new(),
        }
    }

    #[test]
    fn rates_are_rounded_to_one_decimal() {
        let records = vec![
            rec(1, RosterKind::Students, "Class 1", "Ann", Status::Present),
            rec(1, RosterKind::Students, "Class 1", "Bob", Status::Present),
            rec(1, RosterKind::Students, "Class 1", "Cid", Status::Absent),
        ];
        let s = summarize(&records, DEFAULT_TOP);

        assert_eq!(s.days, 1);
        assert_eq!(s.overall.total(), 3);
        assert_eq!(s.overall.rate(Status::Present), 66.7);
        assert_eq!(s.overall.rate(Status::Absent), 33.3);
        assert_eq!(s.overall.rate(Status::Late), 0.0);
    }

    #[test]
    fn groups_split_by_class_section_and_department() {
        let records = vec![
            rec(1, RosterKind::Students, "Class 1", "Ann", Status::Present),
            rec(1, RosterKind::Students, "Class 2", "Bob", Status::Late),
            rec(1, RosterKind::Staff, "IT", "Eve", Status::OnLeave),
        ];
        let s = summarize(&records, DEFAULT_TOP);

        let labels: Vec<&str> = s.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Class 1 / Section A", "Class 2 / Section A", "IT"]
        );
        assert_eq!(s.groups[2].counts.leave, 1);
    }

    #[test]
    fn most_absent_orders_by_count_then_name() {
        let records = vec![
            rec(1, RosterKind::Students, "Class 1", "Zoe", Status::Absent),
            rec(2, RosterKind::Students, "Class 1", "Zoe", Status::Absent),
            rec(1, RosterKind::Students, "Class 1", "Max", Status::Absent),
            rec(1, RosterKind::Students, "Class 1", "Amy", Status::Absent),
            rec(2, RosterKind::Students, "Class 1", "Amy", Status::Present),
            rec(1, RosterKind::Students, "Class 1", "Ned", Status::Present),
        ];
        let s = summarize(&records, 2);

        assert_eq!(s.days, 2);
        let names: Vec<&str> = s
            .most_absent
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Zoe", "Amy"]);
        assert_eq!(s.most_absent[1].absence_rate(), 50.0);
    }

    #[test]
    fn same_identifier_in_two_classes_is_two_people() {
        let mut first = rec(1, RosterKind::Students, "Class 1", "Student 1", Status::Absent);
        let mut second = rec(1, RosterKind::Students, "Class 2", "Student 1", Status::Absent);
        first.identifier = "R-1000".into();
        second.identifier = "R-1000".into();

        let s = summarize(&[first, second], DEFAULT_TOP);

        assert_eq!(s.most_absent.len(), 2);
        let groups: Vec<&str> = s.most_absent.iter().map(|e| e.group.as_str()).collect();
        assert_eq!(groups, vec!["Class 1 / Section A", "Class 2 / Section A"]);
        assert!(s.most_absent.iter().all(|e| e.absences == 1 && e.marked_days == 1));
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let s = summarize(&[], DEFAULT_TOP);
        assert!(s.is_empty());
        assert!(s.groups.is_empty());
        assert!(s.most_absent.is_empty());
    }
}
