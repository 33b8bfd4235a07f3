use chrono::NaiveDate;

/// Excel serial number for an ISO date ("YYYY-MM-DD"), with its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some(("yyyy-mm-dd", (d - epoch).num_days() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_become_serials() {
        assert_eq!(parse_to_excel_date("1900-01-01"), Some(("yyyy-mm-dd", 2.0)));
        assert_eq!(parse_to_excel_date("2025-09-01"), Some(("yyyy-mm-dd", 45901.0)));
    }

    #[test]
    fn other_text_is_not_a_date() {
        assert_eq!(parse_to_excel_date("Class 1"), None);
        assert_eq!(parse_to_excel_date("2025-09-01T08:00:00+00:00"), None);
    }
}
