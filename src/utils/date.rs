use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `--date` value or today when omitted.
pub fn date_or_today(s: &Option<String>) -> Result<NaiveDate, String> {
    match s {
        None => Ok(today()),
        Some(raw) => parse_date(raw).ok_or_else(|| raw.clone()),
    }
}

/// "2025-09" → "September"
pub fn month_name(month: &str) -> &'static str {
    match month {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        _ => "",
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(last_day_of_month(2024, 2), Some(29));
        assert_eq!(last_day_of_month(2025, 2), Some(28));
        assert_eq!(last_day_of_month(2025, 12), Some(31));
        assert_eq!(last_day_of_month(2025, 13), None);
    }

    #[test]
    fn date_defaults_to_today() {
        assert_eq!(date_or_today(&None), Ok(today()));
        assert_eq!(
            date_or_today(&Some("2025-09-01".into())),
            Ok(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
        assert_eq!(date_or_today(&Some("01/09".into())), Err("01/09".into()));
    }
}
