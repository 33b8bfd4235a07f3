//! Formatting utilities used for CLI and export outputs.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"))
}

/// Remove ANSI escape sequences (colors) from a string.
pub fn strip_ansi(s: &str) -> String {
    ansi_re().replace_all(s, "").into_owned()
}

/// Display width ignoring ANSI sequences.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Pad to `width` visible columns (color codes don't count).
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(pad))
}

/// Percentage with one decimal: 83.333 → "83.3%".
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// Share of `part` in `total` as a percentage, 0 when total is 0.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 * 100.0 / total as f64;
    (raw * 10.0).round() / 10.0
}

/// Cut to `max` visible chars, ending with "..." when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_ignores_color_codes() {
        let colored = "\x1b[32mPresent\x1b[0m";
        assert_eq!(visible_width(colored), 7);
        assert_eq!(strip_ansi(&pad_right(colored, 10)), "Present   ");
    }

    #[test]
    fn rates_round_to_one_decimal() {
        assert_eq!(rate(1, 3), 33.3);
        assert_eq!(rate(2, 3), 66.7);
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(percent(rate(17, 20)), "85.0%");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }
}
