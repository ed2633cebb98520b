// src/utils/date.rs

//! Release date parsing.
//!
//! Infobox dates come in several layouts. Each layout is tried in order and
//! the first one that parses wins.

use chrono::NaiveDate;

use super::strip_whitespace;

/// Accepted layouts, most common first.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"];

/// Canonical output layout.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Digits required in the year of every layout.
const YEAR_DIGITS: usize = 4;

/// Parse a raw date string with the first matching layout.
///
/// Whitespace anywhere in the input is ignored. The year must be exactly
/// four digits.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let compact = strip_whitespace(raw);
    if compact.is_empty() {
        return None;
    }
    let year_digits = compact.chars().take_while(|c| c.is_ascii_digit()).count();
    if year_digits != YEAR_DIGITS {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&compact, format).ok())
}

/// Normalize a raw date string to `YYYY-MM-DD`.
///
/// Returns `None` for blank input, and logs a warning when the input is not
/// blank but no layout matches.
pub fn normalize_date(raw: &str) -> Option<String> {
    let compact = strip_whitespace(raw);
    if compact.is_empty() {
        return None;
    }
    match parse_date(&compact) {
        Some(date) => Some(date.format(CANONICAL_FORMAT).to_string()),
        None => {
            log::warn!("Failed to parse date: {compact}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_date_is_unchanged() {
        assert_eq!(normalize_date("2020-01-05").as_deref(), Some("2020-01-05"));
    }

    #[test]
    fn slash_date() {
        assert_eq!(normalize_date("2019/12/31").as_deref(), Some("2019-12-31"));
    }

    #[test]
    fn cjk_date() {
        assert_eq!(
            normalize_date("2020年01月05日").as_deref(),
            Some("2020-01-05")
        );
        assert_eq!(normalize_date("2020年1月5日").as_deref(), Some("2020-01-05"));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(
            normalize_date(" 2020 年\n01月 05日\t").as_deref(),
            Some("2020-01-05")
        );
    }

    #[test]
    fn blank_is_absent() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date(" \r\n "), None);
    }

    #[test]
    fn garbage_is_absent() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date("2020年"), None);
        assert_eq!(normalize_date("2020-02-30"), None);
    }

    #[test]
    fn short_or_long_years_are_rejected() {
        assert_eq!(normalize_date("21/04/01"), None);
        assert_eq!(normalize_date("202-01-05"), None);
        assert_eq!(normalize_date("20200-01-05"), None);
        assert_eq!(normalize_date("20年1月5日"), None);
    }

    #[test]
    fn partial_dates_are_rejected() {
        assert_eq!(parse_date("2020-01"), None);
        assert_eq!(parse_date("2020-01-05 extra"), None);
    }
}
