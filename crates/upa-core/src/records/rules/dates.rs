//! Date normalization for admission and discharge fields.

use chrono::{Datelike, NaiveDate};

use super::patterns::DATE_DMY;
use crate::models::record::{IN_CARE, NOT_INFORMED};

/// Normalize a date field value.
///
/// Empty, absent, and sentinel inputs map to [`IN_CARE`]. A valid
/// `dd/mm/yyyy` date is re-emitted in the same format. Anything else also
/// falls back to [`IN_CARE`]; this never fails.
pub fn validate_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return IN_CARE.to_string();
    };

    if raw.is_empty() || raw == IN_CARE || raw == NOT_INFORMED {
        return IN_CARE.to_string();
    }

    match parse_dmy(raw) {
        Some(date) => format_dmy(date),
        None => IN_CARE.to_string(),
    }
}

/// Parse a strict `dd/mm/yyyy` date.
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as `dd/mm/yyyy`.
pub fn format_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date_unchanged() {
        assert_eq!(validate_date(Some("15/01/2024")), "15/01/2024");
        assert_eq!(validate_date(Some("29/02/2024")), "29/02/2024");
        assert_eq!(validate_date(Some("01/12/1999")), "01/12/1999");
    }

    #[test]
    fn test_sentinels_and_empty() {
        assert_eq!(validate_date(None), IN_CARE);
        assert_eq!(validate_date(Some("")), IN_CARE);
        assert_eq!(validate_date(Some(NOT_INFORMED)), IN_CARE);
        assert_eq!(validate_date(Some(IN_CARE)), IN_CARE);
    }

    #[test]
    fn test_malformed_falls_back() {
        assert_eq!(validate_date(Some("31-02-2024")), IN_CARE);
        assert_eq!(validate_date(Some("not a date")), IN_CARE);
        assert_eq!(validate_date(Some("31/02/2024")), IN_CARE);
        assert_eq!(validate_date(Some("29/02/2023")), IN_CARE);
        assert_eq!(validate_date(Some("1/2/2024")), IN_CARE);
        assert_eq!(validate_date(Some("2024-01-15")), IN_CARE);
        assert_eq!(validate_date(Some(" 15/01/2024")), IN_CARE);
    }

    #[test]
    fn test_parse_dmy() {
        assert_eq!(parse_dmy("05/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_dmy("05/13/2024"), None);
    }
}
