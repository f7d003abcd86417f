//! Date parsing and formatting helpers.
//!
//! Every date in the system, on disk and at the prompt, uses the fixed
//! `dd/MM/yyyy` pattern. Anything else, including calendar-impossible dates,
//! is a validation failure rather than a silently corrected value.

use chrono::NaiveDate;

use crate::error::{Error, Result};

pub const DATE_FMT: &str = "%d/%m/%Y";

/// Parse a `dd/MM/yyyy` date string.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT)
        .map_err(|_| Error::validation(format!("invalid date '{}', expected dd/MM/yyyy", s.trim())))
}

/// Format a date in the fixed `dd/MM/yyyy` pattern.
pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Format a date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_relative(d: NaiveDate, today: NaiveDate) -> String {
    let days = (d - today).num_days();
    if days == 0 {
        "today".into()
    } else if days == 1 {
        "tomorrow".into()
    } else if days > 1 {
        format!("in {days}d")
    } else {
        format!("{}d late", -days)
    }
}

/// Serde adapter storing [`chrono::NaiveDate`] as a `dd/MM/yyyy` string.
pub mod as_ddmmyyyy {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_FMT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FMT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FMT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_pattern_only() {
        assert_eq!(
            parse_date("13/12/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 13).unwrap()
        );
        assert!(parse_date("2024-12-13").is_err());
        assert!(parse_date("13.12.2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date("31/02/2025").is_err());
        assert!(parse_date("00/01/2025").is_err());
    }

    #[test]
    fn round_trips() {
        let d = parse_date("01/03/2026").unwrap();
        assert_eq!(format_date(d), "01/03/2026");
    }

    #[test]
    fn relative_formatting() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        assert_eq!(format_relative(today, today), "today");
        assert_eq!(format_relative(today.succ_opt().unwrap(), today), "tomorrow");
        assert_eq!(format_relative(today.pred_opt().unwrap(), today), "1d late");
    }
}
