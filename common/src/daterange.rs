//! Module handling dates given on the command line
//!

use chrono::{DateTime, Datelike, TimeZone, Utc};
use eyre::{eyre, Result};

/// Parse any date `dateparser` understands into an exact instant.  Dates without a timezone
/// are taken as UTC.
///
pub fn parse_instant(date: &str) -> Result<DateTime<Utc>> {
    dateparser::parse_with_timezone(date, &Utc).map_err(|e| eyre!("bad date {date}: {e}"))
}

/// Parse a date and normalise it at the beginning of the day.
///
pub fn parse_day(date: &str) -> Result<DateTime<Utc>> {
    let day = parse_instant(date)?;

    Utc.with_ymd_and_hms(day.year(), day.month(), day.day(), 0, 0, 0)
        .single()
        .ok_or_else(|| eyre!("bad date {date}"))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2025-03-14", "2025-03-14T00:00:00Z")]
    #[case("2025-03-14 17:42:10", "2025-03-14T00:00:00Z")]
    #[case("2025-03-14T23:59:59Z", "2025-03-14T00:00:00Z")]
    fn test_parse_day(#[case] inp: &str, #[case] out: &str) {
        let day = parse_day(inp).unwrap();
        let out: DateTime<Utc> = out.parse().unwrap();
        assert_eq!(out, day);
    }

    #[test]
    fn test_parse_instant() {
        let t = parse_instant("2025-03-14T17:42:10Z").unwrap();
        assert_eq!(17, t.hour());
    }

    #[rstest]
    #[case("2025-65-01")]
    #[case("yesterday-ish")]
    #[case("")]
    fn test_parse_day_bad(#[case] inp: &str) {
        assert!(parse_day(inp).is_err());
    }
}
