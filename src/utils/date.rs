//! Timestamp parsing and display formatting.
//!
//! Content dates are written by hand, so a few common shapes are accepted:
//! full RFC 3339 with an offset, a bare date, or a date-time without a zone.
//! Bare forms are taken as UTC. The offset written in the source is kept
//! unless the site configures a timezone, in which case display values are
//! localized to it.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Display format for rendered pages: `2021-04-10 13:17:49 +12:00`.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Parse a date string from content front matter.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2021-04-10T13:17:49+12:00`)
/// - bare date (`2021-04-10`), midnight UTC
/// - date-time without offset (`2021-04-10T13:17:49`), UTC
pub fn parse(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).fixed_offset());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt).fixed_offset());
    }

    None
}

/// Format a timestamp for page display, localized when a timezone is set.
///
/// Without a timezone the offset written in the source is preserved.
pub fn display(date: &DateTime<FixedOffset>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => date.with_timezone(&tz).format(DISPLAY_FORMAT).to_string(),
        None => date.format(DISPLAY_FORMAT).to_string(),
    }
}

/// RFC 3339 form for `<time datetime>` attributes and feeds.
pub fn rfc3339(date: &DateTime<FixedOffset>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => date.with_timezone(&tz).to_rfc3339(),
        None => date.to_rfc3339(),
    }
}

/// RFC 2822 form for RSS `pubDate` fields.
pub fn rfc2822(date: &DateTime<FixedOffset>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => date.with_timezone(&tz).to_rfc2822(),
        None => date.to_rfc2822(),
    }
}

/// `YYYY-MM-DD` form for sitemap `lastmod` fields.
pub fn ymd(date: &DateTime<FixedOffset>, tz: Option<Tz>) -> String {
    match tz {
        Some(tz) => date.with_timezone(&tz).format("%Y-%m-%d").to_string(),
        None => date.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let dt = parse("2021-04-10T13:17:49+12:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 12 * 3600);
        assert_eq!(dt.to_rfc3339(), "2021-04-10T13:17:49+12:00");
    }

    #[test]
    fn test_parse_bare_date_is_utc_midnight() {
        let dt = parse("2021-04-10").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.to_rfc3339(), "2021-04-10T00:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_datetime_is_utc() {
        let dt = parse("2021-04-10T13:17:49").unwrap();
        assert_eq!(dt.to_rfc3339(), "2021-04-10T13:17:49+00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("next tuesday").is_none());
        assert!(parse("2021-13-40").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_display_without_timezone_keeps_written_offset() {
        let dt = parse("2021-04-10T13:17:49+12:00").unwrap();
        assert_eq!(display(&dt, None), "2021-04-10 13:17:49 +12:00");
    }

    #[test]
    fn test_display_localizes_to_configured_zone() {
        // +12:00 happens to match NZST, so the wall-clock time is unchanged
        let dt = parse("2021-04-10T13:17:49+12:00").unwrap();
        let tz: Tz = "Pacific/Auckland".parse().unwrap();
        assert_eq!(display(&dt, Some(tz)), "2021-04-10 13:17:49 +12:00");
    }

    #[test]
    fn test_display_converts_utc_to_zone() {
        let dt = parse("2021-04-10T01:17:49+00:00").unwrap();
        let tz: Tz = "Pacific/Auckland".parse().unwrap();
        // NZST is UTC+12 in April (after DST ends on the first Sunday)
        assert_eq!(display(&dt, Some(tz)), "2021-04-10 13:17:49 +12:00");
    }

    #[test]
    fn test_ymd_respects_zone() {
        let dt = parse("2021-04-09T23:00:00+00:00").unwrap();
        let tz: Tz = "Pacific/Auckland".parse().unwrap();
        assert_eq!(ymd(&dt, None), "2021-04-09");
        assert_eq!(ymd(&dt, Some(tz)), "2021-04-10");
    }

    #[test]
    fn test_rfc2822() {
        let dt = parse("2021-04-10T13:17:49+12:00").unwrap();
        assert_eq!(rfc2822(&dt, None), "Sat, 10 Apr 2021 13:17:49 +1200");
    }
}
