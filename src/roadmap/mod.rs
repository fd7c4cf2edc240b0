//! Parsing and validation of generated roadmaps.
//!
//! The model is asked for JSON matching [`crate::prompt::response_schema`], but
//! nothing guarantees it complies. Text is parsed into a [`RoadmapDocument`]
//! and then checked by [`RoadmapDocument::validate`] before anything is written.

pub mod validate;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::RoadmapDocument;

pub use validate::{RoadmapError, ValidatedDay, ValidatedRoadmap};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p"];

/// Parse model output into a roadmap document.
///
/// A surrounding Markdown code fence (```json ... ```) is stripped first.
pub fn parse_roadmap(text: &str) -> Result<RoadmapDocument, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Calendar date of a 1-based day index: `start + (day - 1)` days.
pub fn day_date(start: NaiveDate, day: u32) -> Option<NaiveDate> {
    let offset = day.checked_sub(1)?;
    start.checked_add_days(Days::new(u64::from(offset)))
}

/// Parse a study start/end time.
///
/// Accepts RFC 3339 (converted to UTC), a naive date-time, or a bare time of
/// day which is placed on `date`.
pub fn parse_day_time(value: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
                .map(|time| date.and_time(time))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_day_one_is_start_date() {
        let start = date("2024-01-01");
        assert_eq!(day_date(start, 1), Some(start));
    }

    #[test]
    fn test_last_day_is_start_plus_n_minus_one() {
        let start = date("2024-01-01");
        assert_eq!(day_date(start, 5), Some(date("2024-01-05")));
        // crosses a month and a leap day
        assert_eq!(day_date(date("2024-02-27"), 4), Some(date("2024-03-01")));
    }

    #[test]
    fn test_day_zero_has_no_date() {
        assert_eq!(day_date(date("2024-01-01"), 0), None);
    }

    #[test]
    fn test_parse_day_time_variants() {
        let day = date("2024-01-03");
        let expected = day.and_hms_opt(9, 30, 0).unwrap();

        assert_eq!(parse_day_time("2024-01-03T09:30:00Z", day), Some(expected));
        assert_eq!(parse_day_time("2024-01-03T11:30:00+02:00", day), Some(expected));
        assert_eq!(parse_day_time("2024-01-03T09:30:00", day), Some(expected));
        assert_eq!(parse_day_time("2024-01-03 09:30", day), Some(expected));
        assert_eq!(parse_day_time("09:30", day), Some(expected));
        assert_eq!(parse_day_time("09:30 AM", day), Some(expected));
        assert_eq!(parse_day_time("after lunch", day), None);
    }

    #[test]
    fn test_parse_roadmap_strips_code_fence() {
        let text = r#"```json
{"title":"Go in 1 day","prerequisites":"none","start_date":"2024-01-01","roadmap":[]}
```"#;
        let doc = parse_roadmap(text).expect("fenced JSON should parse");
        assert_eq!(doc.title, "Go in 1 day");
        assert!(doc.roadmap.is_empty());
    }

    #[test]
    fn test_parse_roadmap_missing_field_fails() {
        let text = r#"{"title":"Go","start_date":"2024-01-01","roadmap":[]}"#;
        let err = parse_roadmap(text).unwrap_err();
        assert!(err.to_string().contains("prerequisites"));
    }

    #[test]
    fn test_parse_roadmap_rejects_non_json() {
        assert!(parse_roadmap("Here is your roadmap: day 1, learn Go").is_err());
    }
}
