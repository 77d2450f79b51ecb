//! Format predicates used to classify a sampled cell.
//!
//! Every predicate trims surrounding whitespace first. They are deliberately
//! overlapping (`"42"` satisfies both [`is_integer`] and [`is_float`]); the
//! inference engine resolves the overlap by testing them in a fixed order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d.%m.%Y", "%m-%d-%y", "%m/%d/%y",
];

const TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y"];
const FALSE_TOKENS: &[&str] = &["false", "f", "no", "n"];

pub fn is_integer(value: &str) -> bool {
    parse_integer(value).is_some()
}

pub fn is_float(value: &str) -> bool {
    parse_float(value).is_some()
}

pub fn is_boolean(value: &str) -> bool {
    parse_boolean(value).is_some()
}

pub fn is_datetime(value: &str) -> bool {
    parse_datetime(value).is_some()
}

pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Finite floats only; `NaN` and infinities are not considered numbers.
pub fn parse_float(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

pub fn parse_boolean(value: &str) -> Option<bool> {
    let lowered = value.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parses timestamps and plain dates; a date alone maps to midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .map(|date| date.and_time(NaiveTime::default()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_accept_signs_and_padding() {
        assert!(is_integer("42"));
        assert!(is_integer("-7"));
        assert!(is_integer(" 15 "));
        assert!(!is_integer("42.0"));
        assert!(!is_integer("1,000"));
        assert!(!is_integer(""));
    }

    #[test]
    fn floats_reject_non_finite_values() {
        assert!(is_float("3.14"));
        assert!(is_float("42"));
        assert!(is_float("1e-3"));
        assert!(!is_float("NaN"));
        assert!(!is_float("inf"));
        assert!(!is_float("abc"));
    }

    #[test]
    fn booleans_accept_common_tokens() {
        assert_eq!(parse_boolean("TRUE"), Some(true));
        assert_eq!(parse_boolean("No"), Some(false));
        assert_eq!(parse_boolean("maybe"), None);
        assert!(!is_boolean("1"));
    }

    #[test]
    fn datetimes_cover_dates_and_timestamps() {
        let midnight = NaiveDate::from_ymd_opt(2023, 8, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2023-08-03"), Some(midnight));
        assert_eq!(parse_datetime("8/3/2023"), Some(midnight));
        assert_eq!(parse_datetime("03.08.2023"), Some(midnight));

        let afternoon = NaiveDate::from_ymd_opt(2023, 8, 3)
            .unwrap()
            .and_hms_opt(14, 42, 38)
            .unwrap();
        assert_eq!(parse_datetime("2023-08-03T14:42:38"), Some(afternoon));
        assert_eq!(parse_datetime("2023-08-03T14:42:38+02:00"), Some(afternoon));
        assert!(!is_datetime("hello"));
        assert!(!is_datetime("42"));
        assert!(!is_datetime(""));
    }
}
