//! Calendar date keys in the dataset's `DD.MM.YYYY` encoding
//!
//! Dates are civil dates: no time of day, no timezone. Ordering is
//! chronological, weekday follows the proleptic Gregorian calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DateParseError;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").expect("valid date regex"));

/// A calendar date parsed from `DD.MM.YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parse the exact `DD.MM.YYYY` layout (zero-padded day and month)
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let caps = DATE_RE.captures(input).ok_or_else(|| DateParseError::Shape {
            input: input.to_string(),
        })?;

        // The regex guarantees ASCII digits of bounded width
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);

        Self::from_dmy(day, month, year).ok_or_else(|| DateParseError::OutOfRange {
            input: input.to_string(),
        })
    }

    /// Build from calendar components, `None` if not a real date
    pub fn from_dmy(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub fn weekday(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Full English weekday name ("Monday"), as written by the scraper
    pub fn weekday_name(&self) -> String {
        self.0.format("%A").to_string()
    }

    /// Short axis label: abbreviated month and unpadded day ("Jun 1")
    pub fn short_label(&self) -> String {
        self.0.format("%b %-d").to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}.{:02}.{:04}",
            self.day(),
            self.month(),
            self.year()
        )
    }
}

impl FromStr for DateKey {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_components() {
        for text in ["01.06.2026", "29.02.2024", "31.12.1999", "14.10.2026"] {
            let key = DateKey::parse(text).unwrap();
            assert_eq!(key.to_string(), text);
            let again = DateKey::from_dmy(key.day(), key.month(), key.year()).unwrap();
            assert_eq!(again, key);
        }
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        for text in ["1.06.2026", "01-06-2026", "2026.06.01", "01.06.26", " 01.06.2026", ""] {
            assert!(
                matches!(DateKey::parse(text), Err(DateParseError::Shape { .. })),
                "{text} should be a shape error"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        for text in ["32.01.2026", "00.01.2026", "15.13.2026", "29.02.2026", "31.04.2026"] {
            assert!(
                matches!(DateKey::parse(text), Err(DateParseError::OutOfRange { .. })),
                "{text} should be out of range"
            );
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = DateKey::parse("31.12.2025").unwrap();
        let b = DateKey::parse("01.01.2026").unwrap();
        let c = DateKey::parse("02.01.2026").unwrap();
        assert!(a < b && b < c);
        assert_eq!(b, DateKey::parse("01.01.2026").unwrap());
    }

    #[test]
    fn test_weekday_sunday_is_zero() {
        // 07.06.2026 is a Sunday, 06.06.2026 a Saturday, 02.06.2026 a Tuesday
        assert_eq!(DateKey::parse("07.06.2026").unwrap().weekday(), 0);
        assert_eq!(DateKey::parse("06.06.2026").unwrap().weekday(), 6);
        assert_eq!(DateKey::parse("02.06.2026").unwrap().weekday(), 2);
        assert!(DateKey::parse("06.06.2026").unwrap().is_weekend());
        assert!(!DateKey::parse("03.06.2026").unwrap().is_weekend());
    }

    #[test]
    fn test_labels() {
        let key = DateKey::parse("01.06.2026").unwrap();
        assert_eq!(key.short_label(), "Jun 1");
        assert_eq!(key.weekday_name(), "Monday");
    }

    #[test]
    fn test_serde_uses_text_encoding() {
        let key = DateKey::parse("09.05.2026").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"09.05.2026\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"2026-05-09\"").is_err());
    }
}
