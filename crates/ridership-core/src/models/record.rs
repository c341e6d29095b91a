//! Daily ridership records and transport modes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::date_key::DateKey;

/// Public transport mode tracked by the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Bus,
    Metro,
    Minibus,
    Cable,
}

impl Mode {
    /// All modes in card / legend order
    pub const ALL: [Mode; 4] = [Mode::Bus, Mode::Metro, Mode::Minibus, Mode::Cable];

    /// JSON field name
    pub fn key(&self) -> &'static str {
        match self {
            Mode::Bus => "bus",
            Mode::Metro => "metro",
            Mode::Minibus => "minibus",
            Mode::Cable => "cable",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Bus => "Bus",
            Mode::Metro => "Metro",
            Mode::Minibus => "Minibus",
            Mode::Cable => "Cable",
        }
    }

    /// Series colour as RGB
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Mode::Bus => (0x3b, 0x82, 0xf6),
            Mode::Metro => (0x10, 0xb9, 0x81),
            Mode::Minibus => (0xf5, 0x9e, 0x0b),
            Mode::Cable => (0x8b, 0x5c, 0xf6),
        }
    }

    /// Position in [`Mode::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Mode::Bus => 0,
            Mode::Metro => 1,
            Mode::Minibus => 2,
            Mode::Cable => 3,
        }
    }
}

/// One day of ridership, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: DateKey,
    #[serde(default)]
    pub bus: u64,
    #[serde(default)]
    pub metro: u64,
    #[serde(default)]
    pub minibus: u64,
    #[serde(default)]
    pub cable: u64,
}

impl DailyRecord {
    pub fn new(date: DateKey, bus: u64, metro: u64, minibus: u64, cable: u64) -> Self {
        Self {
            date,
            bus,
            metro,
            minibus,
            cable,
        }
    }

    /// Passenger count for one mode
    pub fn value(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Bus => self.bus,
            Mode::Metro => self.metro,
            Mode::Minibus => self.minibus,
            Mode::Cable => self.cable,
        }
    }

    /// Sum over all four modes, saturating
    pub fn total(&self) -> u64 {
        Mode::ALL
            .iter()
            .fold(0u64, |sum, m| sum.saturating_add(self.value(*m)))
    }
}

/// Record as it appears in the dataset file, before validation
///
/// The scraper writes `null` for modes it could not read and adds a
/// `weekday` name that is recomputed from the date instead of trusted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(default)]
    pub bus: Option<Value>,
    #[serde(default)]
    pub metro: Option<Value>,
    #[serde(default)]
    pub minibus: Option<Value>,
    #[serde(default)]
    pub cable: Option<Value>,
}

/// How a raw mode value was turned into a count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Non-negative integer, taken as is
    Exact,
    /// Absent or null, counted as zero
    Missing,
    /// Present but not a usable count, counted as zero
    Invalid,
}

impl RawRecord {
    pub fn field(&self, mode: Mode) -> Option<&Value> {
        match mode {
            Mode::Bus => self.bus.as_ref(),
            Mode::Metro => self.metro.as_ref(),
            Mode::Minibus => self.minibus.as_ref(),
            Mode::Cable => self.cable.as_ref(),
        }
    }
}

/// Largest count taken from a dataset
///
/// Four of these still sum within `i64`, which the cards and animations use.
pub const MAX_COUNT: u64 = i64::MAX as u64 / 4;

/// Coerce a raw JSON value into a passenger count
///
/// Counts above [`MAX_COUNT`] are not passenger counts and become zero.
pub fn coerce_count(value: Option<&Value>) -> (u64, Coercion) {
    match value {
        None | Some(Value::Null) => (0, Coercion::Missing),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                if v <= MAX_COUNT {
                    (v, Coercion::Exact)
                } else {
                    (0, Coercion::Invalid)
                }
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f <= MAX_COUNT as f64 => {
                        (f.round() as u64, Coercion::Invalid)
                    }
                    _ => (0, Coercion::Invalid),
                }
            }
        }
        Some(_) => (0, Coercion::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_sums_modes() {
        let date = DateKey::parse("01.06.2026").unwrap();
        let record = DailyRecord::new(date, 100, 200, 30, 4);
        assert_eq!(record.total(), 334);
        assert_eq!(record.value(Mode::Minibus), 30);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(Some(&json!(412345))), (412345, Coercion::Exact));
        assert_eq!(coerce_count(None), (0, Coercion::Missing));
        assert_eq!(coerce_count(Some(&Value::Null)), (0, Coercion::Missing));
        assert_eq!(coerce_count(Some(&json!("12,000"))), (0, Coercion::Invalid));
        assert_eq!(coerce_count(Some(&json!(-5))), (0, Coercion::Invalid));
        assert_eq!(coerce_count(Some(&json!(10.6))), (11, Coercion::Invalid));
    }

    #[test]
    fn test_coerce_count_rejects_oversized_values() {
        assert_eq!(coerce_count(Some(&json!(MAX_COUNT))), (MAX_COUNT, Coercion::Exact));
        assert_eq!(coerce_count(Some(&json!(u64::MAX))), (0, Coercion::Invalid));
        assert_eq!(coerce_count(Some(&json!(MAX_COUNT + 1))), (0, Coercion::Invalid));
        assert_eq!(coerce_count(Some(&json!(1e30))), (0, Coercion::Invalid));
    }

    #[test]
    fn test_total_saturates() {
        let date = DateKey::parse("02.06.2026").unwrap();
        let record = DailyRecord::new(date, u64::MAX, 1, 0, 0);
        assert_eq!(record.total(), u64::MAX);
    }

    #[test]
    fn test_raw_record_accepts_scraper_shape() {
        let raw: RawRecord = serde_json::from_value(json!({
            "date": "02.06.2026",
            "weekday": "Tuesday",
            "bus": 150,
            "metro": null,
            "cable": 12
        }))
        .unwrap();
        assert_eq!(raw.date, "02.06.2026");
        assert_eq!(coerce_count(raw.field(Mode::Bus)), (150, Coercion::Exact));
        assert_eq!(coerce_count(raw.field(Mode::Metro)).1, Coercion::Missing);
        assert_eq!(coerce_count(raw.field(Mode::Minibus)).1, Coercion::Missing);
    }
}
