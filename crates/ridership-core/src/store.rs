//! Time series store
//!
//! Holds the daily records sorted ascending by date. Built once from the
//! loaded dataset and read-only afterwards, so it can be shared freely
//! behind an `Arc` between the overlay, the dispatcher and the renderer.

use tracing::{debug, warn};

use crate::error::{CoreError, LoadReport};
use crate::models::{coerce_count, Coercion, DailyRecord, DateKey, Mode, RawRecord};

/// Ordered, immutable sequence of daily records
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    records: Vec<DailyRecord>,
}

impl TimeSeriesStore {
    /// Build from records in any order
    ///
    /// Uses a stable sort, so records sharing a date keep their input order.
    /// An empty input yields a valid empty store.
    pub fn build(mut records: Vec<DailyRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        debug!(records = records.len(), "Time series store built");
        Self { records }
    }

    /// Validate raw dataset records and build the store
    ///
    /// Any malformed date rejects the whole input: sorting assumes every
    /// record has a date. Unusable mode values become zero and are noted
    /// in `report`.
    pub fn from_raw(raw: Vec<RawRecord>, report: &mut LoadReport) -> Result<Self, CoreError> {
        let mut records = Vec::with_capacity(raw.len());

        for (index, entry) in raw.iter().enumerate() {
            let date = DateKey::parse(entry.date.trim_matches('\u{feff}'))
                .map_err(|source| CoreError::InvalidRecord { index, source })?;

            let mut counts = [0u64; 4];
            for mode in Mode::ALL {
                let (value, coercion) = coerce_count(entry.field(mode));
                counts[mode.index()] = value;
                match coercion {
                    Coercion::Exact => {}
                    Coercion::Missing => report.values_coerced += 1,
                    Coercion::Invalid => {
                        report.values_coerced += 1;
                        warn!(%date, mode = mode.key(), "Unusable passenger count, using {}", value);
                        report.add_warning(
                            format!("record {} ({})", index, date),
                            format!("{} value is not a passenger count", mode.key()),
                        );
                    }
                }
            }

            records.push(DailyRecord::new(
                date, counts[0], counts[1], counts[2], counts[3],
            ));
        }

        report.records_loaded = records.len();
        Ok(Self::build(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the most recent record
    pub fn last_index(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    /// Bounds-checked access
    pub fn at(&self, index: usize) -> Result<&DailyRecord, CoreError> {
        self.records.get(index).ok_or(CoreError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn get(&self, index: usize) -> Option<&DailyRecord> {
        self.records.get(index)
    }

    /// Record just before `index`, absent at index 0 or out of range
    pub fn previous_of(&self, index: usize) -> Option<&DailyRecord> {
        if index == 0 || index >= self.records.len() {
            return None;
        }
        self.records.get(index - 1)
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter()
    }

    pub fn dates(&self) -> Vec<DateKey> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Values of one mode aligned with store indices
    pub fn series(&self, mode: Mode) -> Vec<u64> {
        self.records.iter().map(|r| r.value(mode)).collect()
    }

    /// Daily totals aligned with store indices
    pub fn totals(&self) -> Vec<u64> {
        self.records.iter().map(DailyRecord::total).collect()
    }

    /// Largest single-mode value, used for the y axis
    pub fn max_mode_value(&self) -> u64 {
        self.records
            .iter()
            .flat_map(|r| Mode::ALL.map(|m| r.value(m)))
            .max()
            .unwrap_or(0)
    }

    /// Index of an exact date, if present
    pub fn position(&self, date: &DateKey) -> Option<usize> {
        self.records.binary_search_by_key(date, |r| r.date).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(date: &str, bus: u64) -> DailyRecord {
        DailyRecord::new(DateKey::parse(date).unwrap(), bus, 0, 0, 0)
    }

    #[test]
    fn test_build_sorts_ascending() {
        let store = TimeSeriesStore::build(vec![
            record("03.06.2026", 3),
            record("01.06.2026", 1),
            record("31.05.2026", 0),
            record("02.06.2026", 2),
        ]);

        assert_eq!(store.len(), 4);
        for i in 0..store.len() - 1 {
            assert!(store.at(i).unwrap().date < store.at(i + 1).unwrap().date);
        }
        assert_eq!(store.series(Mode::Bus), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_build_is_stable_for_equal_dates() {
        let store = TimeSeriesStore::build(vec![
            record("02.06.2026", 7),
            record("01.06.2026", 1),
            record("02.06.2026", 8),
        ]);
        assert_eq!(store.series(Mode::Bus), vec![1, 7, 8]);
    }

    #[test]
    fn test_empty_store() {
        let store = TimeSeriesStore::build(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.last_index(), None);
        assert!(store.get(0).is_none());
        assert!(store.previous_of(0).is_none());
        assert_eq!(store.max_mode_value(), 0);
    }

    #[test]
    fn test_at_out_of_range() {
        let store = TimeSeriesStore::build(vec![record("01.06.2026", 1)]);
        assert!(matches!(
            store.at(1),
            Err(CoreError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_previous_of() {
        let store = TimeSeriesStore::build(vec![record("01.06.2026", 1), record("02.06.2026", 2)]);
        assert!(store.previous_of(0).is_none());
        assert_eq!(store.previous_of(1).unwrap().bus, 1);
        assert!(store.previous_of(2).is_none());
    }

    #[test]
    fn test_position_finds_date() {
        let store = TimeSeriesStore::build(vec![record("02.06.2026", 2), record("01.06.2026", 1)]);
        assert_eq!(store.position(&DateKey::parse("02.06.2026").unwrap()), Some(1));
        assert_eq!(store.position(&DateKey::parse("03.06.2026").unwrap()), None);
    }

    #[test]
    fn test_from_raw_rejects_whole_set_on_bad_date() {
        let raw: Vec<RawRecord> = serde_json::from_value(json!([
            {"date": "01.06.2026", "bus": 1},
            {"date": "2026-06-02", "bus": 2}
        ]))
        .unwrap();

        let mut report = LoadReport::new();
        let err = TimeSeriesStore::from_raw(raw, &mut report).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_from_raw_coerces_missing_values() {
        let raw: Vec<RawRecord> = serde_json::from_value(json!([
            {"date": "02.06.2026", "bus": 150, "metro": null, "minibus": "n/a", "cable": 9},
            {"date": "01.06.2026", "bus": 100, "metro": 10, "minibus": 5, "cable": 1}
        ]))
        .unwrap();

        let mut report = LoadReport::new();
        let store = TimeSeriesStore::from_raw(raw, &mut report).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(report.records_loaded, 2);
        assert_eq!(report.values_coerced, 2);
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(store.at(1).unwrap().total(), 159);
    }
}
