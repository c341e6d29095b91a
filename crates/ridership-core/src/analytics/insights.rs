//! Insight snapshots for a selected day
//!
//! A snapshot bundles the current value, the previous day's value and the
//! change for the total and for each mode. It is a pure function of the
//! store and the index: nothing is cached between calls.

use serde::Serialize;

use super::change::{compute_counts, ChangeResult};
use crate::calendar::HolidayCalendar;
use crate::models::{DateKey, Mode};
use crate::store::TimeSeriesStore;

/// Current / previous / change for one mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeInsight {
    pub mode: Mode,
    pub current: u64,
    /// Absent on the first day of the series
    pub previous: Option<u64>,
    pub change: Option<ChangeResult>,
}

/// Everything the insight cards show for one index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSnapshot {
    pub index: usize,
    pub date: DateKey,
    pub is_holiday: bool,
    pub total_current: u64,
    pub total_previous: Option<u64>,
    pub total_change: Option<ChangeResult>,
    /// In [`Mode::ALL`] order
    pub per_mode: [ModeInsight; 4],
}

impl InsightSnapshot {
    pub fn mode(&self, mode: Mode) -> &ModeInsight {
        &self.per_mode[mode.index()]
    }
}

/// Derives snapshots from a store
#[derive(Debug, Clone, Copy)]
pub struct InsightProjector<'a> {
    store: &'a TimeSeriesStore,
    calendar: &'a HolidayCalendar,
}

impl<'a> InsightProjector<'a> {
    pub fn new(store: &'a TimeSeriesStore, calendar: &'a HolidayCalendar) -> Self {
        Self { store, calendar }
    }

    /// Snapshot for `index`, `None` when the index is out of range
    pub fn project(&self, index: usize) -> Option<InsightSnapshot> {
        project(self.store, self.calendar, index)
    }

    /// Snapshot for the most recent day
    pub fn latest(&self) -> Option<InsightSnapshot> {
        self.store.last_index().and_then(|i| self.project(i))
    }
}

/// Compute the snapshot for `index` against its predecessor
pub fn project(
    store: &TimeSeriesStore,
    calendar: &HolidayCalendar,
    index: usize,
) -> Option<InsightSnapshot> {
    let current = store.get(index)?;
    let previous = store.previous_of(index);

    let total_current = current.total();
    let total_previous = previous.map(|p| p.total());

    let per_mode = Mode::ALL.map(|mode| {
        let value = current.value(mode);
        let prev = previous.map(|p| p.value(mode));
        ModeInsight {
            mode,
            current: value,
            previous: prev,
            change: compute_counts(value, prev),
        }
    });

    Some(InsightSnapshot {
        index,
        date: current.date,
        is_holiday: calendar.contains(&current.date),
        total_current,
        total_previous,
        total_change: compute_counts(total_current, total_previous),
        per_mode,
    })
}
