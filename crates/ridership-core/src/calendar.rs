//! Public holiday calendar
//!
//! A fixed set of dates for one supported year. Dates outside that year are
//! never holidays, which is a known limitation of a hard-coded list.

use std::collections::BTreeSet;

use crate::error::DateParseError;
use crate::models::DateKey;

/// Georgian public holidays for 2026
const GEORGIAN_HOLIDAYS_2026: [&str; 16] = [
    "01.01.2026", "02.01.2026", "07.01.2026", "19.01.2026",
    "03.03.2026", "08.03.2026", "18.04.2026", "19.04.2026",
    "20.04.2026", "21.04.2026", "09.05.2026", "12.05.2026",
    "26.05.2026", "28.08.2026", "14.10.2026", "23.11.2026",
];

/// Immutable holiday set, built once per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<DateKey>,
}

impl HolidayCalendar {
    pub fn from_dates(dates: impl IntoIterator<Item = DateKey>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parse every entry, failing on the first malformed date
    pub fn from_strings<S: AsRef<str>>(
        dates: impl IntoIterator<Item = S>,
    ) -> Result<Self, DateParseError> {
        let dates = dates
            .into_iter()
            .map(|s| DateKey::parse(s.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { dates })
    }

    /// Built-in calendar shipped with the dashboard
    pub fn georgian_2026() -> Self {
        Self::from_dates(
            GEORGIAN_HOLIDAYS_2026
                .iter()
                .filter_map(|s| DateKey::parse(s).ok()),
        )
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &DateKey> {
        self.dates.iter()
    }
}
