//! Explicit dashboard context
//!
//! Bundles the loaded store, the holiday calendar and engine settings so the
//! overlay and the hover dispatcher are constructed against one chart's data
//! instead of reading shared globals.

use std::sync::Arc;
use std::time::Duration;

use crate::calendar::HolidayCalendar;
use crate::store::TimeSeriesStore;

/// Default card animation length
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(500);

/// Behaviour switches for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Paint weekday holidays with their own tint
    pub holiday_aware: bool,
    /// Length of a card value transition
    pub animation_duration: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            holiday_aware: true,
            animation_duration: DEFAULT_ANIMATION,
        }
    }
}

/// Store, calendar and settings for one chart instance
#[derive(Debug, Clone)]
pub struct DashboardContext {
    store: Arc<TimeSeriesStore>,
    calendar: Arc<HolidayCalendar>,
    settings: EngineSettings,
}

impl DashboardContext {
    pub fn new(
        store: Arc<TimeSeriesStore>,
        calendar: Arc<HolidayCalendar>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            calendar,
            settings,
        }
    }

    /// Context with the built-in calendar and default settings
    pub fn with_defaults(store: TimeSeriesStore) -> Self {
        Self::new(
            Arc::new(store),
            Arc::new(HolidayCalendar::georgian_2026()),
            EngineSettings::default(),
        )
    }

    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }
}
