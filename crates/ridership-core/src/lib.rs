//! ridership-core - Core library for the ridership dashboard
//!
//! Provides date keys, the holiday calendar, the time series store, change
//! metrics, insight snapshots, calendar overlay bands, card animation and the
//! hover dispatcher that ties them together.

pub mod analytics;
pub mod animation;
pub mod calendar;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod overlay;
pub mod parsers;
pub mod store;

pub use analytics::{ChangeResult, Direction, InsightProjector, InsightSnapshot};
pub use animation::{AnimationController, Clock, ManualClock, SystemClock};
pub use calendar::HolidayCalendar;
pub use config::DashboardConfig;
pub use context::{DashboardContext, EngineSettings};
pub use dispatcher::{Card, CardView, HoverDispatcher, HoverEvent};
pub use error::{CoreError, DateParseError, LoadReport, LoadWarning};
pub use export::{export, ExportFormat};
pub use models::{DailyRecord, DateKey, Mode};
pub use overlay::{BandPainter, DayClass, OverlayRenderer, PlotArea};
pub use parsers::DatasetParser;
pub use store::TimeSeriesStore;
