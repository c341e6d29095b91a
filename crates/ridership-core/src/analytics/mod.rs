//! Ridership analytics
//!
//! Day-over-day change metrics and per-day insight snapshots for the
//! total and each transport mode.

pub mod change;
pub mod insights;


pub use change::{change_label, compute, compute_counts, ChangeResult, Direction, ABSENT_LABEL};
pub use insights::{project, InsightProjector, InsightSnapshot, ModeInsight};
