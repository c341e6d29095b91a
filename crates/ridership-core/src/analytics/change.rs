//! Day-over-day percentage change
//!
//! A comparison is either a rounded magnitude with a direction, or absent
//! when there is nothing to compare against. Absent is not 0%.

use serde::Serialize;

/// Sign of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Flat => "→",
        }
    }

    /// Label colour on light cards
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Direction::Up => (0x10, 0xb9, 0x81),
            Direction::Down => (0xef, 0x44, 0x44),
            Direction::Flat => (0x6b, 0x72, 0x80),
        }
    }
}

/// Percentage change between two samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChangeResult {
    /// Absolute change, rounded to one decimal
    pub magnitude_percent: f64,
    pub direction: Direction,
}

impl ChangeResult {
    /// "↑ 10.0% vs prev. day"
    pub fn label(&self) -> String {
        format!(
            "{} {:.1}% vs prev. day",
            self.direction.symbol(),
            self.magnitude_percent
        )
    }
}

/// Placeholder shown when no comparison is possible
pub const ABSENT_LABEL: &str = "—";

/// Label for an optional change
pub fn change_label(change: Option<&ChangeResult>) -> String {
    change
        .map(ChangeResult::label)
        .unwrap_or_else(|| ABSENT_LABEL.to_string())
}

/// Compare `current` against `previous`
///
/// Absent when `previous` is missing or zero. The direction comes from the
/// unrounded delta, so a tiny increase that rounds to 0.0% is still `Up`.
pub fn compute(current: f64, previous: Option<f64>) -> Option<ChangeResult> {
    let previous = previous.filter(|p| *p != 0.0 && p.is_finite())?;

    let signed = (current - previous) / previous * 100.0;
    let direction = if signed > 0.0 {
        Direction::Up
    } else if signed < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };

    Some(ChangeResult {
        magnitude_percent: round1(signed).abs(),
        direction,
    })
}

/// Integer convenience wrapper over [`compute`]
pub fn compute_counts(current: u64, previous: Option<u64>) -> Option<ChangeResult> {
    compute(current as f64, previous.map(|p| p as f64))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
