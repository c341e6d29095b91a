//! Non-interactive commands: stats summary and export
//!
//! Resolves configuration against command-line flags and formats insight
//! snapshots for the terminal.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use ridership_core::analytics::{change_label, ChangeResult, Direction, InsightSnapshot};
use ridership_core::format::format_thousands;
use ridership_core::{DashboardConfig, DateKey, EngineSettings, Mode, TimeSeriesStore};
use std::path::PathBuf;

/// Dataset location when neither the flag nor the config names one
pub const DEFAULT_DATA_PATH: &str = "data/ttc_passengers.json";

// ============================================================================
// Resolution
// ============================================================================

/// `--data` wins over the config file, which wins over the default
pub fn resolve_data_path(flag: Option<PathBuf>, config: &DashboardConfig) -> PathBuf {
    flag.or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Config settings with `--weekends-only` applied
pub fn resolve_settings(config: &DashboardConfig, weekends_only: bool) -> EngineSettings {
    let mut settings = config.settings();
    if weekends_only {
        settings.holiday_aware = false;
    }
    settings
}

/// Index for `--date`, or the latest day
pub fn select_index(store: &TimeSeriesStore, date: Option<&str>) -> Result<Option<usize>> {
    match date {
        None => Ok(store.last_index()),
        Some(raw) => {
            let key = DateKey::parse(raw).with_context(|| format!("Invalid --date '{raw}'"))?;
            let index = store
                .position(&key)
                .with_context(|| format!("No record for {key}"))?;
            Ok(Some(index))
        }
    }
}

// ============================================================================
// Formatters
// ============================================================================

fn change_cell(change: Option<&ChangeResult>, no_color: bool) -> Cell {
    let cell = Cell::new(change_label(change));
    match (change.map(|c| c.direction), no_color) {
        (_, true) | (None, _) => cell,
        (Some(Direction::Up), false) => cell.fg(Color::Green),
        (Some(Direction::Down), false) => cell.fg(Color::Red),
        (Some(Direction::Flat), false) => cell.fg(Color::DarkGrey),
    }
}

fn previous_text(previous: Option<u64>) -> String {
    previous
        .map(|p| format_thousands(p as i64))
        .unwrap_or_else(|| "-".to_string())
}

/// Format a snapshot as table (human) or JSON
pub fn format_snapshot(snapshot: &InsightSnapshot, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let headers = ["Mode", "Passengers", "Prev. day", "Change"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    table.add_row(Row::from(vec![
        Cell::new("Total"),
        Cell::new(format_thousands(snapshot.total_current as i64)),
        Cell::new(previous_text(snapshot.total_previous)),
        change_cell(snapshot.total_change.as_ref(), no_color),
    ]));

    for mode in Mode::ALL {
        let insight = snapshot.mode(mode);
        table.add_row(Row::from(vec![
            Cell::new(mode.label()),
            Cell::new(format_thousands(insight.current as i64)),
            Cell::new(previous_text(insight.previous)),
            change_cell(insight.change.as_ref(), no_color),
        ]));
    }

    let mut heading = format!("{} ({})", snapshot.date, snapshot.date.weekday_name());
    if snapshot.is_holiday {
        heading.push_str("  🎉 Public Holiday");
    }

    format!("{heading}\n{table}")
}
