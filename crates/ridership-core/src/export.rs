//! Export of the loaded series
//!
//! Writes the sorted store back out as CSV or as JSON in the dataset's own
//! shape, for the dashboard's download action.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::Mode;
use crate::store::TimeSeriesStore;

/// Output format for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct ExportRow {
    date: String,
    weekday: String,
    bus: u64,
    metro: u64,
    minibus: u64,
    cable: u64,
}

fn rows(store: &TimeSeriesStore) -> impl Iterator<Item = ExportRow> + '_ {
    store.iter().map(|r| ExportRow {
        date: r.date.to_string(),
        weekday: r.date.weekday_name(),
        bus: r.bus,
        metro: r.metro,
        minibus: r.minibus,
        cable: r.cable,
    })
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Export to CSV, oldest day first
///
/// CSV columns: Date, Weekday, Bus, Metro, Minibus, Cable, Total
pub fn export_to_csv(store: &TimeSeriesStore, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    let header: Vec<&str> = Mode::ALL.iter().map(|m| m.label()).collect();
    writeln!(writer, "Date,Weekday,{},Total", header.join(","))
        .context("Failed to write CSV header")?;

    for record in store.iter() {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            record.date,
            record.date.weekday_name(),
            record.bus,
            record.metro,
            record.minibus,
            record.cable,
            record.total()
        )
        .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

/// Export to pretty JSON in the dataset's record shape
pub fn export_to_json(store: &TimeSeriesStore, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;
    let rows: Vec<ExportRow> = rows(store).collect();

    serde_json::to_writer_pretty(&mut writer, &rows).context("Failed to serialize records")?;
    writer.flush().context("Failed to flush JSON file")?;
    Ok(())
}

/// Export in the requested format
pub fn export(store: &TimeSeriesStore, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => export_to_csv(store, path),
        ExportFormat::Json => export_to_json(store, path),
    }
}
