//! ridership - Tbilisi public transport ridership dashboard

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ridership_core::{
    export, DashboardConfig, DatasetParser, ExportFormat, HolidayCalendar, InsightProjector,
};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ridership",
    version,
    about = "Tbilisi public transport ridership dashboard",
    long_about = "Interactive terminal chart of daily passenger counts for bus, metro,\n\
                  minibus and cable car, with weekend and public-holiday bands and\n\
                  day-over-day change cards that follow the mouse.\n\
                  \n\
                  Examples:\n\
                    ridership                                  # Run TUI (default)\n\
                    ridership --weekends-only                  # Bands for weekends only\n\
                    ridership stats                            # Latest day summary\n\
                    ridership stats --date 26.05.2026 --json   # One day as JSON\n\
                    ridership export --format csv --output ridership.csv\n\
                  \n\
                  Environment Variables:\n\
                    RIDERSHIP_DATA                   # Dataset file (JSON array of daily records)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Dataset file (default: data/ttc_passengers.json)
    #[arg(long, env = "RIDERSHIP_DATA")]
    data: Option<PathBuf>,

    /// Config file (default: <config dir>/ridership/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shade weekends only, ignoring public holidays
    #[arg(long)]
    weekends_only: bool,

    /// Disable colors
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Print the insight summary for one day and exit
    Stats {
        /// Day to summarize, DD.MM.YYYY (default: latest)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the sorted dataset to a file
    Export {
        #[arg(long, value_enum)]
        format: FormatArg,
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = cli.mode.unwrap_or(Mode::Tui);

    init_tracing(matches!(mode, Mode::Tui), cli.no_color)?;

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path),
        None => DashboardConfig::load_default(),
    }
    .context("Failed to load config")?;

    let data_path = cli::resolve_data_path(cli.data, &config);
    let settings = cli::resolve_settings(&config, cli.weekends_only);
    let calendar = config
        .calendar()
        .context("Invalid holiday list in config")?;

    match mode {
        Mode::Tui => {
            ridership_tui::run(ridership_tui::TuiOptions {
                data_path,
                calendar,
                settings,
                no_color: cli.no_color,
            })
            .await?;
        }
        Mode::Stats { date, json } => {
            run_stats(data_path, &calendar, date.as_deref(), json, cli.no_color).await?;
        }
        Mode::Export { format, output } => {
            run_export(data_path, format.into(), output).await?;
        }
    }

    Ok(())
}

/// Logs go to a file while the TUI owns the terminal, to stderr otherwise
fn init_tracing(tui: bool, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("ridership");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let path = dir.join("ridership.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(!no_color)
            .init();
    }
    Ok(())
}

async fn run_stats(
    data_path: PathBuf,
    calendar: &HolidayCalendar,
    date: Option<&str>,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let (store, report) = DatasetParser::new()
        .load_async(data_path)
        .await
        .context("Failed to load dataset")?;

    let Some(index) = cli::select_index(&store, date)? else {
        println!("No data available");
        return Ok(());
    };
    let snapshot = InsightProjector::new(&store, calendar)
        .project(index)
        .context("Selected day is out of range")?;

    println!("{}", cli::format_snapshot(&snapshot, json, no_color));

    if !json && report.values_coerced > 0 {
        println!();
        println!("Warnings:");
        for warning in report.warnings() {
            println!("  - {}: {}", warning.source, warning.message);
        }
    }

    Ok(())
}

async fn run_export(data_path: PathBuf, format: ExportFormat, output: PathBuf) -> Result<()> {
    let (store, _report) = DatasetParser::new()
        .load_async(data_path)
        .await
        .context("Failed to load dataset")?;

    export(&store, format, &output)?;
    println!("Exported {} days to {}", store.len(), output.display());
    Ok(())
}
