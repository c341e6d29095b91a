//! ridership-tui - Terminal chart frontend for the ridership dashboard

pub mod app;
pub mod chart;
pub mod components;
pub mod empty_state;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use app::LoadResult;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ridership_core::{DatasetParser, EngineSettings, HolidayCalendar, SystemClock};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use theme::ColorScheme;
use tokio::sync::oneshot;

/// What the TUI needs to start
pub struct TuiOptions {
    pub data_path: PathBuf,
    pub calendar: HolidayCalendar,
    pub settings: EngineSettings,
    pub no_color: bool,
}

/// Run the TUI application
pub async fn run(options: TuiOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Starts in loading mode
    let mut app = App::new(
        options.data_path.clone(),
        Arc::new(options.calendar),
        options.settings,
        ColorScheme::from_no_color(options.no_color),
        SystemClock::new(),
    );

    // Load the dataset off the render loop
    let (load_tx, mut load_rx) = oneshot::channel();
    let path = options.data_path;
    tokio::spawn(async move {
        let result = DatasetParser::new().load_async(path).await;
        let _ = load_tx.send(result);
    });

    let result = run_loop(&mut terminal, &mut app, &mut load_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    load_rx: &mut oneshot::Receiver<LoadResult>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        if app.is_loading() {
            if let Ok(result) = load_rx.try_recv() {
                app.complete_loading(result);
            }
        }

        app.tick();

        terminal.draw(|f| ui::render(f, app))?;

        // Poll faster while a card value is moving
        if event::poll(app.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
