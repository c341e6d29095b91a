//! TUI application state

use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use ridership_core::{
    Clock, CoreError, DashboardContext, EngineSettings, HolidayCalendar, HoverDispatcher,
    HoverEvent, LoadReport, OverlayRenderer, SystemClock, TimeSeriesStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::chart::ChartGeometry;
use crate::components::MethodologyModal;
use crate::theme::ColorScheme;

/// Frame interval while a card value is moving (~60 fps)
pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Input poll interval when nothing moves
pub const IDLE_FRAME: Duration = Duration::from_millis(100);

/// Outcome of the background dataset load
pub type LoadResult = Result<(TimeSeriesStore, LoadReport), CoreError>;

/// Loaded chart state: overlay classification and the card dispatcher
pub struct Dashboard<C> {
    pub overlay: OverlayRenderer,
    pub dispatcher: HoverDispatcher<C>,
}

impl<C: Clock> Dashboard<C> {
    pub fn new(ctx: DashboardContext, clock: C) -> Self {
        let overlay = OverlayRenderer::new(&ctx);
        let dispatcher = HoverDispatcher::new(ctx, clock);
        Self {
            overlay,
            dispatcher,
        }
    }

    pub fn store(&self) -> &TimeSeriesStore {
        self.dispatcher.context().store()
    }
}

pub enum LoadState<C> {
    Loading,
    Ready(Box<Dashboard<C>>),
    Failed(String),
}

/// TUI Application state
pub struct App<C = SystemClock> {
    pub state: LoadState<C>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Non-fatal load warnings shown in the footer
    pub status_message: Option<String>,

    pub methodology: MethodologyModal,

    pub scheme: ColorScheme,

    /// Dataset location, for the footer and placeholder screens
    pub data_path: PathBuf,

    /// Plot area from the last frame, for mouse hit testing
    pub chart: Option<ChartGeometry>,

    calendar: Arc<HolidayCalendar>,
    settings: EngineSettings,
    clock: C,
}

impl<C: Clock + Clone> App<C> {
    pub fn new(
        data_path: PathBuf,
        calendar: Arc<HolidayCalendar>,
        settings: EngineSettings,
        scheme: ColorScheme,
        clock: C,
    ) -> Self {
        Self {
            state: LoadState::Loading,
            should_quit: false,
            status_message: None,
            methodology: MethodologyModal::new(),
            scheme,
            data_path,
            chart: None,
            calendar,
            settings,
            clock,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn dashboard(&self) -> Option<&Dashboard<C>> {
        match &self.state {
            LoadState::Ready(dashboard) => Some(&**dashboard),
            _ => None,
        }
    }

    fn dashboard_mut(&mut self) -> Option<&mut Dashboard<C>> {
        match &mut self.state {
            LoadState::Ready(dashboard) => Some(&mut **dashboard),
            _ => None,
        }
    }

    /// Take over the result of the background load
    pub fn complete_loading(&mut self, result: LoadResult) {
        match result {
            Ok((store, report)) => {
                if report.values_coerced > 0 {
                    self.status_message = Some(format!(
                        "{} missing or invalid values shown as 0",
                        report.values_coerced
                    ));
                }
                info!(records = store.len(), "Dashboard ready");

                let ctx = DashboardContext::new(
                    Arc::new(store),
                    Arc::clone(&self.calendar),
                    self.settings,
                );
                self.state = LoadState::Ready(Box::new(Dashboard::new(ctx, self.clock.clone())));
            }
            Err(e) => {
                warn!(error = %e, "Dataset load failed");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Handle keyboard input; returns true if the key did something
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Esc if self.methodology.is_visible() => {
                self.methodology.hide();
                true
            }
            KeyCode::Char('m') => {
                self.methodology.toggle();
                true
            }
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            KeyCode::Home => self.jump(|_| 0),
            KeyCode::End => self.jump(|last| last),
            _ => false,
        }
    }

    fn step(&mut self, delta: isize) -> bool {
        self.dashboard_mut()
            .is_some_and(|d| d.dispatcher.step(delta))
    }

    fn jump(&mut self, target: impl Fn(usize) -> usize) -> bool {
        let Some(dashboard) = self.dashboard_mut() else {
            return false;
        };
        let last = dashboard.store().last_index();
        last.is_some_and(|last| dashboard.dispatcher.select(target(last)))
    }

    /// Pointer movement over the chart selects the nearest day
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        if !matches!(
            event.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
        ) {
            return false;
        }
        let Some(index) = self
            .chart
            .and_then(|geometry| geometry.index_at(event.column, event.row))
        else {
            return false;
        };
        self.dashboard_mut()
            .is_some_and(|d| d.dispatcher.on_hover(&HoverEvent::at_index(index)))
    }

    /// Advance card animations by one frame
    pub fn tick(&mut self) -> bool {
        self.dashboard_mut().is_some_and(|d| d.dispatcher.tick())
    }

    /// How long to wait for input before the next frame
    pub fn frame_interval(&self) -> Duration {
        match self.dashboard() {
            Some(d) if d.dispatcher.is_animating() => ANIMATION_FRAME,
            _ => IDLE_FRAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;
    use ridership_core::{Card, DailyRecord, DateKey, ManualClock, Mode};
    use std::rc::Rc;

    fn store() -> TimeSeriesStore {
        TimeSeriesStore::build(
            ["01.06.2026", "02.06.2026", "03.06.2026"]
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    DailyRecord::new(DateKey::parse(d).unwrap(), 100 * (i as u64 + 1), 0, 0, 0)
                })
                .collect(),
        )
    }

    fn app() -> (Rc<ManualClock>, App<Rc<ManualClock>>) {
        let clock = Rc::new(ManualClock::new());
        let mut app = App::new(
            PathBuf::from("ttc_passengers.json"),
            Arc::new(HolidayCalendar::georgian_2026()),
            EngineSettings::default(),
            ColorScheme::Truecolor,
            Rc::clone(&clock),
        );
        app.complete_loading(Ok((store(), LoadReport::new())));
        (clock, app)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_starts_loading() {
        let app = App::new(
            PathBuf::from("x.json"),
            Arc::new(HolidayCalendar::default()),
            EngineSettings::default(),
            ColorScheme::Truecolor,
            SystemClock::new(),
        );
        assert!(app.is_loading());
        assert!(app.dashboard().is_none());
        assert_eq!(app.frame_interval(), IDLE_FRAME);
    }

    #[test]
    fn test_load_failure_is_a_state() {
        let mut app = App::new(
            PathBuf::from("x.json"),
            Arc::new(HolidayCalendar::default()),
            EngineSettings::default(),
            ColorScheme::Truecolor,
            SystemClock::new(),
        );
        app.complete_loading(Err(CoreError::FileNotFound {
            path: PathBuf::from("x.json"),
        }));
        assert!(matches!(app.state, LoadState::Failed(ref msg) if msg.contains("x.json")));
        assert!(!app.handle_key(KeyCode::Left));
    }

    #[test]
    fn test_mouse_move_selects_nearest_day() {
        let (clock, mut app) = app();
        app.chart = Some(ChartGeometry::new(Rect::new(10, 2, 21, 8), 3));

        assert!(app.handle_mouse(mouse(MouseEventKind::Moved, 11, 4)));
        assert_eq!(app.dashboard().unwrap().dispatcher.selected(), Some(0));
        assert_eq!(app.frame_interval(), ANIMATION_FRAME);

        clock.advance(Duration::from_millis(500));
        assert!(!app.tick());
        assert_eq!(
            app.dashboard().unwrap().dispatcher.displayed(Card::Mode(Mode::Bus)),
            100
        );
        assert_eq!(app.frame_interval(), IDLE_FRAME);
    }

    #[test]
    fn test_mouse_outside_chart_is_ignored() {
        let (_clock, mut app) = app();
        app.chart = Some(ChartGeometry::new(Rect::new(10, 2, 21, 8), 3));
        assert!(!app.handle_mouse(mouse(MouseEventKind::Moved, 2, 4)));
        assert!(!app.handle_mouse(mouse(MouseEventKind::ScrollUp, 12, 4)));
        assert_eq!(app.dashboard().unwrap().dispatcher.selected(), Some(2));
    }

    #[test]
    fn test_keyboard_navigation() {
        let (_clock, mut app) = app();
        assert!(!app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.dashboard().unwrap().dispatcher.selected(), Some(1));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.dashboard().unwrap().dispatcher.selected(), Some(0));
        assert!(app.handle_key(KeyCode::End));
        assert_eq!(app.dashboard().unwrap().dispatcher.selected(), Some(2));
    }

    #[test]
    fn test_methodology_and_quit_keys() {
        let (_clock, mut app) = app();
        assert!(app.handle_key(KeyCode::Char('m')));
        assert!(app.methodology.is_visible());
        assert!(app.handle_key(KeyCode::Esc));
        assert!(!app.methodology.is_visible());
        assert!(!app.handle_key(KeyCode::Esc));

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_coerced_values_reported() {
        let clock = Rc::new(ManualClock::new());
        let mut app = App::new(
            PathBuf::from("x.json"),
            Arc::new(HolidayCalendar::default()),
            EngineSettings::default(),
            ColorScheme::Truecolor,
            clock,
        );
        let mut report = LoadReport::new();
        report.values_coerced = 2;
        app.complete_loading(Ok((store(), report)));
        assert_eq!(
            app.status_message.as_deref(),
            Some("2 missing or invalid values shown as 0")
        );
    }
}
