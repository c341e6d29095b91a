//! Integration tests for the load -> overlay -> hover -> animate flow

use ridership_core::analytics::Direction;
use ridership_core::animation::AnimationState;
use ridership_core::dispatcher::ActiveElement;
use ridership_core::overlay::{Band, BandPainter, Rgba};
use ridership_core::{
    Card, DashboardContext, DatasetParser, DayClass, EngineSettings, HolidayCalendar,
    HoverDispatcher, HoverEvent, ManualClock, Mode, OverlayRenderer, PlotArea,
};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

// Tue 26.05 (holiday) .. Mon 01.06.2026, shuffled
const DATASET: &str = r#"[
    {"date": "30.05.2026", "bus": 210000, "metro": 300000, "minibus": 50000, "cable": 900},
    {"date": "26.05.2026", "bus": 180000, "metro": 250000, "minibus": 40000, "cable": 1200},
    {"date": "01.06.2026", "bus": 400000, "metro": 520000, "minibus": 90000, "cable": 700},
    {"date": "27.05.2026", "bus": 390000, "metro": 510000, "minibus": 88000, "cable": 650},
    {"date": "31.05.2026", "bus": 190000, "metro": 280000, "minibus": 45000, "cable": 1100},
    {"date": "28.05.2026", "bus": 395000, "metro": 515000, "minibus": null, "cable": 640},
    {"date": "29.05.2026", "bus": 380000, "metro": 505000, "minibus": 86000, "cable": 660}
]"#;

fn context(holiday_aware: bool) -> DashboardContext {
    let (store, report) = DatasetParser::new()
        .parse_str(DATASET, Path::new("ttc_passengers.json"))
        .unwrap();
    assert_eq!(report.values_coerced, 1);

    DashboardContext::new(
        Arc::new(store),
        Arc::new(HolidayCalendar::georgian_2026()),
        EngineSettings {
            holiday_aware,
            animation_duration: Duration::from_millis(500),
        },
    )
}

#[derive(Default)]
struct Canvas {
    fills: Vec<(usize, Rgba)>,
}

impl BandPainter for Canvas {
    fn fill_band(&mut self, band: &Band, tint: Rgba) {
        self.fills.push((band.index, tint));
    }
}

#[test]
fn test_overlay_classifies_loaded_week() {
    let ctx = context(true);
    let overlay = OverlayRenderer::new(&ctx);

    assert_eq!(
        overlay.classes(),
        &[
            DayClass::Holiday, // Tue 26.05
            DayClass::Plain,
            DayClass::Plain,
            DayClass::Plain,
            DayClass::Weekend, // Sat 30.05
            DayClass::Weekend, // Sun 31.05
            DayClass::Plain,   // Mon 01.06
        ]
    );

    let mut canvas = Canvas::default();
    let area = PlotArea::new(0.0, 700.0, 0.0, 200.0);
    overlay.draw_before_datasets(area, |i| i as f64 * 100.0 + 50.0, &mut canvas);
    assert_eq!(
        canvas.fills,
        vec![(0, Rgba::HOLIDAY), (4, Rgba::WEEKEND), (5, Rgba::WEEKEND)]
    );
}

#[test]
fn test_weekends_only_overlay() {
    let overlay = OverlayRenderer::new(&context(false));
    assert_eq!(overlay.class_at(0), Some(DayClass::Plain));
    assert_eq!(overlay.class_at(4), Some(DayClass::Weekend));
    assert!(!overlay.holiday_aware());
}

#[test]
fn test_hover_updates_cards() {
    let clock = Rc::new(ManualClock::new());
    let mut dispatcher = HoverDispatcher::new(context(true), Rc::clone(&clock));

    // Starts on the latest day, Monday after a weekend
    assert_eq!(dispatcher.selected(), Some(6));
    let monday = dispatcher.snapshot().unwrap();
    assert_eq!(monday.mode(Mode::Bus).change.unwrap().direction, Direction::Up);

    let event = HoverEvent {
        active: vec![ActiveElement {
            dataset_index: 2,
            index: 0,
        }],
    };
    assert!(dispatcher.on_hover(&event));

    let snapshot = dispatcher.snapshot().unwrap();
    assert!(snapshot.is_holiday);
    assert_eq!(snapshot.total_change, None);
    assert_eq!(dispatcher.label(Card::Total).unwrap().text, "—");
    assert_eq!(dispatcher.state(Card::Mode(Mode::Bus)), AnimationState::Animating);

    clock.advance(Duration::from_millis(600));
    assert!(!dispatcher.tick());
    assert_eq!(dispatcher.displayed(Card::Mode(Mode::Bus)), 180_000);
    assert_eq!(dispatcher.displayed(Card::Total), 471_200);
}

#[test]
fn test_missing_mode_counts_as_zero_in_change() {
    let clock = ManualClock::new();
    let mut dispatcher = HoverDispatcher::new(context(true), &clock);

    // 28.05 has no minibus figure: 88000 -> 0 is a 100% drop
    assert!(dispatcher.select(2));
    let minibus = dispatcher.snapshot().unwrap().mode(Mode::Minibus).clone();
    assert_eq!(minibus.current, 0);
    let change = minibus.change.unwrap();
    assert_eq!(change.magnitude_percent, 100.0);
    assert_eq!(change.direction, Direction::Down);

    // 29.05 compares against that zero: absent, not 0%
    assert!(dispatcher.select(3));
    let minibus = dispatcher.snapshot().unwrap().mode(Mode::Minibus);
    assert_eq!(minibus.previous, Some(0));
    assert_eq!(minibus.change, None);
    assert_eq!(dispatcher.label(Card::Mode(Mode::Minibus)).unwrap().text, "—");
}

#[test]
fn test_oversized_count_is_coerced_before_projection() {
    let dataset = r#"[
        {"date": "01.06.2026", "bus": 1, "metro": 1, "minibus": 1, "cable": 1},
        {"date": "02.06.2026", "bus": 18446744073709551615, "metro": 1, "minibus": 1, "cable": 1}
    ]"#;
    let (store, report) = DatasetParser::new()
        .parse_str(dataset, Path::new("ttc_passengers.json"))
        .unwrap();
    assert_eq!(report.values_coerced, 1);
    assert_eq!(report.warnings().len(), 1);
    assert_eq!(store.at(1).unwrap().bus, 0);

    let calendar = HolidayCalendar::georgian_2026();
    let snapshot = ridership_core::analytics::project(&store, &calendar, 1).unwrap();
    assert_eq!(snapshot.total_current, 3);

    let ctx = DashboardContext::new(
        Arc::new(store),
        Arc::new(calendar),
        EngineSettings::default(),
    );
    let clock = ManualClock::new();
    let mut dispatcher = HoverDispatcher::new(ctx, &clock);
    assert_eq!(dispatcher.displayed(Card::Total), 3);
    assert!(dispatcher.select(0));
    clock.advance(Duration::from_secs(1));
    dispatcher.tick();
    assert_eq!(dispatcher.displayed(Card::Total), 4);
}
