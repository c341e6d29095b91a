//! Hover dispatcher
//!
//! Turns chart hover events into a selected index, projects the insight
//! snapshot for it, and pushes the figures into the five insight cards:
//! values through the animation controller, change labels immediately.

use std::collections::HashMap;
use tracing::debug;

use crate::analytics::{change_label, ChangeResult, Direction, InsightProjector, InsightSnapshot};
use crate::animation::{AnimationController, AnimationState, Clock};
use crate::context::DashboardContext;
use crate::models::Mode;

/// One insight card on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Card {
    Total,
    Mode(Mode),
}

impl Card {
    /// Cards in display order
    pub const ALL: [Card; 5] = [
        Card::Total,
        Card::Mode(Mode::Bus),
        Card::Mode(Mode::Metro),
        Card::Mode(Mode::Minibus),
        Card::Mode(Mode::Cable),
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Card::Total => "TOTAL PASSENGERS",
            Card::Mode(mode) => mode.label(),
        }
    }
}

/// Label text colour on the gradient total card
const TOTAL_LABEL_RGB: (u8, u8, u8) = (0xe6, 0xe6, 0xe6);

/// Change line under a card value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLabel {
    pub text: String,
    pub rgb: (u8, u8, u8),
    pub direction: Option<Direction>,
}

impl ChangeLabel {
    pub fn for_card(card: Card, change: Option<&ChangeResult>) -> Self {
        let direction = change.map(|c| c.direction);
        let rgb = match (card, direction) {
            (Card::Total, _) => TOTAL_LABEL_RGB,
            (Card::Mode(_), Some(direction)) => direction.rgb(),
            (Card::Mode(_), None) => Direction::Flat.rgb(),
        };

        Self {
            text: change_label(change),
            rgb,
            direction,
        }
    }
}

/// Everything the presentation needs to draw one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub card: Card,
    pub value: i64,
    pub label: &'a ChangeLabel,
    /// Holiday badge, only ever set on the total card
    pub holiday: bool,
}

/// An element under the pointer, as reported by the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveElement {
    pub dataset_index: usize,
    pub index: usize,
}

/// Pointer-hover event from the chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverEvent {
    pub active: Vec<ActiveElement>,
}

impl HoverEvent {
    /// Hover over category `index` on every dataset
    pub fn at_index(index: usize) -> Self {
        Self {
            active: Mode::ALL
                .iter()
                .enumerate()
                .map(|(dataset_index, _)| ActiveElement {
                    dataset_index,
                    index,
                })
                .collect(),
        }
    }
}

/// Keeps the insight cards in sync with the hovered index
#[derive(Debug)]
pub struct HoverDispatcher<C> {
    ctx: DashboardContext,
    animation: AnimationController<Card, C>,
    labels: HashMap<Card, ChangeLabel>,
    selected: Option<usize>,
    snapshot: Option<InsightSnapshot>,
}

impl<C: Clock> HoverDispatcher<C> {
    /// Build the dispatcher and select the most recent day
    ///
    /// Cards start out showing the latest figures, as the page is first
    /// rendered with them.
    pub fn new(ctx: DashboardContext, clock: C) -> Self {
        let animation =
            AnimationController::with_duration(clock, ctx.settings().animation_duration);
        let labels = Card::ALL
            .iter()
            .map(|card| (*card, ChangeLabel::for_card(*card, None)))
            .collect();

        let mut dispatcher = Self {
            ctx,
            animation,
            labels,
            selected: None,
            snapshot: None,
        };

        if let Some(last) = dispatcher.ctx.store().last_index() {
            if let Some(latest) = dispatcher.projector().project(last) {
                for card in Card::ALL {
                    dispatcher
                        .animation
                        .set_displayed(card, card_value(&latest, card));
                }
            }
            dispatcher.select(last);
        }

        dispatcher
    }

    fn projector(&self) -> InsightProjector<'_> {
        InsightProjector::new(self.ctx.store(), self.ctx.calendar())
    }

    /// Handle a hover event; returns true if the cards were updated
    pub fn on_hover(&mut self, event: &HoverEvent) -> bool {
        match event.active.first() {
            Some(element) => self.select(element.index),
            None => false,
        }
    }

    /// Select `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        let Some(snapshot) = self.projector().project(index) else {
            debug!(index, len = self.ctx.store().len(), "Hover index out of range, ignored");
            return false;
        };

        for card in Card::ALL {
            self.animation
                .animate_to(card, card_value(&snapshot, card));
            let change = card_change(&snapshot, card);
            self.labels
                .insert(card, ChangeLabel::for_card(card, change.as_ref()));
        }

        debug!(index, date = %snapshot.date, total = snapshot.total_current, "Insights updated");
        self.selected = Some(index);
        self.snapshot = Some(snapshot);
        true
    }

    /// Move the selection by `delta`, clamped to the series
    pub fn step(&mut self, delta: isize) -> bool {
        let Some(last) = self.ctx.store().last_index() else {
            return false;
        };
        let current = self.selected.unwrap_or(last) as isize;
        let target = (current + delta).clamp(0, last as isize) as usize;
        if Some(target) == self.selected {
            return false;
        }
        self.select(target)
    }

    /// Advance card animations; true while another frame is needed
    pub fn tick(&mut self) -> bool {
        self.animation.tick()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Value currently shown on `card`
    pub fn displayed(&self, card: Card) -> i64 {
        self.animation.displayed(card)
    }

    pub fn state(&self, card: Card) -> AnimationState {
        self.animation.state(card)
    }

    pub fn label(&self, card: Card) -> Option<&ChangeLabel> {
        self.labels.get(&card)
    }

    /// Current value, label and badge of `card`
    pub fn card(&self, card: Card) -> Option<CardView<'_>> {
        let label = self.labels.get(&card)?;
        let holiday = card == Card::Total && self.snapshot.as_ref().is_some_and(|s| s.is_holiday);
        Some(CardView {
            card,
            value: self.displayed(card),
            label,
            holiday,
        })
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn snapshot(&self) -> Option<&InsightSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn context(&self) -> &DashboardContext {
        &self.ctx
    }
}

fn card_value(snapshot: &InsightSnapshot, card: Card) -> i64 {
    let value = match card {
        Card::Total => snapshot.total_current,
        Card::Mode(mode) => snapshot.mode(mode).current,
    };
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn card_change(snapshot: &InsightSnapshot, card: Card) -> Option<ChangeResult> {
    match card {
        Card::Total => snapshot.total_change,
        Card::Mode(mode) => snapshot.mode(mode).change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{interpolate, ManualClock};
    use crate::models::{DailyRecord, DateKey};
    use crate::store::TimeSeriesStore;
    use std::rc::Rc;
    use std::time::Duration;

    fn ctx(records: &[(&str, u64)]) -> DashboardContext {
        DashboardContext::with_defaults(TimeSeriesStore::build(
            records
                .iter()
                .map(|(date, bus)| DailyRecord::new(DateKey::parse(date).unwrap(), *bus, 0, 0, 0))
                .collect(),
        ))
    }

    fn dispatcher(records: &[(&str, u64)]) -> (Rc<ManualClock>, HoverDispatcher<Rc<ManualClock>>) {
        let clock = Rc::new(ManualClock::new());
        let dispatcher = HoverDispatcher::new(ctx(records), Rc::clone(&clock));
        (clock, dispatcher)
    }

    #[test]
    fn test_initial_selection_is_last_index() {
        let (_clock, dispatcher) = dispatcher(&[("02.06.2026", 150), ("01.06.2026", 100)]);
        assert_eq!(dispatcher.selected(), Some(1));
        assert_eq!(dispatcher.displayed(Card::Mode(Mode::Bus)), 150);

        let label = dispatcher.label(Card::Mode(Mode::Bus)).unwrap();
        assert_eq!(label.text, "↑ 50.0% vs prev. day");
        assert_eq!(label.direction, Some(Direction::Up));
        assert_eq!(label.rgb, (0x10, 0xb9, 0x81));
    }

    #[test]
    fn test_hover_animates_to_new_values() {
        let (clock, mut dispatcher) = dispatcher(&[("01.06.2026", 100), ("02.06.2026", 150)]);

        assert!(dispatcher.on_hover(&HoverEvent::at_index(0)));
        assert_eq!(dispatcher.state(Card::Total), AnimationState::Animating);

        clock.advance(Duration::from_millis(500));
        assert!(!dispatcher.tick());
        assert_eq!(dispatcher.displayed(Card::Total), 100);
        assert_eq!(dispatcher.state(Card::Total), AnimationState::Idle);

        // First day: no comparison, placeholder label
        let label = dispatcher.label(Card::Total).unwrap();
        assert_eq!(label.text, "—");
        assert_eq!(label.direction, None);
    }

    #[test]
    fn test_out_of_range_hover_is_ignored() {
        let (_clock, mut dispatcher) = dispatcher(&[("01.06.2026", 100)]);
        assert!(!dispatcher.on_hover(&HoverEvent::at_index(5)));
        assert!(!dispatcher.on_hover(&HoverEvent::default()));
        assert_eq!(dispatcher.selected(), Some(0));
    }

    #[test]
    fn test_empty_store_has_no_selection() {
        let (_clock, mut dispatcher) = dispatcher(&[]);
        assert_eq!(dispatcher.selected(), None);
        assert!(dispatcher.snapshot().is_none());
        assert!(!dispatcher.on_hover(&HoverEvent::at_index(0)));
        assert!(!dispatcher.step(-1));
        assert_eq!(dispatcher.displayed(Card::Total), 0);
        assert_eq!(dispatcher.label(Card::Total).unwrap().text, "—");
    }

    #[test]
    fn test_mid_animation_hover_restarts_from_screen_value() {
        let (clock, mut dispatcher) =
            dispatcher(&[("01.06.2026", 0), ("02.06.2026", 1000), ("03.06.2026", 2000)]);

        dispatcher.select(0);
        clock.advance(Duration::from_millis(250));
        dispatcher.tick();
        let shown = dispatcher.displayed(Card::Total);
        assert_eq!(shown, 250);

        dispatcher.select(1);
        assert_eq!(dispatcher.displayed(Card::Total), 250);

        // Halfway through the new transition, measured from 250 not 2000
        clock.advance(Duration::from_millis(250));
        dispatcher.tick();
        assert_eq!(dispatcher.displayed(Card::Total), interpolate(250, 1000, 0.5));
        assert_eq!(dispatcher.displayed(Card::Total), 906);

        clock.advance(Duration::from_millis(250));
        dispatcher.tick();
        assert_eq!(dispatcher.displayed(Card::Total), 1000);
    }

    #[test]
    fn test_card_view_carries_holiday_badge() {
        // 26.05.2026 is a holiday
        let (_clock, mut dispatcher) = dispatcher(&[("25.05.2026", 10), ("26.05.2026", 20)]);
        let total = dispatcher.card(Card::Total).unwrap();
        assert!(total.holiday);
        assert_eq!(total.value, 20);
        assert!(!dispatcher.card(Card::Mode(Mode::Bus)).unwrap().holiday);

        dispatcher.select(0);
        assert!(!dispatcher.card(Card::Total).unwrap().holiday);
    }

    #[test]
    fn test_step_clamps() {
        let (_clock, mut dispatcher) =
            dispatcher(&[("01.06.2026", 1), ("02.06.2026", 2), ("03.06.2026", 3)]);
        assert!(!dispatcher.step(1));
        assert!(dispatcher.step(-5));
        assert_eq!(dispatcher.selected(), Some(0));
        assert!(dispatcher.step(1));
        assert_eq!(dispatcher.selected(), Some(1));
    }
}
