//! Card value animation
//!
//! Each display element owns at most one transition task. The render loop
//! calls [`AnimationController::tick`] once per frame; every task derives its
//! progress from its own start time on an injected [`Clock`], writes the eased
//! value, and retires itself once progress reaches 1. Starting a new task on a
//! busy element replaces the old one, using the value currently on screen as
//! the new starting point.

use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::context::DEFAULT_ANIMATION;

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Cubic ease-out: fast start, slow finish
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Value shown at `progress` of a `from -> to` transition
///
/// Rounds half up, matching how the dashboard has always displayed counts.
pub fn interpolate(from: i64, to: i64, progress: f64) -> i64 {
    let value = from as f64 + (to as f64 - from as f64) * ease_out_cubic(progress);
    (value + 0.5).floor() as i64
}

/// One in-flight transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTask {
    pub start_value: i64,
    pub end_value: i64,
    pub started_at: Duration,
    pub duration: Duration,
}

impl AnimationTask {
    /// Elapsed fraction, clamped to `[0, 1]`
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Duration) -> i64 {
        interpolate(self.start_value, self.end_value, self.progress(now))
    }
}

/// Per-element animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Animating,
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    displayed: i64,
    task: Option<AnimationTask>,
}

/// Drives value transitions for a set of display elements
#[derive(Debug)]
pub struct AnimationController<K, C> {
    clock: C,
    duration: Duration,
    slots: HashMap<K, Slot>,
}

impl<K, C> AnimationController<K, C>
where
    K: Eq + Hash + Copy,
    C: Clock,
{
    pub fn new(clock: C) -> Self {
        Self::with_duration(clock, DEFAULT_ANIMATION)
    }

    pub fn with_duration(clock: C, duration: Duration) -> Self {
        Self {
            clock,
            duration,
            slots: HashMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a `from -> to` transition on `element`, replacing any running one
    pub fn animate(&mut self, element: K, from: i64, to: i64) {
        let task = AnimationTask {
            start_value: from,
            end_value: to,
            started_at: self.clock.now(),
            duration: self.duration,
        };
        self.slots.entry(element).or_default().task = Some(task);
    }

    /// Transition from whatever `element` currently shows
    pub fn animate_to(&mut self, element: K, to: i64) {
        let from = self.displayed(element);
        self.animate(element, from, to);
    }

    /// Advance every running task to the current time
    ///
    /// Returns true while any element is still animating, i.e. when another
    /// frame should be scheduled.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut running = false;

        for slot in self.slots.values_mut() {
            let Some(task) = slot.task else {
                continue;
            };
            slot.displayed = task.value_at(now);
            if task.progress(now) >= 1.0 {
                slot.task = None;
            } else {
                running = true;
            }
        }

        running
    }

    /// Stop a transition, leaving the current value on screen
    pub fn cancel(&mut self, element: K) {
        if let Some(slot) = self.slots.get_mut(&element) {
            slot.task = None;
        }
    }

    /// Write a value directly, dropping any running transition
    pub fn set_displayed(&mut self, element: K, value: i64) {
        self.cancel(element);
        self.slots.entry(element).or_default().displayed = value;
    }

    /// Value currently on screen; elements never written show 0
    pub fn displayed(&self, element: K) -> i64 {
        self.slots.get(&element).map(|s| s.displayed).unwrap_or(0)
    }

    pub fn state(&self, element: K) -> AnimationState {
        match self.slots.get(&element).and_then(|s| s.task) {
            Some(_) => AnimationState::Animating,
            None => AnimationState::Idle,
        }
    }

    pub fn task(&self, element: K) -> Option<AnimationTask> {
        self.slots.get(&element).and_then(|s| s.task)
    }

    pub fn is_animating(&self) -> bool {
        self.slots.values().any(|s| s.task.is_some())
    }
}
