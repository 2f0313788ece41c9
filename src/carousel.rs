use std::time::Duration;

use tracing::{debug, info, warn};

use crate::constants::*;
use crate::state::{CarouselState, InertReason};
use crate::surface::{ElementId, Role, Surface};
use crate::timer::{Scheduler, TimerId, TimerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show(usize),
    Prev,
    Next,
}

#[derive(Debug)]
pub struct Bound {
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    current: usize,
    timer: TimerSlot,
}

impl Bound {
    // Past the end goes back to the first slide, before the start goes to
    // the last one. Holds for any distance out of range, not just one step.
    fn resolve(&self, target: isize) -> usize {
        let len = self.slides.len();
        match usize::try_from(target) {
            Ok(index) if index < len => index,
            Ok(_) => 0,
            Err(_) => len - 1,
        }
    }

    /// Actions bound to `element`, in the order their listeners were registered.
    fn actions_for(&self, element: ElementId) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .indicators
            .iter()
            .enumerate()
            .filter(|(_, el)| **el == element)
            .map(|(i, _)| Action::Show(i))
            .collect();
        if self.prev == Some(element) {
            actions.push(Action::Prev);
        }
        if self.next == Some(element) {
            actions.push(Action::Next);
        }
        actions
    }

    fn clickable(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.indicators.iter().copied().chain(self.prev).chain(self.next)
    }
}

/// A rotating image carousel bound to one container of a [`Surface`].
///
/// A carousel whose container is missing, or holds no slides, is built
/// anyway but stays [`CarouselState::Inert`]: every operation on it is a
/// silent no-op. Nothing here ever returns an error.
#[derive(Debug)]
pub struct Carousel {
    container_id: String,
    interval: Duration,
    state: CarouselState,
}

impl Carousel {
    /// `interval` defaults to [`DEFAULT_INTERVAL_MS`].
    pub fn new<S, T>(
        container_id: &str,
        interval: Option<Duration>,
        surface: &mut S,
        scheduler: &mut T,
    ) -> Self
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        let mut carousel = Self {
            container_id: container_id.to_string(),
            interval: checked_interval(container_id, interval),
            state: CarouselState::Inert(InertReason::MissingContainer),
        };

        let Some(container) = surface.resolve_container(container_id) else {
            debug!(container = container_id, "container not found, carousel stays inert");
            return carousel;
        };

        let slides = surface.query_all(container, Role::Slide);
        if slides.is_empty() {
            carousel.state = CarouselState::Inert(InertReason::NoSlides);
            debug!(container = container_id, "no slides, carousel stays inert");
            return carousel;
        }

        carousel.state = CarouselState::Active(Bound {
            slides,
            indicators: surface.query_all(container, Role::Indicator),
            prev: surface.query_first(container, Role::Prev),
            next: surface.query_first(container, Role::Next),
            current: 0,
            timer: TimerSlot::new(),
        });
        carousel.activate(surface, scheduler);
        carousel
    }

    fn activate<S, T>(&mut self, surface: &mut S, scheduler: &mut T)
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        self.show_slide(0, surface);
        self.start_timer(scheduler);

        let CarouselState::Active(bound) = &self.state else {
            return;
        };
        for element in bound.clickable() {
            surface.listen_click(element);
        }
        info!(
            container = %self.container_id,
            slides = bound.slides.len(),
            indicators = bound.indicators.len(),
            controls = bound.prev.is_some() || bound.next.is_some(),
            interval_ms = self.interval.as_millis() as u64,
            "carousel active"
        );
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CarouselState::Active(_))
    }

    pub fn inert_reason(&self) -> Option<InertReason> {
        match self.state {
            CarouselState::Inert(reason) => Some(reason),
            CarouselState::Active(_) => None,
        }
    }

    fn bound(&self) -> Option<&Bound> {
        match &self.state {
            CarouselState::Active(bound) => Some(bound),
            CarouselState::Inert(_) => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.bound().map(|b| b.current)
    }

    pub fn slides(&self) -> &[ElementId] {
        self.bound().map(|b| b.slides.as_slice()).unwrap_or(&[])
    }

    pub fn indicators(&self) -> &[ElementId] {
        self.bound().map(|b| b.indicators.as_slice()).unwrap_or(&[])
    }

    pub fn prev_control(&self) -> Option<ElementId> {
        self.bound().and_then(|b| b.prev)
    }

    pub fn next_control(&self) -> Option<ElementId> {
        self.bound().and_then(|b| b.next)
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.bound().and_then(|b| b.timer.handle())
    }

    pub fn show_slide<S: Surface + ?Sized>(&mut self, target: isize, surface: &mut S) {
        let CarouselState::Active(bound) = &mut self.state else {
            return;
        };
        let index = bound.resolve(target);

        for &slide in &bound.slides {
            surface.set_active(slide, false);
        }
        for &indicator in &bound.indicators {
            surface.set_active(indicator, false);
        }
        surface.set_active(bound.slides[index], true);
        if let Some(&indicator) = bound.indicators.get(index) {
            surface.set_active(indicator, true);
        }

        bound.current = index;
        debug!(container = %self.container_id, index, "slide shown");
    }

    pub fn next_slide<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(current) = self.current_index() {
            self.show_slide(current as isize + 1, surface);
        }
    }

    pub fn prev_slide<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(current) = self.current_index() {
            self.show_slide(current as isize - 1, surface);
        }
    }

    /// Arm the repeating advance timer. A timer that is already running is
    /// replaced, never duplicated.
    pub fn start_timer<T: Scheduler + ?Sized>(&mut self, scheduler: &mut T) {
        let CarouselState::Active(bound) = &mut self.state else {
            return;
        };
        let id = bound.timer.install(scheduler, self.interval);
        debug!(container = %self.container_id, timer = %id, "timer started");
    }

    pub fn reset_timer<T: Scheduler + ?Sized>(&mut self, scheduler: &mut T) {
        let CarouselState::Active(bound) = &mut self.state else {
            return;
        };
        bound.timer.cancel(scheduler);
        self.start_timer(scheduler);
    }

    /// React to a click. Returns whether `element` belongs to this carousel.
    pub fn handle_click<S, T>(&mut self, element: ElementId, surface: &mut S, scheduler: &mut T) -> bool
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        let Some(actions) = self.bound().map(|b| b.actions_for(element)) else {
            return false;
        };
        for action in &actions {
            self.reset_timer(scheduler);
            match *action {
                Action::Show(index) => self.show_slide(index as isize, surface),
                Action::Prev => self.prev_slide(surface),
                Action::Next => self.next_slide(surface),
            }
        }
        !actions.is_empty()
    }

    /// React to a timer firing. Ticks from timers this carousel no longer
    /// owns are ignored.
    pub fn handle_tick<S: Surface + ?Sized>(&mut self, timer: TimerId, surface: &mut S) -> bool {
        if !self.bound().is_some_and(|b| b.timer.owns(timer)) {
            return false;
        }
        self.next_slide(surface);
        true
    }

    pub fn dispose<S, T>(&mut self, surface: &mut S, scheduler: &mut T)
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        let previous = std::mem::replace(&mut self.state, CarouselState::Inert(InertReason::Disposed));
        if let CarouselState::Active(mut bound) = previous {
            bound.timer.cancel(scheduler);
            for element in bound.clickable() {
                surface.unlisten_click(element);
            }
            info!(container = %self.container_id, "carousel disposed");
        }
    }
}

fn checked_interval(container_id: &str, interval: Option<Duration>) -> Duration {
    let interval = interval.unwrap_or(Duration::from_millis(DEFAULT_INTERVAL_MS));
    let min = Duration::from_millis(MIN_INTERVAL_MS);
    if interval < min {
        warn!(
            container = container_id,
            requested_ms = interval.as_millis() as u64,
            "interval too short, clamping to {MIN_INTERVAL_MS}ms"
        );
        return min;
    }
    interval
}
