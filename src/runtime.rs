//! Single-threaded event loop for one page.
//!
//! Every handler runs to completion before the next event is looked at, so
//! a click and a timer tick never interleave.

use std::time::Duration;

use tracing::debug;

use crate::page::{Event, Mount, Page};
use crate::surface::{ElementId, Surface};
use crate::timer::IntervalScheduler;

pub struct Runtime<S> {
    surface: S,
    scheduler: IntervalScheduler,
    page: Page,
}

impl<S: Surface> Runtime<S> {
    /// The page-load step: build every mounted carousel against `surface`.
    pub fn start(mut surface: S, mounts: &[Mount]) -> Self {
        let mut scheduler = IntervalScheduler::new();
        let page = Page::initialize(mounts, &mut surface, &mut scheduler);
        Self {
            surface,
            scheduler,
            page,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Let `dt` pass, firing every timer that comes due in chronological order.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(timer) = self.scheduler.fire_next(until) {
            self.page
                .dispatch(Event::Tick(timer), &mut self.surface, &mut self.scheduler);
        }
        self.scheduler.advance_to(until);
    }

    /// Deliver a click; returns how many carousels reacted.
    pub fn click(&mut self, element: ElementId) -> usize {
        let handled = self
            .page
            .dispatch(Event::Click(element), &mut self.surface, &mut self.scheduler);
        debug!(%element, handled, "click");
        handled
    }

    /// Dispose every carousel. The runtime stays usable but nothing rotates.
    pub fn shutdown(&mut self) {
        self.page.dispose(&mut self.surface, &mut self.scheduler);
    }
}
