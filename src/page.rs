//! Every carousel on one page, and the events the host feeds them.

use std::time::Duration;

use tracing::info;

use crate::carousel::Carousel;
use crate::constants::*;
use crate::surface::{ElementId, Surface};
use crate::timer::{Scheduler, TimerId};

/// One carousel to construct at page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub container_id: String,
    pub interval: Duration,
}

impl Mount {
    pub fn new(container_id: impl Into<String>, interval: Duration) -> Self {
        Self {
            container_id: container_id.into(),
            interval,
        }
    }

    pub fn with_default_interval(container_id: impl Into<String>) -> Self {
        Self::new(container_id, Duration::from_millis(DEFAULT_INTERVAL_MS))
    }
}

/// The hotel site's carousels: the hero section plus one per lodging type.
pub fn default_site_mounts() -> Vec<Mount> {
    let mut mounts = vec![Mount::new("inicio", Duration::from_millis(HERO_INTERVAL_MS))];
    mounts.extend(
        [
            "carousel-suite",
            "carousel-standard",
            "carousel-glamping",
            "carousel-grupal",
            "carousel-pareja",
            "carousel-iglu",
        ]
        .into_iter()
        .map(Mount::with_default_interval),
    );
    mounts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Click(ElementId),
    Tick(TimerId),
}

#[derive(Debug, Default)]
pub struct Page {
    carousels: Vec<Carousel>,
}

impl Page {
    /// Construct one carousel per mount, in order. Mounts whose container is
    /// absent or empty still produce an (inert) carousel.
    pub fn initialize<S, T>(mounts: &[Mount], surface: &mut S, scheduler: &mut T) -> Self
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        let carousels: Vec<Carousel> = mounts
            .iter()
            .map(|m| Carousel::new(&m.container_id, Some(m.interval), surface, scheduler))
            .collect();
        let page = Self { carousels };
        info!(
            mounted = page.carousels.len(),
            active = page.active_count(),
            "carousels initialized"
        );
        page
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn get(&self, container_id: &str) -> Option<&Carousel> {
        self.carousels.iter().find(|c| c.container_id() == container_id)
    }

    pub fn active_count(&self) -> usize {
        self.carousels.iter().filter(|c| c.is_active()).count()
    }

    /// Deliver `event` to every carousel; returns how many handled it.
    pub fn dispatch<S, T>(&mut self, event: Event, surface: &mut S, scheduler: &mut T) -> usize
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        self.carousels
            .iter_mut()
            .map(|c| match event {
                Event::Click(element) => c.handle_click(element, surface, scheduler),
                Event::Tick(timer) => c.handle_tick(timer, surface),
            })
            .filter(|handled| *handled)
            .count()
    }

    pub fn dispose<S, T>(&mut self, surface: &mut S, scheduler: &mut T)
    where
        S: Surface + ?Sized,
        T: Scheduler + ?Sized,
    {
        for carousel in &mut self.carousels {
            carousel.dispose(surface, scheduler);
        }
    }
}
