//! Auto-rotating image carousels.
//!
//! A [`Carousel`] binds to one container of a [`Surface`], keeps exactly one
//! slide (and its indicator) marked active, advances on a repeating timer and
//! restarts that timer whenever the user navigates by hand. [`Runtime`] wires
//! several carousels, a [`Document`] (or any other surface) and a virtual
//! clock into a single-threaded event loop.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod gallery;
pub mod page;
pub mod runtime;
pub mod state;
pub mod surface;
pub mod timer;

pub use carousel::{Action, Carousel};
pub use document::Document;
pub use error::{Error, Result};
pub use page::{default_site_mounts, Event, Mount, Page};
pub use runtime::Runtime;
pub use state::{CarouselState, InertReason};
pub use surface::{ElementId, Role, Surface};
pub use timer::{IntervalScheduler, Scheduler, TimerId, TimerSlot};
