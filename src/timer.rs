//! Repeating timers on a virtual clock.
//!
//! Nothing here sleeps or spawns: the host decides how much time has passed
//! (a frame's `dt`, or a test's explicit step) and pulls due timers one at a
//! time, running each callback to completion before asking for the next.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::constants::MIN_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

pub trait Scheduler {
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Clearing an id that is unknown or already cleared does nothing.
    fn clear_interval(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
pub struct IntervalScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn live_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn next_due(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).map(|t| t.next_due)
    }

    /// Pop the earliest live timer due at or before `until`.
    ///
    /// The clock moves to that timer's due time and the timer is re-armed one
    /// period later. Ties go to the earliest registration.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerId> {
        let (id, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(id, t)| (t.next_due, **id))
            .map(|(id, t)| (*id, t.next_due))?;

        self.now = self.now.max(due);
        if let Some(timer) = self.timers.get_mut(&id) {
            timer.next_due = due + timer.period;
        }
        Some(id)
    }

    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for IntervalScheduler {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(Duration::from_millis(MIN_INTERVAL_MS));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Interval {
                period,
                next_due: self.now + period,
            },
        );
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

// At most one live timer, ever
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Option<TimerId>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever this slot holds, then register a fresh interval.
    pub fn install<T: Scheduler + ?Sized>(&mut self, scheduler: &mut T, period: Duration) -> TimerId {
        self.cancel(scheduler);
        let id = scheduler.set_interval(period);
        self.handle = Some(id);
        id
    }

    pub fn cancel<T: Scheduler + ?Sized>(&mut self, scheduler: &mut T) {
        if let Some(id) = self.handle.take() {
            scheduler.clear_interval(id);
        }
    }

    pub fn handle(&self) -> Option<TimerId> {
        self.handle
    }

    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }
}
