use std::fmt;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Slide,
    Indicator,
    Prev,
    Next,
}

impl Role {
    /// Classes an element must carry (all of them) to match this role.
    pub fn classes(self) -> &'static [&'static str] {
        match self {
            Role::Slide => &[SLIDE_CLASS],
            Role::Indicator => &[INDICATOR_CLASS],
            Role::Prev => &[BUTTON_CLASS, PREV_CLASS],
            Role::Next => &[BUTTON_CLASS, NEXT_CLASS],
        }
    }
}

/// The passive host a carousel renders into.
///
/// Queries are scoped: `query_all(scope, ..)` only ever returns descendants
/// of `scope`, in document order, and never `scope` itself. Clicks are not
/// delivered through the surface; the host reports them as
/// [`Event::Click`](crate::page::Event) for elements somebody listens on.
pub trait Surface {
    fn resolve_container(&self, id: &str) -> Option<ElementId>;

    fn query_all(&self, scope: ElementId, role: Role) -> Vec<ElementId>;

    fn query_first(&self, scope: ElementId, role: Role) -> Option<ElementId> {
        self.query_all(scope, role).into_iter().next()
    }

    fn set_active(&mut self, element: ElementId, active: bool);

    /// Registrations are counted; each `listen_click` needs its own `unlisten_click`.
    fn listen_click(&mut self, element: ElementId);

    fn unlisten_click(&mut self, element: ElementId);
}
