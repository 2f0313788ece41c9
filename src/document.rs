use std::collections::BTreeSet;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::surface::{ElementId, Role, Surface};

struct Node {
    children: Vec<ElementId>,
    id: Option<String>,
    classes: BTreeSet<String>,
    listeners: u32,
}

impl Node {
    fn new(classes: &[&str]) -> Self {
        Self {
            children: Vec::new(),
            id: None,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            listeners: 0,
        }
    }
}

// --- In-memory element tree ---
pub struct Document {
    nodes: Vec<Node>,
    writes: u64,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(&[])],
            writes: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    fn node(&self, element: ElementId) -> Result<&Node> {
        self.nodes.get(element.index()).ok_or(Error::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node> {
        self.nodes.get_mut(element.index()).ok_or(Error::UnknownElement(element))
    }

    pub fn append(&mut self, parent: ElementId, classes: &[&str]) -> Result<ElementId> {
        self.node(parent)?;
        let element = ElementId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(classes));
        self.node_mut(parent)?.children.push(element);
        Ok(element)
    }

    // First element in document order wins lookups
    pub fn set_id(&mut self, element: ElementId, id: &str) -> Result<()> {
        self.node_mut(element)?.id = Some(id.to_string());
        Ok(())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root())
            .into_iter()
            .find(|el| self.nodes[el.index()].id.as_deref() == Some(id))
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(element.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    // Pre-order, excluding `scope`
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.children(el).iter().rev().copied());
        }
        out
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(element.index())
            .is_some_and(|n| n.classes.contains(class))
    }

    pub fn is_active(&self, element: ElementId) -> bool {
        self.has_class(element, ACTIVE_CLASS)
    }

    pub fn listener_count(&self, element: ElementId) -> u32 {
        self.nodes.get(element.index()).map_or(0, |n| n.listeners)
    }

    pub fn is_listening(&self, element: ElementId) -> bool {
        self.listener_count(element) > 0
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn matches(&self, element: ElementId, role: Role) -> bool {
        role.classes().iter().all(|c| self.has_class(element, c))
    }

    /// Build the standard carousel markup under `parent`:
    /// a container with `slides` slides, `indicators` indicator dots and,
    /// when `controls` is set, a prev and a next button.
    pub fn mount_carousel(
        &mut self,
        parent: ElementId,
        container_id: &str,
        slides: usize,
        indicators: usize,
        controls: bool,
    ) -> Result<ElementId> {
        let container = self.append(parent, &["carousel"])?;
        self.set_id(container, container_id)?;

        let track = self.append(container, &["carousel-track"])?;
        for _ in 0..slides {
            self.append(track, &[SLIDE_CLASS])?;
        }
        if controls {
            self.append(container, &[BUTTON_CLASS, PREV_CLASS])?;
            self.append(container, &[BUTTON_CLASS, NEXT_CLASS])?;
        }
        if indicators > 0 {
            let dots = self.append(container, &["carousel-indicators"])?;
            for _ in 0..indicators {
                self.append(dots, &[INDICATOR_CLASS])?;
            }
        }
        Ok(container)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Document {
    fn resolve_container(&self, id: &str) -> Option<ElementId> {
        self.get_element_by_id(id)
    }

    fn query_all(&self, scope: ElementId, role: Role) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|el| self.matches(*el, role))
            .collect()
    }

    fn set_active(&mut self, element: ElementId, active: bool) {
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        if active {
            node.classes.insert(ACTIVE_CLASS.to_string());
        } else {
            node.classes.remove(ACTIVE_CLASS);
        }
        self.writes += 1;
    }

    fn listen_click(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.listeners += 1;
        }
    }

    fn unlisten_click(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.listeners = node.listeners.saturating_sub(1);
        }
    }
}
