//! An in-memory host: a table of elements, two application flags, and a
//! record of what was painted. Drives the CLI demo and the tests.

use std::collections::BTreeMap;

use crate::geometry::{Rect, Size};
use crate::host::{ElementHandle, HostSignals, OverlaySurface, ViewportQuery};
use crate::overlay::{OverlayFrame, TooltipContent};

#[derive(Debug, Clone)]
struct SimElement {
    handle: ElementHandle,
    rect: Rect,
    attached: bool,
}

#[derive(Debug, Clone)]
pub struct SimulatedHost {
    viewport: Size,
    elements: BTreeMap<String, SimElement>,
    next_handle: u64,
    shift_active: bool,
    order_active: bool,
    tooltip: Size,
    frame: Option<OverlayFrame>,
    paints: usize,
    clears: usize,
}

impl SimulatedHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            elements: BTreeMap::new(),
            next_handle: 0,
            shift_active: false,
            order_active: false,
            tooltip: Size::new(320.0, 160.0),
            frame: None,
            paints: 0,
            clears: 0,
        }
    }

    /// Attach (or move) the element answering `locator`. An element keeps its
    /// handle across moves and re-attachment.
    pub fn place(&mut self, locator: &str, rect: Rect) -> ElementHandle {
        if let Some(el) = self.elements.get_mut(locator) {
            el.rect = rect;
            el.attached = true;
            return el.handle;
        }
        self.next_handle += 1;
        let handle = ElementHandle(self.next_handle);
        self.elements.insert(
            locator.to_string(),
            SimElement {
                handle,
                rect,
                attached: true,
            },
        );
        handle
    }

    /// Keep the element attached but collapse it to zero size.
    pub fn hide(&mut self, locator: &str) {
        if let Some(el) = self.elements.get_mut(locator) {
            el.rect = Rect::new(el.rect.x, el.rect.y, 0.0, 0.0);
        }
    }

    /// Detach the element from the document.
    pub fn remove(&mut self, locator: &str) {
        if let Some(el) = self.elements.get_mut(locator) {
            el.attached = false;
        }
    }

    pub fn handle(&self, locator: &str) -> Option<ElementHandle> {
        self.elements
            .get(locator)
            .filter(|el| el.attached)
            .map(|el| el.handle)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    pub fn set_tooltip_size(&mut self, size: Size) {
        self.tooltip = size;
    }

    pub fn set_shift_active(&mut self, active: bool) {
        self.shift_active = active;
    }

    pub fn set_order_active(&mut self, active: bool) {
        self.order_active = active;
    }

    /// What is on screen right now.
    pub fn current_frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    pub fn paint_count(&self) -> usize {
        self.paints
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl ViewportQuery for SimulatedHost {
    fn find_element(&self, locator: &str) -> Option<ElementHandle> {
        self.handle(locator)
    }

    fn bounding_box(&self, element: ElementHandle) -> Option<Rect> {
        self.elements
            .values()
            .find(|el| el.handle == element && el.attached)
            .map(|el| el.rect)
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}

impl OverlaySurface for SimulatedHost {
    fn tooltip_size(&self, _content: &TooltipContent) -> Size {
        self.tooltip
    }

    fn paint(&mut self, frame: &OverlayFrame) {
        self.paints += 1;
        self.frame = Some(frame.clone());
    }

    fn clear(&mut self) {
        if self.frame.take().is_some() {
            self.clears += 1;
        }
    }
}

impl HostSignals for SimulatedHost {
    fn shift_active(&self) -> bool {
        self.shift_active
    }

    fn order_active(&self) -> bool {
        self.order_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_survive_moves_and_reattachment() {
        let mut host = SimulatedHost::new(800.0, 600.0);
        let h = host.place("#a", Rect::new(0.0, 0.0, 10.0, 10.0));
        host.remove("#a");
        assert_eq!(host.find_element("#a"), None);
        assert_eq!(host.bounding_box(h), None);

        let again = host.place("#a", Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(h, again);
        assert!(host.is_visible(h));
    }

    #[test]
    fn hidden_element_is_attached_but_not_visible() {
        let mut host = SimulatedHost::new(800.0, 600.0);
        let h = host.place("#a", Rect::new(0.0, 0.0, 10.0, 10.0));
        host.hide("#a");
        assert_eq!(host.find_element("#a"), Some(h));
        assert!(!host.is_visible(h));
        assert_eq!(host.find_visible("#a"), None);
    }
}
