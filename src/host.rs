//! Capabilities the embedding UI provides to the tour.
//!
//! The engine never touches a rendering surface directly. It asks a
//! [`ViewportQuery`] where things are, draws through an [`OverlaySurface`],
//! reads application state through [`HostSignals`], and receives user and
//! application activity as [`HostEvent`]s.

use crate::geometry::{Rect, Size};
use crate::overlay::{OverlayFrame, TooltipContent};

/// Opaque identity of an on-screen element, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element lookup and layout queries.
pub trait ViewportQuery {
    /// Find the element answering `locator`, if it is attached.
    fn find_element(&self, locator: &str) -> Option<ElementHandle>;

    /// Current layout box of an attached element.
    fn bounding_box(&self, element: ElementHandle) -> Option<Rect>;

    /// Size of the visible viewport.
    fn viewport(&self) -> Size;

    /// Attached and occupying non-zero layout area.
    fn is_visible(&self, element: ElementHandle) -> bool {
        self.bounding_box(element).is_some_and(|r| !r.is_empty())
    }

    /// Resolve `locator` and require it to be visible.
    fn find_visible(&self, locator: &str) -> Option<ElementHandle> {
        self.find_element(locator).filter(|el| self.is_visible(*el))
    }
}

/// Where the overlay is drawn.
pub trait OverlaySurface {
    /// Rendered size of a tooltip with this content.
    fn tooltip_size(&self, content: &TooltipContent) -> Size;

    /// Replace whatever overlay is currently shown with `frame`.
    fn paint(&mut self, frame: &OverlayFrame);

    /// Remove the overlay entirely.
    fn clear(&mut self);
}

/// Application state consulted by step prechecks.
pub trait HostSignals {
    fn shift_active(&self) -> bool;
    fn order_active(&self) -> bool;
}

/// Everything a session needs from its host.
pub trait TourHost: ViewportQuery + OverlaySurface + HostSignals {}

impl<T: ViewportQuery + OverlaySurface + HostSignals> TourHost for T {}

/// Buttons on the tooltip panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    /// "Next", or "Finish" on the last step.
    Next,
    Skip,
    Later,
    DontShowAgain,
}

/// Activity the host forwards to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Click(ElementHandle),
    Input { target: ElementHandle, value: String },
    /// A named application event, e.g. `"order-started"`.
    Named(String),
    Resize,
    Scroll,
    Tooltip(TooltipAction),
}

impl HostEvent {
    pub fn named(name: impl Into<String>) -> Self {
        HostEvent::Named(name.into())
    }
}
