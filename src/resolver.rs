//! Locating a step's on-screen target.

use crate::catalog::TourStep;
use crate::geometry::Rect;
use crate::host::{ElementHandle, ViewportQuery};

/// A resolved, visible target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub element: ElementHandle,
    pub rect: Rect,
    /// The step's preferred element stood in for its nominal one.
    pub overridden: bool,
}

impl Target {
    /// Same element at the same place.
    pub fn same_as(&self, other: &Target) -> bool {
        self.element == other.element && self.rect == other.rect
    }
}

/// Find the target for `step`, if one is currently visible.
///
/// A visible preferred element (e.g. an open modal) wins over the nominal
/// locator. Elements with zero layout area count as absent.
pub fn resolve(step: &TourStep, viewport: &dyn ViewportQuery) -> Option<Target> {
    if let Some(preferred) = step.target.prefer_when_visible {
        if let Some(target) = visible_target(preferred, viewport) {
            return Some(Target {
                overridden: true,
                ..target
            });
        }
    }
    visible_target(step.target.locator, viewport)
}

fn visible_target(locator: &str, viewport: &dyn ViewportQuery) -> Option<Target> {
    let element = viewport.find_visible(locator)?;
    let rect = viewport.bounding_box(element)?;
    Some(Target {
        element,
        rect,
        overridden: false,
    })
}

/// Bookkeeping for an unbounded wait on one step's target.
///
/// Waiting never times out. After `log_after_ms` without a result it emits a
/// diagnostic, at most once per window.
#[derive(Debug, Clone)]
pub struct TargetWait {
    step_id: &'static str,
    started_ms: u64,
    log_after_ms: u64,
    last_log_ms: Option<u64>,
    attempts: u32,
}

impl TargetWait {
    pub fn new(step_id: &'static str, now_ms: u64, log_after_ms: u64) -> Self {
        Self {
            step_id,
            started_ms: now_ms,
            log_after_ms,
            last_log_ms: None,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn waited_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    /// One poll: resolve, and log if the wait has gone on too long.
    pub fn poll(&mut self, step: &TourStep, viewport: &dyn ViewportQuery, now_ms: u64) -> Option<Target> {
        self.attempts += 1;
        let found = resolve(step, viewport);
        if found.is_none() && self.should_log(now_ms) {
            self.last_log_ms = Some(now_ms);
            tracing::debug!(
                step = self.step_id,
                locator = step.target.locator,
                waited_ms = self.waited_ms(now_ms),
                attempts = self.attempts,
                "tour target still not visible"
            );
        }
        found
    }

    fn should_log(&self, now_ms: u64) -> bool {
        if self.waited_ms(now_ms) < self.log_after_ms {
            return false;
        }
        match self.last_log_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.log_after_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TargetSpec;
    use crate::geometry::Size;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Page {
        elements: HashMap<&'static str, (u64, Rect)>,
    }

    impl Page {
        fn with(mut self, locator: &'static str, id: u64, rect: Rect) -> Self {
            self.elements.insert(locator, (id, rect));
            self
        }
    }

    impl ViewportQuery for Page {
        fn find_element(&self, locator: &str) -> Option<ElementHandle> {
            self.elements.get(locator).map(|(id, _)| ElementHandle(*id))
        }
        fn bounding_box(&self, element: ElementHandle) -> Option<Rect> {
            self.elements
                .values()
                .find(|(id, _)| *id == element.0)
                .map(|(_, r)| *r)
        }
        fn viewport(&self) -> Size {
            Size::new(1024.0, 768.0)
        }
    }

    fn step(target: TargetSpec) -> TourStep {
        TourStep::new("s", "t", "b", target)
    }

    #[test]
    fn resolves_nominal_target() {
        let page = Page::default().with("#btn", 1, Rect::new(10.0, 10.0, 80.0, 30.0));
        let t = resolve(&step(TargetSpec::element("#btn")), &page).unwrap();
        assert_eq!(t.element, ElementHandle(1));
        assert!(!t.overridden);
    }

    #[test]
    fn zero_area_element_is_absent() {
        let page = Page::default().with("#btn", 1, Rect::new(10.0, 10.0, 0.0, 0.0));
        assert!(resolve(&step(TargetSpec::element("#btn")), &page).is_none());
    }

    #[test]
    fn visible_modal_overrides_nominal_target() {
        let s = step(TargetSpec::with_override("#btn", "#modal"));
        let hidden_modal = Page::default()
            .with("#btn", 1, Rect::new(10.0, 10.0, 80.0, 30.0))
            .with("#modal", 2, Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(resolve(&s, &hidden_modal).unwrap().element, ElementHandle(1));

        let open_modal = Page::default()
            .with("#btn", 1, Rect::new(10.0, 10.0, 80.0, 30.0))
            .with("#modal", 2, Rect::new(200.0, 100.0, 400.0, 300.0));
        let t = resolve(&s, &open_modal).unwrap();
        assert_eq!(t.element, ElementHandle(2));
        assert!(t.overridden);
    }

    #[test]
    fn diagnostic_is_throttled_per_window() {
        let page = Page::default();
        let s = step(TargetSpec::element("#missing"));
        let mut wait = TargetWait::new("s", 0, 5000);

        assert!(wait.poll(&s, &page, 300).is_none());
        assert!(!wait.should_log(4900));
        assert!(wait.should_log(5000));
        wait.poll(&s, &page, 5000);
        assert!(!wait.should_log(9900));
        assert!(wait.should_log(10_000));
        assert_eq!(wait.attempts(), 2);
    }
}
