//! Overlay layout: the dimming mask, the highlight frame and the tooltip.
//!
//! Everything here is pure geometry. The session computes an [`OverlayFrame`]
//! and hands it to the host's [`OverlaySurface`](crate::host::OverlaySurface)
//! to draw.

use crate::geometry::{Rect, Size, clamp_start};
use crate::host::TooltipAction;

/// Text and buttons shown in the tooltip panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub body: String,
    /// 1-based.
    pub step_number: usize,
    pub step_count: usize,
    pub actions: Vec<TooltipAction>,
}

impl TooltipContent {
    pub fn new(title: &str, body: &str, index: usize, step_count: usize) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            step_number: index + 1,
            step_count,
            actions: vec![
                TooltipAction::Next,
                TooltipAction::Skip,
                TooltipAction::Later,
                TooltipAction::DontShowAgain,
            ],
        }
    }

    /// "step N/total".
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.step_number, self.step_count)
    }

    pub fn is_last(&self) -> bool {
        self.step_number >= self.step_count
    }

    /// Caption of the primary button.
    pub fn next_label(&self) -> &'static str {
        if self.is_last() { "Finish" } else { "Next" }
    }

    pub fn label(&self, action: TooltipAction) -> &'static str {
        match action {
            TooltipAction::Next => self.next_label(),
            TooltipAction::Skip => "Skip",
            TooltipAction::Later => "Later",
            TooltipAction::DontShowAgain => "Don't show again",
        }
    }
}

/// The four dimming panels around the highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mask {
    pub above: Rect,
    pub below: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl Mask {
    /// Panels covering everything in `viewport` except `hole`.
    pub fn around(hole: Rect, viewport: Size) -> Self {
        let top = hole.top().clamp(0.0, viewport.height);
        let bottom = hole.bottom().clamp(top, viewport.height);
        let left = hole.left().clamp(0.0, viewport.width);
        let right = hole.right().clamp(left, viewport.width);
        let band = bottom - top;

        Self {
            above: Rect::new(0.0, 0.0, viewport.width, top),
            below: Rect::new(0.0, bottom, viewport.width, viewport.height - bottom),
            left: Rect::new(0.0, top, left, band),
            right: Rect::new(right, top, viewport.width - right, band),
        }
    }

    pub fn panels(&self) -> [Rect; 4] {
        [self.above, self.below, self.left, self.right]
    }

    /// Whether a point falls on a panel, i.e. input there is absorbed.
    pub fn absorbs(&self, x: f64, y: f64) -> bool {
        self.panels().iter().any(|p| {
            !p.is_empty() && x >= p.left() && x < p.right() && y >= p.top() && y < p.bottom()
        })
    }
}

/// Which placement rule produced the tooltip position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Below,
    Right,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Final tooltip box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPosition {
    pub rect: Rect,
    pub placement: Placement,
    /// The box still intersects the target (degraded, but acceptable).
    pub overlaps_target: bool,
}

/// Everything needed to draw one step.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub mask: Mask,
    pub highlight: Rect,
    pub tooltip: TooltipPosition,
    pub content: TooltipContent,
}

/// Fixed geometry parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayMetrics {
    /// Highlight inset around the target.
    pub padding: f64,
    /// Minimum gap to the viewport edges, and between tooltip and target.
    pub margin: f64,
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self {
            padding: 4.0,
            margin: 10.0,
        }
    }
}

impl OverlayMetrics {
    /// Lay out the full overlay for a target.
    pub fn layout(&self, target: Rect, viewport: Size, tooltip: Size, content: TooltipContent) -> OverlayFrame {
        let highlight = target.inflate(self.padding);
        OverlayFrame {
            mask: Mask::around(highlight, viewport),
            highlight,
            tooltip: self.place_tooltip(target, viewport, tooltip),
            content,
        }
    }

    /// The vertical side tried first: the one with room for the full height
    /// (below preferred), otherwise the one with strictly more room.
    pub fn preferred_side(&self, target: Rect, viewport: Size, tip_height: f64) -> Placement {
        let space_above = target.top() - self.margin;
        let space_below = viewport.height - target.bottom() - self.margin;

        let below = if space_below >= tip_height {
            true
        } else if space_above >= tip_height {
            false
        } else {
            space_below > space_above
        };
        if below { Placement::Below } else { Placement::Above }
    }

    /// Position a tooltip of size `tip` so it does not cover `target`.
    ///
    /// The preferred vertical side first, then the opposite side, then beside
    /// the target (right, then left), then the viewport corners. Every
    /// candidate is kept inside the margins. When nothing avoids the target,
    /// the last candidate is kept.
    pub fn place_tooltip(&self, target: Rect, viewport: Size, tip: Size) -> TooltipPosition {
        let m = self.margin;
        let min_y = m;
        let max_y = viewport.height - tip.height - m;
        let max_x = viewport.width - tip.width - m;

        let x = clamp_start(target.center_x() - tip.width / 2.0, m, max_x);
        let below_y = target.bottom() + m;
        let above_y = target.top() - tip.height - m;

        let (first, first_y, opposite, opposite_y) = match self.preferred_side(target, viewport, tip.height) {
            Placement::Below => (Placement::Below, below_y, Placement::Above, above_y),
            _ => (Placement::Above, above_y, Placement::Below, below_y),
        };

        let mut last = Rect::at(x, clamp_start(first_y, min_y, max_y), tip);
        if !last.intersects(&target) {
            return TooltipPosition::clear(last, first);
        }

        last = Rect::at(x, clamp_start(opposite_y, min_y, max_y), tip);
        if !last.intersects(&target) {
            return TooltipPosition::clear(last, opposite);
        }

        let side_y = clamp_start(target.center_y() - tip.height / 2.0, min_y, max_y);
        let right_x = target.right() + m;
        if right_x + tip.width <= viewport.width - m {
            last = Rect::at(right_x, side_y, tip);
            if !last.intersects(&target) {
                return TooltipPosition::clear(last, Placement::Right);
            }
        }
        let left_x = target.left() - tip.width - m;
        if left_x >= m {
            last = Rect::at(left_x, side_y, tip);
            if !last.intersects(&target) {
                return TooltipPosition::clear(last, Placement::Left);
            }
        }

        let corners = [
            (Placement::TopLeft, m, m),
            (Placement::TopRight, max_x, m),
            (Placement::BottomLeft, m, max_y),
            (Placement::BottomRight, max_x, max_y),
        ];
        let mut last_placement = first;
        for (placement, cx, cy) in corners {
            last = Rect::at(clamp_start(cx, m, max_x), clamp_start(cy, m, max_y), tip);
            last_placement = placement;
            if !last.intersects(&target) {
                return TooltipPosition::clear(last, placement);
            }
        }

        TooltipPosition {
            rect: last,
            placement: last_placement,
            overlaps_target: true,
        }
    }
}

impl TooltipPosition {
    fn clear(rect: Rect, placement: Placement) -> Self {
        Self {
            rect,
            placement,
            overlaps_target: false,
        }
    }
}
