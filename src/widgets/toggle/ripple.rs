use std::time::Duration;

use crate::animation::{Interpolator, Scroller};
use crate::layout::Size;

/// Duration of the ripple growing to cover the widget
pub const EXPAND_DURATION: Duration = Duration::from_millis(1200);
/// Duration of the ripple collapsing back to nothing
pub const SHRINK_DURATION: Duration = Duration::from_millis(800);
/// Subtracted from the ripple alpha while heading to unselected so the
/// fade finishes ahead of the radius
pub const DESELECT_ALPHA_BIAS: i32 = 60;
/// Deceleration factor of the radius curve
pub const DECELERATE_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected,
}

impl SelectionState {
    pub fn is_selected(self) -> bool {
        self == SelectionState::Selected
    }

    pub fn toggled(self) -> Self {
        match self {
            SelectionState::Unselected => SelectionState::Selected,
            SelectionState::Selected => SelectionState::Unselected,
        }
    }
}

/// Values produced by one animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleFrame {
    /// Current ripple radius
    pub radius: f32,
    /// Alpha for the ripple and shadow paints
    pub alpha: u8,
    /// `|radius / target|`, clamped to 0.0..=1.0
    pub progress: f32,
    /// True on the frame the run completes
    pub finished: bool,
}

/// Selection state machine and ripple geometry, independent of painting.
#[derive(Debug, Clone)]
pub struct RippleState {
    selection: SelectionState,
    animating: bool,
    /// Ripple center in widget-local coordinates
    center: (f32, f32),
    radius: f32,
    target_radius: f32,
    size: Size,
    scroller: Scroller,
}

impl RippleState {
    pub fn new() -> Self {
        Self {
            selection: SelectionState::Unselected,
            animating: false,
            center: (0.0, 0.0),
            radius: 0.0,
            target_radius: 0.0,
            size: Size::zero(),
            scroller: Scroller::new(Interpolator::Decelerate(DECELERATE_FACTOR)),
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Record a new widget size.
    ///
    /// A selection made before the size was known (or before a resize) is
    /// re-aimed so the ripple still covers the widget: a running expansion
    /// keeps its remaining time but heads for the new target, and a settled
    /// selection jumps straight to full coverage. The returned frame carries
    /// the settled values in that second case.
    pub fn set_size(&mut self, size: Size) -> Option<RippleFrame> {
        let previous = std::mem::replace(&mut self.size, size);
        if previous == size || !self.selection.is_selected() {
            return None;
        }

        if self.animating {
            if previous.is_empty() {
                self.center = size_center(size);
            }
            self.target_radius = longest_radius(self.center, size);
            let start = self.radius as i32;
            let end = self.target_radius.ceil() as i32;
            let remaining = self.scroller.time_remaining();
            self.scroller.start_scroll(start, end - start, remaining);
            log::debug!(
                "ripple re-aimed at radius {:.1} after resize to {:?}",
                self.target_radius,
                size
            );
            return None;
        }

        self.center = size_center(size);
        self.target_radius = longest_radius(self.center, size);
        self.radius = self.target_radius.ceil();
        Some(RippleFrame {
            radius: self.radius,
            alpha: ripple_alpha(self.radius, self.target_radius, self.selection),
            progress: ripple_progress(self.radius, self.target_radius),
            finished: true,
        })
    }

    /// Primary press at `point` (widget-local). Returns the new state.
    ///
    /// The press point only becomes the ripple center when expanding; a
    /// shrink collapses toward wherever the ripple already is.
    pub fn press(&mut self, point: (f32, f32)) -> SelectionState {
        match self.selection {
            SelectionState::Unselected => {
                self.selection = SelectionState::Selected;
                self.expand_from(point);
            }
            SelectionState::Selected => {
                self.selection = SelectionState::Unselected;
                self.shrink();
            }
        }
        self.selection
    }

    /// Expand from the widget center. Returns false if already selected.
    pub fn select(&mut self) -> bool {
        if self.selection.is_selected() {
            return false;
        }
        self.selection = SelectionState::Selected;
        self.expand_from(size_center(self.size));
        true
    }

    /// Shrink from the current radius. Returns false if already unselected.
    pub fn deselect(&mut self) -> bool {
        if !self.selection.is_selected() {
            return false;
        }
        self.selection = SelectionState::Unselected;
        self.shrink();
        true
    }

    fn expand_from(&mut self, center: (f32, f32)) {
        self.center = center;
        self.target_radius = longest_radius(center, self.size);
        self.scroller
            .start_scroll(0, self.target_radius.ceil() as i32, EXPAND_DURATION);
        self.animating = true;
        log::debug!(
            "ripple expand from ({:.1}, {:.1}) to radius {:.1}",
            center.0,
            center.1,
            self.target_radius
        );
    }

    fn shrink(&mut self) {
        // The interrupted run never reports completion.
        self.scroller.force_finished();
        self.target_radius = self.radius;
        let start = self.radius as i32;
        self.scroller.start_scroll(start, -start, SHRINK_DURATION);
        self.animating = true;
        log::debug!("ripple shrink from radius {:.1}", self.radius);
    }

    /// Advance the running animation by `dt`.
    ///
    /// Returns `None` when idle. The frame that completes the run carries the
    /// final radius and `finished = true`; the center then snaps back to the
    /// widget center.
    pub fn advance(&mut self, dt: Duration) -> Option<RippleFrame> {
        if !self.animating {
            return None;
        }

        let tick = self.scroller.tick(dt);
        self.radius = tick.value;

        let frame = RippleFrame {
            radius: self.radius,
            alpha: ripple_alpha(self.radius, self.target_radius, self.selection),
            progress: ripple_progress(self.radius, self.target_radius),
            finished: tick.done,
        };

        if tick.done {
            self.animating = false;
            self.center = size_center(self.size);
            log::debug!("ripple settled {:?}", self.selection);
        }
        Some(frame)
    }
}

impl Default for RippleState {
    fn default() -> Self {
        Self::new()
    }
}

fn size_center(size: Size) -> (f32, f32) {
    (size.width / 2.0, size.height / 2.0)
}

/// Radius a ripple centered at `center` needs to cover a `size` widget.
///
/// Only the two corners on the far side (horizontally) of the center are
/// measured; the near corners are never farther.
pub fn longest_radius(center: (f32, f32), size: Size) -> f32 {
    let (x, y) = center;
    let dx = if x > size.width / 2.0 {
        x
    } else {
        size.width - x
    };
    let to_top = dx.hypot(y);
    let to_bottom = dx.hypot(size.height - y);
    to_top.max(to_bottom)
}

/// Alpha for the ripple and shadow paints at `radius`.
pub fn ripple_alpha(radius: f32, target: f32, heading_to: SelectionState) -> u8 {
    if target <= 0.0 {
        return 0;
    }
    let mut alpha = (radius / target * 255.0) as i32;
    if heading_to == SelectionState::Unselected {
        alpha -= DESELECT_ALPHA_BIAS;
    }
    alpha.clamp(0, 255) as u8
}

/// Fraction of the target radius covered, clamped to 0.0..=1.0.
pub fn ripple_progress(radius: f32, target: f32) -> f32 {
    if target <= 0.0 {
        return 0.0;
    }
    (radius / target).abs().min(1.0)
}
