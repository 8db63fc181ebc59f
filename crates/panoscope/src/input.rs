//! Pointer input interpretation: drag-to-rotate versus click, wheel zoom.
//!
//! The tracker accumulates pointer travel between press and release; a
//! gesture whose total travel stays under the drag threshold is a click,
//! anything longer is a drag. What a click *hits* is the render engine's
//! business (ray-picking); this module only classifies the gesture.

use glam::Vec2;

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Travel stayed under the drag threshold: a click at this position.
    Click(Vec2),
    /// The gesture was a drag; no click fires.
    DragEnd,
    /// No press was being tracked.
    Ignored,
}

/// Tracks one pointer across press/move/release.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed: bool,
    last_pos: Vec2,
    travel: f32,
}

impl PointerTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the pointer is held down.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Pointer pressed at `pos`.
    pub fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.last_pos = pos;
        self.travel = 0.0;
    }

    /// Pointer moved to `pos`; returns the per-event delta while pressed.
    pub fn movement(&mut self, pos: Vec2) -> Option<Vec2> {
        if !self.pressed {
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        self.travel += delta.length();
        Some(delta)
    }

    /// Pointer released at `pos`.
    pub fn release(&mut self, pos: Vec2, drag_threshold: f32) -> PointerOutcome {
        if !self.pressed {
            return PointerOutcome::Ignored;
        }
        self.pressed = false;
        self.travel += (pos - self.last_pos).length();
        if self.travel <= drag_threshold {
            PointerOutcome::Click(pos)
        } else {
            PointerOutcome::DragEnd
        }
    }

    /// Pointer left the surface; ends any gesture without a click.
    pub fn leave(&mut self) {
        self.pressed = false;
        self.travel = 0.0;
    }
}

/// Maps a wheel step count to a field-of-view delta in degrees. Positive
/// steps (scrolling up) zoom in, narrowing the fov.
#[must_use]
pub fn wheel_zoom_delta(steps: f32, step_degrees: f32) -> f32 {
    -steps * step_degrees
}
