//! The panorama session: scoped owner of one viewpoint's navigation state.
//!
//! A session is constructed when a panorama viewpoint becomes active and
//! dropped when the user leaves it (switch or escape); its hotspot markers
//! go with it. The host holds at most one live session, which is what keeps
//! frame callbacks for different viewpoints from ever overlapping.

use std::sync::Arc;

use glam::Vec2;

use panoscope_core::{NavOptions, Result, Tour};
use panoscope_nav::{
    project_panorama, visible_hotspots, Hotspot, HotspotActivation, LookAngle, SwitchRequest,
    TransitionController, ViewOrientation,
};

use crate::debug::DebugSink;
use crate::input::{wheel_zoom_delta, PointerOutcome, PointerTracker};

/// Look state carried into a session entered through a viewpoint switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryState {
    /// Look angle preserved from the previous viewpoint.
    pub angle: LookAngle,
    /// Zoomed-out fov to resume the crossfade from, if the switch came out
    /// of an animated transition.
    pub incoming_fov: Option<f32>,
}

impl From<&SwitchRequest> for EntryState {
    fn from(request: &SwitchRequest) -> Self {
        Self {
            angle: request.angle,
            incoming_fov: request.incoming_fov,
        }
    }
}

/// Per-frame output of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Overlay opacity of the visible panorama for this frame.
    pub overlay_opacity: f32,
    /// Switch request emitted at the crossfade handoff, if any.
    pub switch: Option<SwitchRequest>,
}

/// Scoped navigation state for one active panorama viewpoint.
pub struct PanoramaSession {
    tour: Arc<Tour>,
    current_id: u32,
    options: NavOptions,
    view: ViewOrientation,
    transition: TransitionController,
    pointer: PointerTracker,
    hotspots: Vec<Hotspot>,
    debug: Box<dyn DebugSink>,
}

impl PanoramaSession {
    /// Enters the panorama at `viewpoint_id`.
    ///
    /// `entry` carries the look direction across a switch; when it holds an
    /// `incoming_fov` the session resumes the crossfade by zooming back out
    /// to the normal fov. Unknown ids are an error and no session is
    /// created.
    pub fn enter(
        tour: Arc<Tour>,
        viewpoint_id: u32,
        entry: Option<EntryState>,
        options: NavOptions,
        debug: Box<dyn DebugSink>,
        now: f64,
    ) -> Result<Self> {
        tour.require(viewpoint_id)?;
        let angle = entry.map_or_else(LookAngle::default, |e| e.angle);
        let mut view = ViewOrientation::new(angle, options.normal_fov);
        let transition = match entry.and_then(|e| e.incoming_fov) {
            Some(fov) => {
                TransitionController::resuming_zoom_out(options.clone(), &mut view, fov, now)
            }
            None => TransitionController::new(options.clone()),
        };
        log::debug!("entering viewpoint {viewpoint_id}");
        Ok(Self {
            tour,
            current_id: viewpoint_id,
            options,
            view,
            transition,
            pointer: PointerTracker::new(),
            hotspots: Vec::new(),
            debug,
        })
    }

    /// Id of the active viewpoint.
    #[must_use]
    pub fn viewpoint_id(&self) -> u32 {
        self.current_id
    }

    /// Read access to the live orientation, for rendering and animation math.
    #[must_use]
    pub fn view(&self) -> &ViewOrientation {
        &self.view
    }

    /// The angle published to the host on a switch.
    #[must_use]
    pub fn current_angle(&self) -> LookAngle {
        self.view.angle()
    }

    /// Hotspots that survived culling on the last frame.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// True while the transition controller owns yaw/pitch/fov.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Advances one frame at the host-sampled time, refreshing hotspot
    /// placements and driving any in-flight transition.
    pub fn frame(&mut self, now: f64) -> Result<FrameOutput> {
        let before = self.transition.state().name();
        let switch = self.transition.frame(&mut self.view, now);
        let after = self.transition.state().name();
        if before != after {
            self.debug.transition(before, after);
        }

        self.hotspots = visible_hotspots(&self.tour, self.current_id, &self.view, &self.options)?;
        self.debug.hotspots_projected(self.hotspots.len());

        if let Some(request) = &switch {
            self.debug.switch_requested(request);
        }
        Ok(FrameOutput {
            overlay_opacity: self.transition.overlay_opacity(now),
            switch,
        })
    }

    /// Pointer pressed at `pos` (pixels).
    pub fn pointer_pressed(&mut self, pos: Vec2) {
        self.pointer.press(pos);
    }

    /// Pointer moved: drag-to-rotate, unless a transition owns the view.
    pub fn pointer_moved(&mut self, pos: Vec2) {
        let Some(delta) = self.pointer.movement(pos) else {
            return;
        };
        if self.transition.is_active() {
            // The scripted animation owns yaw/pitch; travel still
            // accumulates so release keeps its click-vs-drag meaning.
            return;
        }
        self.view
            .rotate(delta.x, delta.y, self.options.rotate_sensitivity);
    }

    /// Pointer released. Returns the gesture classification; on a click the
    /// host runs its ray-pick and calls [`Self::activate_hotspot`] with the
    /// picked viewpoint id.
    pub fn pointer_released(&mut self, pos: Vec2) -> PointerOutcome {
        self.pointer.release(pos, self.options.drag_threshold)
    }

    /// Pointer left the surface.
    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    /// Wheel zoom in wheel steps (positive = zoom in). Suppressed while a
    /// transition is scripting the fov.
    pub fn wheel(&mut self, steps: f32) {
        if self.transition.is_active() {
            return;
        }
        self.view
            .zoom(wheel_zoom_delta(steps, self.options.wheel_zoom_step));
    }

    /// Activates the hotspot targeting `target_id`, as resolved by the
    /// render engine's ray-pick.
    ///
    /// The target's panorama placement supplies the rotation angle and
    /// distance, then the transition controller takes over; the returned
    /// request is only `Some` on the no-reorientation path. An unknown id
    /// aborts any transition and surfaces the error.
    pub fn activate_hotspot(&mut self, target_id: u32, now: f64) -> Result<Option<SwitchRequest>> {
        let target = match self.tour.require(target_id) {
            Ok(target) => target,
            Err(err) => {
                self.transition.abort();
                return Err(err);
            }
        };
        let current = self.tour.require(self.current_id)?;
        let placement = project_panorama(current, target.position, &self.options);
        let activation = HotspotActivation {
            target_id,
            target_angle: Some(LookAngle::new(placement.yaw, placement.pitch)),
            distance: Some(placement.distance),
        };
        let request = self.transition.activate(activation, &self.view, now);
        if let Some(request) = &request {
            self.debug.switch_requested(request);
        }
        Ok(request)
    }

    /// Requests an immediate switch with no reorientation - the path taken
    /// by hotspot sources that carry no angle, such as an overhead-view
    /// marker click.
    pub fn switch_without_reorientation(
        &mut self,
        target_id: u32,
        now: f64,
    ) -> Result<Option<SwitchRequest>> {
        if let Err(err) = self.tour.require(target_id) {
            self.transition.abort();
            return Err(err);
        }
        let activation = HotspotActivation {
            target_id,
            target_angle: None,
            distance: None,
        };
        let request = self.transition.activate(activation, &self.view, now);
        if let Some(request) = &request {
            self.debug.switch_requested(request);
        }
        Ok(request)
    }

    /// Escape to the overhead view: aborts any transition so the host can
    /// tear the session down cleanly.
    pub fn escape(&mut self) {
        self.transition.abort();
        self.pointer.leave();
    }
}

impl Drop for PanoramaSession {
    fn drop(&mut self) {
        // Markers and any pre-fetch are per-viewpoint resources owned by
        // the session; they are released here with it.
        log::debug!("leaving viewpoint {}", self.current_id);
    }
}
