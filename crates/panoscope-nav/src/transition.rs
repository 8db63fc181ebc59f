//! The transition state machine: rotate toward the target, zoom/fade out,
//! switch panorama, zoom/fade in.
//!
//! Splitting the zoom window at its midpoint (rather than switching at
//! 100%) and mirroring the field-of-view delta on the incoming side
//! produces a continuous-looking crossfade without simultaneous control of
//! two live panoramas: the outgoing side ends zoomed in at half opacity,
//! the incoming side starts zoomed out by the same amount at half opacity.

use panoscope_core::NavOptions;

use crate::easing::{ease_in_out_cubic, ease_in_out_quad, ease_out_quad, lerp, Animation};
use crate::orientation::{shortest_path, AngleDelta, LookAngle, ViewOrientation};

/// Fraction of the zoom-in window at which the crossfade hands off to the
/// incoming panorama. The symmetric-fov construction assumes the outgoing
/// side reaches its target fov exactly here, so the fov tween completes
/// over this fraction of the window.
pub const CROSSFADE_HANDOFF: f32 = 0.5;

/// Overlay opacity at the handoff point.
pub const HANDOFF_OPACITY: f32 = 0.5;

/// A hotspot activation driving the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotActivation {
    /// Viewpoint to switch to.
    pub target_id: u32,
    /// Angle to rotate toward before zooming; `None` switches immediately
    /// at the current angle with no animation.
    pub target_angle: Option<LookAngle>,
    /// Distance to the target, driving the zoom amount. `None` falls back
    /// to `max_zoom_distance`, the gentlest zoom.
    pub distance: Option<f32>,
}

/// The one signal the navigation core emits to its host: switch the active
/// panorama to `target_id`, restoring `angle`, optionally entering zoomed
/// out at `incoming_fov`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchRequest {
    /// Viewpoint to make active.
    pub target_id: u32,
    /// Look angle carried into the new panorama.
    pub angle: LookAngle,
    /// Zoomed-out starting fov for the crossfade; `None` on the
    /// no-reorientation path.
    pub incoming_fov: Option<f32>,
}

/// Computes the target field of view for a zoom-in toward a target at
/// `distance`: closer targets zoom in harder. The zoom amount interpolates
/// linearly from `max_zoom_amount` at distance zero down to
/// `min_zoom_amount` at `max_zoom_distance` and beyond, so the resulting
/// fov is monotonically increasing in distance.
#[must_use]
pub fn zoom_fov(distance: f32, options: &NavOptions) -> f32 {
    let t = (distance / options.max_zoom_distance).clamp(0.0, 1.0);
    let amount = lerp(options.max_zoom_amount, options.min_zoom_amount, t);
    options.normal_fov - amount
}

/// The fov the incoming panorama starts from: zoomed out by the same
/// amount the outgoing panorama zoomed in.
#[must_use]
pub fn symmetric_fov(target_fov: f32, options: &NavOptions) -> f32 {
    options.normal_fov + (options.normal_fov - target_fov)
}

/// Current stage of an animated viewpoint switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    /// Free interaction; the only state accepting a new activation.
    Idle,
    /// Rotating yaw/pitch toward the target angle.
    Rotating {
        /// Viewpoint the transition is heading to.
        target_id: u32,
        /// Angles at activation time.
        from: LookAngle,
        /// Shortest-path deltas to the target angle.
        delta: AngleDelta,
        /// Distance to the target, for the upcoming zoom.
        distance: f32,
        /// The 800 ms rotation window.
        anim: Animation,
    },
    /// Zooming in on the outgoing panorama while fading its overlay.
    ZoomingIn {
        /// Viewpoint the transition is heading to.
        target_id: u32,
        /// Fov when the zoom began.
        start_fov: f32,
        /// Fov reached at the crossfade handoff.
        target_fov: f32,
        /// The 2000 ms zoom window; the handoff fires at its midpoint.
        anim: Animation,
    },
    /// Waiting for the host to construct the incoming panorama.
    Switching,
    /// Zooming the incoming panorama back out to the normal fov.
    ZoomingOut {
        /// Symmetric zoomed-out fov the panorama entered at.
        from_fov: f32,
        /// The 2000 ms recovery window.
        anim: Animation,
    },
}

impl TransitionState {
    /// Returns the state tag name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TransitionState::Idle => "Idle",
            TransitionState::Rotating { .. } => "Rotating",
            TransitionState::ZoomingIn { .. } => "ZoomingIn",
            TransitionState::Switching => "Switching",
            TransitionState::ZoomingOut { .. } => "ZoomingOut",
        }
    }
}

/// State machine orchestrating rotation, zoom, and crossfade across a
/// viewpoint switch. Driven once per frame with the host-sampled time; it
/// owns scripted writes to yaw/pitch/fov while any transition is in
/// flight, so hosts must suppress pointer rotation until [`Self::is_active`]
/// goes false again.
#[derive(Debug, Clone)]
pub struct TransitionController {
    state: TransitionState,
    options: NavOptions,
}

impl TransitionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(options: NavOptions) -> Self {
        Self {
            state: TransitionState::Idle,
            options,
        }
    }

    /// Creates a controller already in `ZoomingOut`, for a session entered
    /// through a crossfade: the incoming panorama starts at the symmetric
    /// zoomed-out fov and animates back to normal.
    #[must_use]
    pub fn resuming_zoom_out(
        options: NavOptions,
        view: &mut ViewOrientation,
        incoming_fov: f32,
        now: f64,
    ) -> Self {
        view.set_fov_scripted(incoming_fov);
        let anim = Animation::start(now, f64::from(options.zoom_duration));
        Self {
            state: TransitionState::ZoomingOut {
                from_fov: incoming_fov,
                anim,
            },
            options,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// True while a transition owns yaw/pitch/fov.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, TransitionState::Idle)
    }

    /// Handles a hotspot activation.
    ///
    /// Activations arriving while a transition is in flight are ignored;
    /// only `Idle` accepts one. Without a target angle the switch is
    /// requested immediately at the current angle and no animation runs.
    pub fn activate(
        &mut self,
        activation: HotspotActivation,
        view: &ViewOrientation,
        now: f64,
    ) -> Option<SwitchRequest> {
        if self.is_active() {
            log::debug!(
                "ignoring hotspot {} activation mid-transition",
                activation.target_id
            );
            return None;
        }
        let Some(target_angle) = activation.target_angle else {
            log::debug!(
                "switching to viewpoint {} without reorientation",
                activation.target_id
            );
            return Some(SwitchRequest {
                target_id: activation.target_id,
                angle: view.angle(),
                incoming_fov: None,
            });
        };
        let from = view.angle();
        self.state = TransitionState::Rotating {
            target_id: activation.target_id,
            from,
            delta: shortest_path(from, target_angle),
            distance: activation
                .distance
                .unwrap_or(self.options.max_zoom_distance),
            anim: Animation::start(now, f64::from(self.options.rotate_duration)),
        };
        log::debug!("rotating toward viewpoint {}", activation.target_id);
        None
    }

    /// Advances the state machine one frame, applying scripted writes to
    /// the view. Returns the switch request at the crossfade handoff.
    pub fn frame(&mut self, view: &mut ViewOrientation, now: f64) -> Option<SwitchRequest> {
        match self.state {
            TransitionState::Idle | TransitionState::Switching => None,
            TransitionState::Rotating {
                target_id,
                from,
                delta,
                distance,
                anim,
            } => {
                let eased = ease_in_out_cubic(anim.progress(now));
                view.set_angle(LookAngle::new(
                    from.yaw + delta.d_yaw * eased,
                    from.pitch + delta.d_pitch * eased,
                ));
                if anim.is_complete(now) {
                    let target_fov = zoom_fov(distance, &self.options);
                    self.state = TransitionState::ZoomingIn {
                        target_id,
                        start_fov: view.fov(),
                        target_fov,
                        anim: Animation::start(now, f64::from(self.options.zoom_duration)),
                    };
                    log::debug!(
                        "zooming in toward viewpoint {target_id} (target fov {target_fov:.1})"
                    );
                }
                None
            }
            TransitionState::ZoomingIn {
                target_id,
                start_fov,
                target_fov,
                anim,
            } => {
                let raw = anim.progress(now);
                // The fov tween completes over the first half of the window
                // so the outgoing panorama sits exactly at `target_fov` when
                // the handoff fires.
                let eased = ease_in_out_quad((raw / CROSSFADE_HANDOFF).min(1.0));
                view.set_fov_scripted(lerp(start_fov, target_fov, eased));
                if raw >= CROSSFADE_HANDOFF {
                    self.state = TransitionState::Switching;
                    log::debug!("crossfade handoff to viewpoint {target_id}");
                    return Some(SwitchRequest {
                        target_id,
                        angle: view.angle(),
                        incoming_fov: Some(symmetric_fov(target_fov, &self.options)),
                    });
                }
                None
            }
            TransitionState::ZoomingOut { from_fov, anim } => {
                let eased = ease_out_quad(anim.progress(now));
                view.set_fov_scripted(lerp(from_fov, self.options.normal_fov, eased));
                if anim.is_complete(now) {
                    view.set_fov_scripted(self.options.normal_fov);
                    self.state = TransitionState::Idle;
                    log::debug!("transition complete");
                }
                None
            }
        }
    }

    /// Overlay opacity for the current frame: 1.0 when idle or rotating,
    /// fading to 0.5 across the first half of the zoom-in window, 0.5
    /// while switching, recovering to 1.0 across the zoom-out.
    #[must_use]
    pub fn overlay_opacity(&self, now: f64) -> f32 {
        match self.state {
            TransitionState::Idle | TransitionState::Rotating { .. } => 1.0,
            TransitionState::ZoomingIn { anim, .. } => {
                let raw = anim.progress(now);
                1.0 - HANDOFF_OPACITY * (raw / CROSSFADE_HANDOFF).min(1.0)
            }
            TransitionState::Switching => HANDOFF_OPACITY,
            TransitionState::ZoomingOut { anim, .. } => {
                HANDOFF_OPACITY + (1.0 - HANDOFF_OPACITY) * anim.progress(now)
            }
        }
    }

    /// Aborts any in-flight transition, returning to `Idle`. Used when a
    /// target id turns out to be unknown or the user escapes to the
    /// overhead view.
    pub fn abort(&mut self) {
        if self.is_active() {
            log::debug!("transition aborted from {}", self.state.name());
        }
        self.state = TransitionState::Idle;
    }
}
