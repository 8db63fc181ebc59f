//! Navigation subsystem for panoscope.
//!
//! Three cooperating pieces sit here:
//! - [`ViewOrientation`] - the live yaw/pitch/field-of-view of the panorama
//!   camera, with rotate/zoom operations and shortest-path angle helpers
//! - the hotspot projector - placement of neighboring capture positions in
//!   the overhead view ([`project_overhead`]) and inside the current
//!   panorama ([`project_panorama`]), with per-frame display culling
//! - [`TransitionController`] - the state machine animating a viewpoint
//!   switch: rotate toward the target, zoom/fade out, hand off, zoom/fade in
//!
//! Everything is driven by the host's per-frame callback with a sampled
//! wall-clock time; nothing here blocks or spawns timers.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessor-heavy state types; must_use on every getter is noise
#![allow(clippy::must_use_candidate)]

pub mod easing;
pub mod orientation;
pub mod projector;
pub mod transition;

pub use easing::{ease_in_out_cubic, ease_in_out_quad, ease_out_quad, lerp, Animation};
pub use orientation::{
    look_vector, shortest_path, AngleDelta, LookAngle, ViewOrientation, FOV_MAX, FOV_MIN,
    PITCH_LIMIT,
};
pub use projector::{
    is_culled, project_overhead, project_panorama, visible_hotspots, Hotspot, HotspotPlacement,
    ScreenPlacement,
};
pub use transition::{
    symmetric_fov, zoom_fov, HotspotActivation, SwitchRequest, TransitionController,
    TransitionState, CROSSFADE_HANDOFF, HANDOFF_OPACITY,
};
