//! panoscope-rs: spatial navigation for photogrammetry panorama tours.
//!
//! A captured space is explored through an overhead model view with a
//! marker per capture position and an immersive panorama entered at any
//! marker. This crate is the navigation core behind both: pose conversion,
//! the viewpoint catalog, hotspot projection, the live view orientation,
//! and the animated transition between viewpoints. Rendering, asset
//! loading, and UI stay with the host; the one signal emitted back is a
//! [`SwitchRequest`].
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use panoscope::*;
//!
//! fn main() -> Result<()> {
//!     // Two capture positions from the pose source.
//!     let records = vec![
//!         PoseRecord::new(0, "1_frame_1", "1 0 0 0  0 1 0 0  0 0 1 0  0 0 0 1"),
//!         PoseRecord::new(1, "1_frame_2", "1 0 0 2  0 1 0 0  0 0 1 0  0 0 0 1"),
//!     ];
//!     let tour = Arc::new(Tour::from_records(
//!         &records,
//!         &TourOptions::default(),
//!         "scene.glb",
//!     )?);
//!
//!     // Enter the panorama at viewpoint 1 and activate the hotspot to 2.
//!     let mut session = PanoramaSession::enter(
//!         Arc::clone(&tour),
//!         1,
//!         None,
//!         NavOptions::default(),
//!         Box::new(NopDebugSink),
//!         0.0,
//!     )?;
//!     session.activate_hotspot(2, 0.0)?;
//!
//!     // Drive frames until the controller hands off to viewpoint 2.
//!     let mut now = 0.0;
//!     let request = loop {
//!         now += 1.0 / 60.0;
//!         if let Some(request) = session.frame(now)?.switch {
//!             break request;
//!         }
//!     };
//!     assert_eq!(request.target_id, 2);
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod debug;
pub mod input;
pub mod prefetch;
pub mod session;

pub use debug::{DebugSink, NopDebugSink, RecordingDebugSink};
pub use input::{wheel_zoom_delta, PointerOutcome, PointerTracker};
pub use prefetch::{CancelToken, PrefetchTask};
pub use session::{EntryState, FrameOutput, PanoramaSession};

// Re-export the data model
pub use panoscope_core::{
    basis_change, convert, parse_label, parse_transform, CameraPose, NavOptions, PanoscopeError,
    PoseRecord, RenderPose, Result, Tour, TourOptions, MIN_DETERMINANT,
};

// Re-export the navigation subsystem
pub use panoscope_nav::{
    ease_in_out_cubic, ease_in_out_quad, ease_out_quad, is_culled, look_vector, project_overhead,
    project_panorama, shortest_path, symmetric_fov, visible_hotspots, zoom_fov, AngleDelta,
    Animation, Hotspot, HotspotActivation, HotspotPlacement, LookAngle, ScreenPlacement,
    SwitchRequest, TransitionController, TransitionState, ViewOrientation, CROSSFADE_HANDOFF,
    FOV_MAX, FOV_MIN, HANDOFF_OPACITY, PITCH_LIMIT,
};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
