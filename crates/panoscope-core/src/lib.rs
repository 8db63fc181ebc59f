//! Core data model for panoscope.
//!
//! This crate provides the types shared by the navigation subsystem and the
//! session facade:
//! - [`convert`] and [`CameraPose`] - pose conversion from the
//!   photogrammetry tool's coordinate frame into the render engine's frame
//! - [`PoseRecord`] - one camera entry from the pose source, with label
//!   parsing and numeric transform extraction
//! - [`Tour`] - the immutable per-session viewpoint catalog with
//!   nearest-neighbor queries
//! - [`TourOptions`] / [`NavOptions`] - serde-backed configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessor-heavy data model; must_use on every getter is noise
#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod error;
pub mod options;
pub mod pose;
pub mod record;

pub use catalog::Tour;
pub use error::{PanoscopeError, Result};
pub use options::{NavOptions, TourOptions};
pub use pose::{basis_change, convert, CameraPose, RenderPose, MIN_DETERMINANT};
pub use record::{parse_label, parse_transform, PoseRecord};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
