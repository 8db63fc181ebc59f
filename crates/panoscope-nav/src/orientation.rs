//! The live view orientation of the panorama camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pitch clamp in degrees; the panorama never looks fully up or down.
pub const PITCH_LIMIT: f32 = 85.0;

/// Lower field-of-view bound for user-driven zoom, degrees.
pub const FOV_MIN: f32 = 10.0;

/// Upper field-of-view bound for user-driven zoom, degrees.
pub const FOV_MAX: f32 = 100.0;

/// A yaw/pitch pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LookAngle {
    /// Horizontal look angle, unbounded.
    pub yaw: f32,
    /// Vertical look angle, measured from the horizontal plane.
    pub pitch: f32,
}

impl LookAngle {
    /// Creates a look angle.
    #[must_use]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Yaw normalized into [0, 360) for display.
    #[must_use]
    pub fn display_yaw(&self) -> f32 {
        self.yaw.rem_euclid(360.0)
    }
}

/// Signed angular deltas between two look angles, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleDelta {
    /// Yaw delta on the shortest-path branch.
    pub d_yaw: f32,
    /// Direct pitch delta.
    pub d_pitch: f32,
}

/// Computes the signed shortest angular delta from `from` to `to`.
///
/// Yaw takes the <= 180 degree branch, wrapping through +-360 as needed;
/// pitch is a direct difference since its domain never reaches +-180.
#[must_use]
pub fn shortest_path(from: LookAngle, to: LookAngle) -> AngleDelta {
    let mut d_yaw = (to.yaw - from.yaw) % 360.0;
    if d_yaw > 180.0 {
        d_yaw -= 360.0;
    } else if d_yaw < -180.0 {
        d_yaw += 360.0;
    }
    AngleDelta {
        d_yaw,
        d_pitch: to.pitch - from.pitch,
    }
}

/// Converts a look angle to a unit vector, consistent with the hotspot
/// projector's convention: pitch measured from the horizontal plane, yaw
/// from the local +X axis toward +Z.
#[must_use]
pub fn look_vector(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    let pitch = pitch_degrees.to_radians();
    Vec3::new(
        pitch.cos() * yaw.cos(),
        pitch.sin(),
        pitch.cos() * yaw.sin(),
    )
}

/// The live yaw/pitch/field-of-view of the panorama camera.
///
/// One instance per active panorama session; yaw/pitch is carried forward
/// across a viewpoint switch so the user's look direction persists.
#[derive(Debug, Clone)]
pub struct ViewOrientation {
    yaw: f32,
    pitch: f32,
    fov: f32,
}

impl ViewOrientation {
    /// Creates an orientation looking at `angle` with the given field of view.
    #[must_use]
    pub fn new(angle: LookAngle, fov: f32) -> Self {
        Self {
            yaw: angle.yaw,
            pitch: angle.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov,
        }
    }

    /// Current yaw in degrees, unbounded.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees, inside [-85, 85].
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Current yaw/pitch as a [`LookAngle`].
    pub fn angle(&self) -> LookAngle {
        LookAngle::new(self.yaw, self.pitch)
    }

    /// Applies pointer deltas. Pitch stays clamped; yaw is unbounded and
    /// wraps implicitly through trigonometric use.
    pub fn rotate(&mut self, delta_yaw_px: f32, delta_pitch_px: f32, sensitivity: f32) {
        self.yaw += delta_yaw_px * sensitivity;
        self.pitch = (self.pitch + delta_pitch_px * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// User-driven zoom, clamped to the free-zoom band.
    pub fn zoom(&mut self, delta_fov: f32) {
        self.fov = (self.fov + delta_fov).clamp(FOV_MIN, FOV_MAX);
    }

    /// Scripted field-of-view override; transitions may leave the
    /// free-zoom band transiently.
    pub fn set_fov_scripted(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Scripted yaw/pitch snap.
    pub fn set_angle(&mut self, angle: LookAngle) {
        self.yaw = angle.yaw;
        self.pitch = angle.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// The current look direction as a unit vector.
    #[must_use]
    pub fn look_dir(&self) -> Vec3 {
        look_vector(self.yaw, self.pitch)
    }
}
