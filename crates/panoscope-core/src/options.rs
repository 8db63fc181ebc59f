//! Configuration options for tour building and navigation.

use serde::{Deserialize, Serialize};

/// Options controlling catalog construction and asset reference derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourOptions {
    /// Directory holding the per-viewpoint panorama frames.
    pub frames_dir: String,

    /// File extension of the panorama frames.
    pub image_ext: String,
}

impl TourOptions {
    /// Derives the panorama image reference for a label.
    #[must_use]
    pub fn image_ref(&self, label: &str) -> String {
        format!("{}/{}.{}", self.frames_dir, label, self.image_ext)
    }
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            frames_dir: "frames".to_string(),
            image_ext: "jpg".to_string(),
        }
    }
}

/// Tunables for hotspot projection and the transition state machine.
///
/// All angles and fields of view are in degrees, durations in seconds,
/// distances in render units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavOptions {
    /// Field of view restored after every transition.
    pub normal_fov: f32,

    /// Duration of the rotate-toward-target stage.
    pub rotate_duration: f32,

    /// Duration of each zoom/fade window.
    pub zoom_duration: f32,

    /// Smallest zoom-in amount, applied at or beyond `max_zoom_distance`.
    pub min_zoom_amount: f32,

    /// Largest zoom-in amount, approached as the target distance goes to zero.
    pub max_zoom_amount: f32,

    /// Distance at which the zoom amount bottoms out.
    pub max_zoom_distance: f32,

    /// Smallest overhead marker size, pixels.
    pub marker_min_size: f32,

    /// Largest overhead marker size, pixels.
    pub marker_max_size: f32,

    /// Scale factor dividing overhead distance into marker size.
    pub marker_scale: f32,

    /// Distance at which panorama hotspots reach full falloff.
    pub falloff_distance: f32,

    /// Exponent of the power half of the falloff blend.
    pub falloff_power: f32,

    /// Mix between the linear and power falloff curves: 0 = linear, 1 = power.
    pub falloff_blend: f32,

    /// Opacity floor for the farthest visible hotspots.
    pub min_hotspot_opacity: f32,

    /// Smallest panorama hotspot size.
    pub hotspot_min_size: f32,

    /// Largest panorama hotspot size.
    pub hotspot_max_size: f32,

    /// Angular spread from the look direction beyond which hotspots are culled.
    pub max_angular_spread: f32,

    /// Distance under which hotspots are culled.
    pub min_hotspot_distance: f32,

    /// Number of nearest neighbors surfaced as hotspots.
    pub hotspot_neighbors: usize,

    /// Pointer travel distinguishing a drag from a click, pixels.
    pub drag_threshold: f32,

    /// Degrees of rotation per pixel of pointer travel.
    pub rotate_sensitivity: f32,

    /// Degrees of field-of-view change per wheel step.
    pub wheel_zoom_step: f32,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            normal_fov: 75.0,
            rotate_duration: 0.8,
            zoom_duration: 2.0,
            min_zoom_amount: 5.0,
            max_zoom_amount: 40.0,
            max_zoom_distance: 10.0,
            marker_min_size: 8.0,
            marker_max_size: 48.0,
            marker_scale: 120.0,
            falloff_distance: 12.0,
            falloff_power: 2.0,
            falloff_blend: 0.6,
            min_hotspot_opacity: 0.05,
            hotspot_min_size: 0.25,
            hotspot_max_size: 1.0,
            max_angular_spread: 75.0,
            min_hotspot_distance: 0.4,
            hotspot_neighbors: 4,
            drag_threshold: 5.0,
            rotate_sensitivity: 0.1,
            wheel_zoom_step: 3.0,
        }
    }
}
