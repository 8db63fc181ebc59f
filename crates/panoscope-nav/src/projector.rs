//! Hotspot projection: overhead screen placement and panorama local angles.
//!
//! Both projections are pure functions of the current pose, the target
//! position, and the viewer state. Visibility here is heuristic only -
//! angular spread and distance, never a depth-buffer query. Click and hover
//! hit-testing stays with the render engine's ray-picking; the projector
//! only supplies placement.

use glam::{Mat4, Vec2, Vec3};

use panoscope_core::{CameraPose, NavOptions, Result, Tour};

use crate::easing::lerp;
use crate::orientation::{look_vector, ViewOrientation};

/// Screen-space placement of an overhead marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenPlacement {
    /// On screen at the given pixel position and point size.
    Visible {
        /// Pixel position, origin top-left.
        position: Vec2,
        /// Marker size in pixels.
        size: f32,
    },
    /// Behind the overhead camera.
    Behind,
    /// In front of the camera but outside the viewport.
    OffScreen,
}

/// Placement of a hotspot inside the current panorama.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotPlacement {
    /// Azimuth in the panorama's local convention, degrees.
    pub yaw: f32,
    /// Elevation from the horizontal plane, degrees.
    pub pitch: f32,
    /// Euclidean distance to the target viewpoint, render units.
    pub distance: f32,
    /// Render size after distance falloff.
    pub size: f32,
    /// Opacity after distance falloff.
    pub opacity: f32,
}

/// A projected neighbor ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    /// Viewpoint the marker jumps to.
    pub target_id: u32,
    /// Placement inside the current panorama.
    pub placement: HotspotPlacement,
}

/// Projects a target capture position onto the overhead view.
///
/// `view_proj` is the overhead camera's combined view-projection matrix and
/// `viewport` the viewport size in pixels. Marker size scales inversely
/// with the distance from the overhead viewer, clamped to the configured
/// band so near markers read larger without dominating the view.
#[must_use]
pub fn project_overhead(
    target: Vec3,
    view_proj: Mat4,
    viewport: Vec2,
    viewer: Vec3,
    options: &NavOptions,
) -> ScreenPlacement {
    let clip = view_proj * target.extend(1.0);
    if clip.w <= 0.0 {
        return ScreenPlacement::Behind;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z > 1.0 {
        return ScreenPlacement::OffScreen;
    }
    let position = Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    );
    let distance = viewer.distance(target).max(1e-3);
    let size =
        (options.marker_scale / distance).clamp(options.marker_min_size, options.marker_max_size);
    ScreenPlacement::Visible { position, size }
}

/// Distance falloff weight in [0, 1]: 1 at the viewer, 0 at
/// `falloff_distance` and beyond. A blend of a linear ramp and a power
/// curve; the mix is a display tunable, not a physical light model.
fn falloff_weight(distance: f32, options: &NavOptions) -> f32 {
    let t = (distance / options.falloff_distance).clamp(0.0, 1.0);
    let linear = 1.0 - t;
    let powered = 1.0 - t.powf(options.falloff_power);
    lerp(linear, powered, options.falloff_blend)
}

/// Projects a target capture position into the current panorama's local
/// azimuth/elevation frame.
///
/// The relative vector is remapped by a fixed axis permutation plus a
/// quarter-turn correction: the panorama's forward axis differs from the
/// overhead scene's forward axis by 90 degrees. Size and opacity fall off
/// with distance so nearby viewpoints read emphatic and far ones fade
/// toward transparent.
#[must_use]
pub fn project_panorama(
    current: &CameraPose,
    target: Vec3,
    options: &NavOptions,
) -> HotspotPlacement {
    let relative = target - current.position;
    let distance = relative.length();

    // Axis permutation + quarter turn into the panorama frame.
    let local = Vec3::new(-relative.z, relative.y, relative.x);
    let horizontal = local.x.hypot(local.z);
    let yaw = local.z.atan2(local.x).to_degrees();
    let pitch = local.y.atan2(horizontal).to_degrees();

    let weight = falloff_weight(distance, options);
    let size = lerp(options.hotspot_min_size, options.hotspot_max_size, weight);
    let opacity = lerp(options.min_hotspot_opacity, 1.0, weight);

    HotspotPlacement {
        yaw,
        pitch,
        distance,
        size,
        opacity,
    }
}

/// Per-frame display culling: beyond the configured angular spread from
/// the current look direction, or under the minimum distance. Culled
/// hotspots stay in the catalog; this is purely a render decision.
#[must_use]
pub fn is_culled(
    placement: &HotspotPlacement,
    view: &ViewOrientation,
    options: &NavOptions,
) -> bool {
    if placement.distance < options.min_hotspot_distance {
        return true;
    }
    let to_hotspot = look_vector(placement.yaw, placement.pitch);
    let separation = view
        .look_dir()
        .dot(to_hotspot)
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees();
    separation > options.max_angular_spread
}

/// Projects the current viewpoint's nearest neighbors and drops the ones
/// culled for this frame.
pub fn visible_hotspots(
    tour: &Tour,
    current_id: u32,
    view: &ViewOrientation,
    options: &NavOptions,
) -> Result<Vec<Hotspot>> {
    let current = tour.require(current_id)?;
    let neighbors = tour.neighbors_of(current_id, options.hotspot_neighbors)?;
    Ok(neighbors
        .into_iter()
        .map(|target| Hotspot {
            target_id: target.id,
            placement: project_panorama(current, target.position, options),
        })
        .filter(|hotspot| !is_culled(&hotspot.placement, view, options))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::LookAngle;
    use approx::assert_relative_eq;
    use glam::Quat;
    use panoscope_core::Mat4;

    fn pose_at(id: u32, position: Vec3) -> CameraPose {
        CameraPose {
            id,
            label: format!("1_frame_{id}"),
            position,
            orientation: Quat::IDENTITY,
            source_transform: Mat4::IDENTITY,
            image_ref: format!("frames/1_frame_{id}.jpg"),
        }
    }

    fn overhead_camera() -> Mat4 {
        // Looking straight down from above the origin.
        let view = Mat4::look_at_rh(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
        let proj = Mat4::perspective_rh(60.0_f32.to_radians(), 1.0, 0.1, 100.0);
        proj * view
    }

    #[test]
    fn test_overhead_center_maps_to_viewport_center() {
        let viewport = Vec2::new(800.0, 600.0);
        let placement = project_overhead(
            Vec3::ZERO,
            overhead_camera(),
            viewport,
            Vec3::new(0.0, 10.0, 0.0),
            &NavOptions::default(),
        );
        match placement {
            ScreenPlacement::Visible { position, .. } => {
                assert_relative_eq!(position.x, 400.0, epsilon = 1e-2);
                assert_relative_eq!(position.y, 300.0, epsilon = 1e-2);
            }
            other => panic!("expected visible placement, got {other:?}"),
        }
    }

    #[test]
    fn test_overhead_behind_and_offscreen() {
        let viewport = Vec2::new(800.0, 600.0);
        let viewer = Vec3::new(0.0, 10.0, 0.0);
        let options = NavOptions::default();

        let behind = project_overhead(
            Vec3::new(0.0, 20.0, 0.0),
            overhead_camera(),
            viewport,
            viewer,
            &options,
        );
        assert_eq!(behind, ScreenPlacement::Behind);

        let offscreen = project_overhead(
            Vec3::new(50.0, 0.0, 0.0),
            overhead_camera(),
            viewport,
            viewer,
            &options,
        );
        assert_eq!(offscreen, ScreenPlacement::OffScreen);
    }

    #[test]
    fn test_overhead_marker_size_band() {
        let viewport = Vec2::new(800.0, 600.0);
        let options = NavOptions::default();

        let near = project_overhead(
            Vec3::ZERO,
            overhead_camera(),
            viewport,
            Vec3::new(0.0, 1.0, 0.0),
            &options,
        );
        let far = project_overhead(
            Vec3::ZERO,
            overhead_camera(),
            viewport,
            Vec3::new(0.0, 90.0, 0.0),
            &options,
        );
        let (ScreenPlacement::Visible { size: near_size, .. },
             ScreenPlacement::Visible { size: far_size, .. }) = (near, far)
        else {
            panic!("both placements must be visible");
        };
        assert_relative_eq!(near_size, options.marker_max_size, epsilon = 1e-4);
        assert_relative_eq!(far_size, options.marker_min_size, epsilon = 1e-4);
    }

    #[test]
    fn test_panorama_angles_match_hand_computed_atan2() {
        // Current at the origin, target at (3, 0, 4): distance 5, level pitch.
        let current = pose_at(0, Vec3::ZERO);
        let placement = project_panorama(
            &current,
            Vec3::new(3.0, 0.0, 4.0),
            &NavOptions::default(),
        );
        assert_relative_eq!(placement.distance, 5.0, epsilon = 1e-5);
        assert_relative_eq!(placement.pitch, 0.0, epsilon = 1e-5);
        // local = (-4, 0, 3); yaw = atan2(3, -4).
        let expected_yaw = 3.0_f32.atan2(-4.0).to_degrees();
        assert_relative_eq!(placement.yaw, expected_yaw, epsilon = 1e-4);
    }

    #[test]
    fn test_panorama_pitch_for_raised_target() {
        let current = pose_at(0, Vec3::ZERO);
        let placement = project_panorama(
            &current,
            Vec3::new(0.0, 3.0, 3.0),
            &NavOptions::default(),
        );
        // Elevation over a horizontal run of 3 at height 3: 45 degrees up.
        assert_relative_eq!(placement.pitch, 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_falloff_fades_with_distance() {
        let options = NavOptions::default();
        let current = pose_at(0, Vec3::ZERO);

        let near = project_panorama(&current, Vec3::new(1.0, 0.0, 0.0), &options);
        let far = project_panorama(&current, Vec3::new(9.0, 0.0, 0.0), &options);
        assert!(near.opacity > far.opacity);
        assert!(near.size > far.size);

        // At and beyond the falloff distance both bottom out.
        let edge = project_panorama(
            &current,
            Vec3::new(options.falloff_distance, 0.0, 0.0),
            &options,
        );
        assert_relative_eq!(edge.opacity, options.min_hotspot_opacity, epsilon = 1e-4);
        assert_relative_eq!(edge.size, options.hotspot_min_size, epsilon = 1e-4);
    }

    #[test]
    fn test_culling_by_spread_and_distance() {
        let options = NavOptions::default();
        let view = ViewOrientation::new(LookAngle::default(), 75.0);

        // Directly along the look axis: kept.
        let ahead = HotspotPlacement {
            yaw: 0.0,
            pitch: 0.0,
            distance: 3.0,
            size: 1.0,
            opacity: 1.0,
        };
        assert!(!is_culled(&ahead, &view, &options));

        // Behind the viewer: 180 degrees of separation, culled.
        let behind = HotspotPlacement { yaw: 180.0, ..ahead };
        assert!(is_culled(&behind, &view, &options));

        // Too close: culled regardless of direction.
        let close = HotspotPlacement {
            distance: options.min_hotspot_distance / 2.0,
            ..ahead
        };
        assert!(is_culled(&close, &view, &options));
    }

    #[test]
    fn test_visible_hotspots_projects_neighbors() {
        let tour = Tour::build(
            vec![
                pose_at(0, Vec3::ZERO),
                pose_at(1, Vec3::new(2.0, 0.0, 0.0)),
                pose_at(2, Vec3::new(-2.0, 0.0, 0.0)),
            ],
            "m",
        )
        .expect("build");
        let options = NavOptions::default();

        // Looking along +X (yaw 90 in panorama convention after the
        // quarter turn maps +X to local +Z): only viewpoint 1 is in spread.
        let view = ViewOrientation::new(LookAngle::new(90.0, 0.0), 75.0);
        let hotspots = visible_hotspots(&tour, 0, &view, &options).expect("project");
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].target_id, 1);
        assert_relative_eq!(hotspots[0].placement.distance, 2.0, epsilon = 1e-5);
    }
}
