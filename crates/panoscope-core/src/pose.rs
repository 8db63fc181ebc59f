//! Pose conversion from the photogrammetry frame to the render frame.

use glam::{Mat4, Quat, Vec3};

/// Determinant magnitude below which a source transform is rejected.
pub const MIN_DETERMINANT: f32 = 1e-10;

/// A camera pose expressed in the render engine's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPose {
    /// Position in render space.
    pub position: Vec3,
    /// Orientation in render space (unit quaternion).
    pub orientation: Quat,
}

/// Returns the fixed basis change from the photogrammetry tool's axis
/// convention (Z up) to the render engine's (Y up): a -90 degree rotation
/// about X, mapping (x, y, z) to (x, z, -y).
#[must_use]
pub fn basis_change() -> Mat4 {
    Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Converts a source 4x4 pose transform into a render-space pose.
///
/// Returns `None` when the transform is unusable: any non-finite entry, a
/// determinant magnitude under [`MIN_DETERMINANT`], or a decomposition that
/// produces non-finite components. The source format encodes rigid
/// transforms only, so scale is read and discarded.
///
/// The basis change is applied as a change of coordinate frame,
/// `B * pose * B^-1`, so the identity pose stays the identity: a camera
/// with no source rotation has no render rotation either, while its
/// translation is re-expressed in render axes.
#[must_use]
pub fn convert(source: Mat4) -> Option<RenderPose> {
    if !source.to_cols_array().iter().all(|v| v.is_finite()) {
        return None;
    }
    if source.determinant().abs() < MIN_DETERMINANT {
        return None;
    }

    let (_scale, rotation, translation) = source.to_scale_rotation_translation();
    let rigid = Mat4::from_rotation_translation(rotation.normalize(), translation);

    let basis = basis_change();
    let render = basis * rigid * basis.inverse();
    let (_scale, orientation, position) = render.to_scale_rotation_translation();

    if !position.is_finite() || !orientation.is_finite() {
        return None;
    }

    Some(RenderPose {
        position,
        orientation: orientation.normalize(),
    })
}

/// A single capture position: its pose, source label, and the panorama
/// image taken there.
///
/// Immutable after construction; the tour never mutates stored poses.
#[derive(Debug, Clone)]
pub struct CameraPose {
    /// Logical viewpoint id, parsed from the label. Distinct from the
    /// record's position in the source listing.
    pub id: u32,
    /// Source identifier, `<group>_frame_<cameraId>`.
    pub label: String,
    /// Position in render space.
    pub position: Vec3,
    /// Orientation in render space (unit quaternion).
    pub orientation: Quat,
    /// The original source transform, retained for diagnostics.
    pub source_transform: Mat4,
    /// Reference to the panorama image for this viewpoint.
    pub image_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_identity_pose_converts_to_identity() {
        let pose = convert(Mat4::IDENTITY).expect("identity must be valid");
        assert_relative_eq!(pose.position.length(), 0.0, epsilon = 1e-6);
        assert!(pose.orientation.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_translation_is_rebased_to_y_up() {
        let source = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let pose = convert(source).expect("pure translation must be valid");
        // (x, y, z) -> (x, z, -y): the source Z-up height becomes render Y.
        assert_relative_eq!(pose.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(pose.position.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(pose.position.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_singular_transform_is_rejected() {
        let mut cols = Mat4::IDENTITY.to_cols_array();
        cols[0] = 0.0; // zero out the X column's diagonal -> det = 0
        assert!(convert(Mat4::from_cols_array(&cols)).is_none());
    }

    #[test]
    fn test_non_finite_transform_is_rejected() {
        let mut cols = Mat4::IDENTITY.to_cols_array();
        cols[5] = f32::NAN;
        assert!(convert(Mat4::from_cols_array(&cols)).is_none());
        cols[5] = f32::INFINITY;
        assert!(convert(Mat4::from_cols_array(&cols)).is_none());
    }

    #[test]
    fn test_scale_is_discarded() {
        let source = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.5),
            Quat::from_rotation_z(0.3),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let pose = convert(source).expect("scaled rigid transform must be valid");
        // Translation is untouched by the discarded scale.
        assert_relative_eq!(pose.position.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(pose.orientation.length(), 1.0, epsilon = 1e-5);
    }

    proptest! {
        /// Converting, recomposing into a matrix, and re-decomposing yields
        /// the same position/orientation for any rigid transform.
        #[test]
        fn prop_decomposition_is_stable(
            yaw in -3.1f32..3.1,
            pitch in -1.5f32..1.5,
            roll in -3.1f32..3.1,
            tx in -100.0f32..100.0,
            ty in -100.0f32..100.0,
            tz in -100.0f32..100.0,
        ) {
            let source = Mat4::from_rotation_translation(
                Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, roll),
                Vec3::new(tx, ty, tz),
            );
            let pose = convert(source).expect("rigid transform must be valid");

            let recomposed = Mat4::from_rotation_translation(pose.orientation, pose.position);
            let (_s, orientation, position) = recomposed.to_scale_rotation_translation();

            prop_assert!((position - pose.position).length() < 1e-3);
            prop_assert!(orientation.angle_between(pose.orientation) < 1e-3);
        }

        /// The converted orientation is always a unit quaternion.
        #[test]
        fn prop_orientation_is_unit(
            yaw in -3.1f32..3.1,
            tx in -10.0f32..10.0,
        ) {
            let source = Mat4::from_rotation_translation(
                Quat::from_rotation_y(yaw),
                Vec3::new(tx, 0.0, 0.0),
            );
            let pose = convert(source).expect("rigid transform must be valid");
            prop_assert!((pose.orientation.length() - 1.0).abs() < 1e-4);
        }
    }
}
