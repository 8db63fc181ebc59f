//! The viewpoint catalog: an immutable per-session tour of capture poses.

use std::collections::HashMap;

use crate::error::{PanoscopeError, Result};
use crate::options::TourOptions;
use crate::pose::CameraPose;
use crate::record::PoseRecord;

/// An immutable, ordered-by-arrival set of capture poses plus the shared
/// overhead model reference.
///
/// Built once per load and treated as read-only for the rest of the
/// session; a reload rebuilds the tour wholesale. The tour is a value, not
/// a singleton.
#[derive(Debug, Clone, Default)]
pub struct Tour {
    viewpoints: Vec<CameraPose>,
    by_id: HashMap<u32, usize>,
    model_ref: String,
}

impl Tour {
    /// Builds a tour from already-converted poses.
    ///
    /// Duplicate ids are fatal; duplicate labels only warn.
    pub fn build(viewpoints: Vec<CameraPose>, model_ref: impl Into<String>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(viewpoints.len());
        let mut labels: HashMap<String, u32> = HashMap::with_capacity(viewpoints.len());
        for (index, pose) in viewpoints.iter().enumerate() {
            if by_id.insert(pose.id, index).is_some() {
                return Err(PanoscopeError::DuplicateId(pose.id));
            }
            if let Some(previous) = labels.insert(pose.label.clone(), pose.id) {
                log::warn!(
                    "label '{}' used by viewpoints {previous} and {}",
                    pose.label,
                    pose.id
                );
            }
        }
        log::info!("tour built: {} viewpoints", viewpoints.len());
        Ok(Self {
            viewpoints,
            by_id,
            model_ref: model_ref.into(),
        })
    }

    /// Builds a tour from raw pose-source records.
    ///
    /// Records with malformed labels or transforms, or degenerate poses,
    /// are dropped with a warning naming the label; they never abort the
    /// rest of the load.
    pub fn from_records(
        records: &[PoseRecord],
        options: &TourOptions,
        model_ref: impl Into<String>,
    ) -> Result<Self> {
        let mut poses = Vec::with_capacity(records.len());
        for record in records {
            match record.to_camera_pose(options) {
                Ok(pose) => poses.push(pose),
                Err(err) => log::warn!("dropping camera '{}': {err}", record.label),
            }
        }
        Self::build(poses, model_ref)
    }

    /// Looks up a viewpoint by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&CameraPose> {
        self.by_id.get(&id).map(|&index| &self.viewpoints[index])
    }

    /// Like [`Tour::get`], but an unknown id is an error.
    pub fn require(&self, id: u32) -> Result<&CameraPose> {
        self.get(id).ok_or(PanoscopeError::UnknownViewpoint(id))
    }

    /// Returns the `k` nearest other viewpoints, ascending by Euclidean
    /// distance in render space, ties broken by ascending id.
    ///
    /// The query viewpoint itself is excluded, and the ordering is
    /// deterministic for equal inputs.
    pub fn neighbors_of(&self, id: u32, k: usize) -> Result<Vec<&CameraPose>> {
        let origin = self.require(id)?;
        let mut neighbors: Vec<&CameraPose> = self
            .viewpoints
            .iter()
            .filter(|pose| pose.id != id)
            .collect();
        neighbors.sort_by(|a, b| {
            let da = a.position.distance_squared(origin.position);
            let db = b.position.distance_squared(origin.position);
            da.total_cmp(&db).then_with(|| a.id.cmp(&b.id))
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }

    /// Reference to the shared overhead 3D model asset.
    #[must_use]
    pub fn model_ref(&self) -> &str {
        &self.model_ref
    }

    /// Iterates over all viewpoints in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &CameraPose> {
        self.viewpoints.iter()
    }

    /// Number of viewpoints in the tour.
    #[must_use]
    pub fn len(&self) -> usize {
        self.viewpoints.len()
    }

    /// Returns true if the tour holds no viewpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Quat, Vec3};

    fn pose(id: u32, position: Vec3) -> CameraPose {
        CameraPose {
            id,
            label: format!("1_frame_{id}"),
            position,
            orientation: Quat::IDENTITY,
            source_transform: Mat4::IDENTITY,
            image_ref: format!("frames/1_frame_{id}.jpg"),
        }
    }

    #[test]
    fn test_build_indexes_by_id() {
        let tour = Tour::build(
            vec![pose(3, Vec3::ZERO), pose(1, Vec3::X)],
            "model.glb",
        )
        .expect("build");
        assert_eq!(tour.len(), 2);
        assert_eq!(tour.model_ref(), "model.glb");
        assert_eq!(tour.get(3).expect("id 3").position, Vec3::ZERO);
        assert_eq!(tour.get(1).expect("id 1").position, Vec3::X);
        assert!(tour.get(2).is_none());
        assert!(matches!(
            tour.require(2),
            Err(PanoscopeError::UnknownViewpoint(2))
        ));
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let result = Tour::build(vec![pose(1, Vec3::ZERO), pose(1, Vec3::X)], "m");
        assert!(matches!(result, Err(PanoscopeError::DuplicateId(1))));
    }

    #[test]
    fn test_duplicate_label_is_only_a_warning() {
        let mut a = pose(1, Vec3::ZERO);
        let mut b = pose(2, Vec3::X);
        a.label = "1_frame_9".to_string();
        b.label = "1_frame_9".to_string();
        let tour = Tour::build(vec![a, b], "m").expect("duplicate labels must build");
        assert_eq!(tour.len(), 2);
    }

    #[test]
    fn test_neighbors_sorted_by_distance_then_id() {
        let tour = Tour::build(
            vec![
                pose(0, Vec3::ZERO),
                pose(5, Vec3::new(2.0, 0.0, 0.0)),
                pose(2, Vec3::new(0.0, 1.0, 0.0)),
                // Same distance as id 5; id breaks the tie.
                pose(3, Vec3::new(0.0, 0.0, 2.0)),
            ],
            "m",
        )
        .expect("build");

        let neighbors = tour.neighbors_of(0, 10).expect("neighbors");
        let ids: Vec<u32> = neighbors.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);

        let nearest = tour.neighbors_of(0, 1).expect("neighbors");
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].id, 2);
    }

    #[test]
    fn test_neighbors_excludes_self_and_unknown_is_error() {
        let tour = Tour::build(vec![pose(0, Vec3::ZERO), pose(1, Vec3::X)], "m").expect("build");
        let ids: Vec<u32> = tour
            .neighbors_of(0, 10)
            .expect("neighbors")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1]);
        assert!(matches!(
            tour.neighbors_of(9, 1),
            Err(PanoscopeError::UnknownViewpoint(9))
        ));
    }

    #[test]
    fn test_from_records_drops_invalid_entries() {
        let identity = "1 0 0 0  0 1 0 0  0 0 1 0  0 0 0 1";
        let records = vec![
            PoseRecord::new(0, "1_frame_0", identity),
            // Singular transform: dropped, catalog size unaffected by it.
            PoseRecord::new(1, "1_frame_1", "0 0 0 0  0 0 0 0  0 0 0 0  0 0 0 1"),
            // Malformed label: dropped.
            PoseRecord::new(2, "frame2", identity),
            PoseRecord::new(3, "1_frame_3", identity),
        ];
        let tour =
            Tour::from_records(&records, &TourOptions::default(), "m").expect("build");
        assert_eq!(tour.len(), 2);
        assert!(tour.get(0).is_some());
        assert!(tour.get(3).is_some());
        assert!(tour.get(1).is_none());
    }
}
