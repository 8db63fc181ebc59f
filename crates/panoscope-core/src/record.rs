//! Pose-source records and the numeric transform extraction.
//!
//! A record is one camera entry from the photogrammetry export: a raw id, a
//! label of the form `<group>_frame_<cameraId>`, and a whitespace-separated
//! 16-number row-major 4x4 transform string. The `cameraId` parsed from the
//! label is the authoritative logical id; the record's own id attribute only
//! identifies its position in the source listing.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::{PanoscopeError, Result};
use crate::options::TourOptions;
use crate::pose::{convert, CameraPose};

/// One camera record from the pose source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseRecord {
    /// Raw id attribute of the record.
    pub id: u32,
    /// Source label, `<group>_frame_<cameraId>`.
    pub label: String,
    /// Whitespace-separated 16-number row-major 4x4 transform.
    pub transform: String,
}

impl PoseRecord {
    /// Creates a record from its parts.
    pub fn new(id: u32, label: impl Into<String>, transform: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            transform: transform.into(),
        }
    }

    /// Parses the authoritative camera id out of the label.
    pub fn camera_id(&self) -> Result<u32> {
        parse_label(&self.label).map(|(_, id)| id)
    }

    /// Converts this record into a render-space camera pose.
    ///
    /// Fails when the label or transform is malformed or the pose is
    /// degenerate; catalog builders skip and log such records rather than
    /// aborting the load.
    pub fn to_camera_pose(&self, options: &TourOptions) -> Result<CameraPose> {
        let (_group, id) = parse_label(&self.label)?;
        let source = parse_transform(&self.label, &self.transform)?;
        let pose =
            convert(source).ok_or_else(|| PanoscopeError::DegeneratePose(self.label.clone()))?;
        Ok(CameraPose {
            id,
            label: self.label.clone(),
            position: pose.position,
            orientation: pose.orientation,
            source_transform: source,
            image_ref: options.image_ref(&self.label),
        })
    }
}

/// Splits a label into its group prefix and camera id.
pub fn parse_label(label: &str) -> Result<(&str, u32)> {
    let (group, id_text) = label
        .rsplit_once("_frame_")
        .ok_or_else(|| PanoscopeError::MalformedLabel(label.to_string()))?;
    if group.is_empty() {
        return Err(PanoscopeError::MalformedLabel(label.to_string()));
    }
    let id = id_text
        .parse::<u32>()
        .map_err(|_| PanoscopeError::MalformedLabel(label.to_string()))?;
    Ok((group, id))
}

/// Parses a whitespace-separated row-major 16-number transform string.
pub fn parse_transform(label: &str, text: &str) -> Result<Mat4> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 16 {
        return Err(PanoscopeError::MalformedTransform {
            label: label.to_string(),
            detail: format!("expected 16 numbers, found {}", tokens.len()),
        });
    }
    let mut values = [0.0_f32; 16];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<f32>()
            .map_err(|_| PanoscopeError::MalformedTransform {
                label: label.to_string(),
                detail: format!("bad number '{token}'"),
            })?;
    }
    // The source is row-major; glam matrices are column-major.
    Ok(Mat4::from_cols_array(&values).transpose())
}
