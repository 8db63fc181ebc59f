//! Error types for panoscope.

use thiserror::Error;

/// The main error type for panoscope operations.
#[derive(Error, Debug)]
pub enum PanoscopeError {
    /// A viewpoint with the given id is already present in the tour.
    #[error("viewpoint id {0} already present in tour")]
    DuplicateId(u32),

    /// A viewpoint with the given id was not found in the tour.
    #[error("viewpoint {0} not found in tour")]
    UnknownViewpoint(u32),

    /// A record label does not match the expected pattern.
    #[error("label '{0}' does not match '<group>_frame_<cameraId>'")]
    MalformedLabel(String),

    /// A record transform string could not be parsed.
    #[error("transform for '{label}' is malformed: {detail}")]
    MalformedTransform {
        /// Label of the offending record.
        label: String,
        /// What went wrong while parsing.
        detail: String,
    },

    /// A pose matrix is singular or contains non-finite entries.
    #[error("pose for '{0}' is singular or non-finite")]
    DegeneratePose(String),

    /// The panorama image for a viewpoint could not be fetched.
    #[error("panorama for viewpoint {0} unavailable: {1}")]
    PanoramaUnavailable(u32, String),

    /// A pre-fetch task was cancelled before completion.
    #[error("pre-fetch for viewpoint {0} was cancelled")]
    PrefetchCancelled(u32),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for panoscope operations.
pub type Result<T> = std::result::Result<T, PanoscopeError>;
