//! Errors raised while loading or validating a scene description.

use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material '{name}' referenced at {path}")]
    UnknownMaterial { name: String, path: String },

    #[error("Invalid sphere radius {radius} at {path}")]
    InvalidRadius { radius: f32, path: String },

    #[error("Group at {0} has no children")]
    EmptyGroup(String),

    #[error("Moving sphere at {path} has an empty time range [{time0}, {time1}]")]
    InvalidTimeRange { time0: f32, time1: f32, path: String },

    #[error("Invalid index of refraction {ior} in material '{name}'")]
    InvalidIor { ior: f32, name: String },
}

/// Result type for description operations.
pub type DescriptionResult<T> = Result<T, DescriptionError>;
