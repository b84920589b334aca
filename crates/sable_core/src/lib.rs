//! Sable Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Description types**: `SceneDescription`, `ObjectDesc`, `MaterialDesc`,
//!   `TextureDesc` - a serde document describing spheres, groups and the
//!   translate / rotate / flip adapters that wrap them
//! - **Validation**: `SceneDescription::validate` and `DescriptionError`
//!
//! The renderer turns a validated description into shared scene nodes.
//!
//! # Example
//!
//! ```ignore
//! use sable_core::SceneDescription;
//!
//! let description = SceneDescription::load("cornell.json")?;
//! println!("{} objects, {} lights",
//!     description.objects.len(),
//!     description.light_count());
//! ```

pub mod description;
pub mod error;

// Re-export commonly used types
pub use description::{MaterialDesc, ObjectDesc, SceneDescription, SceneObject, TextureDesc};
pub use error::{DescriptionError, DescriptionResult};
