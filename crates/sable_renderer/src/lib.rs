//! Sable Renderer - intersection and shading core
//!
//! The pieces a Monte Carlo path tracer is built from:
//!
//! - **Geometry**: `Hittable` spheres (static or moving), lists, and the
//!   `Translate` / `RotateY` / `FlipFace` adapters that wrap any node
//! - **Shading**: `Material` scattering over procedural `Texture`s
//! - **Importance sampling**: cosine, per-object and mixture `Pdf`s
//! - **World building**: `build_world` turns a `sable_core::SceneDescription`
//!   into shared scene nodes plus a light list
//!
//! Every random decision draws from a caller-supplied `RngCore`, so results
//! are reproducible under a seeded generator.

pub mod sampling;

mod hittable;
mod instance;
mod material;
mod pdf;
mod sphere;
mod texture;
mod world;

pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{FlipFace, RotateY, Translate};
pub use material::{scatter_direction, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, NoiseSource, NoiseTexture, SolidColor, Texture};
pub use world::{build_world, SceneError, SceneResult, World};

/// Re-export Vec3 and common math types from sable_math
pub use sable_math::{Aabb, Interval, Onb, Ray, Vec3};
