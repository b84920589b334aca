//! Scene description types for Sable.
//!
//! A description is a plain serde document: named materials plus a list of
//! object trees. It says nothing about how intersection is performed; the
//! renderer converts it into shared scene nodes.

use std::collections::BTreeMap;
use std::path::Path;

use sable_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{DescriptionError, DescriptionResult};

/// A surface texture lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureDesc {
    /// Constant color
    Solid { color: Vec3 },

    /// 3D checker pattern alternating between two textures
    Checker {
        even: Box<TextureDesc>,
        odd: Box<TextureDesc>,
    },
}

/// A material definition, referenced from objects by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse reflector
    Lambertian { albedo: TextureDesc },

    /// Fuzzed mirror (fuzz 0 = perfect mirror, 1 = very rough)
    Metal { albedo: Vec3, fuzz: f32 },

    /// Clear refractive material
    Dielectric { ior: f32 },

    /// Light emitter
    DiffuseLight { emit: Vec3 },
}

/// A node in an object tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        material: String,
    },

    /// Sphere whose center moves linearly from `center0` at `time0` to
    /// `center1` at `time1`
    MovingSphere {
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: String,
    },

    Group { children: Vec<ObjectDesc> },

    Translate {
        offset: Vec3,
        object: Box<ObjectDesc>,
    },

    /// Rotation about the Y axis, in degrees
    RotateY { angle: f32, object: Box<ObjectDesc> },

    FlipFace { object: Box<ObjectDesc> },
}

/// A top-level object. Lights are rendered like any other object and are
/// additionally used as importance-sampling targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub light: bool,

    pub object: ObjectDesc,
}

/// A complete scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Materials by name
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,

    /// Top-level objects, in intersection order
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON description.
    pub fn from_json(json: &str) -> DescriptionResult<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        description.validate()?;

        log::debug!(
            "Parsed scene description: {} materials, {} objects",
            description.materials.len(),
            description.objects.len()
        );

        Ok(description)
    }

    /// Load and validate a JSON description from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> DescriptionResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let description = Self::from_json(&json)?;

        log::info!("Loaded scene description from {}", path.display());
        Ok(description)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> DescriptionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register a material under `name`, replacing any previous one.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Append a top-level object.
    pub fn add_object(&mut self, object: ObjectDesc, light: bool) {
        self.objects.push(SceneObject { light, object });
    }

    /// Number of objects flagged as lights.
    pub fn light_count(&self) -> usize {
        self.objects.iter().filter(|o| o.light).count()
    }

    /// Check material references and numeric ranges.
    ///
    /// Errors name the offending node by its path, e.g.
    /// `objects[2].object.children[0]`.
    pub fn validate(&self) -> DescriptionResult<()> {
        for (name, material) in &self.materials {
            if let MaterialDesc::Dielectric { ior } = material {
                if !(ior.is_finite() && *ior > 0.0) {
                    return Err(DescriptionError::InvalidIor {
                        ior: *ior,
                        name: name.clone(),
                    });
                }
            }
        }

        for (i, entry) in self.objects.iter().enumerate() {
            self.validate_object(&entry.object, &format!("objects[{}].object", i))?;
        }

        Ok(())
    }

    fn validate_object(&self, object: &ObjectDesc, path: &str) -> DescriptionResult<()> {
        match object {
            ObjectDesc::Sphere {
                radius, material, ..
            } => {
                self.check_radius(*radius, path)?;
                self.check_material(material, path)
            }
            ObjectDesc::MovingSphere {
                time0,
                time1,
                radius,
                material,
                ..
            } => {
                if !(time1 - time0).is_normal() {
                    return Err(DescriptionError::InvalidTimeRange {
                        time0: *time0,
                        time1: *time1,
                        path: path.to_string(),
                    });
                }
                self.check_radius(*radius, path)?;
                self.check_material(material, path)
            }
            ObjectDesc::Group { children } => {
                if children.is_empty() {
                    return Err(DescriptionError::EmptyGroup(path.to_string()));
                }
                for (i, child) in children.iter().enumerate() {
                    self.validate_object(child, &format!("{}.children[{}]", path, i))?;
                }
                Ok(())
            }
            ObjectDesc::Translate { object, .. }
            | ObjectDesc::RotateY { object, .. }
            | ObjectDesc::FlipFace { object } => {
                self.validate_object(object, &format!("{}.object", path))
            }
        }
    }

    fn check_radius(&self, radius: f32, path: &str) -> DescriptionResult<()> {
        if radius.is_finite() && radius > 0.0 {
            Ok(())
        } else {
            Err(DescriptionError::InvalidRadius {
                radius,
                path: path.to_string(),
            })
        }
    }

    fn check_material(&self, name: &str, path: &str) -> DescriptionResult<()> {
        if self.materials.contains_key(name) {
            Ok(())
        } else {
            Err(DescriptionError::UnknownMaterial {
                name: name.to_string(),
                path: path.to_string(),
            })
        }
    }
}
