//! Turning a `SceneDescription` into shared scene nodes.

use crate::{
    hittable::{Hittable, HittableList},
    instance::{FlipFace, RotateY, Translate},
    material::{Dielectric, DiffuseLight, Lambertian, Material, Metal},
    pdf::HittablePdf,
    sphere::Sphere,
    texture::{CheckerTexture, SolidColor, Texture},
};
use sable_core::{DescriptionError, MaterialDesc, ObjectDesc, SceneDescription, TextureDesc};
use sable_math::Vec3;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building or querying a world.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid scene description: {0}")]
    Description(#[from] DescriptionError),

    #[error("Scene has no lights to sample")]
    EmptyLightList,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Renderable objects plus the subset of them used as light-sampling
/// targets. Every light node is the same `Arc` that sits in `objects`.
#[derive(Clone, Default)]
pub struct World {
    objects: HittableList,
    lights: HittableList,
}

impl World {
    pub fn new(objects: HittableList, lights: HittableList) -> Self {
        Self { objects, lights }
    }

    pub fn objects(&self) -> &HittableList {
        &self.objects
    }

    pub fn lights(&self) -> &HittableList {
        &self.lights
    }

    /// Light-sampling pdf as seen from `origin`.
    pub fn light_pdf(&self, origin: Vec3) -> SceneResult<HittablePdf<'_>> {
        if self.lights.is_empty() {
            return Err(SceneError::EmptyLightList);
        }
        Ok(HittablePdf::new(&self.lights, origin))
    }
}

type MaterialMap = BTreeMap<String, Arc<dyn Material>>;

/// Build a `World` from a description.
///
/// The description is validated first; nothing is built from an invalid one.
pub fn build_world(description: &SceneDescription) -> SceneResult<World> {
    description.validate()?;

    let materials: MaterialMap = description
        .materials
        .iter()
        .map(|(name, desc)| (name.clone(), build_material(desc)))
        .collect();

    let mut world = World::default();
    for (i, entry) in description.objects.iter().enumerate() {
        let path = format!("objects[{}].object", i);
        let node = build_object(&entry.object, &materials, &path)?;

        if entry.light {
            world.lights.add(Arc::clone(&node));
        }
        world.objects.add(node);
    }

    log::info!(
        "Built world: {} objects, {} lights, {} materials",
        world.objects.len(),
        world.lights.len(),
        materials.len()
    );
    if world.lights.is_empty() {
        log::warn!("World has no lights; light sampling is unavailable");
    }

    Ok(world)
}

fn build_texture(desc: &TextureDesc) -> Arc<dyn Texture> {
    match desc {
        TextureDesc::Solid { color } => Arc::new(SolidColor::new(*color)),
        TextureDesc::Checker { even, odd } => {
            Arc::new(CheckerTexture::new(build_texture(even), build_texture(odd)))
        }
    }
}

fn build_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match desc {
        MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::with_texture(build_texture(albedo))),
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
        MaterialDesc::Dielectric { ior } => Arc::new(Dielectric::new(*ior)),
        MaterialDesc::DiffuseLight { emit } => Arc::new(DiffuseLight::new(*emit)),
    }
}

fn lookup_material(
    materials: &MaterialMap,
    name: &str,
    path: &str,
) -> SceneResult<Arc<dyn Material>> {
    materials.get(name).cloned().ok_or_else(|| {
        SceneError::Description(DescriptionError::UnknownMaterial {
            name: name.to_string(),
            path: path.to_string(),
        })
    })
}

fn build_object(
    desc: &ObjectDesc,
    materials: &MaterialMap,
    path: &str,
) -> SceneResult<Arc<dyn Hittable>> {
    let node: Arc<dyn Hittable> = match desc {
        ObjectDesc::Sphere {
            center,
            radius,
            material,
        } => Arc::new(Sphere::new(
            *center,
            *radius,
            lookup_material(materials, material, path)?,
        )),
        ObjectDesc::MovingSphere {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        } => Arc::new(Sphere::moving(
            *center0,
            *center1,
            *time0,
            *time1,
            *radius,
            lookup_material(materials, material, path)?,
        )),
        ObjectDesc::Group { children } => {
            let mut group = HittableList::new();
            for (i, child) in children.iter().enumerate() {
                let child_path = format!("{}.children[{}]", path, i);
                group.add(build_object(child, materials, &child_path)?);
            }
            Arc::new(group)
        }
        ObjectDesc::Translate { offset, object } => {
            let inner = build_object(object, materials, &format!("{}.object", path))?;
            Arc::new(Translate::new(inner, *offset))
        }
        ObjectDesc::RotateY { angle, object } => {
            let inner = build_object(object, materials, &format!("{}.object", path))?;
            Arc::new(RotateY::new(inner, *angle))
        }
        ObjectDesc::FlipFace { object } => {
            let inner = build_object(object, materials, &format!("{}.object", path))?;
            Arc::new(FlipFace::new(inner))
        }
    };

    Ok(node)
}
