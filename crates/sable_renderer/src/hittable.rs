//! Hittable trait, HitRecord and the HittableList composite.

use crate::{sampling::random_unit_vector, Material, Ray};
use rand::{Rng, RngCore};
use sable_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
///
/// Built by the primitive that was hit and then transformed by every
/// enclosing adapter on its way back to the caller.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Surface texture coordinates
    pub u: f32,
    pub v: f32,
    /// True if the ray struck the side the outward normal points to
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Create a record with the face normal already oriented against `ray`.
    pub fn new(
        ray: &Ray,
        t: f32,
        p: Vec3,
        outward_normal: Vec3,
        (u, v): (f32, f32),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            material,
            t,
            u,
            v,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// The normal as the surface reported it, before it was turned to face
    /// the ray.
    #[inline]
    pub fn outward_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("u", &self.u)
            .field("v", &self.v)
            .field("front_face", &self.front_face)
            .finish_non_exhaustive()
    }
}

/// Trait for objects that can be hit by rays.
///
/// Nodes are immutable once built and shared through `Arc`, so one light
/// can sit in the rendered list and in the light list at the same time.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Box enclosing the object over the shutter interval `[time0, time1]`.
    ///
    /// `None` means the object cannot be bounded; composites propagate it.
    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb>;

    /// Density of sampling `direction` from `origin` toward this object,
    /// with respect to solid angle.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3) -> f32 {
        0.0
    }

    /// Draw a direction from `origin` toward this object.
    ///
    /// Objects that are not light-sampling targets keep the zero-density
    /// `pdf_value` default, and any direction is consistent with that, so
    /// the default draws a uniform unit vector.
    fn sample_direction(&self, _origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        random_unit_vector(rng)
    }
}

/// A list of hittable objects.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn from_objects(objects: Vec<Arc<dyn Hittable>>) -> Self {
        Self { objects }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let closest_so_far = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                // Strictly closer only: on a tie the earlier object keeps the hit
                if closest.as_ref().map_or(true, |best| rec.t < best.t) {
                    closest = Some(rec);
                }
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        let (first, rest) = self.objects.split_first()?;
        let mut output_box = first.bounding_box(time0, time1)?;

        for object in rest {
            let temp_box = object.bounding_box(time0, time1)?;
            output_box = Aabb::surrounding(&output_box, &temp_box);
        }

        Some(output_box)
    }

    /// Equal-weight mixture over the children. An empty list has zero
    /// density everywhere.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let sum: f32 = self
            .objects
            .iter()
            .map(|object| object.pdf_value(origin, direction))
            .sum();
        sum / self.objects.len() as f32
    }

    /// Picks one child uniformly. An empty list falls back to a uniform
    /// direction, consistent with its zero density.
    fn sample_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return random_unit_vector(rng);
        }

        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].sample_direction(origin, rng)
    }
}
