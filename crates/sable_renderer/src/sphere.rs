//! Sphere primitive for ray tracing.
//!
//! The only geometric primitive. Besides intersection it can act as a light
//! source: `pdf_value` and `sample_direction` work over the cone of
//! directions the sphere subtends from a viewpoint.

use crate::{
    hittable::{HitRecord, Hittable},
    sampling::{random_to_sphere, random_unit_vector},
    Material, Ray,
};
use rand::RngCore;
use sable_math::{Aabb, Interval, Onb, Vec3};
use std::f32::consts::PI;
use std::sync::Arc;

/// Linear motion of the center between two shutter times.
#[derive(Debug, Clone, Copy)]
struct Motion {
    center1: Vec3,
    time0: f32,
    time1: f32,
}

/// A sphere primitive, optionally moving.
pub struct Sphere {
    /// Center at rest, or at `time0` for a moving sphere
    center: Vec3,
    motion: Option<Motion>,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a static sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        if !(radius > 0.0) {
            log::warn!(
                "Sphere at {:?} has non-positive radius {}, it will never be hit",
                center,
                radius
            );
        }

        Self {
            center,
            motion: None,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Create a sphere whose center moves linearly from `center0` at `time0`
    /// to `center1` at `time1`.
    pub fn moving(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        let mut sphere = Self::new(center0, radius, material);

        if (time1 - time0).is_normal() {
            sphere.motion = Some(Motion {
                center1,
                time0,
                time1,
            });
        } else {
            log::warn!(
                "Moving sphere has empty time range [{}, {}], treating it as static",
                time0,
                time1
            );
        }

        sphere
    }

    /// Center at the given time.
    pub fn center(&self, time: f32) -> Vec3 {
        match self.motion {
            None => self.center,
            Some(m) => {
                let s = (time - m.time0) / (m.time1 - m.time0);
                self.center + s * (m.center1 - self.center)
            }
        }
    }

    /// Time used when the sphere is sampled as a light.
    fn rest_time(&self) -> f32 {
        self.motion.map_or(0.0, |m| m.time0)
    }

    /// UV coordinates for a point on the unit sphere centered at the origin.
    ///
    /// u: angle around the Y axis starting from -X, scaled to [0, 1]
    /// v: angle from -Y up to +Y, scaled to [0, 1]
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    fn bbox_at(&self, time: f32) -> Aabb {
        let center = self.center(time);
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(center - rvec, center + rvec)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // No surface to hit, and no normal to divide out
        if self.radius <= 0.0 {
            return None;
        }

        let center = self.center(ray.time());
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - center) / self.radius;

        Some(HitRecord::new(
            ray,
            root,
            p,
            outward_normal,
            Self::get_sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        match self.motion {
            None => Some(self.bbox_at(time0)),
            Some(_) => Some(Aabb::surrounding(
                &self.bbox_at(time0),
                &self.bbox_at(time1),
            )),
        }
    }

    /// Reciprocal of the solid angle the sphere subtends from `origin`, or 0
    /// when `direction` misses it. From inside the sphere every direction
    /// hits, so the density is uniform over the full sphere.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }

        let time = self.rest_time();
        let probe = Ray::new(origin, direction, time);
        if self
            .hit(&probe, Interval::new(0.001, f32::INFINITY))
            .is_none()
        {
            return 0.0;
        }

        let radius_squared = self.radius * self.radius;
        let distance_squared = (self.center(time) - origin).length_squared();
        if distance_squared <= radius_squared {
            return 1.0 / (4.0 * PI);
        }

        let cos_theta_max = (1.0 - radius_squared / distance_squared).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);

        1.0 / solid_angle
    }

    fn sample_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let direction = self.center(self.rest_time()) - origin;
        let distance_squared = direction.length_squared();
        if distance_squared <= self.radius * self.radius {
            return random_unit_vector(rng);
        }

        let uvw = Onb::from_w(direction);
        uvw.local(random_to_sphere(rng, self.radius, distance_squared))
    }
}
