//! Instance adapters: translation, rotation about Y and face flipping.
//!
//! Each adapter wraps one shared child, moves the incoming ray into the
//! child's local frame, and carries the child's hit back out to world
//! space. The hit record is passed up by value and rewritten at each level.

use crate::{
    hittable::{HitRecord, Hittable},
    sampling::degrees_to_radians,
    Ray,
};
use rand::RngCore;
use sable_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Moves a child by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let moved = ray.with_origin(ray.origin() - self.offset);
        let mut rec = self.object.hit(&moved, ray_t)?;

        rec.p += self.offset;
        // Orient against the ray the child actually saw
        let outward_normal = rec.outward_normal();
        rec.set_face_normal(&moved, outward_normal);

        Some(rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object
            .bounding_box(time0, time1)
            .map(|bbox| bbox.translate(self.offset))
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.object.pdf_value(origin - self.offset, direction)
    }

    fn sample_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.sample_direction(origin - self.offset, rng)
    }
}

/// Rotates a child about the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    /// World-space box, `None` if the child has no box
    bbox: Option<Aabb>,
}

impl RotateY {
    /// Wrap `object`, rotated by `angle` degrees (counter-clockwise seen
    /// from +Y).
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let radians = degrees_to_radians(angle);
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let mut rotate = Self {
            object,
            sin_theta,
            cos_theta,
            bbox: None,
        };

        // Rotating all 8 corners gives a loose but safe world box
        rotate.bbox = match rotate.object.bounding_box(0.0, 1.0) {
            Some(local) => {
                let corners = local.corners().map(|c| rotate.to_world(c));
                let min = corners.iter().fold(Vec3::INFINITY, |acc, c| acc.min(*c));
                let max = corners.iter().fold(Vec3::NEG_INFINITY, |acc, c| acc.max(*c));
                let world = Aabb::from_points(min, max);

                log::debug!("RotateY {}°: local box {:?} -> world box {:?}", angle, local, world);
                Some(world)
            }
            None => {
                log::warn!("RotateY {}°: child has no bounding box", angle);
                None
            }
        };

        rotate
    }

    /// World frame to the child's frame (inverse rotation).
    #[inline]
    fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    /// Child's frame to the world frame.
    #[inline]
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let rotated = Ray::new(
            self.to_local(ray.origin()),
            self.to_local(ray.direction()),
            ray.time(),
        );
        let mut rec = self.object.hit(&rotated, ray_t)?;

        // Face is decided in the child's frame, against the rotated ray
        let outward_normal = rec.outward_normal();
        rec.set_face_normal(&rotated, outward_normal);

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);

        Some(rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<Aabb> {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.object
            .pdf_value(self.to_local(origin), self.to_local(direction))
    }

    fn sample_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let local = self.object.sample_direction(self.to_local(origin), rng);
        self.to_world(local)
    }
}

/// Reports hits on the child with the front-face flag inverted.
///
/// Makes one-sided geometry such as lights count as front-facing from the
/// other side. The geometric normal is left alone.
pub struct FlipFace {
    object: Arc<dyn Hittable>,
}

impl FlipFace {
    pub fn new(object: Arc<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipFace {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut rec = self.object.hit(ray, ray_t)?;
        rec.front_face = !rec.front_face;
        Some(rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Option<Aabb> {
        self.object.bounding_box(time0, time1)
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.object.pdf_value(origin, direction)
    }

    fn sample_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.sample_direction(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-4;

    fn sphere(center: Vec3, radius: f32) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        ))
    }

    fn full_range() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    fn test_rays() -> Vec<Ray> {
        vec![
            Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0),
            Ray::new(Vec3::new(0.3, -0.2, -5.0), Vec3::new(0.0, 0.05, 1.0), 0.0),
            Ray::new(Vec3::new(5.0, 0.5, 0.0), -Vec3::X, 0.0),
            Ray::new(Vec3::new(3.0, 4.0, 2.0), Vec3::new(-3.0, -4.0, -2.0), 0.0),
            // From inside: back face
            Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.9, 0.1), 0.0),
        ]
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPS, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_translate_hit_matches_shifted_child() {
        let base = sphere(Vec3::ZERO, 1.0);
        let offset = Vec3::new(2.0, 0.0, 0.0);
        let moved = Translate::new(base.clone(), offset);

        for ray in test_rays() {
            let unshifted = base.hit(&ray, full_range()).unwrap();
            let shifted_ray = ray.with_origin(ray.origin() + offset);
            let rec = moved.hit(&shifted_ray, full_range()).unwrap();

            assert_vec_eq(rec.p, unshifted.p + offset);
            assert_vec_eq(rec.normal, unshifted.normal);
            assert!((rec.t - unshifted.t).abs() < EPS);
            assert_eq!(rec.front_face, unshifted.front_face);
        }
    }

    #[test]
    fn test_translate_bounding_box() {
        let moved = Translate::new(sphere(Vec3::ZERO, 1.0), Vec3::new(2.0, -1.0, 0.5));
        let bbox = moved.bounding_box(0.0, 1.0).unwrap();

        assert_vec_eq(bbox.min(), Vec3::new(1.0, -2.0, -0.5));
        assert_vec_eq(bbox.max(), Vec3::new(3.0, 0.0, 1.5));
    }

    #[test]
    fn test_translate_propagates_missing_box() {
        let moved = Translate::new(Arc::new(HittableList::new()), Vec3::X);
        assert!(moved.bounding_box(0.0, 1.0).is_none());
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let base = sphere(Vec3::new(1.0, 0.5, -0.5), 1.0);
        let rotated = RotateY::new(base.clone(), 0.0);

        assert_eq!(
            rotated.bounding_box(0.0, 1.0),
            base.bounding_box(0.0, 1.0)
        );

        for ray in test_rays() {
            let a = base.hit(&ray, full_range());
            let b = rotated.hit(&ray, full_range());
            assert_eq!(a.is_some(), b.is_some());
            if let (Some(a), Some(b)) = (a, b) {
                assert_vec_eq(a.p, b.p);
                assert_vec_eq(a.normal, b.normal);
                assert_eq!(a.front_face, b.front_face);
            }
        }
    }

    #[test]
    fn test_rotate_full_turn_box_matches_child() {
        let base = sphere(Vec3::new(2.0, 1.0, -3.0), 0.5);
        let rotated = RotateY::new(base.clone(), 360.0);

        let a = base.bounding_box(0.0, 1.0).unwrap();
        let b = rotated.bounding_box(0.0, 1.0).unwrap();
        assert!((a.min() - b.min()).length() < 1e-3);
        assert!((a.max() - b.max()).length() < 1e-3);
    }

    #[test]
    fn test_rotate_quarter_turn_moves_hit() {
        // +X rotated by 90° about Y lands on -Z
        let rotated = RotateY::new(sphere(Vec3::new(3.0, 0.0, 0.0), 1.0), 90.0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);

        let rec = rotated.hit(&ray, full_range()).unwrap();
        assert!((rec.t - 2.0).abs() < EPS);
        assert_vec_eq(rec.p, Vec3::new(0.0, 0.0, -2.0));
        assert_vec_eq(rec.normal, Vec3::Z);
        assert!(rec.front_face);

        let bbox = rotated.bounding_box(0.0, 1.0).unwrap();
        assert_vec_eq(bbox.min(), Vec3::new(-1.0, -1.0, -4.0));
        assert_vec_eq(bbox.max(), Vec3::new(1.0, 1.0, -2.0));
    }

    #[test]
    fn test_rotate_without_child_box() {
        let rotated = RotateY::new(Arc::new(HittableList::new()), 45.0);
        assert!(rotated.bounding_box(0.0, 1.0).is_none());
    }

    #[test]
    fn test_flip_face_toggles_only_front_face() {
        let base = sphere(Vec3::ZERO, 1.0);
        let flipped = FlipFace::new(base.clone());

        for ray in test_rays() {
            let a = base.hit(&ray, full_range()).unwrap();
            let b = flipped.hit(&ray, full_range()).unwrap();

            assert_eq!(b.front_face, !a.front_face);
            assert_eq!(a.p, b.p);
            assert_eq!(a.normal, b.normal);
            assert_eq!(a.t, b.t);
        }
    }

    #[test]
    fn test_flip_face_survives_enclosing_adapters() {
        let base = sphere(Vec3::ZERO, 1.0);
        let nested = Translate::new(
            Arc::new(RotateY::new(Arc::new(FlipFace::new(base.clone())), 30.0)),
            Vec3::new(0.0, 2.0, 0.0),
        );
        let ray = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::Z, 0.0);

        let rec = nested.hit(&ray, full_range()).unwrap();
        assert!(!rec.front_face);
        assert_vec_eq(rec.p, Vec3::new(0.0, 2.0, -1.0));
        assert_vec_eq(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_adapters_forward_light_sampling() {
        let light = sphere(Vec3::ZERO, 1.0);
        let offset = Vec3::new(0.0, 0.0, 5.0);
        let moved = Translate::new(light.clone(), offset);
        let rotated = RotateY::new(Arc::new(Translate::new(light, Vec3::new(5.0, 0.0, 0.0))), 90.0);
        let mut rng = StdRng::seed_from_u64(17);

        // The translated light is straight ahead along +Z
        assert!(moved.pdf_value(Vec3::ZERO, Vec3::Z) > 0.0);
        assert_eq!(moved.pdf_value(Vec3::ZERO, -Vec3::Z), 0.0);

        // The rotated light now sits at -Z
        assert!(rotated.pdf_value(Vec3::ZERO, -Vec3::Z) > 0.0);
        assert_eq!(rotated.pdf_value(Vec3::ZERO, Vec3::X), 0.0);

        for _ in 0..100 {
            let dir = rotated.sample_direction(Vec3::ZERO, &mut rng).normalize();
            assert!(dir.z < -0.9);
            let dir = moved.sample_direction(Vec3::ZERO, &mut rng).normalize();
            assert!(dir.z > 0.9);
        }
    }
}
