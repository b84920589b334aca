//! Probability density functions over directions.
//!
//! A `Pdf` both draws directions and reports the density of any direction
//! under its own distribution. Materials use them for importance-sampled
//! scattering; `MixturePdf` blends material and light sampling.

use crate::{
    hittable::Hittable,
    sampling::{random_cosine_direction, random_f32},
};
use rand::RngCore;
use sable_math::{Onb, Vec3};
use std::f32::consts::PI;

/// A sampling strategy over directions.
pub trait Pdf {
    /// Density of `direction` with respect to solid angle.
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction from this distribution.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere about a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3) -> Self {
        Self {
            uvw: Onb::from_w(w),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Samples directions toward a scene node, as seen from `origin`.
pub struct HittablePdf<'a> {
    object: &'a dyn Hittable,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(object: &'a dyn Hittable, origin: Vec3) -> Self {
        Self { object, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.object.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.object.sample_direction(self.origin, rng)
    }
}

/// Even 50/50 blend of two distributions.
pub struct MixturePdf<'a> {
    p: [&'a dyn Pdf; 2],
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p: [p0, p1] }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        0.5 * self.p[0].value(direction) + 0.5 * self.p[1].value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if random_f32(rng) < 0.5 {
            self.p[0].generate(rng)
        } else {
            self.p[1].generate(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn light() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 5.0, 0.0),
            1.0,
            Arc::new(Lambertian::new(Vec3::ONE)),
        )
    }

    #[test]
    fn test_cosine_pdf_value() {
        let pdf = CosinePdf::new(Vec3::Y);

        assert!((pdf.value(Vec3::Y) - 1.0 / PI).abs() < 1e-6);
        assert!((pdf.value(Vec3::new(1.0, 1.0, 0.0)) - (0.5_f32).sqrt() / PI).abs() < 1e-6);
        assert_eq!(pdf.value(-Vec3::Y), 0.0);
        assert_eq!(pdf.value(Vec3::X), 0.0);
    }

    #[test]
    fn test_cosine_pdf_integrates_to_one_over_hemisphere() {
        // Uniform hemisphere estimator: E[pdf(d) * 2π] over uniform d
        let pdf = CosinePdf::new(Vec3::new(0.3, 0.8, -0.2));
        let normal = Vec3::new(0.3, 0.8, -0.2).normalize();
        let mut rng = StdRng::seed_from_u64(1234);

        let n = 200_000;
        let mut sum = 0.0_f64;
        for _ in 0..n {
            let mut d = crate::sampling::random_unit_vector(&mut rng);
            if d.dot(normal) < 0.0 {
                d = -d;
            }
            sum += (pdf.value(d) * 2.0 * PI) as f64;
        }
        let integral = sum / n as f64;

        assert!((integral - 1.0).abs() < 0.01, "integral = {}", integral);
    }

    #[test]
    fn test_cosine_pdf_generates_upper_hemisphere() {
        let normal = Vec3::new(-1.0, 0.2, 0.4).normalize();
        let pdf = CosinePdf::new(normal);
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..1000 {
            let d = pdf.generate(&mut rng);
            assert!(d.dot(normal) >= -1e-5);
        }
    }

    #[test]
    fn test_hittable_pdf_delegates_to_object() {
        let light = light();
        let origin = Vec3::ZERO;
        let pdf = HittablePdf::new(&light, origin);
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(pdf.value(Vec3::Y), light.pdf_value(origin, Vec3::Y));
        assert_eq!(pdf.value(-Vec3::Y), 0.0);

        let d = pdf.generate(&mut rng);
        assert!(d.normalize().y > 0.9);
    }

    #[test]
    fn test_mixture_pdf_value_is_mean() {
        let light = light();
        let cosine = CosinePdf::new(Vec3::new(0.0, 1.0, 0.5));
        let toward_light = HittablePdf::new(&light, Vec3::ZERO);
        let mixture = MixturePdf::new(&cosine, &toward_light);

        for d in [
            Vec3::Y,
            Vec3::new(0.1, 1.0, 0.0),
            Vec3::new(1.0, 0.2, 0.3),
            -Vec3::Y,
            Vec3::new(0.0, 0.5, 1.0),
        ] {
            let expected = 0.5 * (cosine.value(d) + toward_light.value(d));
            assert!((mixture.value(d) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mixture_pdf_draws_from_both() {
        let up = CosinePdf::new(Vec3::Y);
        let down = CosinePdf::new(-Vec3::Y);
        let mixture = MixturePdf::new(&up, &down);
        let mut rng = StdRng::seed_from_u64(77);

        let n = 10_000;
        let ups = (0..n)
            .filter(|_| mixture.generate(&mut rng).y > 0.0)
            .count();
        let fraction = ups as f32 / n as f32;

        assert!((fraction - 0.5).abs() < 0.03, "fraction = {}", fraction);
    }
}
