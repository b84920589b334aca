//! Material trait for surface scattering.

use crate::{
    hittable::HitRecord,
    pdf::Pdf,
    sampling::{near_zero, random_f32, random_unit_vector},
    texture::{SolidColor, Texture},
    Ray,
};
use rand::RngCore;
use sable_math::Vec3;
use std::f32::consts::PI;
use std::sync::Arc;

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some((attenuation, scattered_ray))` if the ray scatters,
    /// or `None` if it is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore)
        -> Option<(Color, Ray)>;

    /// Scatter with the direction drawn from a caller-supplied PDF, e.g. a
    /// mixture of this material's own lobe and a light.
    ///
    /// The returned attenuation already carries the
    /// `scattering_pdf / pdf.value` weight, and the ray is absorbed when the
    /// pdf reports no density for its own sample. Materials that cannot be
    /// importance sampled ignore `pdf` and scatter as usual.
    fn scatter_with_pdf(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        _pdf: &dyn Pdf,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        self.scatter(ray_in, rec, rng)
    }

    /// Density with which this material scatters `ray_in` into `scattered`.
    /// Zero for materials without a continuous lobe.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord<'_>, _scattered: &Ray) -> f32 {
        0.0
    }

    /// Light emitted at the hit point. Most materials return black.
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord<'_>) -> Color {
        Color::ZERO
    }
}

/// Diffuse scatter direction: the normal plus a random unit vector.
///
/// When the two nearly cancel, the bare normal is used instead so the
/// scattered ray never has a zero direction.
#[inline]
pub fn scatter_direction(normal: Vec3, random_unit: Vec3) -> Vec3 {
    let direction = normal + random_unit;
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a constant albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    fn albedo_at(&self, rec: &HitRecord<'_>) -> Color {
        self.albedo.value(rec.u, rec.v, rec.p)
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let direction = scatter_direction(rec.normal, random_unit_vector(rng));
        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some((self.albedo_at(rec), scattered))
    }

    fn scatter_with_pdf(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        pdf: &dyn Pdf,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let scattered = Ray::new(rec.p, pdf.generate(rng), ray_in.time());
        let density = pdf.value(scattered.direction());

        if !(density > 0.0) {
            return None;
        }

        let weight = self.scattering_pdf(ray_in, rec, &scattered) / density;
        Some((self.albedo_at(rec) * weight, scattered))
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord<'_>, scattered: &Ray) -> f32 {
        let cosine = rec.normal.dot(scattered.direction().normalize());
        if cosine < 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz pushed the ray below the surface: absorb it
        if direction.dot(rec.normal) > 0.0 {
            Some((self.albedo, Ray::new(rec.p, direction, ray_in.time())))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > random_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some((Color::ONE, Ray::new(rec.p, direction, ray_in.time())))
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn with_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord<'_>,
        _rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        None
    }

    /// Emits from the front face only; wrap the geometry in `FlipFace` to
    /// light the other side.
    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord<'_>) -> Color {
        if rec.front_face {
            self.emit.value(rec.u, rec.v, rec.p)
        } else {
            Color::ZERO
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
