//! Procedural textures sampled by materials at a hit point.

use crate::Color;
use sable_math::Vec3;
use std::sync::Arc;

/// A color lookup at surface coordinates (u, v) and world point p.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// Scalar noise field consumed by `NoiseTexture`.
///
/// The generator itself lives outside this crate; implementations are
/// expected to return values roughly in [-1, 1].
pub trait NoiseSource: Send + Sync {
    fn noise(&self, p: Vec3) -> f32;
}

/// A texture with a constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// 3D checker pattern alternating between two textures.
///
/// The sign of `sin(10x) sin(10y) sin(10z)` picks the cell: negative is odd.
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Gray-scale texture driven by an external noise source.
pub struct NoiseTexture {
    noise: Arc<dyn NoiseSource>,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: Arc<dyn NoiseSource>, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        // Map [-1, 1] noise to [0, 1] intensity
        Color::ONE * 0.5 * (1.0 + self.noise.noise(self.scale * p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantNoise(f32);

    impl NoiseSource for ConstantNoise {
        fn noise(&self, _p: Vec3) -> f32 {
            self.0
        }
    }

    /// Echoes the x coordinate it was sampled at.
    struct ProbeNoise;

    impl NoiseSource for ProbeNoise {
        fn noise(&self, p: Vec3) -> f32 {
            p.x
        }
    }

    #[test]
    fn test_solid_color() {
        let texture = SolidColor::from_rgb(0.2, 0.4, 0.6);
        assert_eq!(texture.value(0.3, 0.7, Vec3::ONE), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_checker_alternates() {
        let checker = CheckerTexture::from_colors(Color::ONE, Color::ZERO);
        let step = std::f32::consts::PI / 10.0;

        // All sines positive
        let even = Vec3::splat(0.5 * step);
        assert_eq!(checker.value(0.0, 0.0, even), Color::ONE);

        // One sine negative
        let odd = Vec3::new(1.5 * step, 0.5 * step, 0.5 * step);
        assert_eq!(checker.value(0.0, 0.0, odd), Color::ZERO);
    }

    #[test]
    fn test_noise_texture_maps_to_unit_range() {
        let low = NoiseTexture::new(Arc::new(ConstantNoise(-1.0)), 4.0);
        let high = NoiseTexture::new(Arc::new(ConstantNoise(1.0)), 4.0);

        assert_eq!(low.value(0.0, 0.0, Vec3::ZERO), Color::ZERO);
        assert_eq!(high.value(0.0, 0.0, Vec3::ZERO), Color::ONE);
    }

    #[test]
    fn test_noise_texture_scales_lookup_point() {
        let texture = NoiseTexture::new(Arc::new(ProbeNoise), 0.5);
        // noise(0.5 * 1.0) = 0.5 -> 0.75
        let value = texture.value(0.0, 0.0, Vec3::X);
        assert!((value.x - 0.75).abs() < 1e-6);
    }
}
