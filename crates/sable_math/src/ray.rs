use crate::Vec3;

/// A ray with an origin point, a direction vector and a time stamp.
///
/// The direction is not required to be unit length; intersection routines
/// work in the ray's own parameterization. `time` selects the position of
/// moving geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Point along the ray at parameter t: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same direction and time, different origin.
    #[inline]
    pub fn with_origin(&self, origin: Vec3) -> Self {
        Self::new(origin, self.direction, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_with_origin_keeps_direction_and_time() {
        let ray = Ray::new(Vec3::ONE, Vec3::Y, 0.25);
        let moved = ray.with_origin(Vec3::new(-1.0, 0.0, 2.0));

        assert_eq!(moved.origin(), Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(moved.direction(), Vec3::Y);
        assert_eq!(moved.time(), 0.25);
    }
}
