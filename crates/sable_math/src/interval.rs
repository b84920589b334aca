/// Closed range `[min, max]` of ray parameters or box coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Inclusive at both ends, so a root exactly on a bound is accepted.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Widen by `width`, split evenly between the two ends.
    pub fn padded(&self, width: f32) -> Self {
        let half = 0.5 * width;
        Self::new(self.min - half, self.max + half)
    }

    /// Tighten or replace the far end; lists use it to shrink the search.
    pub fn with_max(&self, max: f32) -> Self {
        Self::new(self.min, max)
    }

    pub fn shifted(&self, offset: f32) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    pub fn surrounding(a: &Interval, b: &Interval) -> Self {
        Self::new(a.min.min(b.min), a.max.max(b.max))
    }
}
