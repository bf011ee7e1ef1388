//! Closed intervals over f32.
//!
//! Used for the acceptable t-range of a ray query and for clamping color
//! channels before quantization.

/// Closed interval [min, max].
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl Interval {
    /// Interval containing no value (min > max).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Interval containing every real number.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Unit interval [0, 1], used for channel clamping.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create an interval with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True if x lies within the bounds, inclusive.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// True if x lies strictly between the bounds.
    ///
    /// Intersection roots use this so that hits exactly at t_min (shadow
    /// acne offset) or at the current closest t are rejected.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp x to the interval bounds.
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
