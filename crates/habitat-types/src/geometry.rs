//! Integer world positions and floating-point displacement vectors.
//!
//! [`Point`] is the pixel position an organism occupies. [`Vector`] is the
//! displacement between two points and carries the magnitude/direction math
//! used to derive an organism's facing.
//!
//! [`Vector::magnitude`] is deliberately the fast approximation
//! `max(|x|,|y|) + min(|x|,|y|) / 2`, not the Euclidean length. Unit vectors
//! are derived from it, so they are only approximately unit length
//! (true length in roughly `[0.894, 1.0]`). Facing directions computed
//! elsewhere depend on this exact formula; use [`Vector::true_magnitude`]
//! when the real length is needed.

use core::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// An integer point in world-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl Point {
    /// Create a point from its pixel coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`, widened to avoid overflow.
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(other.x).saturating_sub(i64::from(self.x));
        let dy = i64::from(other.y).saturating_sub(i64::from(self.y));
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An immutable 2D displacement or velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    x: f64,
    y: f64,
}

impl Vector {
    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical component.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Whether both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Convert to a [`Point`], truncating each component toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }

    /// Fast approximate length: `max(|x|,|y|) + min(|x|,|y|) / 2`.
    ///
    /// Never smaller than the Euclidean length and at most ~11.8% larger.
    pub fn magnitude(&self) -> f64 {
        let ax = self.x.abs();
        let ay = self.y.abs();
        if ax > ay { ax + ay / 2.0 } else { ay + ax / 2.0 }
    }

    /// Exact Euclidean length. More expensive than [`Self::magnitude`].
    pub fn true_magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector in radians, normalized into `[0, 2π)`.
    pub fn direction(&self) -> f64 {
        let angle = self.y.atan2(self.x);
        if angle < 0.0 { angle + TAU } else { angle }
    }

    /// Multiply both components by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Rotate counter-clockwise by `radians` using the standard rotation matrix.
    pub fn rotate(&self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }

    /// Divide both components by the fast [`Self::magnitude`].
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn unit_vector(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let magnitude = self.magnitude();
        Some(Self::new(self.x / magnitude, self.y / magnitude))
    }

    /// Vector pointing from `source` to `destination` (`destination - source`).
    pub fn subtract(source: Point, destination: Point) -> Self {
        Self::new(
            f64::from(destination.x) - f64::from(source.x),
            f64::from(destination.y) - f64::from(source.y),
        )
    }

    /// Offset `point` by `vector`, truncating the vector components toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add(point: Point, vector: Self) -> Point {
        Point::new(
            point.x.saturating_add(vector.x as i32),
            point.y.saturating_add(vector.y as i32),
        )
    }
}

impl From<Point> for Vector {
    fn from(point: Point) -> Self {
        Self::new(f64::from(point.x), f64::from(point.y))
    }
}
