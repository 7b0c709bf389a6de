//! 2D point type for toolpath geometry.
//!
//! Nozzle positions are plain floating-point millimeter coordinates. The
//! checker only ever compares squared distances against squared radii, so
//! everything here stays in squared space until a caller explicitly asks
//! for a real distance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D point (or vector) with floating-point coordinates.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point with the given coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point at the origin (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Calculate the squared distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Calculate the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate the squared length of this point as a vector.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Calculate the length of this point as a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Dot product with another point.
    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Project this point onto the closed line segment `[a, b]`, returning
    /// the closest point on the segment.
    ///
    /// The projection parameter is clamped to `[0, 1]`, so the result always
    /// lies on the segment itself rather than the infinite line through it.
    /// A degenerate segment (`a == b`) projects to `a`.
    pub fn project_onto_segment(&self, a: Point, b: Point) -> Point {
        let ab = b - a;
        let ab_len_sq = ab.length_squared();
        if ab_len_sq == 0.0 {
            return a;
        }

        let ap = *self - a;
        let t = (ap.dot(&ab) / ab_len_sq).clamp(0.0, 1.0);
        a + ab * t
    }

    /// Squared distance from this point to the closed segment `[a, b]`.
    ///
    /// The zero-length branch avoids the division entirely, so degenerate
    /// segments are handled without any special caller-side checks.
    pub fn distance_squared_to_segment(&self, a: Point, b: Point) -> f64 {
        let ab = b - a;
        let ab_len_sq = ab.length_squared();
        if ab_len_sq == 0.0 {
            return self.distance_squared(&a);
        }

        let ap = *self - a;
        let t = (ap.dot(&ab) / ab_len_sq).clamp(0.0, 1.0);
        self.distance_squared(&(a + ab * t))
    }

    /// Check if approximately equal to another point.
    #[inline]
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    /// Check whether both coordinates are finite (neither NaN nor infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:.6}, {:.6})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Div<f64> for Point {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Type alias for a collection of points.
pub type Points = Vec<Point>;
