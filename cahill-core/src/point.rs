//! Cartesian points in abstract planar map units.
//!
//! [`Point`] is a plain value. The placement operations used by the map
//! tiling ([`translate`](Point::translate), [`scale`](Point::scale),
//! [`rotate`](Point::rotate)) return a new point, so a placement reads as a
//! chain:
//!
//! ```
//! use cahill_core::Point;
//!
//! let placed = Point::new(0.0, 1.0)
//!     .rotate(std::f64::consts::FRAC_PI_2)
//!     .translate(Point::new(1.0, 0.0))
//!     .scale(100.0);
//! assert!(placed.x.abs() < 1e-12);
//! assert!(placed.y.abs() < 1e-12);
//! ```
//!
//! Positive rotation turns +x toward +y. With the y axis pointing down, as in
//! SVG or canvas space, that is clockwise on screen.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn translate(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Rotates about the origin by `theta` radians.
    #[inline]
    pub fn rotate(self, theta: f64) -> Self {
        let (sin_theta, cos_theta) = libm::sincos(theta);
        Self::new(
            self.x * cos_theta - self.y * sin_theta,
            self.x * sin_theta + self.y * cos_theta,
        )
    }

    /// Direction of `other` as seen from `self`, in radians from +x.
    #[inline]
    pub fn angle_to(&self, other: Point) -> f64 {
        libm::atan2(other.y - self.y, other.x - self.x)
    }

    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        libm::hypot(other.x - self.x, other.y - self.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.translate(rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        self.scale(rhs)
    }
}

/// SVG-style `x,y` with at most two decimals and trailing `.00` dropped.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = format!("{:.2}", self.x);
        let y = format!("{:.2}", self.y);
        write!(
            f,
            "{},{}",
            x.trim_end_matches(".00"),
            y.trim_end_matches(".00")
        )
    }
}
