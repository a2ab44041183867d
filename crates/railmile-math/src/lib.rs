#![warn(missing_docs)]

//! Math types for the railmile mileage engine.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! plan-view railway geometry: 2D points and vectors, normal helpers,
//! and tolerance constants. Drawing coordinates are metres; angles are
//! radians unless a type says otherwise.

use nalgebra::Vector2;

/// A point in the drawing plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the drawing plane.
pub type Vec2 = Vector2<f64>;

/// The left-hand normal of `v`: `v` rotated 90 degrees counterclockwise.
///
/// For a forward tangent this points toward the left side of the
/// direction of travel.
pub fn left_normal(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// The right-hand normal of `v`: `v` rotated 90 degrees clockwise.
///
/// For a forward tangent this points toward the right side of the
/// direction of travel.
pub fn right_normal(v: &Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in metres.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default survey tolerances (1e-6 m linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
