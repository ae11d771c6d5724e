//! Planar coordinate type and the handful of vector helpers the AI needs.
//!
//! Scene coordinates are single-precision world units; the default world is
//! 4096 units on a side, well inside `f32`'s exact-integer range.

use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, counter-clockwise from +x).
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector from `self` to `target`, in radians.
    #[inline]
    pub fn heading_to(self, target: Point2) -> f32 {
        (target.y - self.y).atan2(target.x - self.x)
    }

    /// Move from `self` toward `target` by at most `max_step`.
    ///
    /// Lands exactly on `target` when it is closer than `max_step`; never
    /// overshoots.
    pub fn step_toward(self, target: Point2, max_step: f32) -> Point2 {
        let delta = target - self;
        let remaining = delta.length();
        if remaining <= max_step || remaining == 0.0 {
            return target;
        }
        self + delta * (max_step / remaining)
    }

    /// 2D cross product (z component of the 3D cross).
    #[inline]
    pub fn cross(self, other: Point2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;
    #[inline]
    fn mul(self, rhs: f32) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
