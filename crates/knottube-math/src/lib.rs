#![warn(missing_docs)]

//! Math types for the knottube mesh generator.
//!
//! Thin wrappers around nalgebra providing the point, vector and
//! direction types shared by the curve and sweep crates, plus the
//! tolerance constants used to detect degenerate geometry.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Tolerance constants for numerical checks on frames and normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Absolute length below which a vector is treated as zero.
    pub zero_length: f64,
    /// Relative threshold for `|a × b| / (|a|·|b|)` below which two vectors
    /// are treated as parallel.
    pub collinear: f64,
    /// Allowed deviation from 1 for unit lengths and from 0 for dot
    /// products of orthonormal vectors.
    pub unit: f64,
}

impl Tolerance {
    /// Default tolerances for double precision sweeps.
    pub const DEFAULT: Self = Self {
        zero_length: 1e-12,
        collinear: 1e-10,
        unit: 1e-9,
    };

    /// Check if a vector has unit length.
    pub fn is_unit(&self, v: &Vec3) -> bool {
        (v.norm() - 1.0).abs() < self.unit
    }

    /// Check if two unit vectors are perpendicular.
    pub fn is_orthogonal(&self, a: &Vec3, b: &Vec3) -> bool {
        a.dot(b).abs() < self.unit
    }

    /// Check if two vectors are parallel (or either is zero).
    ///
    /// Both inputs are scaled to unit length before the cross product, so
    /// the result does not depend on the scale of the curve. Only an exactly
    /// zero or non-finite input counts as degenerate on its own.
    pub fn is_collinear(&self, a: &Vec3, b: &Vec3) -> bool {
        match (direction(a), direction(b)) {
            (Some(a), Some(b)) => a.cross(b.as_ref()).norm() < self.collinear,
            _ => true,
        }
    }

    /// Normalize `v`, or `None` if it is shorter than `zero_length`.
    pub fn normalize(&self, v: Vec3) -> Option<Dir3> {
        Unit::try_new(v, self.zero_length)
    }
}

/// Normalize `v` regardless of its magnitude, or `None` if it is exactly
/// zero or not finite.
pub fn direction(v: &Vec3) -> Option<Dir3> {
    let norm = v.norm();
    if norm > 0.0 && norm.is_finite() {
        Some(Unit::new_unchecked(v / norm))
    } else {
        None
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Axis-aligned bounds of a point set, or `None` if it is empty.
pub fn bounds<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<(Point3, Point3)> {
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), p| {
        (
            Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    }))
}
