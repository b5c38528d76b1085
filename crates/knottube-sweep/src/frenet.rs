//! Frenet frame computation for orienting the cross-section along a spine.

use knottube_curve::{CurveSample, SpineCurve};
use knottube_math::{direction, Dir3, Point3, Tolerance, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Result, SweepError};

/// A Frenet frame at a sample on the spine.
///
/// The frame is an orthonormal basis built from the curve's analytic
/// derivatives:
/// - **Tangent**: the normalized first derivative
/// - **Binormal**: the normalized `tangent × acceleration`
/// - **Normal**: `binormal × tangent`, orthogonal to both by construction
#[derive(Debug, Clone, PartialEq)]
pub struct FrenetFrame {
    /// Position on the spine.
    pub position: Point3,
    /// Curve parameter the frame was built at.
    pub t: f64,
    /// Unit tangent vector (along the curve).
    pub tangent: Dir3,
    /// Unit normal vector (toward the center of curvature).
    pub normal: Dir3,
    /// Unit binormal vector (tangent × normal).
    pub binormal: Dir3,
}

/// What to do when tangent and acceleration are parallel at a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneracyPolicy {
    /// Fail with [`SweepError::DegenerateFrame`].
    #[default]
    Error,
    /// Carry the previous frame's normal across the degenerate sample.
    ReusePrevious,
}

impl FrenetFrame {
    /// Build a frame from a position and the first two derivatives there.
    ///
    /// Returns [`SweepError::DegenerateFrame`] if the velocity vanishes or is
    /// parallel to the acceleration.
    pub fn from_derivatives(
        position: Point3,
        t: f64,
        velocity: Vec3,
        acceleration: Vec3,
        tol: &Tolerance,
    ) -> Result<Self> {
        if tol.is_collinear(&velocity, &acceleration) {
            return Err(SweepError::DegenerateFrame { t });
        }

        let degenerate = || SweepError::DegenerateFrame { t };
        let tangent = direction(&velocity).ok_or_else(degenerate)?;
        let accel = direction(&acceleration).ok_or_else(degenerate)?;
        let binormal = direction(&tangent.cross(accel.as_ref())).ok_or_else(degenerate)?;
        let normal = Dir3::new_normalize(binormal.cross(tangent.as_ref()));

        Ok(Self {
            position,
            t,
            tangent,
            normal,
            binormal,
        })
    }

    /// Build a frame from a curve sample.
    pub fn from_sample(sample: &CurveSample, tol: &Tolerance) -> Result<Self> {
        Self::from_derivatives(
            sample.position,
            sample.t,
            sample.velocity,
            sample.acceleration,
            tol,
        )
    }

    /// Create a frame with an arbitrary but consistent normal direction.
    ///
    /// Used when the curvature vanishes and there is no earlier frame.
    fn with_arbitrary_normal(position: Point3, t: f64, tangent: Dir3) -> Self {
        // Choose an arbitrary vector not parallel to tangent
        let arbitrary = if tangent.x.abs() < 0.9 {
            Vec3::x()
        } else {
            Vec3::y()
        };

        let normal = Dir3::new_normalize(arbitrary.cross(tangent.as_ref()));
        let binormal = Dir3::new_normalize(tangent.cross(normal.as_ref()));

        Self {
            position,
            t,
            tangent,
            normal,
            binormal,
        }
    }

    /// Continue `prev` to a new tangent by projecting its normal onto the
    /// plane perpendicular to `tangent`.
    fn continued_from(
        prev: &FrenetFrame,
        position: Point3,
        t: f64,
        tangent: Dir3,
        tol: &Tolerance,
    ) -> Self {
        let projected =
            prev.normal.into_inner() - prev.normal.dot(tangent.as_ref()) * tangent.into_inner();
        match tol.normalize(projected) {
            Some(normal) => Self {
                position,
                t,
                tangent,
                normal,
                binormal: Dir3::new_normalize(tangent.cross(normal.as_ref())),
            },
            None => Self::with_arbitrary_normal(position, t, tangent),
        }
    }

    /// Unit outward direction at angle `u` around the cross-section:
    /// `cos(u)·binormal + sin(u)·normal`.
    pub fn radial(&self, u: f64) -> Vec3 {
        let (sin_u, cos_u) = u.sin_cos();
        cos_u * self.binormal.into_inner() + sin_u * self.normal.into_inner()
    }

    /// Check that all three axes are unit length and pairwise orthogonal.
    pub fn is_orthonormal(&self, tol: &Tolerance) -> bool {
        let t: &Vec3 = &self.tangent;
        let n: &Vec3 = &self.normal;
        let b: &Vec3 = &self.binormal;
        tol.is_unit(t)
            && tol.is_unit(n)
            && tol.is_unit(b)
            && tol.is_orthogonal(t, n)
            && tol.is_orthogonal(t, b)
            && tol.is_orthogonal(n, b)
    }
}

/// Sample `n` Frenet frames evenly over the curve's domain.
///
/// Sample `i` is taken at `t_min + i·(t_max - t_min)/n`, so the last sample
/// stops one step short of the period and the sequence wraps cyclically.
#[instrument(skip(curve, tol))]
pub fn sample_frames(
    curve: &dyn SpineCurve,
    n: usize,
    policy: DegeneracyPolicy,
    tol: &Tolerance,
) -> Result<Vec<FrenetFrame>> {
    let (t_min, t_max) = curve.domain();
    let dt = (t_max - t_min) / n as f64;

    let mut frames: Vec<FrenetFrame> = Vec::with_capacity(n);
    for i in 0..n {
        let sample = curve.sample(t_min + i as f64 * dt);
        let frame = match FrenetFrame::from_sample(&sample, tol) {
            Ok(frame) => frame,
            Err(err) if policy == DegeneracyPolicy::ReusePrevious => {
                // A zero tangent leaves nothing to orient the ring around
                let tangent = direction(&sample.velocity).ok_or(err)?;
                warn!(t = sample.t, "degenerate frame, carrying previous normal");
                match frames.last() {
                    Some(prev) => {
                        FrenetFrame::continued_from(prev, sample.position, sample.t, tangent, tol)
                    }
                    None => FrenetFrame::with_arbitrary_normal(sample.position, sample.t, tangent),
                }
            }
            Err(err) => return Err(err),
        };
        frames.push(frame);
    }

    debug!(frames = frames.len(), "sampled spine frames");
    Ok(frames)
}
