//! Spine curves with analytic derivatives.

use std::f64::consts::TAU;

use knottube_math::{Point3, Vec3};

use crate::params::CurveParameters;

/// Position and first two derivatives of a curve at one parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Parameter value the sample was taken at.
    pub t: f64,
    /// Point on the curve.
    pub position: Point3,
    /// First derivative with respect to `t`.
    pub velocity: Vec3,
    /// Second derivative with respect to `t`.
    pub acceleration: Vec3,
}

/// A closed parametric curve that a tube can be swept along.
///
/// Implementors provide exact derivatives. Frames built from them must
/// stay orthonormal, so finite differences are not good enough here.
pub trait SpineCurve: Send + Sync + std::fmt::Debug {
    /// Point on the curve at parameter `t`.
    fn position(&self, t: f64) -> Point3;

    /// First derivative at `t`.
    fn velocity(&self, t: f64) -> Vec3;

    /// Second derivative at `t`.
    fn acceleration(&self, t: f64) -> Vec3;

    /// Parameter domain `(t_min, t_max)` covering one full period.
    fn domain(&self) -> (f64, f64) {
        (0.0, TAU)
    }

    /// Evaluate position and both derivatives at once.
    fn sample(&self, t: f64) -> CurveSample {
        CurveSample {
            t,
            position: self.position(t),
            velocity: self.velocity(t),
            acceleration: self.acceleration(t),
        }
    }
}

/// Generalized (p, q) torus knot.
///
/// Winds `p` times around the z axis at distance `a` while circling the
/// sweep circle `q` times at distance `b`:
///
/// ```text
/// x(t) = (a + b·cos(qt))·cos(pt)
/// y(t) = (a + b·cos(qt))·sin(pt)
/// z(t) = b·sin(qt)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot {
    /// Primary winding distance.
    pub a: f64,
    /// Secondary winding distance.
    pub b: f64,
    /// Windings around the z axis.
    pub p: f64,
    /// Windings around the sweep circle.
    pub q: f64,
}

impl TorusKnot {
    /// Create a torus knot curve.
    pub fn new(a: f64, b: f64, p: i32, q: i32) -> Self {
        Self {
            a,
            b,
            p: f64::from(p),
            q: f64::from(q),
        }
    }

    /// Build the spine curve described by `params`.
    pub fn from_params(params: &CurveParameters) -> Self {
        Self::new(params.a, params.b, params.p, params.q)
    }

    fn angles(&self, t: f64) -> Angles {
        let (sin_p, cos_p) = (self.p * t).sin_cos();
        let (sin_q, cos_q) = (self.q * t).sin_cos();
        Angles {
            sin_p,
            cos_p,
            sin_q,
            cos_q,
        }
    }
}

struct Angles {
    sin_p: f64,
    cos_p: f64,
    sin_q: f64,
    cos_q: f64,
}

impl SpineCurve for TorusKnot {
    fn position(&self, t: f64) -> Point3 {
        let s = self.angles(t);
        let radius = self.a + self.b * s.cos_q;
        Point3::new(radius * s.cos_p, radius * s.sin_p, self.b * s.sin_q)
    }

    fn velocity(&self, t: f64) -> Vec3 {
        let s = self.angles(t);
        let pos = self.position(t);
        let (p, bq) = (self.p, self.b * self.q);
        Vec3::new(
            -p * pos.y - bq * s.sin_q * s.cos_p,
            p * pos.x - bq * s.sin_q * s.sin_p,
            bq * s.cos_q,
        )
    }

    fn acceleration(&self, t: f64) -> Vec3 {
        let s = self.angles(t);
        let vel = self.velocity(t);
        let (p, q, bq) = (self.p, self.q, self.b * self.q);
        Vec3::new(
            -p * vel.y + bq * (p * s.sin_q * s.sin_p - q * s.cos_q * s.cos_p),
            p * vel.x - bq * (p * s.sin_q * s.cos_p + q * s.cos_q * s.sin_p),
            -q * q * self.b * s.sin_q,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn knot() -> TorusKnot {
        TorusKnot::from_params(&CurveParameters::default())
    }

    #[test]
    fn test_position_at_zero() {
        let p = knot().position(0.0);
        assert_relative_eq!(p.x, 140.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_over_domain() {
        let k = TorusKnot::new(100.0, 40.0, 2, 3);
        let (t0, t1) = k.domain();
        let start = k.position(t0);
        let end = k.position(t1);
        assert!((start - end).norm() < 1e-9);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let k = TorusKnot::new(100.0, 40.0, 2, 5);
        let h = 1e-6;
        for i in 0..16 {
            let t = i as f64 * 0.37;
            let fd = (k.position(t + h) - k.position(t - h)) / (2.0 * h);
            let v = k.velocity(t);
            assert!(
                (fd - v).norm() < 1e-4 * v.norm().max(1.0),
                "velocity mismatch at t={t}: {v:?} vs {fd:?}"
            );
        }
    }

    #[test]
    fn test_acceleration_matches_finite_difference() {
        let k = TorusKnot::new(100.0, 40.0, 3, 7);
        let h = 1e-6;
        for i in 0..16 {
            let t = i as f64 * 0.41;
            let fd = (k.velocity(t + h) - k.velocity(t - h)) / (2.0 * h);
            let acc = k.acceleration(t);
            assert!(
                (fd - acc).norm() < 1e-4 * acc.norm().max(1.0),
                "acceleration mismatch at t={t}: {acc:?} vs {fd:?}"
            );
        }
    }

    #[test]
    fn test_sample_bundles_derivatives() {
        let k = knot();
        let s = k.sample(1.25);
        assert_eq!(s.t, 1.25);
        assert_eq!(s.position, k.position(1.25));
        assert_eq!(s.velocity, k.velocity(1.25));
        assert_eq!(s.acceleration, k.acceleration(1.25));
    }

    #[test]
    fn test_z_stays_within_b() {
        let k = knot();
        for i in 0..100 {
            let t = i as f64 * TAU / 100.0;
            assert!(k.position(t).z.abs() <= k.b + 1e-12);
        }
    }
}
