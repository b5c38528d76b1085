//! Curve and tessellation parameters.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};

/// Parameters that fully determine a tube mesh.
///
/// `a` and `b` are the primary and secondary winding distances, `p` and `q`
/// the number of windings around each axis, `r` the tube radius, `n` the
/// number of samples along the spine and `m` the number of samples around
/// each cross-section ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParameters {
    /// Distance from the origin to the center of the tube's sweep.
    pub a: f64,
    /// Radius of the secondary winding around the sweep circle.
    pub b: f64,
    /// Windings around the z axis.
    pub p: i32,
    /// Windings around the sweep circle.
    pub q: i32,
    /// Tube radius.
    pub r: f64,
    /// Samples along the spine.
    pub n: u32,
    /// Samples around each cross-section.
    pub m: u32,
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            a: 100.0,
            b: 40.0,
            p: 1,
            q: 7,
            r: 20.0,
            n: 100,
            m: 32,
        }
    }
}

impl CurveParameters {
    /// Check the parameters before any buffer is allocated.
    pub fn validate(&self) -> Result<()> {
        validate_sweep(self.n, self.m, self.r)?;
        if !self.a.is_finite() {
            return Err(CurveError::NonFinite {
                name: "a",
                value: self.a,
            });
        }
        if !(self.b.is_finite() && self.b > 0.0) {
            return Err(CurveError::NonPositiveAmplitude(self.b));
        }
        if self.p == 0 {
            return Err(CurveError::ZeroFrequency("p"));
        }
        if self.q == 0 {
            return Err(CurveError::ZeroFrequency("q"));
        }
        Ok(())
    }

    /// Number of tube vertices (`n·m`).
    pub fn vertex_count(&self) -> usize {
        self.n as usize * self.m as usize
    }

    /// Number of indices in one quad strip (`2m+2`).
    pub fn strip_len(&self) -> usize {
        2 * self.m as usize + 2
    }

    /// Number of indices in the full strip buffer (`n·(2m+2)`).
    pub fn index_count(&self) -> usize {
        self.n as usize * self.strip_len()
    }
}

/// Check the tessellation part of a sweep: sample counts, radius and
/// the `u32` index range.
pub fn validate_sweep(n: u32, m: u32, r: f64) -> Result<()> {
    if n < 3 {
        return Err(CurveError::TooFewSamples { name: "n", value: n });
    }
    if m < 3 {
        return Err(CurveError::TooFewSamples { name: "m", value: m });
    }
    if !(r.is_finite() && r > 0.0) {
        return Err(CurveError::NonPositiveRadius(r));
    }

    let (n64, m64) = (u64::from(n), u64::from(m));
    if n64 * (2 * m64 + 2) > u64::from(u32::MAX) {
        return Err(CurveError::TooManyVertices { n, m });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> CurveParameters {
        CurveParameters {
            n: 4,
            m: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(CurveParameters::default().validate().is_ok());
    }

    #[test]
    fn test_counts() {
        let params = scenario();
        assert_eq!(params.vertex_count(), 16);
        assert_eq!(params.strip_len(), 10);
        assert_eq!(params.index_count(), 40);
    }

    #[test]
    fn test_too_few_samples() {
        let params = CurveParameters { n: 2, ..scenario() };
        assert_eq!(
            params.validate(),
            Err(CurveError::TooFewSamples { name: "n", value: 2 })
        );

        let params = CurveParameters { m: 1, ..scenario() };
        assert_eq!(
            params.validate(),
            Err(CurveError::TooFewSamples { name: "m", value: 1 })
        );
    }

    #[test]
    fn test_non_positive_distances() {
        let params = CurveParameters { r: 0.0, ..scenario() };
        assert_eq!(params.validate(), Err(CurveError::NonPositiveRadius(0.0)));

        let params = CurveParameters { b: -1.0, ..scenario() };
        assert_eq!(
            params.validate(),
            Err(CurveError::NonPositiveAmplitude(-1.0))
        );

        let params = CurveParameters {
            r: f64::NAN,
            ..scenario()
        };
        assert!(matches!(
            params.validate(),
            Err(CurveError::NonPositiveRadius(_))
        ));

        let params = CurveParameters {
            a: f64::INFINITY,
            ..scenario()
        };
        assert!(matches!(
            params.validate(),
            Err(CurveError::NonFinite { name: "a", .. })
        ));
    }

    #[test]
    fn test_zero_frequency() {
        let params = CurveParameters { p: 0, ..scenario() };
        assert_eq!(params.validate(), Err(CurveError::ZeroFrequency("p")));

        let params = CurveParameters { q: 0, ..scenario() };
        assert_eq!(params.validate(), Err(CurveError::ZeroFrequency("q")));
    }

    #[test]
    fn test_negative_frequency_allowed() {
        let params = CurveParameters { p: -2, q: -3, ..scenario() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_index_range_overflow() {
        let params = CurveParameters {
            n: 100_000,
            m: 100_000,
            ..scenario()
        };
        assert!(matches!(
            params.validate(),
            Err(CurveError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let params: CurveParameters = toml::from_str("q = 5\nn = 64\n").unwrap();
        assert_eq!(params.q, 5);
        assert_eq!(params.n, 64);
        assert_eq!(params.a, 100.0);
        assert_eq!(params.m, 32);
    }

    #[test]
    fn test_json_roundtrip() {
        let params = scenario();
        let json = serde_json::to_string(&params).unwrap();
        let back: CurveParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
