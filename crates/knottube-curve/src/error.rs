//! Error types for curve configuration.

use thiserror::Error;

/// Invalid curve or tessellation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Longitudinal or cross-section sample count below the minimum ring.
    #[error("{name} must be at least 3, got {value}")]
    TooFewSamples {
        /// Parameter name (`n` or `m`).
        name: &'static str,
        /// Offending value.
        value: u32,
    },

    /// Tube radius is zero, negative or not finite.
    #[error("tube radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Secondary winding distance is zero, negative or not finite.
    #[error("distance b must be positive, got {0}")]
    NonPositiveAmplitude(f64),

    /// A winding frequency is zero.
    #[error("frequency {0} must be nonzero")]
    ZeroFrequency(&'static str),

    /// A distance is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The mesh would need indices outside the `u32` range.
    #[error("{n} x {m} samples exceed the u32 index range")]
    TooManyVertices {
        /// Longitudinal sample count.
        n: u32,
        /// Cross-section sample count.
        m: u32,
    },
}

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
