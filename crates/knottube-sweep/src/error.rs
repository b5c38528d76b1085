//! Error types for frame building and tube sweeping.

use knottube_curve::CurveError;
use thiserror::Error;

/// Errors that can occur while sweeping a tube.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Parameters failed validation; nothing was allocated.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] CurveError),

    /// Tangent and acceleration are parallel (or zero), so the binormal is
    /// undefined at this parameter value.
    #[error("degenerate Frenet frame at t={t}")]
    DegenerateFrame {
        /// Curve parameter of the offending sample.
        t: f64,
    },

    /// More frames were supplied than `u32` indices can address.
    #[error("too many frames for u32 indices: {count}")]
    TooManyFrames {
        /// Number of frames supplied.
        count: usize,
    },

    /// Writing an export failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
