#![warn(missing_docs)]

//! Spine curves for the knottube mesh generator.
//!
//! Provides [`CurveParameters`], the single configuration value that
//! determines a tube mesh, and the [`SpineCurve`] trait with the
//! [`TorusKnot`] family evaluated through analytic first and second
//! derivatives.
//!
//! # Example
//!
//! ```
//! use knottube_curve::{CurveParameters, SpineCurve, TorusKnot};
//!
//! let params = CurveParameters::default();
//! params.validate().unwrap();
//!
//! let knot = TorusKnot::from_params(&params);
//! let p = knot.position(0.0);
//! assert!((p.x - 140.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod knot;
pub mod params;

pub use error::{CurveError, Result};
pub use knot::{CurveSample, SpineCurve, TorusKnot};
pub use params::{validate_sweep, CurveParameters};
