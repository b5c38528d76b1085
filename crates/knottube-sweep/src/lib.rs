#![warn(missing_docs)]

//! Tube sweep meshes for knottube.
//!
//! Samples Frenet frames along a spine curve and sweeps a circular
//! cross-section around them, producing vertex, normal and quad strip
//! index buffers ready to stream to a rasterizer.
//!
//! # Example
//!
//! ```
//! use knottube_curve::CurveParameters;
//! use knottube_sweep::TubeMesh;
//!
//! let params = CurveParameters { n: 4, m: 4, ..Default::default() };
//! let mesh = TubeMesh::generate(&params)?;
//!
//! assert_eq!(mesh.positions().len(), 16);
//! assert_eq!(mesh.indices().len(), 40);
//! # Ok::<(), knottube_sweep::SweepError>(())
//! ```

pub mod error;
pub mod export;
pub mod frenet;
pub mod mesh;
pub mod slot;
pub mod tube;

pub use error::{Result, SweepError};
pub use export::write_obj;
pub use frenet::{sample_frames, DegeneracyPolicy, FrenetFrame};
pub use mesh::{DrawMode, TriangleMesh};
pub use slot::{MeshSlot, MeshSnapshot};
pub use tube::{sweep_curve, sweep_frames, SweepOptions, TubeMesh};
