//! Tube sweep: a circular cross-section carried around the spine frames.

use std::f64::consts::TAU;

use knottube_curve::{validate_sweep, CurveParameters, SpineCurve, TorusKnot};
use knottube_math::{Point3, Tolerance, Vec3};
use tracing::{debug, info, instrument};

use crate::error::{Result, SweepError};
use crate::frenet::{sample_frames, DegeneracyPolicy, FrenetFrame};

/// Options for frame sampling during a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepOptions {
    /// Handling of samples where the Frenet frame is undefined.
    pub degeneracy: DegeneracyPolicy,
    /// Thresholds for degeneracy detection.
    pub tolerance: Tolerance,
}

/// A closed tube mesh swept around a spine curve.
///
/// Holds `n` rings of `m` vertices each. Vertex `(i, j)` lives at index
/// `i·m + j` in [`positions`](Self::positions) and
/// [`normals`](Self::normals). The index buffer is `n` quad strips of
/// `2m + 2` indices; strip `i` joins ring `i` to ring `(i + 1) mod n`.
///
/// The mesh is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    rings: usize,
    ring_size: usize,
    radius: f64,
    spine: Vec<Point3>,
    frames: Vec<FrenetFrame>,
    positions: Vec<Point3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TubeMesh {
    /// Generate the torus-knot tube described by `params`.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidParameters`](crate::SweepError::InvalidParameters)
    /// before allocating anything if `params` fails validation, and
    /// [`SweepError::DegenerateFrame`](crate::SweepError::DegenerateFrame) if
    /// the spine has no Frenet frame at some sample.
    pub fn generate(params: &CurveParameters) -> Result<Self> {
        Self::generate_with(params, &SweepOptions::default())
    }

    /// Generate the torus-knot tube with explicit sweep options.
    #[instrument(skip_all, fields(n = params.n, m = params.m))]
    pub fn generate_with(params: &CurveParameters, options: &SweepOptions) -> Result<Self> {
        params.validate()?;

        let knot = TorusKnot::from_params(params);
        let mesh = sweep_curve(&knot, params.n, params.m, params.r, options)?;

        info!(
            vertices = mesh.positions.len(),
            indices = mesh.indices.len(),
            "generated tube mesh"
        );
        Ok(mesh)
    }

    /// Number of rings along the spine (`n`).
    pub fn rings(&self) -> usize {
        self.rings
    }

    /// Number of vertices per ring (`m`).
    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    /// Tube radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Spine points, one per ring. Drawn as a closed polyline in spine mode.
    pub fn spine(&self) -> &[Point3] {
        &self.spine
    }

    /// Frenet frames, one per ring.
    pub fn frames(&self) -> &[FrenetFrame] {
        &self.frames
    }

    /// Tube vertex positions (`n·m`).
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Unit outward vertex normals (`n·m`).
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Quad strip index buffer (`n·(2m+2)`).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Indices per strip (`2m+2`).
    pub fn strip_len(&self) -> usize {
        2 * self.ring_size + 2
    }

    /// Iterate the `n` quad strips in order.
    pub fn strips(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        self.indices.chunks_exact(self.strip_len())
    }

    /// Index of vertex `j` on ring `i`.
    pub fn vertex_index(&self, i: usize, j: usize) -> u32 {
        (i * self.ring_size + j) as u32
    }
}

/// Sweep a tube of radius `r` with `m` vertices per ring around `n` frames
/// sampled from `curve`.
pub fn sweep_curve(
    curve: &dyn SpineCurve,
    n: u32,
    m: u32,
    r: f64,
    options: &SweepOptions,
) -> Result<TubeMesh> {
    validate_sweep(n, m, r)?;
    let frames = sample_frames(curve, n as usize, options.degeneracy, &options.tolerance)?;
    sweep_frames(frames, m, r)
}

/// Sweep a tube of radius `r` with `m` vertices per ring around `frames`.
///
/// The frames are treated as a closed loop: the last ring is stitched back
/// to the first.
#[instrument(skip(frames), fields(n = frames.len()))]
pub fn sweep_frames(frames: Vec<FrenetFrame>, m: u32, r: f64) -> Result<TubeMesh> {
    let n = ring_count(frames.len())?;
    validate_sweep(n, m, r)?;

    let (n, m) = (n as usize, m as usize);
    let du = TAU / m as f64;

    let spine: Vec<Point3> = frames.iter().map(|f| f.position).collect();

    let mut positions = Vec::with_capacity(n * m);
    let mut normals = Vec::with_capacity(n * m);
    for frame in &frames {
        for j in 0..m {
            let normal = frame.radial(j as f64 * du);
            positions.push(frame.position + r * normal);
            normals.push(normal);
        }
    }

    let indices = strip_indices(n, m);
    debug!(
        positions = positions.len(),
        indices = indices.len(),
        "swept tube"
    );

    Ok(TubeMesh {
        rings: n,
        ring_size: m,
        radius: r,
        spine,
        frames,
        positions,
        normals,
        indices,
    })
}

fn ring_count(frames: usize) -> Result<u32> {
    u32::try_from(frames).map_err(|_| SweepError::TooManyFrames { count: frames })
}

/// Quad strip indices for `n` rings of `m` vertices.
///
/// Each strip alternates between ring `i + 1` and ring `i`, then repeats
/// the first pair to close the ring.
fn strip_indices(n: usize, m: usize) -> Vec<u32> {
    let index = |i: usize, j: usize| (i * m + j) as u32;

    let mut indices = Vec::with_capacity(n * (2 * m + 2));
    for i in 0..n {
        let next = (i + 1) % n;
        for j in 0..m {
            indices.push(index(next, j));
            indices.push(index(i, j));
        }
        indices.push(index(next, 0));
        indices.push(index(i, 0));
    }
    indices
}
