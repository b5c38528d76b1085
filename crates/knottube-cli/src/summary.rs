//! Mesh summary for the `info` command.

use knottube_curve::CurveParameters;
use knottube_math::{bounds, Point3, Tolerance};
use knottube_sweep::TubeMesh;
use serde::Serialize;

/// Counts and sanity measures of a generated mesh.
#[derive(Debug, Clone, Serialize)]
pub struct MeshInfo {
    pub params: CurveParameters,
    pub spine_points: usize,
    pub vertices: usize,
    pub normals: usize,
    pub indices: usize,
    pub strips: usize,
    pub triangles: usize,
    pub bounds_min: [f64; 3],
    pub bounds_max: [f64; 3],
    /// Largest `| |n| - 1 |` over all vertex normals.
    pub max_normal_error: f64,
    pub frames_orthonormal: bool,
}

impl MeshInfo {
    pub fn new(params: CurveParameters, mesh: &TubeMesh) -> Self {
        let tol = Tolerance::DEFAULT;
        let (lo, hi) = bounds(mesh.positions()).unwrap_or((Point3::origin(), Point3::origin()));
        let max_normal_error = mesh
            .normals()
            .iter()
            .map(|n| (n.norm() - 1.0).abs())
            .fold(0.0, f64::max);

        Self {
            params,
            spine_points: mesh.spine().len(),
            vertices: mesh.positions().len(),
            normals: mesh.normals().len(),
            indices: mesh.indices().len(),
            strips: mesh.strips().len(),
            triangles: 2 * mesh.rings() * mesh.ring_size(),
            bounds_min: [lo.x, lo.y, lo.z],
            bounds_max: [hi.x, hi.y, hi.z],
            max_normal_error,
            frames_orthonormal: mesh.frames().iter().all(|f| f.is_orthonormal(&tol)),
        }
    }

    pub fn render_text(&self) -> String {
        let p = &self.params;
        let [x0, y0, z0] = self.bounds_min;
        let [x1, y1, z1] = self.bounds_max;
        format!(
            "Curve: a={} b={} p={} q={} r={}\n\
             Samples: n={} m={}\n\
             Spine points: {}\n\
             Vertices: {}\n\
             Normals: {}\n\
             Indices: {} ({} strips of {})\n\
             Triangles: {}\n\
             Bounds: ({x0:.3}, {y0:.3}, {z0:.3}) .. ({x1:.3}, {y1:.3}, {z1:.3})\n\
             Max normal error: {:.3e}\n\
             Frames orthonormal: {}",
            p.a,
            p.b,
            p.p,
            p.q,
            p.r,
            p.n,
            p.m,
            self.spine_points,
            self.vertices,
            self.normals,
            self.indices,
            self.strips,
            p.strip_len(),
            self.triangles,
            self.max_normal_error,
            if self.frames_orthonormal { "yes" } else { "no" },
        )
    }
}
