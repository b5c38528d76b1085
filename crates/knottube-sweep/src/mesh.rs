//! Renderer-facing views of a tube mesh: triangle lists, wire edges and
//! draw modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tube::TubeMesh;

/// How a renderer or exporter presents the tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// The spine as a closed polyline.
    Spine,
    /// Tube edges only.
    Wireframe,
    /// Filled, shaded tube surface.
    #[default]
    Solid,
}

impl FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spine" | "1" => Ok(Self::Spine),
            "wireframe" | "wire" | "2" => Ok(Self::Wireframe),
            "solid" | "filled" | "3" => Ok(Self::Solid),
            other => Err(format!(
                "unknown draw mode '{other}' (expected spine, wireframe or solid)"
            )),
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spine => "spine",
            Self::Wireframe => "wireframe",
            Self::Solid => "solid",
        })
    }
}

/// The tube surface as an indexed triangle list, narrowed to `f32` for
/// upload to a rasterizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Tube vertex coordinates, three per vertex, in ring-major order.
    pub vertices: Vec<f32>,
    /// Vertex indices, three per triangle, two triangles per quad.
    pub indices: Vec<u32>,
    /// Outward radial normal of each vertex, laid out like `vertices`.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl TubeMesh {
    /// Split every quad of every strip into two triangles.
    ///
    /// Strip entries alternate `(i+1, j), (i, j)`. Each quad
    /// `a=(i+1,j) b=(i,j) c=(i+1,j+1) d=(i,j+1)` becomes `(b, a, d)` and
    /// `(a, c, d)`, counter-clockwise when seen from outside the tube.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut tris = Vec::with_capacity(6 * self.rings() * self.ring_size());
        for strip in self.strips() {
            for quad in strip.windows(4).step_by(2) {
                let (a, b, c, d) = (quad[0], quad[1], quad[2], quad[3]);
                tris.extend_from_slice(&[b, a, d, a, c, d]);
            }
        }
        tris
    }

    /// Convert to a flat `f32` triangle list.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let flatten = |xs: &mut Vec<f32>, x: f64, y: f64, z: f64| {
            xs.extend_from_slice(&[x as f32, y as f32, z as f32]);
        };

        let mut vertices = Vec::with_capacity(3 * self.positions().len());
        for p in self.positions() {
            flatten(&mut vertices, p.x, p.y, p.z);
        }
        let mut normals = Vec::with_capacity(3 * self.normals().len());
        for n in self.normals() {
            flatten(&mut normals, n.x, n.y, n.z);
        }

        TriangleMesh {
            vertices,
            indices: self.triangle_indices(),
            normals,
        }
    }

    /// Unique edges of the quad grid, for wireframe drawing.
    ///
    /// Ring edges `(i, j)-(i, j+1)` come first, then longitudinal edges
    /// `(i, j)-(i+1, j)`, both wrapping cyclically.
    pub fn wire_edges(&self) -> Vec<[u32; 2]> {
        let (n, m) = (self.rings(), self.ring_size());
        let mut edges = Vec::with_capacity(2 * n * m);
        for i in 0..n {
            for j in 0..m {
                edges.push([self.vertex_index(i, j), self.vertex_index(i, (j + 1) % m)]);
            }
        }
        for i in 0..n {
            for j in 0..m {
                edges.push([self.vertex_index(i, j), self.vertex_index((i + 1) % n, j)]);
            }
        }
        edges
    }
}
