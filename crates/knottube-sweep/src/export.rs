//! Wavefront OBJ export of a tube mesh in any draw mode.

use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::mesh::DrawMode;
use crate::tube::TubeMesh;

/// Write `mesh` as OBJ text in the given draw mode.
///
/// - `Spine`: spine points plus one closed `l` polyline
/// - `Wireframe`: tube vertices plus one `l` record per grid edge
/// - `Solid`: tube vertices, normals and triangulated `f` records
///
/// OBJ indices are 1-based.
pub fn write_obj<W: Write>(mesh: &TubeMesh, mode: DrawMode, name: &str, mut w: W) -> Result<()> {
    writeln!(w, "# knottube {mode}")?;
    writeln!(w, "o {name}")?;

    match mode {
        DrawMode::Spine => {
            for p in mesh.spine() {
                writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
            }
            write!(w, "l")?;
            for k in 1..=mesh.spine().len() {
                write!(w, " {k}")?;
            }
            writeln!(w, " 1")?;
        }
        DrawMode::Wireframe => {
            for p in mesh.positions() {
                writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
            }
            for [a, b] in mesh.wire_edges() {
                writeln!(w, "l {} {}", a + 1, b + 1)?;
            }
        }
        DrawMode::Solid => {
            for p in mesh.positions() {
                writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
            }
            for n in mesh.normals() {
                writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
            }
            for tri in mesh.triangle_indices().chunks_exact(3) {
                let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
                writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")?;
            }
        }
    }

    w.flush()?;
    debug!(%mode, "wrote OBJ");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use knottube_curve::CurveParameters;

    fn mesh() -> TubeMesh {
        TubeMesh::generate(&CurveParameters {
            n: 4,
            m: 4,
            ..Default::default()
        })
        .unwrap()
    }

    fn export(mode: DrawMode) -> String {
        let mut buf = Vec::new();
        write_obj(&mesh(), mode, "knot", &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn count(text: &str, prefix: &str) -> usize {
        text.lines().filter(|l| l.starts_with(prefix)).count()
    }

    #[test]
    fn test_spine_export() {
        let text = export(DrawMode::Spine);
        assert_eq!(count(&text, "v "), 4);
        assert!(text.contains("\nl 1 2 3 4 1\n"));
        assert!(text.starts_with("# knottube spine\no knot\n"));
    }

    #[test]
    fn test_wireframe_export() {
        let text = export(DrawMode::Wireframe);
        assert_eq!(count(&text, "v "), 16);
        assert_eq!(count(&text, "l "), 32);
        assert_eq!(count(&text, "f "), 0);
    }

    #[test]
    fn test_solid_export() {
        let text = export(DrawMode::Solid);
        assert_eq!(count(&text, "v "), 16);
        assert_eq!(count(&text, "vn "), 16);
        assert_eq!(count(&text, "f "), 32);
        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for vert in line.split_whitespace().skip(1) {
                let idx: usize = vert.split("//").next().unwrap().parse().unwrap();
                assert!((1..=16).contains(&idx));
            }
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let result = write_obj(&mesh(), DrawMode::Solid, "knot", FailingWriter);
        assert!(matches!(result, Err(SweepError::Io(_))));
    }
}
