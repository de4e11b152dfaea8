//! Serialize an assembled mesh back to the line-oriented geometry format.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::mesh::MeshData;

/// Write `v`, `vt` and `vn` lines for every vertex, then one `f` line per
/// triangle with 1-based `v/vt/vn` references. The three attribute lists are
/// parallel, so each corner reuses a single index for all three slots.
pub fn write_obj<W: Write>(mesh: &MeshData, out: &mut W) -> io::Result<()> {
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
    }
    for v in &mesh.vertices {
        writeln!(out, "vt {} {}", v.uv[0], v.uv[1])?;
    }
    for v in &mesh.vertices {
        writeln!(out, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Export a mesh to a file path.
pub fn export_obj_to_path(mesh: &MeshData, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create OBJ file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_obj(mesh, &mut out)?;
    out.flush()?;
    log::info!("Exported OBJ to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshData;
    use crate::obj::load_obj_from_str;

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
                        vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
                        vn 0 0 1\n\
                        f 1/1/1 2/2/1 3/3/1 4/4/1\n";

    #[test]
    fn emits_one_face_line_per_triangle() {
        let mesh = MeshData::from_obj(&load_obj_from_str(QUAD).unwrap());
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert!(text.lines().any(|l| l == "f 1/1/1 2/2/1 3/3/1"));
    }

    #[test]
    fn export_reload_round_trip() {
        let mesh = MeshData::from_obj(&load_obj_from_str(QUAD).unwrap());
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let reloaded = MeshData::from_obj(&load_obj_from_str(&text).unwrap());

        assert_eq!(reloaded.vertex_count(), mesh.vertex_count());
        assert_eq!(reloaded.vertices, mesh.vertices);
        assert_eq!(reloaded.indices, mesh.indices);
        assert_eq!(reloaded.aabb, mesh.aabb);
    }
}
