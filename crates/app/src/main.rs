//! Entry point for Veles3D mesh tooling.
//! Loads a geometry file, reports buffer stats, optionally re-exports the
//! assembled mesh or probes a world-space point against its bounds.

use anyhow::{Context, Result};
use asset::{export, mesh::MeshData, obj};
use corelib::{Transform, vec3};

fn parse_input_arg() -> Option<String> {
    // First bare argument is the input path; flags all start with `--`.
    std::env::args().skip(1).find(|arg| !arg.starts_with("--"))
}

fn parse_export_arg() -> Option<String> {
    // --export=PATH, по умолчанию выключен.
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--export=") {
            return Some(val.to_string());
        }
    }
    None
}

fn parse_probe_arg() -> Option<[f32; 3]> {
    // --probe=x,y,z: containment test against the loaded bounds.
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--probe=") {
            let mut parts = val.split(',');
            if let (Some(x), Some(y), Some(z)) = (parts.next(), parts.next(), parts.next()) {
                if let (Ok(px), Ok(py), Ok(pz)) =
                    (x.parse::<f32>(), y.parse::<f32>(), z.parse::<f32>())
                {
                    return Some([px, py, pz]);
                }
            }
            eprintln!("[warn] Ignoring malformed --probe value '{}'.", val);
        }
    }
    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let input = parse_input_arg()
        .context("Usage: app <model.obj> [--export=PATH] [--probe=x,y,z]")?;
    log::info!("Loading geometry from {}", input);

    let data = obj::load_obj_from_path(&input)?;
    log::info!(
        "Parsed: {} positions, {} normals, {} texcoords, {} shapes",
        data.attrib.position_count(),
        data.attrib.normal_count(),
        data.attrib.texcoord_count(),
        data.shapes.len()
    );
    for shape in &data.shapes {
        log::info!(
            "  shape '{}': {} triangles ({} source faces)",
            shape.name,
            shape.triangle_count(),
            shape.face_arities.len()
        );
    }

    let mesh = MeshData::from_obj(&data);
    log::info!(
        "Mesh: {} vertices, {} triangles, bounds {:?} .. {:?}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.aabb.min,
        mesh.aabb.max
    );

    if let Some([x, y, z]) = parse_probe_arg() {
        let inside = mesh
            .aabb
            .contains_world_point(&Transform::identity(), vec3(x, y, z));
        log::info!(
            "Probe ({}, {}, {}): {}",
            x,
            y,
            z,
            if inside { "inside" } else { "outside" }
        );
    }

    if let Some(path) = parse_export_arg() {
        export::export_obj_to_path(&mesh, &path)?;
    }

    log::info!("Done.");
    Ok(())
}
