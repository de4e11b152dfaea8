//! CPU-side mesh representation: deduplicated vertex/index buffers plus a
//! model-space bounding box, ready for upload by a rendering backend.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use corelib::{Aabb, Vec3};

use crate::obj::{self, ObjData};

/// Vertex with position/normal/uv. Values are in object space; normal and uv
/// are zero when the source face carried no reference for them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Identity key for deduplication: the bit pattern of all eight floats.
    /// Vertices that differ only by rounding stay distinct.
    fn key(&self) -> [u32; 8] {
        [
            self.position[0].to_bits(),
            self.position[1].to_bits(),
            self.position[2].to_bits(),
            self.normal[0].to_bits(),
            self.normal[1].to_bits(),
            self.normal[2].to_bits(),
            self.uv[0].to_bits(),
            self.uv[1].to_bits(),
        ]
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub aabb: Aabb,
}

impl MeshData {
    /// Wrap prebuilt buffers (the procedural-shape path), computing the
    /// bounding box from the supplied vertices.
    pub fn from_buffers(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        let mut aabb = Aabb::EMPTY;
        for v in &vertices {
            aabb.grow(Vec3::from(v.position));
        }
        Self {
            vertices,
            indices,
            aabb,
        }
    }

    /// Assemble deduplicated buffers from parsed geometry.
    ///
    /// Shapes are walked in order, corners in order. Each corner resolves to
    /// a full vertex; structurally identical vertices collapse onto one
    /// buffer entry, and the bounding box widens as unique vertices are
    /// inserted. Out-of-range attribute references degrade to zeroed values
    /// rather than failing the build.
    pub fn from_obj(data: &ObjData) -> Self {
        let mut unique: HashMap<[u32; 8], u32> = HashMap::new();
        let mut vertices: Vec<MeshVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut aabb = Aabb::EMPTY;

        for shape in &data.shapes {
            for vi in &shape.indices {
                let position = data.attrib.position(vi.position).unwrap_or_default();
                let normal = data.attrib.normal(vi.normal).unwrap_or_default();
                let uv = data.attrib.texcoord(vi.texcoord).unwrap_or_default();
                let vertex = MeshVertex::new(position, normal, uv);

                let index = match unique.get(&vertex.key()) {
                    Some(&idx) => idx,
                    None => {
                        let idx = vertices.len() as u32;
                        aabb.grow(Vec3::from(position));
                        vertices.push(vertex);
                        unique.insert(vertex.key(), idx);
                        idx
                    }
                };
                indices.push(index);
            }
        }

        Self {
            vertices,
            indices,
            aabb,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }
}

/// Parse a geometry file and assemble its mesh in one synchronous call.
pub fn load_mesh_from_path(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    let data = obj::load_obj_from_path(path)?;
    let mesh = MeshData::from_obj(&data);
    log::info!(
        "Loaded mesh {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
