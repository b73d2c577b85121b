//! In-memory mesh provider.
//!
//! Owns the geometry it is given and hands out opaque handles, playing the
//! role a GPU buffer allocator would in a windowed build. Nodes reference
//! meshes exclusively through handles, so the library is the single owner of
//! all geometry it created.

use super::{MeshHandle, MeshProvider};
use crate::gfx::geometry::GeometryData;
use crate::gfx::scene::Vertex3D;

/// Geometry stored behind a [`MeshHandle`].
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Owns uploaded meshes and issues handles to them.
#[derive(Default)]
pub struct MeshLibrary {
    meshes: Vec<MeshData>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience wrapper: interleaves and uploads generated geometry.
    pub fn upload(&mut self, data: &GeometryData) -> MeshHandle {
        self.create_mesh(&data.to_vertices(), &data.indices)
    }

    /// Resolves a handle back to its geometry.
    pub fn get(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshProvider for MeshLibrary {
    fn create_mesh(&mut self, vertices: &[Vertex3D], indices: &[u32]) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(MeshData {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
        handle
    }
}
