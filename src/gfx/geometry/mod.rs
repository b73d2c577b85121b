//! # Procedural Geometry Generation
//!
//! Functions to generate the primitive shapes the demo scenes are assembled
//! from, removing the need for external model files for basic geometry.
//!
//! All generators emit [`GeometryData`], a plain container of positions,
//! normals, texture coordinates and triangle indices ready to hand to a
//! [`MeshProvider`](crate::gfx::rendering::MeshProvider).
//!
//! Boxes are generated with 24 unshared vertices (4 per face) so every face
//! carries its own normal. Besides being correct for lighting hard edges,
//! this is the geometry-duplication strategy that makes flat shading work:
//! per-face normals come from not sharing vertices between adjacent faces,
//! not from anything the shading model does.

pub mod primitives;

pub use primitives::{
    generate_box, generate_cube, generate_cylinder, generate_grid, generate_sphere,
    generate_wall_panel,
};

use crate::gfx::scene::Vertex3D;

/// Generated geometry ready for upload through a mesh provider.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Creates a new empty geometry container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in this geometry.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in this geometry.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves the attribute arrays into the vertex record format mesh
    /// providers accept. Missing normals default to +Y and missing texture
    /// coordinates to (0, 0).
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.positions.len())
            .map(|i| Vertex3D {
                position: self.positions[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coord: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
