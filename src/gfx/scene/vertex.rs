//! # Vertex Data Structures
//!
//! GPU-layout-compatible vertex records consumed by mesh providers.

/// A 3D vertex with interleaved position, normal and texture coordinate data.
///
/// `#[repr(C)]` plus the bytemuck derives give the struct a fixed memory
/// layout, so a `&[Vertex3D]` can be handed to a GPU backend as raw bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coord: [f32; 2],
}

impl Vertex3D {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}
