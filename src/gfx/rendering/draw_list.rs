//! Recording renderer.
//!
//! Collects draw submissions into an ordered list instead of issuing GPU
//! work. Tests inject it to observe the exact world transforms and paint
//! order a traversal produces; the headless demos use it as their backend.

use cgmath::Matrix4;

use super::{MeshHandle, Renderer};
use crate::gfx::scene::Material;

/// One draw submission: everything a backend needs to rasterize a node.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    /// Accumulated world transform of the node (parent world x local).
    pub world: Matrix4<f32>,
    /// View-projection matrix active for the frame.
    pub view_proj: Matrix4<f32>,
    /// Material of the node.
    pub material: Material,
    /// Geometry to draw.
    pub mesh: MeshHandle,
}

/// A [`Renderer`] that records submissions in arrival order.
#[derive(Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in submission order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drops all recorded calls, keeping the allocation for the next frame.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for DrawList {
    fn submit(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}
