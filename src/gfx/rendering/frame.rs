//! Per-frame state.
//!
//! Everything a draw traversal needs beyond the scene itself, gathered into
//! one value and passed down the call chain. Keeping this explicit (instead
//! of ambient globals for camera and lights) is what lets the core be
//! driven from tests without a windowed context.

use cgmath::{Matrix4, Point3};

use crate::gfx::camera::Camera;
use crate::gfx::lighting::{LightSet, ShadingMode};

/// Immutable state for one frame's draw traversal.
///
/// Built once per frame after all controllers have run; the light set is
/// complete before any draw call reads it.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    /// Cached `projection * view`, applied to each node's world transform
    /// by the backend.
    pub view_proj: Matrix4<f32>,
    /// World-space eye position for specular shading.
    pub eye: Point3<f32>,
    pub lights: LightSet,
    pub shading: ShadingMode,
}

impl FrameContext {
    pub fn new(view: Matrix4<f32>, projection: Matrix4<f32>, eye: Point3<f32>) -> Self {
        Self {
            view,
            projection,
            view_proj: projection * view,
            eye,
            lights: LightSet::new(),
            shading: ShadingMode::default(),
        }
    }

    /// Builds the context from whatever camera is active this frame.
    pub fn from_camera(camera: &impl Camera, projection: Matrix4<f32>) -> Self {
        Self::new(camera.view_matrix(), projection, camera.eye())
    }

    pub fn with_lights(mut self, lights: LightSet) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }
}
