//! # Camera System
//!
//! Two camera parametrizations share the [`Camera`] trait: an orbit camera
//! (center, radius, height, azimuth - used by the car demo to follow the
//! vehicle) and a free-fly camera (position, yaw, clamped pitch - used to
//! walk the BSP maze). Exactly one is active for a given frame; the
//! [`FrameContext`](crate::gfx::rendering::FrameContext) captures whichever
//! one produced the view.

pub mod free_camera;
pub mod orbit_camera;

pub use free_camera::FreeCamera;
pub use orbit_camera::OrbitCamera;

use cgmath::{Matrix4, Point3};

/// Anything that can produce a view for a frame.
pub trait Camera {
    /// World-space eye position (the shading model needs it for specular).
    fn eye(&self) -> Point3<f32>;

    /// View matrix for the current parameters.
    fn view_matrix(&self) -> Matrix4<f32>;
}
