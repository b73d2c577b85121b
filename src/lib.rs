// src/lib.rs
//! Bothy
//!
//! A hierarchical scene-graph and forward-lighting core: transform algebra
//! built from first principles on cgmath, animated node trees, a BSP
//! partition renderer for translucent geometry, and a renderer-backend
//! seam that keeps the whole thing drivable without a window.

pub mod assets;
pub mod gfx;
pub mod simulation;
pub mod transform;

// Re-export main types for convenience
pub use gfx::bsp::{BspTree, Wall};
pub use gfx::camera::{Camera, FreeCamera, OrbitCamera};
pub use gfx::lighting::{Light, LightSet, ShadingMode};
pub use gfx::rendering::{DrawList, FrameContext, MeshLibrary, Renderer};
pub use gfx::scene::{Material, Node};
pub use simulation::{Animator, ControlInput, GarageController, VehicleConfig, VehicleController};
