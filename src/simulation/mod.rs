//! # Simulation Layer
//!
//! Per-frame update logic that drives the scene graph: small typed
//! animators owned by individual nodes, and controllers that coordinate
//! several named nodes at once (the vehicle, the garage gate).
//!
//! The frame protocol is strict: input is read, every controller and
//! animator runs, and only then does the draw traversal start. Controllers
//! never see the renderer and the renderer never sees controller state, so
//! a frame can never observe a half-updated scene.

pub mod animator;
pub mod garage;
pub mod input;
pub mod vehicle;

pub use animator::Animator;
pub use garage::GarageController;
pub use input::ControlInput;
pub use vehicle::{VehicleConfig, VehicleController};
