//! # Forward Lighting Model
//!
//! A minimal forward lighting model: up to four point or spot lights
//! accumulated per shaded point, with selectable shading interpolation
//! (flat, Gouraud, Phong, Blinn-Phong).
//!
//! The light list is a fixed set of slots re-submitted wholesale every
//! frame; [`shade`] is the CPU reference for what a fragment/vertex stage
//! computes from those slots.

pub mod light;
pub mod shading;

pub use light::{Light, LightSet, LightUniform, LightsUniform, MAX_LIGHTS, OMNI_CUTOFF_COS};
pub use shading::{shade, ShadingMode};
