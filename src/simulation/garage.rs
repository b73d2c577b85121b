//! Garage gate controller.

use crate::gfx::scene::Node;

/// Toggleable controller for a sliding garage gate.
///
/// The gate node carries a [`Slide`](crate::simulation::Animator::Slide)
/// animator that does the actual easing; the controller only tracks the
/// open/closed intent and pushes it into the animator each frame. A missing
/// gate node degrades to a no-op.
#[derive(Debug, Clone)]
pub struct GarageController {
    gate: String,
    open: bool,
}

impl GarageController {
    pub fn new(gate_node: &str) -> Self {
        Self {
            gate: gate_node.to_string(),
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Pushes the current open/closed target into the gate's animator.
    pub fn update(&mut self, garage: &mut Node) {
        match garage.find_mut(&self.gate) {
            Some(node) => {
                if let Some(animator) = node.animator.as_mut() {
                    animator.set_open(self.open);
                }
            }
            None => log::debug!("garage gate '{}' not found in subtree, skipping", self.gate),
        }
    }
}
