//! Scene-graph nodes.
//!
//! A [`Node`] is the unit of the scene graph: a local transform, an
//! optional mesh reference, a material, an optional animator and a list of
//! owned children. World transforms are never stored - they are computed on
//! the way down each draw traversal as `parent_world * local`, so they can
//! never go stale.

use cgmath::Matrix4;
use cgmath::SquareMatrix;

use crate::gfx::rendering::{DrawCall, FrameContext, MeshHandle, Renderer};
use crate::gfx::scene::Material;
use crate::simulation::Animator;

/// One entity in the scene tree.
///
/// Children are owned: moving a node into a parent makes the tree
/// structurally acyclic, and a node's lifetime bounds its children's.
/// Animators mutate only this node's local transform - never the tree
/// structure - so the graph built at scene construction is the graph that
/// renders.
pub struct Node {
    /// Diagnostic name; also how controllers address their parts.
    pub name: String,
    /// Transform relative to the parent. Replaced wholesale by animators.
    pub local: Matrix4<f32>,
    /// Geometry reference, if this node draws anything. Many nodes may
    /// share one handle.
    pub mesh: Option<MeshHandle>,
    pub material: Material,
    pub animator: Option<Animator>,
    /// Children in draw order. For overlapping translucent geometry at the
    /// same depth this order is the paint order - when that matters, let a
    /// BSP traversal decide it (see [`crate::gfx::bsp`]).
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an empty node with an identity local transform.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local: Matrix4::identity(),
            mesh: None,
            material: Material::default(),
            animator: None,
            children: Vec::new(),
        }
    }

    /// Builder pattern: Set the local transform
    pub fn with_local(mut self, local: Matrix4<f32>) -> Self {
        self.local = local;
        self
    }

    /// Builder pattern: Attach geometry
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder pattern: Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builder pattern: Attach an animator
    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Appends a child, returning `&mut self` for chaining. No cycle check
    /// is possible or needed: the child is moved in, so it cannot appear
    /// anywhere else in the tree.
    pub fn add(&mut self, child: Node) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Advances this node's animator, then the children's, depth-first in
    /// list order. Animators see only their own node: they cannot reach
    /// siblings or reorder children.
    pub fn update(&mut self, dt: f32) {
        if let Some(animator) = self.animator.as_mut() {
            self.local = animator.advance(dt);
        }
        for child in &mut self.children {
            child.update(dt);
        }
    }

    /// Draw traversal: computes `world = parent_world * local`, submits one
    /// draw call if this node has geometry, then recurses with `world` as
    /// the children's parent transform.
    ///
    /// The node layer performs no renderer state changes of its own; it
    /// only supplies the per-draw values and assumes the backend is already
    /// configured.
    pub fn draw<R: Renderer>(
        &self,
        renderer: &mut R,
        parent_world: Matrix4<f32>,
        frame: &FrameContext,
    ) {
        let world = parent_world * self.local;

        if let Some(mesh) = self.mesh {
            renderer.submit(DrawCall {
                world,
                view_proj: frame.view_proj,
                material: self.material,
                mesh,
            });
        }

        for child in &self.children {
            child.draw(renderer, world, frame);
        }
    }

    /// Finds the first node with the given name, depth-first, including
    /// this node itself.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable variant of [`Node::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Total number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}
