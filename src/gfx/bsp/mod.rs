//! # Binary Space Partitioning
//!
//! Correct draw ordering for translucent walls without relying on a depth
//! buffer. A static set of 2D wall segments is partitioned once into a
//! binary tree ([`BspTree`]); every frame the camera position is classified
//! against the splitting planes to walk the tree far-to-near, yielding a
//! painter's-algorithm order in which farther walls are always emitted
//! before nearer ones.
//!
//! Walls live in the XZ plane and are extruded to fixed-height panels at
//! render time; the partition itself is purely 2D.

pub mod tree;
pub mod wall;

pub use tree::{BspNode, BspTree};
pub use wall::{sample_maze, SplitPlane, Wall};
