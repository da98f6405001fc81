//! Scene-graph kernel: the per-tick pipeline over a tree of models.
//!
//! Each tick maps animation over the immutable definition tree, propagates
//! world matrices top-down, aggregates bounding boxes bottom-up, and counts
//! renderable cubes. Picking queries the resulting tree.
//!
//! # Invariants
//! - The definition tree is never mutated; every pass returns a new tree.
//! - World matrix of a node = parent world * local TRS matrix, applied once
//!   per ancestor.
//! - After `with_bounds`, every child's box lies inside its parent's box.
//!   A renderable node's box also holds its own drawn mesh.
//! - A missed box prunes its whole subtree during picking.
//! - Simulation state depends on the tick count and inputs only, not on how
//!   elapsed time was split across frames.

mod animate;
mod bounds;
mod config;
mod model;
mod pick;
mod scene;
mod sim;
mod world;

pub use animate::{AnimationParams, AnimationRole, animate};
pub use bounds::{BoundsPolicy, cube_count, with_bounds, with_cube_counts};
pub use config::{ConfigError, SceneConfig, SimConfig};
pub use model::Model;
pub use pick::{closest, pick, pick_with};
pub use scene::{SceneAssets, carrot, cuberman, demo_world, fence_row, terrain};
pub use sim::Simulation;
pub use world::{update_world, update_world_from_root};

pub fn crate_info() -> &'static str {
    "cubescene-kernel v0.1.0"
}
