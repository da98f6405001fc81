//! Shared value types for the cubescene engine.
//!
//! # Invariants
//! - Every type here is a plain immutable value; nothing holds a reference
//!   into a scene tree.
//! - A `Ray` always carries a finite origin and a unit-length direction.

mod bounds;
mod ray;
mod types;

pub use bounds::Aabb;
pub use ray::{Hit, Ray, RayError};
pub use types::{InputSnapshot, ModelId, Trs};

pub fn crate_info() -> &'static str {
    "cubescene-common v0.1.0"
}
