//! Persistent rose tree.
//!
//! # Invariants
//! - Trees are never mutated in place; every combinator builds a new tree.
//! - Children order is preserved by every combinator and drives pre-order
//!   traversal, linearization indices, and `reduce` ordering.
//! - Each subtree is owned by exactly one parent; no sharing, no cycles.

mod links;
mod tree;

pub use links::Link;
pub use tree::{PreOrder, Tree};

pub fn crate_info() -> &'static str {
    "cubescene-tree v0.1.0"
}
