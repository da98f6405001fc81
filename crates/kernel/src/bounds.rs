use cubescene_tree::Tree;
use serde::{Deserialize, Serialize};

use crate::Model;

/// How an internal node's box relates to its own mesh.
///
/// A renderable node's drawn mesh is always inside its box. The policy only
/// decides what happens to the placeholder mesh an anchor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Anchors with children take the union of the children's boxes only.
    #[default]
    ChildUnion,
    /// Anchors also widen their box by their own placeholder mesh.
    IncludeOwnGeometry,
}

/// Post-order box aggregation. Run after world propagation.
///
/// A leaf (or a node without children) gets its mesh extents under its
/// world matrix. An internal node gets the union of its children's boxes,
/// widened by its own mesh box when it is renderable or `policy` asks for it.
pub fn with_bounds(tree: Tree<Model>, policy: BoundsPolicy) -> Tree<Model> {
    match tree {
        Tree::Leaf(mut model) => {
            model.aabb = Some(model.world_bounds());
            Tree::Leaf(model)
        }
        Tree::Node(mut model, children) => {
            let children: Vec<_> = children
                .into_iter()
                .map(|child| with_bounds(child, policy))
                .collect();
            let union = children
                .iter()
                .filter_map(|child| child.value().aabb)
                .reduce(|acc, b| acc.union(&b));
            model.aabb = Some(match union {
                None => model.world_bounds(),
                Some(u) if model.renderable || policy == BoundsPolicy::IncludeOwnGeometry => {
                    u.union(&model.world_bounds())
                }
                Some(u) => u,
            });
            Tree::Node(model, children)
        }
    }
}

/// Post-order: each node's `cube_count` becomes its own unit plus the
/// counts of its children.
pub fn with_cube_counts(tree: Tree<Model>) -> Tree<Model> {
    match tree {
        Tree::Leaf(mut model) => {
            model.cube_count = model.own_cube_count();
            Tree::Leaf(model)
        }
        Tree::Node(mut model, children) => {
            let children: Vec<_> = children.into_iter().map(with_cube_counts).collect();
            model.cube_count = model.own_cube_count()
                + children.iter().map(|c| c.value().cube_count).sum::<u32>();
            Tree::Node(model, children)
        }
    }
}

/// Renderable models in the whole tree.
pub fn cube_count(tree: &Tree<Model>) -> u32 {
    tree.reduce(0, |n, model| n + model.own_cube_count())
}
