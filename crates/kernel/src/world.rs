use cubescene_tree::Tree;
use glam::Mat4;

use crate::Model;

/// Pre-order world-matrix propagation.
///
/// Each node's world matrix becomes `parent_world * local`, and its children
/// receive that matrix as their parent. Only `trs` is read, so running this
/// twice over the same tree yields identical matrices.
pub fn update_world(tree: Tree<Model>, parent_world: Mat4) -> Tree<Model> {
    match tree {
        Tree::Leaf(model) => Tree::Leaf(place(model, parent_world)),
        Tree::Node(model, children) => {
            let model = place(model, parent_world);
            let world = model.world;
            Tree::Node(
                model,
                children
                    .into_iter()
                    .map(|child| update_world(child, world))
                    .collect(),
            )
        }
    }
}

/// [`update_world`] from the scene root.
pub fn update_world_from_root(tree: Tree<Model>) -> Tree<Model> {
    update_world(tree, Mat4::IDENTITY)
}

fn place(mut model: Model, parent_world: Mat4) -> Model {
    model.world = parent_world * model.trs.local_matrix();
    tracing::trace!(id = %model.id, "world matrix");
    model
}
