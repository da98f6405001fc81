use cubescene_common::{Hit, Ray};
use cubescene_tree::Tree;

use crate::Model;

/// Every model whose subtree box the ray enters, unordered.
///
/// Run after bounds aggregation. A missed box prunes its whole subtree.
/// Leaves report their own hit; internal nodes report their children's hits
/// and, when renderable, one for themselves. Sort with
/// [`Hit::sort_by_distance`] or use [`closest`].
pub fn pick(tree: &Tree<Model>, ray: &Ray) -> Vec<Hit> {
    pick_with(tree, ray, |_| {})
}

/// [`pick`] with a callback invoked for every node whose box gets tested.
pub fn pick_with(tree: &Tree<Model>, ray: &Ray, mut visit: impl FnMut(&Model)) -> Vec<Hit> {
    let _span = tracing::info_span!("pick").entered();
    let mut hits = Vec::new();
    collect(tree, ray, &mut visit, &mut hits);
    tracing::debug!(hits = hits.len(), "pick finished");
    hits
}

/// The nearest hit along the ray, if any.
pub fn closest(tree: &Tree<Model>, ray: &Ray) -> Option<Hit> {
    Hit::closest(pick(tree, ray))
}

fn collect(tree: &Tree<Model>, ray: &Ray, visit: &mut impl FnMut(&Model), hits: &mut Vec<Hit>) {
    let model = tree.value();
    visit(model);

    let Some(aabb) = model.aabb else {
        tracing::debug!(id = %model.id, "no bounds, subtree skipped");
        return;
    };
    let Some(distance) = aabb.intersect_ray(ray) else {
        return;
    };
    tracing::trace!(id = %model.id, distance, "box hit");

    match tree {
        Tree::Leaf(_) => hits.push(Hit::new(model.id.clone(), distance)),
        Tree::Node(_, children) => {
            for child in children {
                collect(child, ray, visit, hits);
            }
            if model.renderable {
                hits.push(Hit::new(model.id.clone(), distance));
            }
        }
    }
}
