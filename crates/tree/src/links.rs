use crate::Tree;

/// Position of one node in the pre-order linearization of a tree.
///
/// Every index refers to the same pre-order sequence, so a consumer can
/// walk the hierarchy without recursion (first child, then next sibling,
/// climbing through `parent` when a subtree is exhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub index: usize,
    pub parent: Option<usize>,
    pub first_child: Option<usize>,
    pub next_sibling: Option<usize>,
}

impl<T> Tree<T> {
    /// First-child / next-sibling links for every node, in pre-order.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::with_capacity(self.len());
        push_links(self, None, &mut out);
        out
    }
}

/// Appends the links of `tree` and returns the index assigned to its root.
fn push_links<T>(tree: &Tree<T>, parent: Option<usize>, out: &mut Vec<Link>) -> usize {
    let index = out.len();
    out.push(Link {
        index,
        parent,
        first_child: None,
        next_sibling: None,
    });

    let mut previous: Option<usize> = None;
    for child in tree.children() {
        let child_index = push_links(child, Some(index), out);
        match previous {
            None => out[index].first_child = Some(child_index),
            Some(prev) => out[prev].next_sibling = Some(child_index),
        }
        previous = Some(child_index);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(
        index: usize,
        parent: Option<usize>,
        first_child: Option<usize>,
        next_sibling: Option<usize>,
    ) -> Link {
        Link {
            index,
            parent,
            first_child,
            next_sibling,
        }
    }

    #[test]
    fn single_leaf() {
        assert_eq!(Tree::leaf('a').links(), vec![link(0, None, None, None)]);
    }

    #[test]
    fn nested_tree_links() {
        // a -> [b -> [c, d], e]
        let t = Tree::node(
            'a',
            vec![
                Tree::node('b', vec![Tree::leaf('c'), Tree::leaf('d')]),
                Tree::leaf('e'),
            ],
        );
        assert_eq!(
            t.links(),
            vec![
                link(0, None, Some(1), None),
                link(1, Some(0), Some(2), Some(4)),
                link(2, Some(1), None, Some(3)),
                link(3, Some(1), None, None),
                link(4, Some(0), None, None),
            ]
        );
    }

    #[test]
    fn stackless_walk_visits_pre_order() {
        let t = Tree::node(
            0,
            vec![
                Tree::node(1, vec![Tree::leaf(2), Tree::node(3, vec![Tree::leaf(4)])]),
                Tree::leaf(5),
                Tree::node(6, vec![Tree::leaf(7)]),
            ],
        );
        let links = t.links();
        let values: Vec<i32> = t.iter().copied().collect();

        let mut visited = Vec::new();
        let mut cursor = Some(0);
        while let Some(i) = cursor {
            visited.push(values[i]);
            cursor = links[i].first_child.or_else(|| {
                let mut up = Some(i);
                while let Some(u) = up {
                    if let Some(next) = links[u].next_sibling {
                        return Some(next);
                    }
                    up = links[u].parent;
                }
                None
            });
        }
        assert_eq!(visited, values);
    }
}
