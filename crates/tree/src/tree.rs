/// A rose tree: either a leaf, or a node with an ordered list of children.
///
/// A `Node` with no children is still a node; combinators preserve the
/// variant of every position they visit.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree<T> {
    Leaf(T),
    Node(T, Vec<Tree<T>>),
}

impl<T> Tree<T> {
    pub fn leaf(value: T) -> Self {
        Self::Leaf(value)
    }

    pub fn node(value: T, children: Vec<Tree<T>>) -> Self {
        Self::Node(value, children)
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Leaf(value) | Self::Node(value, _) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Leaf(value) | Self::Node(value, _) => value,
        }
    }

    /// Children in order. Empty for a leaf.
    pub fn children(&self) -> &[Tree<T>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Node(_, children) => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Total number of values in the tree.
    pub fn len(&self) -> usize {
        self.reduce(0, |n, _| n + 1)
    }

    /// Always false: a tree holds at least its root value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of levels; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Tree::depth).max().unwrap_or(0)
    }

    /// Values in pre-order: parent before children, children left to right.
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder { stack: vec![self] }
    }

    /// First value in pre-order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.iter().find(|value| predicate(value))
    }

    /// Apply `f` to every value, preserving shape.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Tree<U> {
        self.map_with(&mut f)
    }

    fn map_with<U>(&self, f: &mut impl FnMut(&T) -> U) -> Tree<U> {
        match self {
            Self::Leaf(value) => Tree::Leaf(f(value)),
            Self::Node(value, children) => {
                let value = f(value);
                Tree::Node(value, children.iter().map(|c| c.map_with(f)).collect())
            }
        }
    }

    /// Consuming variant of [`Tree::map`], for pipelines that own the tree.
    pub fn into_map<U>(self, mut f: impl FnMut(T) -> U) -> Tree<U> {
        self.into_map_with(&mut f)
    }

    fn into_map_with<U>(self, f: &mut impl FnMut(T) -> U) -> Tree<U> {
        match self {
            Self::Leaf(value) => Tree::Leaf(f(value)),
            Self::Node(value, children) => {
                let value = f(value);
                Tree::Node(
                    value,
                    children.into_iter().map(|c| c.into_map_with(f)).collect(),
                )
            }
        }
    }

    /// Pre-order fold. The current value is combined before its children,
    /// and children are folded left to right. Callers that build flat
    /// arrays rely on this ordering for offset bookkeeping.
    pub fn reduce<R>(&self, initial: R, mut combine: impl FnMut(R, &T) -> R) -> R {
        self.reduce_with(initial, &mut combine)
    }

    fn reduce_with<R>(&self, initial: R, combine: &mut impl FnMut(R, &T) -> R) -> R {
        let acc = combine(initial, self.value());
        self.children()
            .iter()
            .fold(acc, |acc, child| child.reduce_with(acc, combine))
    }

    /// Replace every value with a subtree produced by `f`, splicing the
    /// original descendants back in.
    ///
    /// For a leaf, the produced subtree is used as-is. For a node, the
    /// produced root hosts the mapped original children; if `f` produced a
    /// node, its own children come first and the original children follow.
    pub fn flat_map<U>(&self, mut f: impl FnMut(&T) -> Tree<U>) -> Tree<U> {
        self.flat_map_with(&mut f)
    }

    fn flat_map_with<U>(&self, f: &mut impl FnMut(&T) -> Tree<U>) -> Tree<U> {
        let replaced = f(self.value());
        let Self::Node(_, children) = self else {
            return replaced;
        };
        let kids = children.iter().map(|c| c.flat_map_with(f));
        match replaced {
            Tree::Leaf(value) => Tree::Node(value, kids.collect()),
            Tree::Node(value, mut own) => {
                own.extend(kids);
                Tree::Node(value, own)
            }
        }
    }

    /// Prune every subtree whose root fails `predicate`.
    ///
    /// Returns `None` when the root itself is pruned; callers treat that as
    /// "nothing to draw this frame".
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Tree<T>>
    where
        T: Clone,
    {
        self.filter_with(&mut predicate)
    }

    fn filter_with(&self, predicate: &mut impl FnMut(&T) -> bool) -> Option<Tree<T>>
    where
        T: Clone,
    {
        if !predicate(self.value()) {
            return None;
        }
        Some(match self {
            Self::Leaf(value) => Tree::Leaf(value.clone()),
            Self::Node(value, children) => Tree::Node(
                value.clone(),
                children
                    .iter()
                    .filter_map(|c| c.filter_with(predicate))
                    .collect(),
            ),
        })
    }
}

/// Pre-order iterator over tree values.
#[derive(Debug)]
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Tree<T>>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().iter().rev());
        Some(tree.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 -> [2 -> [3, 4], 5]
    fn sample() -> Tree<i32> {
        Tree::node(
            1,
            vec![
                Tree::node(2, vec![Tree::leaf(3), Tree::leaf(4)]),
                Tree::leaf(5),
            ],
        )
    }

    #[test]
    fn map_preserves_shape() {
        let mapped = sample().map(|v| v * 10);
        assert_eq!(
            mapped,
            Tree::node(
                10,
                vec![
                    Tree::node(20, vec![Tree::leaf(30), Tree::leaf(40)]),
                    Tree::leaf(50),
                ],
            )
        );
    }

    #[test]
    fn into_map_matches_map() {
        let t = sample();
        assert_eq!(t.map(|v| v.to_string()), t.clone().into_map(|v| v.to_string()));
    }

    #[test]
    fn reduce_is_pre_order() {
        let order = sample().reduce(Vec::new(), |mut acc, v| {
            acc.push(*v);
            acc
        });
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn iter_matches_reduce_order() {
        let t = sample();
        let from_iter: Vec<i32> = t.iter().copied().collect();
        let from_reduce = t.reduce(Vec::new(), |mut acc, v| {
            acc.push(*v);
            acc
        });
        assert_eq!(from_iter, from_reduce);
    }

    #[test]
    fn sum_is_order_independent() {
        let t = sample();
        let reversed = Tree::node(
            1,
            vec![
                Tree::leaf(5),
                Tree::node(2, vec![Tree::leaf(4), Tree::leaf(3)]),
            ],
        );
        assert_eq!(t.reduce(0, |a, v| a + v), reversed.reduce(0, |a, v| a + v));
    }

    #[test]
    fn len_and_depth() {
        let t = sample();
        assert_eq!(t.len(), 5);
        assert_eq!(t.depth(), 3);
        assert_eq!(Tree::leaf(0).depth(), 1);
        assert_eq!(Tree::<i32>::node(0, vec![]).depth(), 1);
    }

    #[test]
    fn find_returns_first_pre_order_match() {
        let t = sample();
        assert_eq!(t.find(|v| *v > 2), Some(&3));
        assert_eq!(t.find(|v| *v > 9), None);
    }

    #[test]
    fn flat_map_leaf_replacement_hosts_original_children() {
        let t = sample();
        let expanded = t.flat_map(|v| Tree::leaf(*v));
        assert_eq!(expanded, t);
    }

    #[test]
    fn flat_map_node_prepends_own_children() {
        // Every value v expands into v -> [v * 100]
        let t = Tree::node(1, vec![Tree::leaf(2)]);
        let expanded = t.flat_map(|v| Tree::node(*v, vec![Tree::leaf(v * 100)]));
        assert_eq!(
            expanded,
            Tree::node(
                1,
                vec![
                    Tree::leaf(100),
                    Tree::node(2, vec![Tree::leaf(200)]),
                ],
            )
        );
    }

    #[test]
    fn flat_map_on_leaf_uses_replacement_verbatim() {
        let t = Tree::leaf(7);
        let expanded = t.flat_map(|v| Tree::node(*v, vec![Tree::leaf(0)]));
        assert_eq!(expanded, Tree::node(7, vec![Tree::leaf(0)]));
    }

    #[test]
    fn filter_prunes_whole_subtrees() {
        let pruned = sample().filter(|v| *v != 2).unwrap();
        assert_eq!(pruned, Tree::node(1, vec![Tree::leaf(5)]));
    }

    #[test]
    fn filter_keeps_node_variant_when_all_children_pruned() {
        let pruned = sample().filter(|v| *v == 1).unwrap();
        assert_eq!(pruned, Tree::node(1, vec![]));
        assert!(!pruned.is_leaf());
    }

    #[test]
    fn filter_removing_root_yields_none() {
        assert!(sample().filter(|v| *v != 1).is_none());
    }

    #[test]
    fn children_of_leaf_is_empty() {
        assert!(Tree::leaf(1).children().is_empty());
        assert_eq!(sample().children().len(), 2);
    }
}
