///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// This file implements the Tree handle: construction from a random permutation of scaled values,
/// read-only inspection, and teardown. There is no API for mutating a tree once it is built.
///----------------------------------------------------------------------------------------------------
use rand::seq::SliceRandom as _;
use rand::Rng;
use std::fmt;
use tracing::debug;

use crate::node::{InOrder, Link, Node};

/// An unbalanced binary search tree of `i64` values. Either empty or owning a root node.
#[derive(Default)]
pub struct Tree {
    root: Link,
    len: usize,
}

impl Tree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree holding `scale, 2 * scale, ..., seed_count * scale`, inserted in a uniformly
    /// random order. Non-positive inputs give the empty tree.
    pub fn build(seed_count: i64, scale: i64) -> Self {
        Self::build_with_rng(seed_count, scale, &mut rand::thread_rng())
    }

    /// Same as `build`, drawing the insertion order from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(seed_count: i64, scale: i64, rng: &mut R) -> Self {
        if seed_count <= 0 || scale <= 0 {
            return Self::empty();
        }
        let mut order: Vec<i64> = (0..seed_count).collect();
        order.shuffle(rng);
        let tree = Self::from_values(order.into_iter().map(|i| (i + 1).saturating_mul(scale)));
        debug!(seed_count, scale, "built tree");
        tree
    }

    /// Insert `values` in the given order. The resulting shape is fully determined by that order.
    pub fn from_values<I: IntoIterator<Item = i64>>(values: I) -> Self {
        let mut tree = Self::empty();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    /// Walk down to the first empty slot and hang a new leaf there. Iterative, so sorted input
    /// (a tree shaped like a list) cannot exhaust the call stack.
    fn insert(&mut self, value: i64) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = node.slot_for(value);
        }
        *slot = Some(Node::boxed(value));
        self.len += 1;
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for the empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left().map(|n| (n, depth + 1)));
            pending.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Values in ascending order.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root())
    }
}

// Tear down with an explicit worklist; the default recursive drop would overflow on tall trees.
impl Drop for Tree {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            let (left, right) = node.take_children();
            pending.extend(left);
            pending.extend(right);
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = i64;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bracketed form, e.g. `[[1] 2 [3]]`. The empty tree renders as nothing.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.fmt_bracketed(f),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every node's left subtree is strictly smaller and its right subtree is at least as large.
    fn is_bst(tree: &Tree) -> bool {
        let mut pending = tree
            .root()
            .map(|n| (n, i64::MIN, i64::MAX))
            .into_iter()
            .collect::<Vec<_>>();
        // Bounds are [lo, hi): lo inclusive, hi exclusive, with i64::MAX meaning unbounded.
        while let Some((node, lo, hi)) = pending.pop() {
            let v = node.value();
            if v < lo || (hi != i64::MAX && v >= hi) {
                return false;
            }
            pending.extend(node.left().map(|n| (n, lo, v)));
            pending.extend(node.right().map(|n| (n, v, hi)));
        }
        true
    }

    #[test]
    fn test_degenerate_inputs_give_empty_tree() {
        for (n, k) in [(0, 1), (1, 0), (-3, 2), (2, -3), (0, 0)] {
            let tree = Tree::build(n, k);
            assert!(tree.is_empty());
            assert_eq!(tree.len(), 0);
            assert_eq!(tree.height(), 0);
            assert_eq!(tree.iter().next(), None);
            assert_eq!(tree.to_string(), "");
        }
    }

    #[test]
    fn test_build_holds_scaled_values() {
        let tree = Tree::build(10, 3);
        assert_eq!(tree.len(), 10);
        assert_eq!(
            tree.iter().collect::<Vec<_>>(),
            (1..=10).map(|i| i * 3).collect::<Vec<_>>()
        );
        assert!(is_bst(&tree));
    }

    #[test]
    fn test_insertion_order_decides_shape() {
        let balanced = Tree::from_values([2, 1, 3]);
        let chain = Tree::from_values([1, 2, 3]);
        assert_eq!(balanced.to_string(), "[[1] 2 [3]]");
        assert_eq!(chain.to_string(), "[1 [2 [3]]]");
        assert_eq!(balanced.height(), 2);
        assert_eq!(chain.height(), 3);
        assert!(balanced.iter().eq(chain.iter()));
    }

    #[test]
    fn test_ties_route_right() {
        let tree = Tree::from_values([2, 2, 1]);
        let root = tree.root().unwrap();
        assert_eq!(root.right().map(|n| n.value()), Some(2));
        assert_eq!(root.left().map(|n| n.value()), Some(1));
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 2]);
        assert!(is_bst(&tree));
    }

    #[test]
    fn test_seeded_builds_differ_in_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Tree::build_with_rng(64, 1, &mut rng);
        let b = Tree::build_with_rng(64, 1, &mut rng);
        assert!(a.iter().eq(b.iter()));
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_sorted_insertion_does_not_overflow_stack() {
        let tree = Tree::from_values(1..=25_000);
        assert_eq!(tree.height(), 25_000);
        assert_eq!(tree.iter().count(), 25_000);
        drop(tree);
    }

    quickcheck::quickcheck! {
        fn build_is_scaled_permutation(n: u8, k: u8) -> bool {
            let (n, k) = (i64::from(n), i64::from(k));
            let tree = Tree::build(n, k);
            let values: Vec<i64> = tree.iter().collect();
            if n == 0 || k == 0 {
                return values.is_empty();
            }
            is_bst(&tree)
                && tree.len() == n as usize
                && values == (1..=n).map(|i| i * k).collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn from_values_iterates_sorted(xs: Vec<i64>) -> bool {
            let tree = Tree::from_values(xs.iter().copied());
            let mut sorted = xs;
            sorted.sort_unstable();
            is_bst(&tree) && tree.iter().collect::<Vec<_>>() == sorted
        }
    }
}
