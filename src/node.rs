///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// This file implements Node objects which represent logical nodes in an unbalanced binary search
/// tree, plus the in-order iterator used by every traversal in the crate. Nodes are never shared:
/// each parent exclusively owns its boxed children.
///----------------------------------------------------------------------------------------------------
use std::fmt;
use std::iter::FusedIterator;

/// An owned, possibly empty subtree.
pub type Link = Option<Box<Node>>;

/// The internal structure of a node is as follows:
///     - `value` is the key stored at this node
///     - `left` holds only values strictly less than `value`
///     - `right` holds values greater than or equal to `value` (ties are routed right)
pub struct Node {
    value: i64,
    left: Link,
    right: Link,
}

impl Node {
    pub(crate) fn boxed(value: i64) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    /// The child slot a new `value` descends into.
    pub(crate) fn slot_for(&mut self, value: i64) -> &mut Link {
        if value < self.value {
            &mut self.left
        } else {
            &mut self.right
        }
    }

    /// Detach both children, leaving this node a leaf.
    pub(crate) fn take_children(&mut self) -> (Link, Link) {
        (self.left.take(), self.right.take())
    }

    /// Write the bracketed form `[left value right]`, omitting empty sides. Recursive, so only
    /// meant for trees of modest height.
    pub(crate) fn fmt_bracketed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        if let Some(left) = self.left() {
            left.fmt_bracketed(f)?;
            f.write_str(" ")?;
        }
        write!(f, "{}", self.value)?;
        if let Some(right) = self.right() {
            f.write_str(" ")?;
            right.fmt_bracketed(f)?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("value", &self.value).finish()
    }
}

/// In-order iterator over a subtree. Keeps the pending left spine on an explicit stack, so the
/// call stack stays flat no matter how tall the tree is.
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.value)
    }
}

impl FusedIterator for InOrder<'_> {}
