//! Rebalancing policies.
//!
//! A tree reports every insertion and removal to its policy once per ancestor of the changed
//! node, bottom-up, after that ancestor's descendant count has been updated. The policy may
//! rotate the ancestor in place; it never sees the rest of the tree.

#![forbid(missing_docs)]

/// The side of a node on which a change happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The node's left subtree.
    Left,
    /// The node's right subtree.
    Right,
}

impl Side {
    /// Returns the other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A structural view of a binary search tree node, as seen by a rebalancing policy.
pub trait Node {
    /// Returns the number of nodes strictly below this one.
    fn descendants(&self) -> usize;

    /// Returns a reference to the node's left child, if any.
    fn left(&self) -> Option<&Self>;

    /// Returns a mutable reference to the node's left child, if any.
    fn left_mut(&mut self) -> Option<&mut Self>;

    /// Returns a reference to the node's right child, if any.
    fn right(&self) -> Option<&Self>;

    /// Returns a mutable reference to the node's right child, if any.
    fn right_mut(&mut self) -> Option<&mut Self>;

    /// Rotates the node to the left, if possible, making its right child the subtree's root.
    ///
    /// The in-order sequence and the subtree's total size are unchanged.
    fn rotate_left(&mut self);

    /// Rotates the node to the right, if possible, making its left child the subtree's root.
    ///
    /// The in-order sequence and the subtree's total size are unchanged.
    fn rotate_right(&mut self);
}

/// A rebalancing policy.
pub trait Balance {
    /// Rebalances the given node after an insertion on the given side.
    fn rebalance_insert<N>(node: &mut N, side: Side) where N: Node;

    /// Rebalances the given node after a removal on the given side.
    fn rebalance_remove<N>(node: &mut N, side: Side) where N: Node;
}

/// Returns the number of nodes in the given subtree.
pub fn size<N>(node: Option<&N>) -> usize where N: Node {
    node.map_or(0, |node| node.descendants() + 1)
}

/// A policy that only maintains descendant counts and never changes the tree's shape.
///
/// Inserting items in sorted order degenerates the tree into a list.
#[derive(Clone, Copy, Debug)]
pub enum Unbalanced {}

impl Balance for Unbalanced {
    fn rebalance_insert<N>(_node: &mut N, _side: Side) where N: Node {}

    fn rebalance_remove<N>(_node: &mut N, _side: Side) where N: Node {}
}

/// The weight-balance policy.
///
/// Keeps the size of each node's subtrees within a factor of `DELTA` of each other, using the
/// descendant counts every node already carries.
#[derive(Clone, Copy, Debug)]
pub enum Weight {}

// Parameters from Adams' bounded-balance trees, as used by Haskell's Data.Map. With these, a
// single or double rotation per ancestor restores balance after one insertion or removal.
const DELTA: usize = 3;
const GAMMA: usize = 2;

impl Weight {
    /// Checks whether the given subtree sizes satisfy the weight-balance bound.
    pub fn is_balanced(left: usize, right: usize) -> bool {
        left + right <= 1 || (left <= DELTA * right && right <= DELTA * left)
    }

    fn restore<N>(node: &mut N, heavy: Side) where N: Node {
        let left = size(node.left());
        let right = size(node.right());
        if left + right <= 1 { return; }

        match heavy {
            Side::Left if left > DELTA * right => {
                let (outer, inner) = node.left().map_or((0, 0), |x| (size(x.left()), size(x.right())));
                if inner >= GAMMA * outer {
                    if let Some(x) = node.left_mut() { x.rotate_left(); }
                }
                node.rotate_right();
            }
            Side::Right if right > DELTA * left => {
                let (inner, outer) = node.right().map_or((0, 0), |x| (size(x.left()), size(x.right())));
                if inner >= GAMMA * outer {
                    if let Some(x) = node.right_mut() { x.rotate_right(); }
                }
                node.rotate_left();
            }
            _ => {}
        }
    }
}

impl Balance for Weight {
    fn rebalance_insert<N>(node: &mut N, side: Side) where N: Node {
        Self::restore(node, side);
    }

    fn rebalance_remove<N>(node: &mut N, side: Side) where N: Node {
        Self::restore(node, side.opposite());
    }
}
