use std::iter::FusedIterator;
use super::{Link, Node};

/// An iterator over the tree's items.
///
/// The iterator yields the items in ascending order according to the tree's comparator.
///
/// Acquire through [`Tree::iter`](struct.Tree.html#method.iter) or the `IntoIterator` trait:
///
/// ```
/// let mut tree = balanced_tree::Tree::new();
///
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// for item in &tree {
///     println!("{:?}", item);
/// }
/// ```
pub struct Iter<'a, T: 'a> {
    // Unvisited left spine for the front and right spine for the back.
    front: Vec<&'a Node<T>>,
    back: Vec<&'a Node<T>>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, size: usize) -> Self {
        let mut it = Iter { front: vec![], back: vec![], size: size };
        it.descend_left(root.as_deref());
        it.descend_right(root.as_deref());
        it
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.front.push(n);
            node = n.left.as_deref();
        }
    }

    fn descend_right(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.back.push(n);
            node = n.right.as_deref();
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter { front: self.front.clone(), back: self.back.clone(), size: self.size }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.size == 0 { return None; }
        let node = self.front.pop()?;
        self.descend_left(node.right.as_deref());
        self.size -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.size == 0 { return None; }
        let node = self.back.pop()?;
        self.descend_right(node.left.as_deref());
        self.size -= 1;
        Some(&node.item)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An iterator that consumes the tree.
///
/// The iterator yields the items in ascending order according to the tree's comparator.
///
/// # Examples
///
/// Acquire through the `IntoIterator` trait:
///
/// ```
/// let mut tree = balanced_tree::Tree::new();
///
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
/// ```
pub struct IntoIter<T> {
    // Nodes whose left subtree has already been detached and yielded.
    stack: Vec<Box<Node<T>>>,
    size: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, size: usize) -> Self {
        let mut it = IntoIter { stack: vec![], size: size };
        it.descend_left(root);
        it
    }

    fn descend_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        self.descend_left(node.right.take());
        self.size -= 1;
        Some(node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// Dropping the nodes one at a time keeps deep trees from overflowing the stack.
impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
