mod iter;

#[cfg(test)]
mod test;

use compare::Compare;
use log::debug;
use std::cmp::Ordering::*;
use std::fmt::{self, Display};
use std::mem;
use super::balance::{self, Balance, Side};

pub use self::iter::{IntoIter, Iter};

pub type Link<T> = Option<Box<Node<T>>>;

pub struct Node<T> {
    left: Link<T>,
    right: Link<T>,
    descendants: usize,
    item: T,
}

impl<T> Node<T> {
    fn new(item: T) -> Self {
        Node { left: None, right: None, descendants: 0, item: item }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn recount(&mut self) {
        self.descendants = size(&self.left) + size(&self.right);
    }
}

/// Returns the number of nodes in the subtree at `link`.
pub fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.descendants + 1)
}

// Rotations swap the boxes themselves, so a pointer to the link holding `self` keeps pointing
// at the root of the rotated subtree.
impl<T> balance::Node for Box<Node<T>> {
    fn descendants(&self) -> usize { self.descendants }

    fn left(&self) -> Option<&Self> { self.left.as_ref() }

    fn left_mut(&mut self) -> Option<&mut Self> { self.left.as_mut() }

    fn right(&self) -> Option<&Self> { self.right.as_ref() }

    fn right_mut(&mut self) -> Option<&mut Self> { self.right.as_mut() }

    fn rotate_left(&mut self) {
        if let Some(mut pivot) = self.right.take() {
            mem::swap(&mut self.right, &mut pivot.left);
            self.recount();
            mem::swap(self, &mut pivot);
            self.left = Some(pivot);
            self.recount();
        }
    }

    fn rotate_right(&mut self) {
        if let Some(mut pivot) = self.left.take() {
            mem::swap(&mut self.left, &mut pivot.right);
            self.recount();
            mem::swap(self, &mut pivot);
            self.right = Some(pivot);
            self.recount();
        }
    }
}

struct Step<T> {
    side: Side,
    node: *mut Box<Node<T>>,
}

/// The ancestors visited while descending from the root, outermost first.
///
/// Each step records a node and the side taken out of it; the parent of a step's node is the
/// node of the step before it. The path is empty between operations and only holds pointers
/// into the tree for the duration of a single `&mut` call.
pub struct Path<T> {
    steps: Vec<Step<T>>,
}

impl<T> Path<T> {
    pub fn new() -> Self { Path { steps: vec![] } }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    fn push(&mut self, side: Side, node: *mut Box<Node<T>>) {
        self.steps.push(Step { side: side, node: node });
    }

    /// Repairs every recorded ancestor, innermost first, after one node was added below it.
    ///
    /// # Safety
    ///
    /// Every recorded pointer must still point at a live link of the tree.
    unsafe fn unwind_insert<B>(&mut self) where B: Balance {
        while let Some(step) = self.steps.pop() {
            let node = &mut *step.node;
            node.descendants += 1;
            B::rebalance_insert(node, step.side);
        }
    }

    /// Repairs every recorded ancestor, innermost first, after one node was removed below it.
    ///
    /// # Safety
    ///
    /// Every recorded pointer must still point at a live link of the tree.
    unsafe fn unwind_remove<B>(&mut self) where B: Balance {
        while let Some(step) = self.steps.pop() {
            let node = &mut *step.node;
            node.descendants -= 1;
            B::rebalance_remove(node, step.side);
        }
    }
}

unsafe impl<T> Send for Path<T> where T: Send {}
unsafe impl<T> Sync for Path<T> where T: Sync {}

/// Descends from `root` towards `item`, recording every node passed in `path`.
///
/// Returns the link at which the descent stopped: the matching node's link, or the empty link
/// where `item` belongs.
fn descend<T, C, Q: ?Sized>(root: &mut Link<T>, path: &mut Path<T>, cmp: &C, item: &Q)
    -> *mut Link<T> where C: Compare<Q, T> {

    path.steps.clear();
    let mut link: *mut Link<T> = root;

    // The pointers handed out below all derive from `root`, which the caller borrows mutably
    // for the whole operation.
    loop {
        match unsafe { &mut *link } {
            None => return link,
            Some(node) => {
                let side = match cmp.compare(item, &node.item) {
                    Equal => return link,
                    Less => Side::Left,
                    Greater => Side::Right,
                };

                let node: *mut Box<Node<T>> = node;
                path.push(side, node);
                link = unsafe { (*node).child_mut(side) as *mut _ };
            }
        }
    }
}

pub fn insert<T, C, B>(root: &mut Link<T>, path: &mut Path<T>, cmp: &C, item: T) -> bool
    where C: Compare<T>, B: Balance {

    let link = descend(root, path, cmp, &item);

    unsafe {
        if (*link).is_some() {
            path.steps.clear();
            return false;
        }

        *link = Some(Box::new(Node::new(item)));
        path.unwind_insert::<B>();
    }

    true
}

pub fn remove<T, C, Q: ?Sized, B>(root: &mut Link<T>, path: &mut Path<T>, cmp: &C, item: &Q)
    -> Option<T> where C: Compare<Q, T>, B: Balance {

    let link = descend(root, path, cmp, item);

    unsafe {
        let item = match *link {
            None => {
                path.steps.clear();
                return None;
            }
            Some(ref mut node) if node.left.is_some() && node.right.is_some() => {
                let node: *mut Box<Node<T>> = node;
                let succ = unlink(successor(node, path));
                mem::replace(&mut (*node).item, succ.item)
            }
            Some(_) => unlink(link).item,
        };

        path.unwind_remove::<B>();
        Some(item)
    }
}

/// Finds the link holding the in-order successor of `node`, which must have a right child,
/// recording the detour in `path`.
///
/// The successor has no left child.
unsafe fn successor<T>(node: *mut Box<Node<T>>, path: &mut Path<T>) -> *mut Link<T> {
    path.push(Side::Right, node);
    let mut link: *mut Link<T> = &mut (*node).right;

    while let Some(ref mut next) = *link {
        if next.left.is_none() { break; }
        let next: *mut Box<Node<T>> = next;
        path.push(Side::Left, next);
        link = &mut (*next).left as *mut _;
    }

    link
}

/// Unlinks the node at `link`, which must be occupied and have at most one child, replacing it
/// with that child.
unsafe fn unlink<T>(link: *mut Link<T>) -> Box<Node<T>> {
    let mut node = match (*link).take() {
        Some(node) => node,
        None => unreachable!("unlinking an empty link"),
    };

    debug_assert!(node.left.is_none() || node.right.is_none());
    *link = node.left.take().or_else(|| node.right.take());
    node
}

pub fn get<'a, T, C, Q: ?Sized>(mut link: &'a Link<T>, cmp: &C, item: &Q) -> Option<&'a T>
    where C: Compare<Q, T> {

    while let Some(ref node) = *link {
        link = match cmp.compare(item, &node.item) {
            Equal => return Some(&node.item),
            Less => &node.left,
            Greater => &node.right,
        };
    }

    None
}

/// Finds the item closest to `item` by `distance`.
///
/// Both neighbours of `item` in sorted order lie on its search path, so only the nodes compared
/// during the descent are candidates. Ties go to the deeper node.
pub fn nearest<'a, T, C, Q: ?Sized, F, D>(mut link: &'a Link<T>, cmp: &C, item: &Q, mut distance: F)
    -> Option<&'a T> where C: Compare<Q, T>, F: FnMut(&Q, &T) -> D, D: PartialOrd {

    let mut best: Option<(&'a T, D)> = None;

    while let Some(ref node) = *link {
        let next = match cmp.compare(item, &node.item) {
            Equal => return Some(&node.item),
            Less => &node.left,
            Greater => &node.right,
        };

        // An incomparable distance never displaces a comparable one.
        let d = distance(item, &node.item);
        let closer = match best {
            None => true,
            Some((_, ref b)) => d <= *b || b.partial_cmp(b).is_none(),
        };
        if closer { best = Some((&node.item, d)); }

        link = next;
    }

    best.map(|(item, _)| item)
}

/// Copies the subtree at `link` node by node, without recursion.
pub fn clone_link<T>(link: &Link<T>) -> Link<T> where T: Clone {
    let mut root = None;
    let mut stack: Vec<(&Node<T>, *mut Link<T>)> = vec![];
    if let Some(node) = link.as_deref() { stack.push((node, &mut root as *mut _)); }

    // Each target is an empty link inside `root` or inside a boxed copy, so it stays put while
    // other links are filled.
    while let Some((node, target)) = stack.pop() {
        let copy = Node {
            left: None,
            right: None,
            descendants: node.descendants,
            item: node.item.clone(),
        };
        let copy = unsafe { (*target).insert(Box::new(copy)) };
        if let Some(left) = node.left.as_deref() { stack.push((left, &mut copy.left as *mut _)); }
        if let Some(right) = node.right.as_deref() { stack.push((right, &mut copy.right as *mut _)); }
    }

    root
}

pub fn first<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(ref left) = node.left { node = left; }
    Some(&node.item)
}

pub fn last<T>(link: &Link<T>) -> Option<&T> {
    let mut node = link.as_ref()?;
    while let Some(ref right) = node.right { node = right; }
    Some(&node.item)
}

pub fn height<T>(link: &Link<T>) -> usize {
    let mut stack: Vec<(&Node<T>, usize)> = link.as_deref().map(|node| (node, 1)).into_iter().collect();
    let mut height = 0;

    while let Some((node, depth)) = stack.pop() {
        height = height.max(depth);
        if let Some(left) = node.left.as_deref() { stack.push((left, depth + 1)); }
        if let Some(right) = node.right.as_deref() { stack.push((right, depth + 1)); }
    }

    height
}

/// Checks that every cached descendant count is correct and that the root accounts for `len`
/// nodes.
///
/// A count equal to the sum of its children's subtree sizes at every node is, by induction from
/// the leaves, equal to the true count.
pub fn validate<T>(link: &Link<T>, len: usize) -> bool {
    if size(link) != len {
        debug!("root accounts for {} nodes, tree holds {}", size(link), len);
        return false;
    }

    let mut stack: Vec<&Node<T>> = link.as_deref().into_iter().collect();

    while let Some(node) = stack.pop() {
        let actual = size(&node.left) + size(&node.right);
        if node.descendants != actual {
            debug!("node caches {} descendants, has {}", node.descendants, actual);
            return false;
        }

        stack.extend(node.left.as_deref());
        stack.extend(node.right.as_deref());
    }

    true
}

/// Checks that every item lies strictly between the bounds set by its ancestors.
pub fn validate_sorted<T, C>(link: &Link<T>, cmp: &C) -> bool where C: Compare<T> {
    let mut stack: Vec<(&Node<T>, Option<&T>, Option<&T>)> =
        link.as_deref().map(|node| (node, None, None)).into_iter().collect();

    while let Some((node, min, max)) = stack.pop() {
        if min.map_or(false, |min| !cmp.compares_lt(min, &node.item)) ||
           max.map_or(false, |max| !cmp.compares_gt(max, &node.item)) {
            debug!("item out of order with respect to its ancestors");
            return false;
        }

        if let Some(left) = node.left.as_deref() { stack.push((left, min, Some(&node.item))); }
        if let Some(right) = node.right.as_deref() { stack.push((right, Some(&node.item), max)); }
    }

    true
}

/// Checks the weight-balance bound at every node.
pub fn is_balanced<T>(link: &Link<T>) -> bool {
    let mut stack: Vec<&Node<T>> = link.as_deref().into_iter().collect();

    while let Some(node) = stack.pop() {
        if !balance::Weight::is_balanced(size(&node.left), size(&node.right)) {
            debug!("node with subtrees of {} and {} nodes is out of balance",
                   size(&node.left), size(&node.right));
            return false;
        }

        stack.extend(node.left.as_deref());
        stack.extend(node.right.as_deref());
    }

    true
}

/// Displays a subtree as nested `([descendants] item left=... right=...)` groups.
pub struct Structure<'a, T: 'a>(&'a Link<T>);

impl<'a, T> Structure<'a, T> {
    pub(crate) fn new(link: &'a Link<T>) -> Self { Structure(link) }
}

enum Piece<'a, T: 'a> {
    Node(&'a Node<T>),
    Text(&'static str),
}

impl<'a, T> Display for Structure<'a, T> where T: Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stack = match self.0.as_deref() {
            None => return write!(f, "()"),
            Some(node) => vec![Piece::Node(node)],
        };

        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(node) => {
                    write!(f, "([{}] {}", node.descendants, node.item)?;
                    stack.push(Piece::Text(")"));
                    if let Some(right) = node.right.as_deref() {
                        stack.push(Piece::Node(right));
                        stack.push(Piece::Text(" right="));
                    }
                    if let Some(left) = node.left.as_deref() {
                        stack.push(Piece::Node(left));
                        stack.push(Piece::Text(" left="));
                    }
                }
            }
        }

        Ok(())
    }
}
