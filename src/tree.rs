//! An ordered set based on a weight-balanced binary search tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::marker::PhantomData;
use super::balance::{Balance, Weight};
use super::distance::Distance;
use super::error::CopyError;
use super::node::{self, Link, Path};

pub use super::node::{IntoIter, Iter, Structure};

/// An ordered set based on a binary search tree.
///
/// Every node caches the number of nodes below it. The balance policy `B` uses these counts to
/// keep the tree in shape: [`Weight`](enum.Weight.html) (the default) keeps sibling subtrees
/// within a constant factor of each other, while [`Unbalanced`](enum.Unbalanced.html) never
/// rotates, so the tree's shape depends only on insertion order.
///
/// The behavior of this tree is undefined if an item's ordering relative to any other item
/// changes while the item is in the tree. This is normally only possible through `Cell`,
/// `RefCell`, or unsafe code. A comparator that is not a total order has the same effect; the
/// damage can be detected with [`validate_sorted`](#method.validate_sorted).
pub struct Tree<T, C = Natural<T>, B = Weight> where C: Compare<T>, B: Balance {
    root: Link<T>,
    len: usize,
    cmp: C,
    path: Path<T>,
    balance: PhantomData<fn() -> B>,
}

impl<T> Tree<T> where T: Ord {
    /// Creates an empty tree ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { Tree::with_policy(compare::natural()) }
}

impl<T, C> Tree<T, C> where C: Compare<T> {
    /// Creates an empty tree ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut tree = balanced_tree::Tree::with_cmp(natural().rev());
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self { Tree::with_policy(cmp) }
}

impl<T, C, B> Tree<T, C, B> where C: Compare<T>, B: Balance {
    /// Creates an empty tree ordered according to the given comparator and rebalanced by the
    /// policy `B`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::{Tree, Unbalanced};
    /// use compare::natural;
    ///
    /// let mut tree: Tree<_, _, Unbalanced> = Tree::with_policy(natural());
    /// for i in 0..8 { tree.insert(i); }
    ///
    /// // Sorted input degenerates without rebalancing.
    /// assert_eq!(tree.height(), 8);
    /// ```
    pub fn with_policy(cmp: C) -> Self {
        Tree { root: None, len: 0, cmp: cmp, path: Path::new(), balance: PhantomData }
    }

    /// Creates a tree ordered according to the given comparator, inserting the given items one
    /// at a time in sequence order.
    ///
    /// Items that compare equal to an earlier item are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::Tree;
    /// use compare::natural;
    ///
    /// let tree: Tree<_> = Tree::from_items(vec![3, 1, 2, 1], natural());
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn from_items<I>(items: I, cmp: C) -> Self where I: IntoIterator<Item=T> {
        let mut tree = Tree::with_policy(cmp);
        tree.extend(items);
        tree
    }

    /// Checks if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// assert!(tree.is_empty());
    ///
    /// tree.insert(2);
    /// assert!(!tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of items in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// assert_eq!(tree.len(), 0);
    ///
    /// tree.insert(2);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Removes all items from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// tree.clear();
    ///
    /// assert_eq!(tree.len(), 0);
    /// assert_eq!(tree.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        drop(IntoIter::new(self.root.take(), self.len));
        self.len = 0;
    }

    /// Inserts an item into the tree, returning `true` if the tree did not already contain the
    /// item.
    ///
    /// If the tree already contains an equal item, the tree is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// assert!(tree.insert(1));
    /// assert!(tree.contains(&1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, item: T) -> bool {
        let inserted = node::insert::<T, C, B>(&mut self.root, &mut self.path, &self.cmp, item);
        if inserted { self.len += 1; }
        inserted
    }

    /// Removes the given item from the tree, returning `true` if the tree contained the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// assert!(tree.remove(&1));
    /// assert_eq!(tree.len(), 2);
    /// assert!(!tree.contains(&1));
    /// assert!(!tree.remove(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where C: Compare<Q, T> {
        self.take(item).is_some()
    }

    /// Removes the given item from the tree and returns the stored item, or `None` if the tree
    /// did not contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where C: Compare<Q, T> {
        let item = node::remove::<T, C, Q, B>(&mut self.root, &mut self.path, &self.cmp, item);
        if item.is_some() { self.len -= 1; }
        item
    }

    /// Checks if the tree contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// assert!(!tree.contains(&1));
    /// tree.insert(1);
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where C: Compare<Q, T> {
        self.get(item).is_some()
    }

    /// Returns a reference to the stored item equal to the given item, if any.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where C: Compare<Q, T> {
        node::get(&self.root, &self.cmp, item)
    }

    /// Returns a reference to the item nearest to the given item, or `None` if the tree is
    /// empty.
    ///
    /// An equal item is returned if present. Otherwise the item at the smallest
    /// [`Distance`](trait.Distance.html) wins; of two items at the same distance, the one deeper
    /// in the tree is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    /// assert_eq!(tree.find_nearest(&5), None);
    ///
    /// tree.insert(10);
    /// tree.insert(20);
    /// tree.insert(40);
    ///
    /// assert_eq!(tree.find_nearest(&20), Some(&20));
    /// assert_eq!(tree.find_nearest(&28), Some(&20));
    /// assert_eq!(tree.find_nearest(&33), Some(&40));
    /// assert_eq!(tree.find_nearest(&0), Some(&10));
    /// ```
    pub fn find_nearest<Q: ?Sized>(&self, item: &Q) -> Option<&T>
        where C: Compare<Q, T>, Q: Distance<T> {

        self.find_nearest_by(item, |item, other| item.distance(other))
    }

    /// Returns a reference to the item nearest to the given item by the given metric, or `None`
    /// if the tree is empty.
    ///
    /// The metric must agree with the tree's order. Ties go to the item deeper in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    ///
    /// tree.insert("apple");
    /// tree.insert("pear");
    ///
    /// // Compare by first letter only.
    /// let nearest = tree.find_nearest_by(&"banana", |a, b| {
    ///     a.bytes().next().unwrap_or(0).abs_diff(b.bytes().next().unwrap_or(0))
    /// });
    ///
    /// assert_eq!(nearest, Some(&"apple"));
    /// ```
    pub fn find_nearest_by<Q: ?Sized, F, D>(&self, item: &Q, distance: F) -> Option<&T>
        where C: Compare<Q, T>, F: FnMut(&Q, &T) -> D, D: PartialOrd {

        node::nearest(&self.root, &self.cmp, item, distance)
    }

    /// Returns a reference to the tree's minimum item, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> { node::first(&self.root) }

    /// Returns a reference to the tree's maximum item, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    pub fn last(&self) -> Option<&T> { node::last(&self.root) }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize { node::height(&self.root) }

    /// Returns an iterator over the tree.
    ///
    /// The iterator yields the items in ascending order according to the tree's comparator.
    /// Each call starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = balanced_tree::Tree::new();
    ///
    /// for i in [6, 3, 5, 7, 9, 4, 2, 1, 8] { tree.insert(i); }
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3, &4, &5, &6, &7, &8, &9]);
    /// assert_eq!(tree.iter().rev().next(), Some(&9));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(&self.root, self.len) }

    /// Clones the tree's items, in ascending order, into `dest` starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than `dest.len()` or if fewer than `self.len()` slots
    /// follow it. See [`try_copy_to`](#method.try_copy_to) for a non-panicking version.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// let mut buf = [0; 5];
    ///
    /// tree.copy_to(&mut buf, 1);
    /// assert_eq!(buf, [0, 1, 2, 3, 0]);
    /// ```
    pub fn copy_to(&self, dest: &mut [T], offset: usize) where T: Clone {
        if let Err(err) = self.try_copy_to(dest, offset) {
            panic!("cannot copy tree: {}", err);
        }
    }

    /// Clones the tree's items, in ascending order, into `dest` starting at `offset`, or
    /// returns an error without touching `dest` if they do not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::CopyError;
    ///
    /// let tree: balanced_tree::Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// let mut buf = [0; 4];
    ///
    /// assert_eq!(tree.try_copy_to(&mut buf, 2),
    ///            Err(CopyError::InsufficientSpace { needed: 3, available: 2 }));
    /// assert_eq!(tree.try_copy_to(&mut buf, 5),
    ///            Err(CopyError::OffsetOutOfBounds { offset: 5, len: 4 }));
    /// assert_eq!(tree.try_copy_to(&mut buf, 1), Ok(()));
    /// assert_eq!(buf, [0, 1, 2, 3]);
    /// ```
    pub fn try_copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), CopyError>
        where T: Clone {

        if offset > dest.len() {
            return Err(CopyError::OffsetOutOfBounds { offset: offset, len: dest.len() });
        }

        let available = dest.len() - offset;
        if available < self.len {
            return Err(CopyError::InsufficientSpace { needed: self.len, available: available });
        }

        for (slot, item) in dest[offset..].iter_mut().zip(self.iter()) {
            slot.clone_from(item);
        }

        Ok(())
    }

    /// Checks that every node's cached descendant count is accurate and that the root accounts
    /// for all `len()` items.
    ///
    /// This is a diagnostic for tests and assertions; it visits every node.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = (0..100).collect();
    /// assert!(tree.validate());
    /// ```
    pub fn validate(&self) -> bool { node::validate(&self.root, self.len) }

    /// Checks that the items are in strictly ascending order according to the tree's
    /// comparator.
    ///
    /// This is a diagnostic for tests and assertions; it visits every node.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = (0..100).rev().collect();
    /// assert!(tree.validate_sorted());
    /// ```
    pub fn validate_sorted(&self) -> bool { node::validate_sorted(&self.root, &self.cmp) }

    /// Checks that the sizes of every node's two subtrees are within the weight-balance bound.
    ///
    /// Always holds for trees using the [`Weight`](enum.Weight.html) policy.
    pub fn is_balanced(&self) -> bool { node::is_balanced(&self.root) }

    /// Returns an adaptor that displays the tree's nodes with their cached descendant counts.
    ///
    /// # Examples
    ///
    /// ```
    /// let tree: balanced_tree::Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.structure().to_string(), "([2] 2 left=([0] 1) right=([0] 3))");
    /// ```
    pub fn structure(&self) -> Structure<'_, T> { Structure::new(&self.root) }
}

impl<T, C, B> Clone for Tree<T, C, B> where T: Clone, C: Compare<T> + Clone, B: Balance {
    fn clone(&self) -> Self {
        Tree {
            root: node::clone_link(&self.root),
            len: self.len,
            cmp: self.cmp.clone(),
            path: Path::new(),
            balance: PhantomData,
        }
    }
}

impl<T, C, B> Drop for Tree<T, C, B> where C: Compare<T>, B: Balance {
    fn drop(&mut self) { self.clear(); }
}

impl<T, C, B> Debug for Tree<T, C, B> where T: Debug, C: Compare<T>, B: Balance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C, B> Default for Tree<T, C, B> where C: Compare<T> + Default, B: Balance {
    fn default() -> Self { Tree::with_policy(C::default()) }
}

impl<T, C, B> Extend<T> for Tree<T, C, B> where C: Compare<T>, B: Balance {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T, C, B> iter::FromIterator<T> for Tree<T, C, B> where C: Compare<T> + Default, B: Balance {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        Tree::from_items(it, C::default())
    }
}

impl<T, C, B> Hash for Tree<T, C, B> where T: Hash, C: Compare<T>, B: Balance {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        self.len.hash(h);
        for item in self.iter() { item.hash(h); }
    }
}

impl<T, C, B> PartialEq for Tree<T, C, B> where T: PartialEq, C: Compare<T>, B: Balance {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C, B> Eq for Tree<T, C, B> where T: Eq, C: Compare<T>, B: Balance {}

impl<'a, T, C, B> IntoIterator for &'a Tree<T, C, B> where C: Compare<T>, B: Balance {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, C, B> IntoIterator for Tree<T, C, B> where C: Compare<T>, B: Balance {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Returns an iterator that consumes the tree.
    ///
    /// The iterator yields the items in ascending order according to the tree's comparator.
    fn into_iter(mut self) -> IntoIter<T> {
        let len = self.len;
        self.len = 0;
        IntoIter::new(self.root.take(), len)
    }
}
