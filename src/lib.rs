//! An ordered set based on a weight-balanced binary search tree.
//!
//! [`Tree`](struct.Tree.html) stores unique items in the order given by a comparator and
//! answers membership and nearest-item queries. Every node caches the size of its subtree,
//! which the default [`Weight`](enum.Weight.html) policy uses to keep the tree balanced.
//!
//! [`MarkerSet`](struct.MarkerSet.html) builds on it to keep time-point markers sorted and
//! find the marker closest to a given time.

#![deny(missing_docs)]

pub mod balance;
mod distance;
mod error;
mod marker;
mod node;
pub mod tree;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use balance::{Balance, Unbalanced, Weight};
pub use distance::Distance;
pub use error::CopyError;
pub use marker::{Marker, MarkerSet};
pub use tree::Tree;
