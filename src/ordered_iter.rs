use ::ordered_iter::OrderedSetIterator;
use super::tree::{IntoIter, Iter};

impl<T> OrderedSetIterator for IntoIter<T> where T: Ord {}

impl<'a, T> OrderedSetIterator for Iter<'a, T> where T: Ord {}
