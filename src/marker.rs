//! Time-point markers kept in sorted order.

use log::{debug, trace};
use std::cmp::Ordering;
use super::distance::Distance;
use super::tree::{self, Tree};

/// A marker at a point in time, in milliseconds.
///
/// Markers are totally ordered by time, including infinities and NaNs (see `f64::total_cmp`).
/// Two markers are equal only if their times are identical.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    time: f64,
}

impl Marker {
    /// Creates a marker at the given time.
    pub fn new(time: f64) -> Marker { Marker { time: time } }

    /// Returns the marker's time.
    pub fn time(&self) -> f64 { self.time }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Marker) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Marker {}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Marker) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Marker {
    fn cmp(&self, other: &Marker) -> Ordering { self.time.total_cmp(&other.time) }
}

impl Distance for Marker {
    type Output = f64;
    fn distance(&self, other: &Marker) -> f64 { self.time.distance(&other.time) }
}

/// A set of markers supporting "nearest marker within a threshold" queries.
///
/// The set only stores markers; grouping edits into transactions and announcing them is left to
/// the caller.
///
/// # Examples
///
/// ```
/// use balanced_tree::MarkerSet;
///
/// let mut markers = MarkerSet::from_times(vec![1000.0, 2500.0, 4000.0]);
///
/// assert!(markers.has_near(2450.0, 100.0));
/// assert!(!markers.has_near(3200.0, 100.0));
///
/// let removed = markers.remove_nearest(3900.0, 250.0);
/// assert_eq!(removed.map(|m| m.time()), Some(4000.0));
/// assert_eq!(markers.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Tree<Marker>,
}

impl MarkerSet {
    /// Creates an empty marker set.
    pub fn new() -> MarkerSet { MarkerSet { markers: Tree::new() } }

    /// Creates a marker set holding a marker at each of the given times.
    ///
    /// Repeated times yield a single marker.
    pub fn from_times<I>(times: I) -> MarkerSet where I: IntoIterator<Item=f64> {
        let mut set = MarkerSet::new();
        for time in times { set.add(time); }
        set
    }

    /// Returns the number of markers in the set.
    pub fn len(&self) -> usize { self.markers.len() }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.markers.is_empty() }

    /// Adds a marker at the given time, returning `true` if there was none there already.
    pub fn add(&mut self, time: f64) -> bool {
        let added = self.markers.insert(Marker::new(time));
        if added {
            trace!("added marker at {}ms", time);
        } else {
            debug!("a marker at {}ms already exists", time);
        }
        added
    }

    /// Removes the marker at exactly the given time, returning `true` if there was one.
    pub fn remove(&mut self, time: f64) -> bool {
        let removed = self.markers.remove(&Marker::new(time));
        if removed {
            trace!("removed marker at {}ms", time);
        } else {
            debug!("no marker at {}ms to remove", time);
        }
        removed
    }

    /// Returns the marker nearest to the given time, or `None` if the set is empty.
    pub fn nearest(&self, time: f64) -> Option<Marker> {
        self.markers.find_nearest(&Marker::new(time)).cloned()
    }

    /// Returns the marker nearest to the given time if it lies no more than `threshold`
    /// milliseconds away.
    ///
    /// # Examples
    ///
    /// ```
    /// let markers = balanced_tree::MarkerSet::from_times(vec![100.0, 200.0]);
    ///
    /// assert_eq!(markers.nearest_within(180.0, 50.0).map(|m| m.time()), Some(200.0));
    /// assert_eq!(markers.nearest_within(150.0, 20.0), None);
    /// ```
    pub fn nearest_within(&self, time: f64, threshold: f64) -> Option<Marker> {
        self.nearest(time).filter(|marker| marker.time.distance(&time) <= threshold)
    }

    /// Checks if a marker lies no more than `threshold` milliseconds from the given time.
    pub fn has_near(&self, time: f64, threshold: f64) -> bool {
        self.nearest_within(time, threshold).is_some()
    }

    /// Removes and returns the marker nearest to the given time if it lies no more than
    /// `threshold` milliseconds away.
    pub fn remove_nearest(&mut self, time: f64, threshold: f64) -> Option<Marker> {
        let marker = self.nearest_within(time, threshold)?;
        self.markers.take(&marker)
    }

    /// Returns an iterator over the markers in ascending order of time.
    pub fn iter(&self) -> tree::Iter<'_, Marker> { self.markers.iter() }
}

impl Extend<f64> for MarkerSet {
    fn extend<I: IntoIterator<Item=f64>>(&mut self, it: I) {
        for time in it { self.add(time); }
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a Marker;
    type IntoIter = tree::Iter<'a, Marker>;
    fn into_iter(self) -> tree::Iter<'a, Marker> { self.iter() }
}
