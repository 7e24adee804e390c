//! Distances between items, used by nearest-item search.

/// A metric between two values.
///
/// Implementations must agree with the order used by the tree: for `a <= b <= c`,
/// `a.distance(b) <= a.distance(c)`.
///
/// # Examples
///
/// ```
/// use balanced_tree::Distance;
///
/// assert_eq!(3u32.distance(&7), 4);
/// assert_eq!((-3i8).distance(&7), 10u8);
/// assert_eq!(1.5f64.distance(&-0.5), 2.0);
/// ```
pub trait Distance<Rhs: ?Sized = Self> {
    /// The type of a distance.
    type Output: PartialOrd;

    /// Returns the distance between `self` and `other`.
    fn distance(&self, other: &Rhs) -> Self::Output;
}

macro_rules! int_distance {
    ($($t:ty => $u:ty),*) => {$(
        impl Distance for $t {
            type Output = $u;
            fn distance(&self, other: &$t) -> $u { self.abs_diff(*other) }
        }
    )*}
}

int_distance! {
    u8 => u8, u16 => u16, u32 => u32, u64 => u64, u128 => u128, usize => usize,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize
}

macro_rules! float_distance {
    ($($t:ty),*) => {$(
        impl Distance for $t {
            type Output = $t;
            fn distance(&self, other: &$t) -> $t { (self - other).abs() }
        }
    )*}
}

float_distance! { f32, f64 }
