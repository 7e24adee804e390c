use std::error::Error;
use std::fmt;

/// An error returned by [`Tree::try_copy_to`](struct.Tree.html#method.try_copy_to).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyError {
    /// The offset lies past the end of the destination.
    OffsetOutOfBounds {
        /// The requested offset.
        offset: usize,
        /// The length of the destination.
        len: usize,
    },
    /// The destination has too little room after the offset.
    InsufficientSpace {
        /// The number of items to copy.
        needed: usize,
        /// The room left in the destination after the offset.
        available: usize,
    },
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CopyError::OffsetOutOfBounds { offset, len } =>
                write!(f, "offset {} is out of bounds for a destination of length {}", offset, len),
            CopyError::InsufficientSpace { needed, available } =>
                write!(f, "destination has room for {} items after the offset, {} needed",
                       available, needed),
        }
    }
}

impl Error for CopyError {}
