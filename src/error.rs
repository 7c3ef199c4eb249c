use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<T> {
    /// Fatal case, a red node has a red child.
    ConsecutiveReds,
    /// Fatal case, a red link leans right.
    RightLeaningRed,
    /// Fatal case, paths from root to nil differ in black links. The
    /// String component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, elements are not in sort-order.
    SortError(T, T),
    /// Fatal case, tracked length (first) differs from counted nodes.
    LengthMismatch(usize, usize),
    /// Returned by insert_unique() when an equal element is present.
    DuplicateKey,
    /// Returned by erase() when no equal element is present.
    NotFound,
}

impl<T> fmt::Display for Error<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConsecutiveReds => write!(f, "consecutive red links"),
            Error::RightLeaningRed => write!(f, "right leaning red link"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(a, b) => write!(f, "sort error, {:?} after {:?}", a, b),
            Error::LengthMismatch(n, m) => write!(f, "length {} but {} nodes", n, m),
            Error::DuplicateKey => write!(f, "duplicate key"),
            Error::NotFound => write!(f, "key not found"),
        }
    }
}

impl<T> error::Error for Error<T> where T: fmt::Debug {}
