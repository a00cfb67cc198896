//! Error types surfaced by this crate's container contract.

use std::fmt::{self, Display, Formatter};

/// Failure reported by checked access into a [`crate::polygon::SimplePolygon`]
/// or a [`crate::batch::view::PolygonView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonError {
    /// `at(index)` was called with an index at or beyond the container's
    /// length.
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// The container's length at the time of the request.
        len: usize,
    },
}

impl Display for PolygonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for PolygonError {}
