//! The result type produced by the self-intersection kernel.

use crate::point::Point;

/// One location where two edges of a polygon hit or cross each other.
///
/// `segment_a`/`segment_b` identify edges by the index of the vertex they
/// start at: edge `k` runs from vertex `k` to vertex `(k + 1) mod n`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelfIntersection {
    pub location: Point,
    pub segment_a: usize,
    pub segment_b: usize,
}

impl SelfIntersection {
    #[inline]
    pub fn new(location: Point, segment_a: usize, segment_b: usize) -> Self {
        Self {
            location,
            segment_a,
            segment_b,
        }
    }
}
