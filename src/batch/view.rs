//! A cursor into one member of a [`PolygonBatch`] that presents the full
//! flat-polygon interface while sharing the batch's storage.

use super::PolygonBatch;
use crate::error::PolygonError;
use crate::point::Point;
use crate::polygon::{PointSequence, SimplePolygon};
use crate::properties::PropertiesCache;

/// A mutable cursor over one polygon living inside a [`PolygonBatch`].
///
/// A view does not own any vertices; it borrows the batch exclusively for
/// its lifetime. Growing this member past its reserved capacity may
/// relocate its vertices inside the batch's shared buffer (see the bump
/// rule on [`PolygonBatch::grow_member`]); other members are never moved
/// by such a relocation.
pub struct PolygonView<'a> {
    batch: &'a mut PolygonBatch,
    member: usize,
}

impl<'a> PolygonView<'a> {
    pub(super) fn new(batch: &'a mut PolygonBatch, member: usize) -> Self {
        Self { batch, member }
    }

    #[inline]
    fn entry(&self) -> super::IndexEntry {
        self.batch.index_entry(self.member)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entry().length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entry().capacity
    }

    #[inline]
    pub fn get(&self, index: usize) -> Point {
        let entry = self.entry();
        self.batch.raw_vertices()[entry.start + index]
    }

    pub fn at(&self, index: usize) -> Result<Point, PolygonError> {
        let len = self.len();
        if index >= len {
            Err(PolygonError::OutOfRange { index, len })
        } else {
            Ok(self.get(index))
        }
    }

    #[inline]
    pub fn front(&self) -> Point {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Point {
        self.get(self.len() - 1)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        let entry = self.entry();
        &self.batch.raw_vertices()[entry.start..entry.start + entry.length]
    }

    #[inline]
    pub fn data(&self) -> *const Point {
        self.as_slice().as_ptr()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn properties(&self) -> PropertiesCache {
        self.batch.properties(self.member)
    }

    fn reset_properties(&mut self) {
        self.batch.properties_mut(self.member).reset();
    }

    /// Ensures this member's capacity is at least `needed_length`, applying
    /// the bump rule if it currently falls short.
    fn ensure_capacity(&mut self, needed_length: usize) {
        if self.entry().capacity < needed_length {
            self.batch.grow_member(self.member, needed_length);
        }
    }

    /// Overwrites the vertex at `index`, which must already be within
    /// this member's length. Does not reset the properties cache, so this
    /// is only safe for writes proven to preserve convexity, orientation,
    /// and self-intersection state — a uniform per-vertex translation is
    /// the only such case in this crate. Not exposed outside the crate for
    /// that reason; `kernels::translate` is its only caller.
    pub(crate) fn set(&mut self, index: usize, point: Point) {
        let entry = self.entry();
        self.batch.raw_vertices_mut()[entry.start + index] = point;
    }

    pub fn push_back(&mut self, point: Point) {
        let new_length = self.entry().length + 1;
        self.ensure_capacity(new_length);
        let entry = self.entry();
        self.batch.raw_vertices_mut()[entry.start + entry.length] = point;
        self.set_length(new_length);
        self.reset_properties();
    }

    pub fn pop_back(&mut self) -> Option<Point> {
        let entry = self.entry();
        if entry.length == 0 {
            return None;
        }
        let value = self.get(entry.length - 1);
        self.set_length(entry.length - 1);
        self.reset_properties();
        Some(value)
    }

    pub fn insert(&mut self, at: usize, point: Point) {
        let new_length = self.entry().length + 1;
        self.ensure_capacity(new_length);
        let entry = self.entry();
        let start = entry.start;
        self.batch
            .raw_vertices_mut()
            .copy_within(start + at..start + entry.length, start + at + 1);
        self.batch.raw_vertices_mut()[start + at] = point;
        self.set_length(new_length);
        self.reset_properties();
    }

    /// Removes the vertex at `at`, shifting subsequent vertices left.
    /// Returns the index following the removed element.
    pub fn erase(&mut self, at: usize) -> usize {
        let entry = self.entry();
        let start = entry.start;
        self.batch
            .raw_vertices_mut()
            .copy_within(start + at + 1..start + entry.length, start + at);
        self.set_length(entry.length - 1);
        self.reset_properties();
        at.min(self.len())
    }

    /// Removes `range`, shifting subsequent vertices left. Returns the
    /// index following the erased range.
    pub fn erase_range(&mut self, range: std::ops::Range<usize>) -> usize {
        let entry = self.entry();
        let start = entry.start;
        let removed = range.end - range.start;
        self.batch
            .raw_vertices_mut()
            .copy_within(start + range.end..start + entry.length, start + range.start);
        self.set_length(entry.length - removed);
        self.reset_properties();
        range.start.min(self.len())
    }

    pub fn resize(&mut self, new_len: usize, fill: Point) {
        let current = self.len();
        if new_len > current {
            self.ensure_capacity(new_len);
            for i in current..new_len {
                let entry = self.entry();
                self.batch.raw_vertices_mut()[entry.start + i] = fill;
            }
        }
        self.set_length(new_len);
        self.reset_properties();
    }

    pub fn clear(&mut self) {
        self.set_length(0);
        self.reset_properties();
    }

    /// Ensures capacity for `additional` more vertices without changing
    /// length.
    pub fn reserve(&mut self, additional: usize) {
        self.ensure_capacity(self.len() + additional);
    }

    /// Per-member compaction is not offered; only
    /// [`PolygonBatch::shrink_to_fit`] reclaims dead regions, since doing
    /// so for a single member without touching its neighbours would
    /// require moving it anyway. Provided for contract parity; a no-op.
    pub fn shrink_to_fit(&mut self) {}

    /// Translates every vertex of this member in place. The properties
    /// cache is preserved, since translation is the one mutation proven to
    /// keep convexity, self-intersection status, and orientation intact.
    pub fn translate_in_place(&mut self, delta: Point) {
        let entry = self.entry();
        for v in &mut self.batch.raw_vertices_mut()[entry.start..entry.start + entry.length] {
            *v = *v + delta;
        }
    }

    /// Content swap (O(length)) with a view into a *different* batch. The
    /// type system already forbids calling this with two views of the same
    /// batch, since obtaining two simultaneous [`PolygonView`]s from one
    /// `&mut PolygonBatch` is not possible; same-batch swaps go through
    /// [`PolygonBatch::swap_members`] instead, which is O(1).
    pub fn swap_with(&mut self, other: &mut PolygonView<'_>) {
        let mine: Vec<Point> = self.as_slice().to_vec();
        let theirs: Vec<Point> = other.as_slice().to_vec();
        let my_props = self.properties();
        let their_props = other.properties();
        self.replace_contents(&theirs, their_props);
        other.replace_contents(&mine, my_props);
    }

    /// Content swap (O(length)) with an owned flat polygon.
    pub fn swap_with_polygon(&mut self, other: &mut SimplePolygon) {
        let mine: Vec<Point> = self.as_slice().to_vec();
        let my_props = self.properties();
        let theirs: Vec<Point> = other.as_slice().to_vec();
        let their_props = other.properties();
        self.replace_contents(&theirs, their_props);
        *other = SimplePolygon::from_points(mine);
        *other.properties_mut() = my_props;
    }

    fn replace_contents(&mut self, new_vertices: &[Point], properties: PropertiesCache) {
        self.ensure_capacity(new_vertices.len());
        let entry = self.entry();
        self.batch.raw_vertices_mut()[entry.start..entry.start + new_vertices.len()]
            .copy_from_slice(new_vertices);
        self.set_length(new_vertices.len());
        *self.batch.properties_mut(self.member) = properties;
    }

    fn set_length(&mut self, length: usize) {
        // SAFETY net: lives only inside the crate, IndexEntry has no
        // invariants beyond the ones the batch itself maintains.
        let start = self.entry().start;
        let capacity = self.entry().capacity;
        debug_assert!(length <= capacity);
        *self.index_entry_mut() = super::IndexEntry {
            start,
            length,
            capacity,
        };
    }

    fn index_entry_mut(&mut self) -> &mut super::IndexEntry {
        &mut self.batch.index_mut()[self.member]
    }
}

impl PointSequence for PolygonView<'_> {
    #[inline]
    fn len(&self) -> usize {
        PolygonView::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Point {
        PolygonView::get(self, index)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::batch::PolygonBatch;

    #[test]
    fn push_back_grows_member_without_touching_others() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ]));
        batch.push_polygon(SimplePolygon::from_points([Point::new(10, 10)]));

        for k in 0..100 {
            batch.view(1).push_back(Point::new(k, k));
        }

        assert_eq!(
            batch.member_slice(0),
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1)
            ]
        );
        assert_eq!(batch.member_len(1), 101);
        assert_eq!(batch.member_slice(1)[0], Point::new(10, 10));
        assert_eq!(batch.member_slice(1)[100], Point::new(99, 99));
    }

    #[test]
    fn set_overwrites_a_vertex_without_changing_length() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
        ]));

        batch.view(0).set(1, Point::new(5, 5));

        assert_eq!(batch.member_len(0), 3);
        assert_eq!(batch.member_slice(0)[1], Point::new(5, 5));
    }

    #[test]
    fn insert_and_erase_shift_within_member() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(2, 2),
        ]));
        {
            let mut view = batch.view(0);
            view.insert(1, Point::new(1, 1));
        }
        assert_eq!(batch.member_slice(0), &[Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);
        {
            let mut view = batch.view(0);
            view.erase(0);
        }
        assert_eq!(batch.member_slice(0), &[Point::new(1, 1), Point::new(2, 2)]);
    }

    #[test]
    fn translate_preserves_properties() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([Point::new(0, 0)]));
        batch
            .properties_mut(0)
            .set_convexity(crate::properties::Convexity::Convex);
        batch.view(0).translate_in_place(Point::new(5, 5));
        assert_eq!(
            batch.properties(0).convexity(),
            crate::properties::Convexity::Convex
        );
        assert_eq!(batch.member_slice(0)[0], Point::new(5, 5));
    }

    #[test]
    fn swap_with_polygon_exchanges_content() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([Point::new(0, 0)]));
        let mut flat = SimplePolygon::from_points([Point::new(9, 9), Point::new(8, 8)]);
        batch.view(0).swap_with_polygon(&mut flat);
        assert_eq!(batch.member_slice(0), &[Point::new(9, 9), Point::new(8, 8)]);
        assert_eq!(flat.as_slice(), &[Point::new(0, 0)]);
    }

    #[test]
    fn swap_members_is_o1_metadata_exchange() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([Point::new(0, 0)]));
        batch.push_polygon(SimplePolygon::from_points([Point::new(1, 1), Point::new(2, 2)]));
        batch.swap_members(0, 1);
        assert_eq!(batch.member_slice(0), &[Point::new(1, 1), Point::new(2, 2)]);
        assert_eq!(batch.member_slice(1), &[Point::new(0, 0)]);
    }
}
