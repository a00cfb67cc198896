//! The contiguous batch: many variable-length polygons sharing one pair of
//! buffers instead of one heap allocation per polygon.

pub mod view;

use crate::point::Point;
use crate::polygon::SimplePolygon;
use crate::properties::PropertiesCache;
pub use view::PolygonView;

/// One member's range and capacity inside the shared vertex buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Offset in the vertex buffer where this member's vertices begin.
    pub start: usize,
    /// Number of live vertices of this member.
    pub length: usize,
    /// Number of slots reserved to this member, starting at `start`.
    pub capacity: usize,
}

/// Many polygons, contiguous in memory: one vertex buffer shared by every
/// member, plus an index buffer describing each member's range inside it.
///
/// See the crate's module docs for the invariants this type maintains.
#[derive(Clone, Debug, Default)]
pub struct PolygonBatch {
    vertices: Vec<Point>,
    index: Vec<IndexEntry>,
    properties: Vec<PropertiesCache>,
}

impl PolygonBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of member polygons.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current length of the shared vertex buffer, live and dead vertices
    /// alike.
    #[inline]
    pub fn vertex_extent(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn size_subelements(&self) -> usize {
        self.vertex_extent()
    }

    /// Pointer to the shared vertex buffer, valid until the next subelement
    /// reallocation.
    #[inline]
    pub fn data_subelements(&self) -> *const Point {
        self.vertices.as_ptr()
    }

    #[inline]
    pub fn index_entry(&self, member: usize) -> IndexEntry {
        self.index[member]
    }

    #[inline]
    pub fn member_len(&self, member: usize) -> usize {
        self.index[member].length
    }

    /// Read-only access to one member's live vertices, without going
    /// through a [`PolygonView`]. Kernels that only read use this.
    #[inline]
    pub fn member_slice(&self, member: usize) -> &[Point] {
        let entry = self.index[member];
        &self.vertices[entry.start..entry.start + entry.length]
    }

    #[inline]
    pub fn properties(&self, member: usize) -> PropertiesCache {
        self.properties[member]
    }

    #[inline]
    pub fn properties_mut(&mut self, member: usize) -> &mut PropertiesCache {
        &mut self.properties[member]
    }

    /// Whole vertex buffer, live and dead vertices alike, for kernels that
    /// want to walk every member's storage directly.
    #[inline]
    pub fn raw_vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn raw_vertices_mut(&mut self) -> &mut [Point] {
        &mut self.vertices
    }

    pub(crate) fn index_mut(&mut self) -> &mut Vec<IndexEntry> {
        &mut self.index
    }

    /// Appends a new member, copying its vertices to the end of the shared
    /// buffer.
    pub fn push_polygon(&mut self, polygon: SimplePolygon) {
        let start = self.vertices.len();
        let length = polygon.len();
        self.vertices.extend_from_slice(polygon.as_slice());
        self.index.push(IndexEntry {
            start,
            length,
            capacity: length,
        });
        self.properties.push(polygon.properties());
    }

    /// Removes and returns the last member. The vertices it occupied
    /// become a dead region; only [`shrink_to_fit`](Self::shrink_to_fit)
    /// reclaims them.
    pub fn pop_polygon(&mut self) -> Option<SimplePolygon> {
        let entry = self.index.pop()?;
        let properties = self.properties.pop().expect("index/properties in sync");
        let mut polygon =
            SimplePolygon::from_points(self.vertices[entry.start..entry.start + entry.length].to_vec());
        *polygon.properties_mut() = properties;
        Some(polygon)
    }

    /// Inserts a new member at logical position `at`. Its vertices are
    /// appended to the end of the shared buffer; only the index buffer
    /// records its logical position (invariant: members are ordered in the
    /// index independent of their position in the vertex buffer).
    pub fn insert_polygon(&mut self, at: usize, polygon: SimplePolygon) {
        let start = self.vertices.len();
        let length = polygon.len();
        self.vertices.extend_from_slice(polygon.as_slice());
        self.index.insert(
            at,
            IndexEntry {
                start,
                length,
                capacity: length,
            },
        );
        self.properties.insert(at, polygon.properties());
    }

    /// Removes the member at logical position `at` and returns it. Its
    /// vertex region becomes dead.
    pub fn erase_polygon(&mut self, at: usize) -> SimplePolygon {
        let entry = self.index.remove(at);
        let properties = self.properties.remove(at);
        let mut polygon =
            SimplePolygon::from_points(self.vertices[entry.start..entry.start + entry.length].to_vec());
        *polygon.properties_mut() = properties;
        polygon
    }

    /// Truncates to `n` members, or extends with empty members.
    pub fn resize(&mut self, n: usize) {
        while self.len() > n {
            self.pop_polygon();
        }
        while self.len() < n {
            self.push_polygon(SimplePolygon::new());
        }
    }

    /// Reserves capacity for `additional` more members in the index
    /// buffer. Never reallocates the shared vertex buffer.
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.properties.reserve(additional);
    }

    /// Empties the batch of members. Per the flat-container contract this
    /// preserves capacity; the shared vertex buffer is untouched (every
    /// vertex becomes dead, reclaimable only by
    /// [`shrink_to_fit`](Self::shrink_to_fit)).
    pub fn clear(&mut self) {
        self.index.clear();
        self.properties.clear();
    }

    /// O(1): exchanges the entire batch's storage with another batch's.
    pub fn swap(&mut self, other: &mut PolygonBatch) {
        std::mem::swap(&mut self.vertices, &mut other.vertices);
        std::mem::swap(&mut self.index, &mut other.index);
        std::mem::swap(&mut self.properties, &mut other.properties);
    }

    /// O(1): exchanges two members' storage ranges by swapping their index
    /// (and cached-properties) entries, without moving any vertex.
    pub fn swap_members(&mut self, a: usize, b: usize) {
        self.index.swap(a, b);
        self.properties.swap(a, b);
    }

    /// Ensures the shared vertex buffer can hold at least `n` vertices in
    /// total, relocating every member's live vertices into a fresh
    /// contiguous buffer that preserves the index order. Each member is
    /// granted capacity equal to its current length plus a share of the
    /// requested growth.
    pub fn reserve_subelements(&mut self, n: usize) {
        let current_extent = self.vertices.len();
        let target_extent = current_extent.max(n);
        let total_length: usize = self.index.iter().map(|e| e.length).sum();
        let growth_budget = target_extent.saturating_sub(total_length);
        let member_count = self.index.len();

        let mut new_vertices = Vec::with_capacity(target_extent.max(total_length));
        let mut new_index = Vec::with_capacity(member_count);
        for (i, entry) in self.index.iter().enumerate() {
            let share = if member_count == 0 {
                0
            } else {
                growth_budget / member_count + usize::from(i < growth_budget % member_count)
            };
            let new_start = new_vertices.len();
            new_vertices.extend_from_slice(&self.vertices[entry.start..entry.start + entry.length]);
            let new_capacity = entry.length + share;
            new_vertices.resize(new_start + new_capacity, Point::default());
            new_index.push(IndexEntry {
                start: new_start,
                length: entry.length,
                capacity: new_capacity,
            });
        }
        self.vertices = new_vertices;
        self.index = new_index;
    }

    /// Compacts the shared vertex buffer so every member's capacity equals
    /// its length and members lie back-to-back in index order, reclaiming
    /// every dead region.
    pub fn shrink_to_fit(&mut self) {
        let total_length: usize = self.index.iter().map(|e| e.length).sum();
        let mut new_vertices = Vec::with_capacity(total_length);
        let mut new_index = Vec::with_capacity(self.index.len());
        for entry in &self.index {
            let new_start = new_vertices.len();
            new_vertices.extend_from_slice(&self.vertices[entry.start..entry.start + entry.length]);
            new_index.push(IndexEntry {
                start: new_start,
                length: entry.length,
                capacity: entry.length,
            });
        }
        self.vertices = new_vertices;
        self.index = new_index;
    }

    /// Returns a mutable view over member `member` that impersonates a
    /// flat polygon while sharing this batch's storage.
    pub fn view(&mut self, member: usize) -> PolygonView<'_> {
        PolygonView::new(self, member)
    }

    /// Grows member `member` to hold at least `needed_length` vertices,
    /// implementing the bump rule: extend in place if this member's
    /// reserved region is already at the tail of the buffer, otherwise
    /// relocate its live vertices to the end of the buffer with a fresh,
    /// at-least-doubled capacity. Other members are untouched.
    pub(crate) fn grow_member(&mut self, member: usize, needed_length: usize) {
        let entry = self.index[member];
        let new_capacity = needed_length.max(entry.capacity.saturating_mul(2)).max(1);
        if entry.start + entry.capacity == self.vertices.len() {
            let grow_by = new_capacity - entry.capacity;
            self.vertices.resize(self.vertices.len() + grow_by, Point::default());
            self.index[member].capacity = new_capacity;
        } else {
            let live: Vec<Point> =
                self.vertices[entry.start..entry.start + entry.length].to_vec();
            let new_start = self.vertices.len();
            self.vertices.extend_from_slice(&live);
            self.vertices
                .resize(new_start + new_capacity, Point::default());
            self.index[member] = IndexEntry {
                start: new_start,
                length: entry.length,
                capacity: new_capacity,
            };
        }
    }
}
