//! Public entry points. Each operation picks a backend kernel by size,
//! so callers never have to choose scalar vs. parallel vs. offload
//! themselves.

use crate::batch::PolygonBatch;
use crate::intersection::SelfIntersection;
use crate::kernels::{area, self_intersections, translate};
use crate::point::{Area, Point};
use crate::polygon::PointSequence;

/// Below this vertex count, a single polygon's area is computed scalar;
/// at or above it, parallel (unless it also clears
/// [`OFFLOAD_AREA_POLYGON_THRESHOLD`] and offload is compiled in).
pub const PARALLEL_AREA_POLYGON_THRESHOLD: usize = 400;

/// At or above this vertex count, a single polygon's area is offloaded if
/// an offload backend is compiled in.
pub const OFFLOAD_AREA_POLYGON_THRESHOLD: usize = 3000;

/// Below this combined member-count-plus-total-vertex-count, a batch's
/// areas are computed scalar; at or above it, parallel. Offload is never
/// selected for batch area, regardless of size.
pub const PARALLEL_AREA_BATCH_THRESHOLD: usize = 200;

/// Computes the signed area of a single polygon, selecting scalar,
/// parallel, or (if compiled in) offload by vertex count.
///
/// A single polygon's area never goes through [`crate::offload`] directly
/// (the offload backend operates on whole batches); once a polygon clears
/// [`OFFLOAD_AREA_POLYGON_THRESHOLD`] with an offload backend compiled in,
/// it is wrapped as a one-member batch and routed through the same
/// backend the batch entry point uses.
pub fn area<P: PointSequence + Sync>(polygon: &P) -> Area {
    let n = polygon.len();
    if n >= OFFLOAD_AREA_POLYGON_THRESHOLD && crate::offload::is_available() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(crate::polygon::SimplePolygon::from_points(
            (0..n).map(|i| polygon.get(i)),
        ));
        crate::offload::active_backend().area_batch(&batch)[0]
    } else if n >= PARALLEL_AREA_POLYGON_THRESHOLD {
        area::area_parallel(polygon)
    } else {
        area::area_scalar(polygon)
    }
}

/// Computes the signed area of every member of a batch, selecting scalar
/// or parallel by the batch's combined member-and-vertex count. Never
/// offloaded, regardless of size.
pub fn area_batch(batch: &PolygonBatch) -> Vec<Area> {
    if batch.len() + batch.vertex_extent() >= PARALLEL_AREA_BATCH_THRESHOLD {
        area::area_batch_parallel(batch)
    } else {
        area::area_batch_scalar(batch)
    }
}

/// Translates every vertex of a single polygon by `delta`. Always
/// dispatches scalar: translation is O(n) with no branching per vertex,
/// too cheap to amortize thread fan-out from this entry point.
pub fn translate(vertices: &mut [Point], delta: Point) {
    translate::translate_scalar(vertices, delta);
}

/// Translates every member of a batch by its own delta. Always scalar,
/// for the same reason as [`translate`].
pub fn translate_batch(batch: &mut PolygonBatch, deltas: &[Point]) {
    translate::translate_batch_scalar(batch, deltas);
}

/// Finds every self-intersection of a single polygon. Always dispatches
/// parallel: the pairwise edge comparisons this performs are quadratic
/// and worth spreading across threads even for modestly sized polygons.
pub fn self_intersections<P: PointSequence + Sync>(polygon: &P) -> Vec<SelfIntersection> {
    self_intersections::self_intersections_parallel(polygon)
}

/// Finds every self-intersection of every member of a batch, in parallel
/// across members.
pub fn self_intersections_batch(batch: &PolygonBatch) -> Vec<Vec<SelfIntersection>> {
    self_intersections::self_intersections_batch_parallel(batch)
}
