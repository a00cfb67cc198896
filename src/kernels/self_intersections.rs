//! Scalar and parallel kernels that find every place a polygon's edges
//! touch or cross each other.

use parking_lot::Mutex;
use rayon::prelude::*;

use super::segment::segment_intersection;
use crate::intersection::SelfIntersection;
use crate::pairing;
use crate::point::Point;
use crate::polygon::PointSequence;

/// Collapses runs of coincident vertices (zero-length edges) into a
/// position index: `positions[i]` is the index of the first vertex in the
/// run that vertex `i` belongs to, including the closing edge back to
/// vertex 0. A polygon whose every vertex is identical collapses to a
/// single position.
fn position_index<P: PointSequence>(polygon: &P) -> Vec<usize> {
    let n = polygon.len();
    let mut positions = vec![0usize; n];
    if n == 0 {
        return positions;
    }
    let mut first_of_run = 0;
    positions[0] = 0;
    for i in 1..n {
        if polygon.get(i) == polygon.get(first_of_run) {
            positions[i] = first_of_run;
        } else {
            first_of_run = i;
            positions[i] = i;
        }
    }
    // Close the seam: if the run containing vertex n-1 matches vertex 0's
    // point, merge it into vertex 0's run.
    if n > 1 && polygon.get(positions[n - 1]) == polygon.get(0) {
        let tail_run = positions[n - 1];
        for p in positions.iter_mut() {
            if *p == tail_run {
                *p = 0;
            }
        }
    }
    positions
}

fn edge(polygon: &impl PointSequence, start: usize) -> (Point, Point) {
    let n = polygon.len();
    (polygon.get(start), polygon.get((start + 1) % n))
}

/// Runs the three-pass algorithm on a single polygon: the adjacent-edge
/// pass (collinear, same-direction overlap at a shared vertex), and the
/// non-adjacent pair pass (every other pair of edges, skipping pairs whose
/// positions collapse to the same or a linearly-adjacent run).
fn scan_one<P: PointSequence>(polygon: &P, out: &mut Vec<SelfIntersection>) {
    let n = polygon.len();
    if n < 2 {
        return;
    }
    if n == 2 {
        // A two-vertex polygon's two edges are the same segment traversed
        // in opposite directions: degenerate, but still reported as one
        // coincident pair at vertex 0.
        out.push(SelfIntersection::new(polygon.get(0), 0, 1));
        return;
    }

    let positions = position_index(polygon);

    // Adjacent pairs: edge i and edge i+1 share vertex (i+1) mod n.
    for i in 0..n {
        let j = (i + 1) % n;
        let (a0, a1) = edge(polygon, i);
        let (b0, b1) = edge(polygon, j);
        if let Some(point) = segment_intersection(a0, a1, b0, b1) {
            out.push(SelfIntersection::new(point, i, j));
        }
    }

    // Non-adjacent pairs, de-duplicated through the position index: two
    // edges whose start positions collapse to the same or a
    // linearly-adjacent run are skipped, since they are degenerate forms
    // of the adjacent-pair case already covered above. The circular seam
    // pair (0, n-1) is excluded from `include_adjacent = false`'s count
    // but must still be skipped explicitly here, since it is an adjacent
    // pair of edges even though it is not consecutive in index order.
    // Zero-length edges (both endpoints collapse to the same position) are
    // skipped too: they carry no direction to cross anything with, and
    // whatever point they sit on is already covered by the adjacent-pair
    // pass at the vertex run they belong to.
    let total = pairing::count(n, false);
    for k in 0..total {
        let (i, j) = pairing::enumerate(n, k, false);
        if j == n - 1 && i == 0 {
            continue;
        }
        if is_zero_length_edge(&positions, i) || is_zero_length_edge(&positions, j) {
            continue;
        }
        if positions[i] == positions[j] {
            continue;
        }
        let (a0, a1) = edge(polygon, i);
        let (b0, b1) = edge(polygon, j);
        if let Some(point) = segment_intersection(a0, a1, b0, b1) {
            out.push(SelfIntersection::new(point, i, j));
        }
    }
}

/// Whether the edge starting at `start` is zero-length: its two endpoints
/// collapse to the same run in the position index.
fn is_zero_length_edge(positions: &[usize], start: usize) -> bool {
    let n = positions.len();
    positions[start] == positions[(start + 1) % n]
}

/// Finds every self-intersection of a single polygon, single-threaded.
pub fn self_intersections_scalar<P: PointSequence>(polygon: &P) -> Vec<SelfIntersection> {
    let mut out = Vec::new();
    scan_one(polygon, &mut out);
    out
}

/// Finds every self-intersection of a single polygon, splitting the
/// non-adjacent pair pass across threads. Pair order in the result is not
/// guaranteed to match the scalar kernel's.
pub fn self_intersections_parallel<P: PointSequence + Sync>(polygon: &P) -> Vec<SelfIntersection> {
    let n = polygon.len();
    if n < 3 {
        return self_intersections_scalar(polygon);
    }

    let positions = position_index(polygon);
    let out = Mutex::new(Vec::new());

    (0..n).into_par_iter().for_each(|i| {
        let j = (i + 1) % n;
        let (a0, a1) = edge(polygon, i);
        let (b0, b1) = edge(polygon, j);
        if let Some(point) = segment_intersection(a0, a1, b0, b1) {
            out.lock().push(SelfIntersection::new(point, i, j));
        }
    });

    let total = pairing::count(n, false);
    (0..total).into_par_iter().for_each(|k| {
        let (i, j) = pairing::enumerate(n, k, false);
        if (j == n - 1 && i == 0)
            || is_zero_length_edge(&positions, i)
            || is_zero_length_edge(&positions, j)
            || positions[i] == positions[j]
        {
            return;
        }
        let (a0, a1) = edge(polygon, i);
        let (b0, b1) = edge(polygon, j);
        if let Some(point) = segment_intersection(a0, a1, b0, b1) {
            out.lock().push(SelfIntersection::new(point, i, j));
        }
    });

    out.into_inner()
}

/// Runs the scalar kernel across every member of a batch, independently.
pub fn self_intersections_batch_scalar(
    batch: &crate::batch::PolygonBatch,
) -> Vec<Vec<SelfIntersection>> {
    (0..batch.len())
        .map(|member| self_intersections_scalar(&BatchMember { batch, member }))
        .collect()
}

/// Runs the parallel kernel across every member of a batch, parallelizing
/// across members; each member's own edge pairs are scanned
/// single-threaded, since members are typically far more numerous than
/// cores.
pub fn self_intersections_batch_parallel(
    batch: &crate::batch::PolygonBatch,
) -> Vec<Vec<SelfIntersection>> {
    (0..batch.len())
        .into_par_iter()
        .map(|member| self_intersections_scalar(&BatchMember { batch, member }))
        .collect()
}

struct BatchMember<'a> {
    batch: &'a crate::batch::PolygonBatch,
    member: usize,
}

impl PointSequence for BatchMember<'_> {
    fn len(&self) -> usize {
        self.batch.member_len(self.member)
    }

    fn get(&self, index: usize) -> Point {
        self.batch.member_slice(self.member)[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::polygon::SimplePolygon;

    fn sorted(mut v: Vec<SelfIntersection>) -> Vec<SelfIntersection> {
        v.sort_by_key(|s| (s.segment_a, s.segment_b));
        v
    }

    #[test]
    fn convex_polygon_has_no_self_intersections() {
        let square = SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        assert!(self_intersections_scalar(&square).is_empty());
    }

    #[test]
    fn bowtie_quadrilateral_reports_one_crossing() {
        // (0,0) -> (10,10) -> (10,0) -> (0,10) -> close, edges 0 and 2 cross.
        let bowtie = SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 10),
        ]);
        let hits = self_intersections_scalar(&bowtie);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, Point::new(5, 5));
    }

    #[test]
    fn degenerate_two_vertex_polygon_reports_its_single_edge_pair() {
        let segment = SimplePolygon::from_points([Point::new(0, 0), Point::new(10, 0)]);
        let hits = self_intersections_scalar(&segment);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].segment_a, 0);
        assert_eq!(hits[0].segment_b, 1);
    }

    #[test]
    fn fewer_than_two_vertices_has_no_intersections() {
        assert!(self_intersections_scalar(&SimplePolygon::new()).is_empty());
        assert!(self_intersections_scalar(&SimplePolygon::from_points([Point::new(0, 0)])).is_empty());
    }

    #[test]
    fn parallel_and_scalar_agree_on_a_self_intersecting_star() {
        // A 5-point star shape, self-intersecting by construction.
        let star = SimplePolygon::from_points([
            Point::new(0, 100),
            Point::new(35, -40),
            Point::new(-60, 30),
            Point::new(60, 30),
            Point::new(-35, -40),
        ]);
        let scalar = sorted(self_intersections_scalar(&star));
        let parallel = sorted(self_intersections_parallel(&star));
        assert_eq!(scalar, parallel);
        assert!(!scalar.is_empty());
    }

    #[test]
    fn coincident_vertex_run_suppresses_degenerate_adjacent_hit() {
        // Vertex 1 and 2 are identical; the zero-length edge between them
        // must not itself register as an intersection against its
        // neighbours beyond the ordinary shared-vertex case.
        let polygon = SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(5, 5),
            Point::new(10, 0),
        ]);
        let hits = self_intersections_scalar(&polygon);
        assert!(hits.is_empty());
    }

    #[test]
    fn zero_length_non_adjacent_edge_is_not_reported_against_a_crossing_edge() {
        // Vertex 0 and 1 are identical, so edge 0 is zero-length. Edge 2
        // passes through that shared point, but edge 0 and edge 2 are
        // non-adjacent with distinct positions, so only the explicit
        // zero-length check catches this.
        let polygon = SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(-10, -10),
            Point::new(0, -5),
        ]);
        let hits = self_intersections_scalar(&polygon);
        assert!(hits.iter().all(|h| !(h.segment_a == 0 || h.segment_b == 0)));

        let parallel_hits = self_intersections_parallel(&polygon);
        assert_eq!(sorted(hits), sorted(parallel_hits));
    }
}
