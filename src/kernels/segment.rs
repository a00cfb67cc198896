//! Exact-integer intersection test between two line segments.

use crate::point::{Area, Point};
use crate::rounding::round_divide;

/// Tests two line segments `(a0, a1)` and `(b0, b1)` for intersection.
///
/// Returns `None` if the segments are disjoint, if they touch only at a
/// point that is an endpoint of *both* segments (the ordinary way two
/// adjacent polygon edges meet), or if they are parallel and
/// non-overlapping. Returns the crossing point if the interiors cross.
/// Returns the endpoint of `a` closest to `a0` that lies inside the
/// overlap if the segments are collinear and overlap lengthwise.
/// Coordinates of a computed crossing point are rounded half-away-from-zero.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    // `orient` against a zero-length segment is trivially 0 no matter what
    // the other point is, which would otherwise masquerade as collinearity
    // below. Handle degenerate inputs as point-in-segment tests instead.
    if a0 == a1 && b0 == b1 {
        return if a0 == b0 { Some(a0) } else { None };
    }
    if a0 == a1 {
        return point_on_segment(a0, b0, b1).filter(|&p| p != b0 && p != b1);
    }
    if b0 == b1 {
        return point_on_segment(b0, a0, a1).filter(|&p| p != a0 && p != a1);
    }

    let d1 = b0.orient(a0, a1);
    let d2 = b1.orient(a0, a1);
    let d3 = a0.orient(b0, b1);
    let d4 = a1.orient(b0, b1);

    if d1 != 0 && d2 != 0 && d3 != 0 && d4 != 0 {
        return if (d1 > 0) != (d2 > 0) && (d3 > 0) != (d4 > 0) {
            Some(crossing_point(a0, a1, b0, b1))
        } else {
            None
        };
    }

    if d1 == 0 && d2 == 0 {
        // Fully collinear: fall through to interval-overlap handling.
        return collinear_overlap(a0, a1, b0, b1);
    }

    let both_endpoints = |p: Point| (p == a0 || p == a1) && (p == b0 || p == b1);
    let mut candidate = None;
    if d1 == 0 && on_segment(b0, a0, a1) {
        candidate = Some(b0);
    }
    if candidate.is_none() && d2 == 0 && on_segment(b1, a0, a1) {
        candidate = Some(b1);
    }
    if candidate.is_none() && d3 == 0 && on_segment(a0, b0, b1) {
        candidate = Some(a0);
    }
    if candidate.is_none() && d4 == 0 && on_segment(a1, b0, b1) {
        candidate = Some(a1);
    }

    match candidate {
        Some(p) if !both_endpoints(p) => Some(p),
        _ => None,
    }
}

/// Tests whether the single point `p` lies on the closed segment `a`-`b`,
/// verifying collinearity itself (unlike [`on_segment`], which assumes
/// it). Returns `Some(p)` if so.
fn point_on_segment(p: Point, a: Point, b: Point) -> Option<Point> {
    if p.orient(a, b) == 0 && on_segment(p, a, b) {
        Some(p)
    } else {
        None
    }
}

/// `p` lies on the closed segment `a`-`b`, given `p` is already known to
/// be collinear with `a` and `b`.
fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (min_y, max_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

fn collinear_overlap(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let (a_lo, a_hi) = if a0 <= a1 { (a0, a1) } else { (a1, a0) };
    let (b_lo, b_hi) = if b0 <= b1 { (b0, b1) } else { (b1, b0) };
    let overlap_lo = a_lo.max(b_lo);
    let overlap_hi = a_hi.min(b_hi);
    if overlap_lo > overlap_hi {
        return None;
    }
    let both_endpoints =
        |p: Point| (p == a0 || p == a1) && (p == b0 || p == b1);
    if overlap_lo == overlap_hi {
        return if both_endpoints(overlap_lo) {
            None
        } else {
            Some(overlap_lo)
        };
    }
    // The endpoint of `a` closest to `a0` that lies inside the overlap.
    Some(if a0 <= a1 { overlap_lo } else { overlap_hi })
}

/// Exact rational line-line intersection, rounded half-away-from-zero.
/// Intermediate products are widened beyond `Area` to avoid overflow;
/// only the final rounded result is narrowed back to a [`Point`].
fn crossing_point(a0: Point, a1: Point, b0: Point, b1: Point) -> Point {
    let rx = i128::from(a1.x) - i128::from(a0.x);
    let ry = i128::from(a1.y) - i128::from(a0.y);
    let sx = i128::from(b1.x) - i128::from(b0.x);
    let sy = i128::from(b1.y) - i128::from(b0.y);

    let denom = rx * sy - ry * sx;
    let to_b0x = i128::from(b0.x) - i128::from(a0.x);
    let to_b0y = i128::from(b0.y) - i128::from(a0.y);
    let t_numer = to_b0x * sy - to_b0y * sx;

    let x = i128::from(a0.x) + round_divide(t_numer * rx, denom);
    let y = i128::from(a0.y) + round_divide(t_numer * ry, denom);
    Point::new(x as Area as i32, y as Area as i32)
}
