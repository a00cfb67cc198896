//! Signed area via the shoelace formula, scalar and parallel.

use rayon::prelude::*;

use crate::batch::PolygonBatch;
use crate::point::{Area, Point};
use crate::polygon::PointSequence;

/// Signed area of a single polygon. Zero for polygons with fewer than
/// three vertices. Positive for counter-clockwise winding, negative for
/// clockwise.
pub fn area_scalar<P: PointSequence>(polygon: &P) -> Area {
    let n = polygon.len();
    if n < 3 {
        return 0;
    }
    let mut sum: Area = 0;
    for i in 0..n {
        let current = polygon.get(i);
        let next = polygon.get((i + 1) % n);
        sum += current.cross(next);
    }
    sum / 2
}

/// Identical result to [`area_scalar`], splitting the summation over
/// edges across threads.
pub fn area_parallel<P: PointSequence + Sync>(polygon: &P) -> Area {
    let n = polygon.len();
    if n < 3 {
        return 0;
    }
    let sum: Area = (0..n)
        .into_par_iter()
        .map(|i| polygon.get(i).cross(polygon.get((i + 1) % n)))
        .sum();
    sum / 2
}

fn member_area(batch: &PolygonBatch, member: usize) -> Area {
    let vertices = batch.member_slice(member);
    let n = vertices.len();
    if n < 3 {
        return 0;
    }
    let mut sum: Area = 0;
    for i in 0..n {
        sum += vertices[i].cross(vertices[(i + 1) % n]);
    }
    sum / 2
}

/// Signed area of every member of a batch, independently, single-threaded.
pub fn area_batch_scalar(batch: &PolygonBatch) -> Vec<Area> {
    (0..batch.len()).map(|m| member_area(batch, m)).collect()
}

/// Signed area of every member of a batch, parallelizing across members.
pub fn area_batch_parallel(batch: &PolygonBatch) -> Vec<Area> {
    (0..batch.len())
        .into_par_iter()
        .map(|m| member_area(batch, m))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::polygon::SimplePolygon;

    fn unit_square() -> SimplePolygon {
        SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ])
    }

    #[test]
    fn unit_square_has_area_one() {
        assert_eq!(area_scalar(&unit_square()), 1);
        assert_eq!(area_parallel(&unit_square()), 1);
    }

    #[test]
    fn reversed_winding_negates_area() {
        let mut reversed = unit_square();
        reversed = SimplePolygon::from_points(reversed.iter().rev().copied().collect::<Vec<_>>());
        assert_eq!(area_scalar(&reversed), -1);
    }

    #[test]
    fn degenerate_polygons_have_zero_area() {
        assert_eq!(area_scalar(&SimplePolygon::new()), 0);
        assert_eq!(area_scalar(&SimplePolygon::from_points([Point::new(0, 0)])), 0);
        assert_eq!(
            area_scalar(&SimplePolygon::from_points([Point::new(0, 0), Point::new(1, 1)])),
            0
        );
    }

    #[test]
    fn batch_areas_match_per_member_scalar() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(unit_square());
        batch.push_polygon(SimplePolygon::from_points([Point::new(0, 0)]));
        assert_eq!(area_batch_scalar(&batch), vec![1, 0]);
        assert_eq!(area_batch_parallel(&batch), vec![1, 0]);
    }

    #[test]
    fn wide_coordinates_do_not_overflow_the_widened_product() {
        let big = SimplePolygon::from_points([
            Point::new(i32::MIN / 2, i32::MIN / 2),
            Point::new(i32::MAX / 2, i32::MIN / 2),
            Point::new(i32::MAX / 2, i32::MAX / 2),
            Point::new(i32::MIN / 2, i32::MAX / 2),
        ]);
        let area = area_scalar(&big);
        assert!(area > 0);
    }
}
