//! Concrete worked scenarios, one per documented case.

use apex_polygon::batch::PolygonBatch;
use apex_polygon::dispatch;
use apex_polygon::point::Point;
use apex_polygon::polygon::SimplePolygon;

fn square_1000() -> SimplePolygon {
    SimplePolygon::from_points([
        Point::new(0, 0),
        Point::new(1000, 0),
        Point::new(1000, 1000),
        Point::new(0, 1000),
    ])
}

#[test]
fn s1_square_area() {
    let square = square_1000();
    assert_eq!(dispatch::area(&square), 1_000_000);
}

#[test]
fn s2_reversed_square_area() {
    let reversed = SimplePolygon::from_points([
        Point::new(0, 0),
        Point::new(0, 1000),
        Point::new(1000, 1000),
        Point::new(1000, 0),
    ]);
    assert_eq!(dispatch::area(&reversed), -1_000_000);
}

#[test]
fn s3_self_intersecting_hourglass() {
    let hourglass = SimplePolygon::from_points([
        Point::new(0, 0),
        Point::new(1000, 1000),
        Point::new(0, 1000),
        Point::new(1000, 0),
    ]);
    assert_eq!(dispatch::area(&hourglass), 0);

    let hits = dispatch::self_intersections(&hourglass);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, Point::new(500, 500));
    let mut edges = [hits[0].segment_a, hits[0].segment_b];
    edges.sort_unstable();
    assert_eq!(edges, [0, 2]);
}

#[test]
fn s4_batch_area() {
    let mut batch = PolygonBatch::new();
    batch.push_polygon(square_1000());
    batch.push_polygon(SimplePolygon::from_points([
        Point::new(0, 0),
        Point::new(0, 1000),
        Point::new(1000, 1000),
        Point::new(1000, 0),
    ]));
    batch.push_polygon(SimplePolygon::from_points([Point::new(5, 5)]));
    batch.push_polygon(SimplePolygon::from_points([
        Point::new(0, 0),
        Point::new(10, 0),
    ]));

    assert_eq!(
        dispatch::area_batch(&batch),
        vec![1_000_000, -1_000_000, 0, 0]
    );
}

#[test]
fn s5_translate_additivity() {
    let mut polygon = SimplePolygon::from_points([
        Point::new(20, 20),
        Point::new(100, 20),
        Point::new(60, 60),
    ]);
    let original = polygon.clone();

    let mut vertices = polygon.as_slice().to_vec();
    dispatch::translate(&mut vertices, Point::new(-40, 70));
    assert_eq!(
        vertices,
        vec![
            Point::new(-20, 90),
            Point::new(60, 90),
            Point::new(20, 130),
        ]
    );

    dispatch::translate(&mut vertices, Point::new(40, -70));
    polygon = SimplePolygon::from_points(vertices);
    assert_eq!(polygon.as_slice(), original.as_slice());
}

#[test]
fn s6_view_growth_preserves_others() {
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
            Point::new(0, 1),
        ]
    );
    assert_eq!(batch.member_len(1), 101);
    assert_eq!(batch.member_slice(1)[0], Point::new(10, 10));
    assert_eq!(batch.member_slice(1)[100], Point::new(99, 99));
}
