//! No-op backend: routes straight back to the parallel CPU kernels. Used
//! whenever no real offload backend is compiled in, and as the reference
//! implementation the real backends' output is checked against.

use super::OffloadBackend;
use crate::batch::PolygonBatch;
use crate::kernels::area;
use crate::point::Area;

pub struct DummyBackend;

impl OffloadBackend for DummyBackend {
    fn area_batch(&self, batch: &PolygonBatch) -> Vec<Area> {
        area::area_batch_parallel(batch)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::point::Point;
    use crate::polygon::SimplePolygon;

    #[test]
    fn matches_parallel_area_kernel() {
        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ]));
        assert_eq!(DummyBackend.area_batch(&batch), vec![4]);
    }
}
