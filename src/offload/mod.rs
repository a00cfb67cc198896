//! GPU-offload backend abstraction, gated behind the `offload` feature
//! family.
//!
//! # Available backends
//!
//! - `dummy` (default): routes straight back to the parallel CPU kernels.
//! - `wgpu_backend` (behind `offload-wgpu`): a real compute-shader path
//!   for batch area reduction.

pub mod dummy;

#[cfg(feature = "offload-wgpu")]
pub mod wgpu_backend;

use crate::batch::PolygonBatch;
use crate::point::Area;

/// A backend capable of running the offload-eligible kernels.
///
/// Kernels without a meaningful GPU formulation (self-intersection search,
/// translation) are deliberately not part of this trait; see
/// `DESIGN.md` for why offload is scoped to area reduction only.
pub trait OffloadBackend {
    fn area_batch(&self, batch: &PolygonBatch) -> Vec<Area>;
}

/// Whether a real offload backend was compiled into this build.
#[inline]
pub fn is_available() -> bool {
    cfg!(feature = "offload-wgpu")
}

/// The backend [`crate::dispatch`] reaches for once a workload clears the
/// offload size threshold: the real GPU backend if compiled in, otherwise
/// the CPU-fallback dummy.
pub fn active_backend() -> Box<dyn OffloadBackend> {
    #[cfg(feature = "offload-wgpu")]
    {
        Box::new(wgpu_backend::WgpuBackend::new())
    }
    #[cfg(not(feature = "offload-wgpu"))]
    {
        Box::new(dummy::DummyBackend)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn availability_matches_compiled_feature() {
        assert_eq!(is_available(), cfg!(feature = "offload-wgpu"));
    }

    #[test]
    fn active_backend_matches_parallel_kernel_without_offload_compiled() {
        use crate::kernels::area;
        use crate::polygon::SimplePolygon;

        let mut batch = PolygonBatch::new();
        batch.push_polygon(SimplePolygon::from_points([
            crate::point::Point::new(0, 0),
            crate::point::Point::new(1, 0),
            crate::point::Point::new(1, 1),
        ]));
        let backend = active_backend();
        assert_eq!(backend.area_batch(&batch), area::area_batch_parallel(&batch));
    }
}
