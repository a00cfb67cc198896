//! Batched 2D integer-coordinate polygon geometry: a flat polygon type, a
//! columnar batch of many polygons sharing one vertex buffer, and
//! scalar/parallel/offload kernels for area, translation, and
//! self-intersection detection.

pub mod batch;
pub mod dispatch;
pub mod error;
pub mod intersection;
pub mod kernels;
pub mod offload;
pub mod pairing;
pub mod point;
pub mod polygon;
pub mod properties;
pub mod rounding;

pub use batch::{PolygonBatch, PolygonView};
pub use error::PolygonError;
pub use intersection::SelfIntersection;
pub use point::{Area, Coordinate, Point};
pub use polygon::{PointSequence, SimplePolygon};
pub use properties::{Convexity, Orientation, PropertiesCache, SelfIntersection as SelfIntersectionFlag};
