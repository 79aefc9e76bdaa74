pub mod bounds;
pub mod extract;
pub mod mask;
pub mod projection;
pub mod simplify;

pub use bounds::Bounds;
pub use extract::{RingSelection, exterior_rings, representative_ring};
pub use mask::{MaskPolygon, build_mask};
pub use projection::{Canvas, ProjectionTransform};
pub use simplify::decimate_ring;
