pub mod boundary;
pub mod metro;
pub mod region;

pub use boundary::{BoundaryRecord, LatLng, slugify};
pub use metro::{MetroMarker, MetroTable};
pub use region::RegionSource;
