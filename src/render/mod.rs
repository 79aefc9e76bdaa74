pub mod markers;
pub mod path;
pub mod svg;

pub use markers::{MarkerStyle, PlacedMarker, layout_markers, radius_for_rank};
pub use path::{PathCommand, assemble_path, to_svg_d};
pub use svg::to_svg;
