pub mod cache;
pub mod geojson;

pub use cache::{cache_path, load_source};
pub use geojson::{FeatureCollection, fetch_geojson, parse_regions};
