use geo::Geometry;

/// One region as delivered by a geometry source
#[derive(Debug, Clone)]
pub struct RegionSource {
    /// Human-readable name, e.g. "New Hampshire"
    pub name: String,
    /// Raw geometry in (lng, lat) order
    pub geometry: Geometry<f64>,
}

impl RegionSource {
    pub fn new(name: impl Into<String>, geometry: Geometry<f64>) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }

    /// Normalized identifier used as the output key
    pub fn slug(&self) -> String {
        super::slugify(&self.name)
    }
}
