use geo::Coord;
use serde::{Deserialize, Serialize};

/// A geographic point in (lat, lng) order, as consumed by the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        Self { lat: c.y, lng: c.x }
    }
}

/// Simplified exterior ring of one region
///
/// The point sequence is always closed (first == last) and holds at most
/// `budget + 1` points, where `budget` is the simplification budget it was
/// built with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryRecord {
    pub slug: String,
    pub coordinates: Vec<LatLng>,
}

impl BoundaryRecord {
    pub fn new(slug: impl Into<String>, coordinates: Vec<LatLng>) -> Self {
        Self {
            slug: slug.into(),
            coordinates,
        }
    }

    pub fn is_closed(&self) -> bool {
        match (self.coordinates.first(), self.coordinates.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

/// Lowercase a region name and replace spaces with hyphens
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("New Hampshire"), "new-hampshire");
        assert_eq!(slugify("District of Columbia"), "district-of-columbia");
        assert_eq!(slugify("Texas"), "texas");
    }

    #[test]
    fn test_latlng_from_coord_swaps_axes() {
        let p = LatLng::from(geo::coord! { x: -122.4, y: 37.7 });
        assert_eq!(p.lat, 37.7);
        assert_eq!(p.lng, -122.4);
    }

    #[test]
    fn test_boundary_closed() {
        let a = LatLng::new(1.0, 2.0);
        let b = LatLng::new(3.0, 4.0);
        assert!(BoundaryRecord::new("x", vec![a, b, a]).is_closed());
        assert!(!BoundaryRecord::new("x", vec![a, b]).is_closed());
        assert!(!BoundaryRecord::new("x", vec![]).is_closed());
    }
}
