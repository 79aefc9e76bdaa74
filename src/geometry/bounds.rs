use geo::{BoundingRect, Geometry, Rect};

/// Bounding box in geographic coordinates (x = lng, y = lat)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a whole geometry, every member polygon included
    pub fn of_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        geometry.bounding_rect().map(Self::from)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_x: rect.min().x,
            max_x: rect.max().x,
            min_y: rect.min().y,
            max_y: rect.max().y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{MultiPolygon, polygon};

    #[test]
    fn test_bounds_cover_every_member_polygon() {
        let mainland = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)];
        let island = polygon![(x: 10.0, y: -2.0), (x: 11.0, y: -2.0), (x: 11.0, y: -1.0), (x: 10.0, y: -2.0)];
        let geometry = Geometry::MultiPolygon(MultiPolygon::new(vec![mainland, island]));

        let bounds = Bounds::of_geometry(&geometry).unwrap();
        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 11.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 4.0);
        assert_eq!(bounds.width(), 11.0);
        assert_eq!(bounds.height(), 6.0);
    }
}
