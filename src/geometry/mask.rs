use serde::Serialize;

use crate::domain::LatLng;

/// Outer ring covering the whole Web Mercator band, closed and
/// counter-clockwise
pub const WORLD_RING: [LatLng; 5] = [
    LatLng { lat: -85.0, lng: -180.0 },
    LatLng { lat: -85.0, lng: 180.0 },
    LatLng { lat: 85.0, lng: 180.0 },
    LatLng { lat: 85.0, lng: -180.0 },
    LatLng { lat: -85.0, lng: -180.0 },
];

/// Donut polygon: the world with the region cut out
///
/// `hole` is the boundary with its winding flipped, and `outer` always winds
/// the other way, so with either the even-odd or the nonzero fill rule the
/// region shows through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskPolygon {
    pub outer: Vec<LatLng>,
    pub hole: Vec<LatLng>,
}

pub fn build_mask(boundary: &[LatLng]) -> MaskPolygon {
    let mut hole = boundary.to_vec();
    hole.reverse();

    let mut outer = WORLD_RING.to_vec();
    // Source rings are normally counter-clockwise; a clockwise one would
    // leave the hole winding the same way as the world ring.
    if signed_area2(&hole) > 0.0 {
        outer.reverse();
    }

    MaskPolygon { outer, hole }
}

/// Twice the signed area of a ring in (lng, lat) space
///
/// Positive for counter-clockwise rings.
pub fn signed_area2(ring: &[LatLng]) -> f64 {
    ring.windows(2)
        .map(|w| w[0].lng * w[1].lat - w[1].lng * w[0].lat)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccw_square() -> Vec<LatLng> {
        vec![
            LatLng::new(30.0, -100.0),
            LatLng::new(30.0, -90.0),
            LatLng::new(40.0, -90.0),
            LatLng::new(40.0, -100.0),
            LatLng::new(30.0, -100.0),
        ]
    }

    #[test]
    fn test_hole_is_reversed_boundary() {
        let boundary = ccw_square();
        let mask = build_mask(&boundary);

        let mut round_trip = mask.hole.clone();
        round_trip.reverse();
        assert_eq!(round_trip, boundary);
        assert_ne!(mask.hole, boundary);
    }

    #[test]
    fn test_rings_have_opposite_winding() {
        let boundary = ccw_square();
        assert!(signed_area2(&boundary) > 0.0);

        let mask = build_mask(&boundary);
        assert!(signed_area2(&mask.outer) > 0.0);
        assert!(signed_area2(&mask.hole) < 0.0);
    }

    #[test]
    fn test_clockwise_boundary_flips_outer_ring() {
        let mut boundary = ccw_square();
        boundary.reverse();

        let mask = build_mask(&boundary);
        assert!(signed_area2(&mask.hole) > 0.0);
        assert!(signed_area2(&mask.outer) < 0.0);

        let mut round_trip = mask.hole.clone();
        round_trip.reverse();
        assert_eq!(round_trip, boundary);
    }

    #[test]
    fn test_outer_ring_is_closed_world() {
        let mask = build_mask(&ccw_square());
        let outer = &mask.outer;
        assert_eq!(outer.len(), 5);
        assert_eq!(outer.first(), outer.last());
        assert!(outer.iter().all(|p| p.lat.abs() == 85.0 && p.lng.abs() == 180.0));
    }
}
