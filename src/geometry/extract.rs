use geo::{Area, Geometry, LineString, Polygon};
use serde::Deserialize;

use crate::error::RegionError;

/// Smallest closed ring: three distinct corners plus the closing point
const MIN_RING_POINTS: usize = 4;

/// How to pick the representative polygon out of a multi-polygon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RingSelection {
    /// Exterior ring with the most vertices
    #[default]
    VertexCount,
    /// Exterior ring enclosing the largest planar area
    Area,
}

/// Exterior ring that stands in for the whole region
///
/// Polygons yield their exterior ring; interior rings are ignored. For
/// multi-polygons the member chosen by `selection` wins, and on a tie the
/// earlier member is kept.
pub fn representative_ring(
    geometry: &Geometry<f64>,
    selection: RingSelection,
) -> Result<&LineString<f64>, RegionError> {
    match geometry {
        Geometry::Polygon(polygon) => checked_exterior(polygon),
        Geometry::MultiPolygon(multi) => {
            let mut best: Option<(&Polygon<f64>, f64)> = None;
            for polygon in &multi.0 {
                let weight = match selection {
                    RingSelection::VertexCount => polygon.exterior().0.len() as f64,
                    RingSelection::Area => Polygon::new(polygon.exterior().clone(), vec![])
                        .unsigned_area(),
                };
                if best.is_none_or(|(_, w)| weight > w) {
                    best = Some((polygon, weight));
                }
            }

            match best {
                Some((polygon, _)) => checked_exterior(polygon),
                None => Err(RegionError::DegenerateGeometry(
                    "multi-polygon has no members".to_string(),
                )),
            }
        }
        other => Err(unsupported(other)),
    }
}

/// Exterior rings of every member polygon, in source order
///
/// Members whose exterior is too short to enclose anything are dropped.
pub fn exterior_rings(geometry: &Geometry<f64>) -> Result<Vec<&LineString<f64>>, RegionError> {
    let rings: Vec<&LineString<f64>> = match geometry {
        Geometry::Polygon(polygon) => vec![checked_exterior(polygon)?],
        Geometry::MultiPolygon(multi) => multi
            .0
            .iter()
            .map(Polygon::exterior)
            .filter(|ring| ring.0.len() >= MIN_RING_POINTS)
            .collect(),
        other => return Err(unsupported(other)),
    };

    if rings.is_empty() {
        return Err(RegionError::DegenerateGeometry(
            "no member polygon has a usable exterior ring".to_string(),
        ));
    }

    Ok(rings)
}

fn checked_exterior(polygon: &Polygon<f64>) -> Result<&LineString<f64>, RegionError> {
    let ring = polygon.exterior();
    if ring.0.len() < MIN_RING_POINTS {
        return Err(RegionError::DegenerateGeometry(format!(
            "exterior ring has {} points",
            ring.0.len()
        )));
    }
    Ok(ring)
}

fn unsupported(geometry: &Geometry<f64>) -> RegionError {
    RegionError::UnsupportedGeometry {
        kind: geometry_kind(geometry),
    }
}

/// GeoJSON-style type name of a geometry
pub fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
