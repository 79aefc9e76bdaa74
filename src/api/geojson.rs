use anyhow::{Context, Result, bail};
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::SourceConfig;
use crate::domain::RegionSource;

const USER_AGENT: &str = "statemaps/0.1.0";

/// A GeoJSON position: `[lng, lat]`, optionally followed by altitude
type Position = Vec<f64>;

/// Features stay untyped until each is read on its own, so one bad
/// feature cannot fail the whole document
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

fn to_coord(position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        [_, _, ..] => bail!("non-finite position {:?}", position),
        _ => bail!("position needs at least 2 values, got {}", position.len()),
    }
}

fn to_line(positions: &[Position]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|p| to_coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn to_polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>> {
    let mut lines = rings.iter().map(|r| to_line(r));
    let exterior = lines.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = lines.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

impl GeoJsonGeometry {
    pub fn to_geo(&self) -> Result<Geometry<f64>> {
        Ok(match self {
            Self::Point { coordinates } => Geometry::Point(Point(to_coord(coordinates)?)),
            Self::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint::new(
                coordinates
                    .iter()
                    .map(|p| to_coord(p).map(Point))
                    .collect::<Result<_>>()?,
            )),
            Self::LineString { coordinates } => Geometry::LineString(to_line(coordinates)?),
            Self::MultiLineString { coordinates } => Geometry::MultiLineString(
                MultiLineString::new(coordinates.iter().map(|l| to_line(l)).collect::<Result<_>>()?),
            ),
            Self::Polygon { coordinates } => Geometry::Polygon(to_polygon(coordinates)?),
            Self::MultiPolygon { coordinates } => Geometry::MultiPolygon(MultiPolygon::new(
                coordinates
                    .iter()
                    .map(|p| to_polygon(p))
                    .collect::<Result<_>>()?,
            )),
            Self::GeometryCollection { geometries } => {
                let members = geometries
                    .iter()
                    .map(GeoJsonGeometry::to_geo)
                    .collect::<Result<Vec<_>>>()?;
                Geometry::GeometryCollection(members.into_iter().collect::<GeometryCollection<f64>>())
            }
        })
    }
}

/// Turn a GeoJSON feature collection into named regions
///
/// The region name is read from `name_property`. Features without a name,
/// without geometry, with an unknown geometry type, or with malformed
/// coordinates are skipped with a warning. Known non-polygon types are
/// kept and rejected later, per region, by the ring extractor.
///
/// Only a document that is not a feature collection at all is an error.
pub fn parse_regions(json: &str, name_property: &str) -> Result<Vec<RegionSource>> {
    let collection: FeatureCollection =
        serde_json::from_str(json).context("Failed to parse GeoJSON feature collection")?;

    let mut regions = Vec::with_capacity(collection.features.len());

    for (index, raw) in collection.features.into_iter().enumerate() {
        let feature: Feature = match serde_json::from_value(raw) {
            Ok(feature) => feature,
            Err(e) => {
                warn!("Feature {} is not a valid GeoJSON feature, skipping: {}", index, e);
                continue;
            }
        };

        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(name_property))
            .and_then(Value::as_str);

        let Some(name) = name else {
            warn!("Feature {} has no '{}' property, skipping", index, name_property);
            continue;
        };

        let Some(geometry) = feature.geometry else {
            warn!("Feature '{}' has no geometry, skipping", name);
            continue;
        };

        let geometry = serde_json::from_value::<GeoJsonGeometry>(geometry)
            .context("unreadable geometry object")
            .and_then(|geometry| geometry.to_geo());

        match geometry {
            Ok(geometry) => regions.push(RegionSource::new(name, geometry)),
            Err(e) => warn!("Feature '{}' has malformed geometry, skipping: {}", name, e),
        }
    }

    Ok(regions)
}

/// Download the raw GeoJSON document for `source`
///
/// Retries on 429 and 502-504 with a linear back-off; any other non-200
/// status fails immediately.
pub fn fetch_geojson(source: &SourceConfig) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(source.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let max_attempts = source.max_retries.max(1);
    let mut last_error = None;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            let wait_secs = source.retry_backoff_secs * attempt as u64;
            warn!(
                "Geometry source busy, retrying in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                max_attempts
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        let response = client
            .get(&source.url)
            .send()
            .with_context(|| format!("Failed to send request to {}", source.url))?;

        match response.status().as_u16() {
            200 => {
                return response
                    .text()
                    .context("Failed to read geometry response body");
            }
            429 | 502 | 503 | 504 => {
                last_error = Some(format!(
                    "{} returned status {} (attempt {})",
                    source.url,
                    response.status(),
                    attempt + 1
                ));
                continue;
            }
            status => {
                bail!("{} returned error status: {}", source.url, status);
            }
        }
    }

    bail!(
        "Geometry download failed after {} attempts: {}",
        max_attempts,
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}
