//! Per-region batch driver.
//!
//! Each region runs extract -> simplify -> project -> assemble on its own,
//! so regions are mapped in parallel and collected back in input order. A
//! region that fails is recorded with its reason and the batch carries on.

use geo::Coord;
use log::{debug, warn};
use rayon::prelude::*;

use crate::domain::{BoundaryRecord, LatLng, MetroMarker, MetroTable, RegionSource};
use crate::error::RegionError;
use crate::geometry::{
    Bounds, Canvas, ProjectionTransform, RingSelection, decimate_ring, exterior_rings,
    representative_ring,
};
use crate::render::{MarkerStyle, PathCommand, PlacedMarker, assemble_path, layout_markers, to_svg};

pub const DEFAULT_SIMPLIFY_BUDGET: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct BoundaryOptions {
    /// Maximum sampled points per ring, before the closing point
    pub budget: usize,
    pub selection: RingSelection,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            budget: DEFAULT_SIMPLIFY_BUDGET,
            selection: RingSelection::VertexCount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MapOptions {
    pub canvas: Canvas,
    pub markers: MarkerStyle,
    /// Decimate outline rings to this budget; `None` draws every vertex
    pub outline_budget: Option<usize>,
}

/// A region that was left out, and why
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub region: String,
    pub reason: RegionError,
}

/// Everything a batch produced
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub items: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> BatchOutcome<T> {
    pub fn processed(&self) -> usize {
        self.items.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} skipped",
            self.items.len(),
            self.skipped.len()
        )
    }
}

/// Rendered data for one region's map
#[derive(Debug, Clone)]
pub struct StateMap {
    pub slug: String,
    pub canvas: Canvas,
    pub transform: ProjectionTransform,
    pub outline: Vec<PathCommand>,
    pub markers: Vec<PlacedMarker>,
}

impl StateMap {
    pub fn to_svg(&self) -> String {
        to_svg(&self.canvas, &self.outline, &self.markers)
    }
}

/// Simplified representative ring of one region, as (lat, lng) points
pub fn build_boundary(
    region: &RegionSource,
    options: &BoundaryOptions,
) -> Result<BoundaryRecord, RegionError> {
    let ring = representative_ring(&region.geometry, options.selection)?;
    let simplified = decimate_ring(&ring.0, options.budget);

    debug!(
        "{}: {} -> {} boundary points",
        region.name,
        ring.0.len(),
        simplified.len()
    );

    Ok(BoundaryRecord::new(
        region.slug(),
        simplified.into_iter().map(LatLng::from).collect(),
    ))
}

/// Outline path and metro markers of one region on the configured canvas
///
/// The transform is fitted to the bounds of the full geometry, so every
/// member polygon and every marker shares it.
pub fn build_state_map(
    region: &RegionSource,
    metros: &[MetroMarker],
    options: &MapOptions,
) -> Result<StateMap, RegionError> {
    if metros.is_empty() {
        return Err(RegionError::MissingMarkerData);
    }

    let exteriors = exterior_rings(&region.geometry)?;
    let bounds = Bounds::of_geometry(&region.geometry).ok_or_else(|| {
        RegionError::DegenerateGeometry("geometry has no bounding box".to_string())
    })?;
    let transform = ProjectionTransform::fit(&bounds, &options.canvas)?;

    let rings: Vec<Vec<Coord<f64>>> = exteriors
        .iter()
        .map(|ring| match options.outline_budget {
            Some(budget) => decimate_ring(&ring.0, budget),
            None => ring.0.clone(),
        })
        .collect();

    let outline = assemble_path(rings.iter().map(Vec::as_slice), &transform);
    let markers = layout_markers(metros, &transform, &options.markers);

    debug!(
        "{}: {} rings, scale {:.3}, {} markers",
        region.name,
        rings.len(),
        transform.scale(),
        markers.len()
    );

    Ok(StateMap {
        slug: region.slug(),
        canvas: options.canvas,
        transform,
        outline,
        markers,
    })
}

pub fn build_boundaries(
    regions: &[RegionSource],
    options: &BoundaryOptions,
) -> BatchOutcome<BoundaryRecord> {
    run_batch(regions, |region| build_boundary(region, options))
}

pub fn build_state_maps(
    regions: &[RegionSource],
    metros: &MetroTable,
    options: &MapOptions,
) -> BatchOutcome<StateMap> {
    run_batch(regions, |region| {
        let markers = metros.get(&region.slug()).unwrap_or_default();
        build_state_map(region, markers, options)
    })
}

fn run_batch<T, F>(regions: &[RegionSource], build: F) -> BatchOutcome<T>
where
    T: Send,
    F: Fn(&RegionSource) -> Result<T, RegionError> + Sync,
{
    let results: Vec<Result<T, RegionError>> = regions.par_iter().map(&build).collect();

    let mut items = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();

    for (region, result) in regions.iter().zip(results) {
        match result {
            Ok(item) => items.push(item),
            Err(reason) => {
                warn!("Skipping {}: {}", region.name, reason);
                skipped.push(Skipped {
                    region: region.name.clone(),
                    reason,
                });
            }
        }
    }

    BatchOutcome { items, skipped }
}
