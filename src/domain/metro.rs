use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::slugify;

const BUILTIN_METROS: &str = include_str!("../../data/metros.json");

/// A metro area drawn as a dot on a state map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroMarker {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// 1 = largest metro in the region
    pub rank: u32,
}

impl MetroMarker {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, rank: u32) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            rank,
        }
    }
}

/// Read-only lookup from region slug to its ordered metro markers
///
/// Loaded once at startup and shared by reference for the whole run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MetroTable {
    regions: BTreeMap<String, Vec<MetroMarker>>,
}

impl MetroTable {
    /// The table shipped with the crate (50 states plus DC)
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_METROS).context("Built-in metro table is invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metro table: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to load metro table: {}", path.display()))
    }

    /// Parse a `{ "region": [{ name, lat, lng, rank }, ...] }` document
    ///
    /// Keys are normalized with [`slugify`]. Ranks must be at least 1 and
    /// coordinates must be finite.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<MetroMarker>> =
            serde_json::from_str(json).context("Failed to parse metro table JSON")?;

        let mut regions = BTreeMap::new();
        for (key, markers) in raw {
            for m in &markers {
                if m.rank == 0 {
                    bail!("Metro '{}' in '{}' has rank 0 (ranks start at 1)", m.name, key);
                }
                if !m.lat.is_finite() || !m.lng.is_finite() {
                    bail!("Metro '{}' in '{}' has non-finite coordinates", m.name, key);
                }
            }
            regions.insert(slugify(&key), markers);
        }

        Ok(Self { regions })
    }

    pub fn insert(&mut self, slug: impl Into<String>, markers: Vec<MetroMarker>) {
        self.regions.insert(slug.into(), markers);
    }

    /// Markers for a region, or `None` when the region has no entry or an
    /// empty one
    pub fn get(&self, slug: &str) -> Option<&[MetroMarker]> {
        self.regions
            .get(slug)
            .map(Vec::as_slice)
            .filter(|m| !m.is_empty())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
