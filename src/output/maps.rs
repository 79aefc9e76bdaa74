use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::write_text;
use crate::domain::MetroTable;
use crate::pipeline::StateMap;

pub const METROS_FILE_NAME: &str = "metros_data.json";

/// Write one `<slug>.svg` per map into `dir`
///
/// # Returns
/// * Paths written, in the order of `maps`
pub fn write_state_maps(dir: &Path, maps: &[StateMap]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(maps.len());

    for map in maps {
        let path = dir.join(format!("{}.svg", map.slug));
        write_text(&path, &map.to_svg())?;
        written.push(path);
    }

    Ok(written)
}

/// Dump the metro table used for the maps next to them
pub fn write_metros_json(dir: &Path, metros: &MetroTable) -> Result<PathBuf> {
    let path = dir.join(METROS_FILE_NAME);
    let json = serde_json::to_string_pretty(metros).context("Failed to serialize metro table")?;
    write_text(&path, &json)?;
    Ok(path)
}
