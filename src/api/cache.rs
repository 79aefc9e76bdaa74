use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use super::fetch_geojson;
use crate::config::SourceConfig;

/// File the download for `source` is cached under
///
/// Named after the last path segment of the URL.
pub fn cache_path(source: &SourceConfig) -> PathBuf {
    let name = source
        .url
        .split(['?', '#'])
        .next()
        .and_then(|url| url.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("source.geojson");

    source.cache_dir.join(name)
}

/// Raw GeoJSON for `source`, from the cache when present
///
/// `refresh` forces a new download. A fresh download is written back to the
/// cache before it is returned.
pub fn load_source(source: &SourceConfig, refresh: bool) -> Result<String> {
    let path = cache_path(source);

    if !refresh && path.exists() {
        info!("Using cached geometry: {}", path.display());
        return fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached geometry: {}", path.display()));
    }

    let body = fetch_geojson(source)?;

    fs::create_dir_all(&source.cache_dir).with_context(|| {
        format!(
            "Failed to create cache directory: {}",
            source.cache_dir.display()
        )
    })?;
    fs::write(&path, &body)
        .with_context(|| format!("Failed to write geometry cache: {}", path.display()))?;

    Ok(body)
}
