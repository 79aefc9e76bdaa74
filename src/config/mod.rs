use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geometry::{Canvas, RingSelection};
use crate::pipeline::DEFAULT_SIMPLIFY_BUDGET;
use crate::render::MarkerStyle;

/// US state polygons, one feature per state, region name in `name`
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

fn default_simplify_budget() -> usize {
    DEFAULT_SIMPLIFY_BUDGET
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default = "default_simplify_budget")]
    pub simplify_budget: usize,
    #[serde(default)]
    pub outline_budget: Option<usize>,
    #[serde(default)]
    pub ring_selection: RingSelection,
    #[serde(default)]
    pub markers: MarkerStyle,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub source: SourceConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            simplify_budget: default_simplify_budget(),
            outline_budget: None,
            ring_selection: RingSelection::default(),
            markers: MarkerStyle::default(),
            verbose: false,
            source: SourceConfig::default(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("statemaps"))
        .unwrap_or_else(|| PathBuf::from(".statemaps-cache"))
}

fn default_name_property() -> String {
    "name".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_secs() -> u64 {
    5
}

/// Where region geometry comes from
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Feature property holding the region name
    #[serde(default = "default_name_property")]
    pub name_property: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait before retry `n` is `n * retry_backoff_secs`
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            cache_dir: default_cache_dir(),
            name_property: default_name_property(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

impl FileConfig {
    /// First parseable config file from the search path, if any
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("statemaps.toml"));
    paths.push(PathBuf::from(".statemaps.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("statemaps").join("config.toml"));
        paths.push(config_dir.join("statemaps.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".statemaps.toml"));
    }

    paths
}
