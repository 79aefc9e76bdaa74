pub mod boundaries;
pub mod maps;

pub use boundaries::{BoundaryFormat, render_boundaries_json, render_boundaries_ts, write_boundaries};
pub use maps::{METROS_FILE_NAME, write_metros_json, write_state_maps};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write `contents` to `path`, creating parent directories as needed
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
