//! Application discovery under the catalog root.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// List application directories under `root`, sorted by name so a run
/// processes them in a stable order on every filesystem.
pub fn discover_apps(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("failed to read catalog root {}", root.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    Ok(dirs)
}
