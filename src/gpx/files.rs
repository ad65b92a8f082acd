use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expand command-line inputs into the GPX files to process
///
/// Files are passed through as given. Directories contribute every `*.gpx`
/// file directly inside them (extension matched case-insensitively), sorted
/// by name. Missing paths are an error.
pub fn collect_gpx_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = gpx_files_in(input)?;
            if found.is_empty() {
                log::warn!("No GPX files found in {}", input.display());
            }
            files.append(&mut found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            anyhow::bail!("Input not found: {}", input.display());
        }
    }

    Ok(files)
}

fn gpx_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .path();
        if path.is_file() && is_gpx(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_gpx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
}
