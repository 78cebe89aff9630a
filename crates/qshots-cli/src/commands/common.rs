//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use qshots_device::{BackendDescriptor, DeviceLayoutRegistry};
use qshots_render::CountsTable;

/// Load a counts table from a JSON object file (`{"000": 510, "111": 514}`).
pub fn load_counts(path: &str) -> Result<CountsTable> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    CountsTable::from_json(&source).with_context(|| format!("Invalid counts in {path}"))
}

/// Load a backend descriptor from a JSON file.
pub fn load_backend(path: &str) -> Result<BackendDescriptor> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    BackendDescriptor::from_json(&source)
        .with_context(|| format!("Invalid backend descriptor in {path}"))
}

/// Build the device registry, decoding backdrops from `resources` if given.
pub fn load_registry(resources: Option<&Path>) -> Result<DeviceLayoutRegistry> {
    match resources {
        Some(dir) => DeviceLayoutRegistry::with_resources(dir)
            .with_context(|| format!("Failed to load backdrops from {}", dir.display())),
        None => Ok(DeviceLayoutRegistry::builtin()),
    }
}
