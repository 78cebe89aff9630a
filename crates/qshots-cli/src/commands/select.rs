//! Select command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qshots_device::{BackendDescriptor, CircuitDescriptor};
use qshots_render::get_sample;

use super::common::{load_backend, load_registry};

/// Execute the select command.
pub fn execute(qubits: usize, backend: Option<&str>, resources: Option<&str>) -> Result<()> {
    let registry = load_registry(resources.map(Path::new))?;
    let backend = match backend {
        Some(path) => load_backend(path)?,
        None => BackendDescriptor::simulator("simulator"),
    };

    let name = get_sample(&registry, &backend, &CircuitDescriptor::new(qubits))?;
    let sample = registry.resolve(name)?;

    println!(
        "{} {} ({} qubits) for {} on {}",
        style("→").cyan().bold(),
        style(name).green().bold(),
        sample.capacity(),
        qubits,
        style(&backend.name).yellow()
    );

    Ok(())
}
