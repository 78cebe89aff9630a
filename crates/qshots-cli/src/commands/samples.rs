//! Samples command implementation.

use anyhow::Result;
use console::style;

use qshots_device::{BackdropKind, DeviceLayoutRegistry};
use qshots_render::get_supported_samples;

/// Execute the samples command.
pub fn execute() -> Result<()> {
    let registry = DeviceLayoutRegistry::builtin();

    println!(
        "{} Supported samples ({}):\n",
        style("qshots").cyan().bold(),
        registry.len()
    );

    for name in get_supported_samples(&registry) {
        let sample = registry.resolve(name)?;
        let xray = sample.supports(BackdropKind::Xray);

        println!(
            "  {} {} ({} qubits)",
            if xray {
                style("●").green()
            } else {
                style("○").dim()
            },
            style(name).bold(),
            sample.capacity()
        );
        println!(
            "    Kinds: gate{}",
            if xray { ", xray (labels)" } else { "" }
        );
        if !sample.aliases().is_empty() {
            println!("    Aliases: {}", sample.aliases().join(", "));
        }
        println!();
    }

    Ok(())
}
