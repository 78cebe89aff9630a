//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - measurement counts as readout-pulse animations",
        style("qshots").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qshots-device  Device catalog, layouts and backdrops");
    println!("  qshots-render  Shot expansion, compositing and GIF assembly");
    println!("  qshots-cli     Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
