//! qshots Command-Line Interface
//!
//! Renders measurement counts as looping GIFs of readout pulses on a device
//! backdrop.
//!
//! ```text
//!   ┌───┐     ┌───┐     ┌───┐
//!   │ 0 │─────│ 1 │─────│ 2 │   ~~~> 0 1 1
//!   └───┘     └───┘     └───┘
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{render, samples, select, version};

/// qshots - measurement counts as readout-pulse animations
#[derive(Parser)]
#[command(name = "qshots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render counts into an animated GIF
    Render(render::RenderArgs),

    /// List supported device samples
    Samples,

    /// Show which sample would be auto-selected
    Select {
        /// Number of measured qubits
        #[arg(short, long)]
        qubits: usize,

        /// Backend descriptor (JSON); treated as a simulator if omitted
        #[arg(short, long)]
        backend: Option<String>,

        /// Directory with backdrop PNGs
        #[arg(long, env = "QSHOTS_RESOURCES")]
        resources: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Render(args) => render::execute(&args),

        Commands::Samples => samples::execute(),

        Commands::Select {
            qubits,
            backend,
            resources,
        } => select::execute(qubits, backend.as_deref(), resources.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
