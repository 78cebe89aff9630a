//! Render command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qshots_device::CircuitDescriptor;
use qshots_render::{Animator, FrameCompositor, SampleSelector, ShotOrder, get_sample};
use tracing::debug;

use super::common::{load_backend, load_counts, load_registry};
use crate::config::RenderConfig;

/// Arguments of `qshots render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output GIF file
    #[arg(short, long)]
    pub output: String,

    /// Counts file (JSON object of bitstring to frequency)
    #[arg(short, long)]
    pub counts: String,

    /// Backdrop kind (gate, xray)
    #[arg(short, long, default_value = "gate")]
    pub kind: String,

    /// Device sample name or backend alias
    #[arg(short, long, conflicts_with = "backend")]
    pub sample: Option<String>,

    /// Backend descriptor (JSON) to auto-select a sample from
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Circuit width for auto-selection (defaults to the counts width)
    #[arg(short, long, requires = "backend")]
    pub qubits: Option<usize>,

    /// Frames (shots) per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Pulse color
    #[arg(long)]
    pub color: Option<String>,

    /// Pulse intensity (0.1-1.0)
    #[arg(long)]
    pub intensity: Option<f32>,

    /// Halo width around each pulse, in pixels
    #[arg(long)]
    pub glow: Option<f32>,

    /// Label resonators (xray only)
    #[arg(long)]
    pub labeled: bool,

    /// Seed for the shot shuffle
    #[arg(long, conflicts_with = "grouped")]
    pub seed: Option<u64>,

    /// Play outcomes grouped in key order instead of shuffled
    #[arg(long)]
    pub grouped: bool,

    /// Scale counts down to at most this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Render frames on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Configuration file (YAML)
    #[arg(long)]
    pub config: Option<String>,

    /// Directory with backdrop PNGs
    #[arg(long)]
    pub resources: Option<String>,
}

impl RenderArgs {
    /// Apply command-line flags on top of the loaded configuration.
    fn merge_into(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(color) = &self.color {
            config.color.clone_from(color);
        }
        if let Some(intensity) = self.intensity {
            config.intensity = intensity;
        }
        if let Some(glow) = self.glow {
            config.glow = glow;
        }
        if self.labeled {
            config.labeled = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.max_frames.is_some() {
            config.max_frames = self.max_frames;
        }
        if self.sequential {
            config.parallel = false;
        }
        if let Some(dir) = &self.resources {
            config.resources = Some(dir.into());
        }
        config
    }
}

/// Execute the render command.
pub fn execute(args: &RenderArgs) -> Result<()> {
    let config = args.merge_into(RenderConfig::load(args.config.as_deref())?);
    config.validate()?;
    debug!("Effective render configuration: {:?}", config);
    let counts = load_counts(&args.counts)?;
    let registry = load_registry(config.resources.as_deref())?;

    println!(
        "{} Rendering {} ({} shots, {} qubits)",
        style("→").cyan().bold(),
        style(&args.counts).green(),
        counts.total_shots(),
        counts.num_qubits()
    );

    let selector = match (&args.sample, &args.backend) {
        (Some(name), _) => SampleSelector::Named(name.clone()),
        (None, Some(path)) => {
            let backend = load_backend(path)?;
            match args.qubits {
                Some(qubits) => {
                    let name = get_sample(&registry, &backend, &CircuitDescriptor::new(qubits))?;
                    SampleSelector::Named(name.to_string())
                }
                None => SampleSelector::Auto { backend },
            }
        }
        (None, None) => anyhow::bail!("Either --sample or --backend is required"),
    };

    let mut options = config.to_options();
    if args.grouped {
        options.order = ShotOrder::Grouped;
    }

    let animator = Animator::new(&registry);
    let plan = animator.plan(&args.kind, config.fps, &counts, &selector, &options)?;
    println!(
        "  Sample: {} ({}), {} frames at {} fps",
        style(plan.sample().name()).yellow(),
        plan.kind(),
        plan.frame_count(),
        plan.fps()
    );

    let bar = ProgressBar::new(plan.frame_count() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.cyan/blue} {pos}/{len} frames ({eta})")
            .context("Invalid progress bar template")?,
    );
    let compositor = FrameCompositor::new()
        .with_glow(options.glow)
        .with_parallel(options.parallel);
    let artifact = animator.render(&plan, &compositor, &|| bar.inc(1))?;
    bar.finish_and_clear();

    let bytes = artifact.write_gif(Path::new(&args.output))?;

    println!(
        "\n{} Wrote {} ({} frames, {:.1}s loop, {} KiB)",
        style("✓").green().bold(),
        style(&args.output).green(),
        artifact.frame_count(),
        artifact.total_duration().as_secs_f64(),
        bytes.div_ceil(1024)
    );

    Ok(())
}
