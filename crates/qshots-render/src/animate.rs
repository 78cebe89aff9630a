//! End-to-end animation entry points.
//!
//! [`Animator`] runs the whole pipeline against an injected
//! [`DeviceLayoutRegistry`]: every input is validated by
//! [`Animator::plan`] before a single frame is drawn, and
//! [`try_save_quantum_animation`] only touches the filesystem once the GIF
//! is fully encoded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use qshots_device::{
    BackdropKind, BackendDescriptor, CircuitDescriptor, DeviceLayoutRegistry, DeviceSample,
    Layout, SampleNames,
};
use tracing::{debug, error, info};

use crate::assembler::{AnimationArtifact, AnimationAssembler};
use crate::compositor::{DEFAULT_GLOW, Frame, FrameCompositor};
use crate::counts::{BitOrder, CountsTable};
use crate::error::{AnimError, AnimResult};
use crate::shots::{ShotEvent, ShotOrder, ShotSequenceBuilder};
use crate::style::PulseStyle;

/// Which device sample to draw on.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSelector {
    /// A sample name or backend alias.
    Named(String),
    /// Let the registry pick a sample for this backend, sized to the counts.
    Auto { backend: BackendDescriptor },
}

impl From<&str> for SampleSelector {
    fn from(name: &str) -> Self {
        SampleSelector::Named(name.to_string())
    }
}

impl From<String> for SampleSelector {
    fn from(name: String) -> Self {
        SampleSelector::Named(name)
    }
}

impl From<BackendDescriptor> for SampleSelector {
    fn from(backend: BackendDescriptor) -> Self {
        SampleSelector::Auto { backend }
    }
}

/// Optional knobs of an animation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationOptions {
    /// Draw resonator labels. Ignored on gate maps.
    pub labeled: bool,
    pub color: String,
    pub intensity: f32,
    pub order: ShotOrder,
    pub bit_order: BitOrder,
    /// Scale the counts down to at most this many frames.
    pub max_frames: Option<u64>,
    /// Halo width around each pulse, in pixels.
    pub glow: f32,
    pub parallel: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            labeled: false,
            color: "white".to_string(),
            intensity: 0.5,
            order: ShotOrder::default(),
            bit_order: BitOrder::default(),
            max_frames: None,
            glow: DEFAULT_GLOW,
            parallel: true,
        }
    }
}

/// A validated animation, ready to render.
#[derive(Debug, Clone)]
pub struct AnimationPlan<'r> {
    sample: &'r DeviceSample,
    layout: &'r Layout,
    kind: BackdropKind,
    style: PulseStyle,
    events: Vec<ShotEvent>,
    fps: u32,
}

impl<'r> AnimationPlan<'r> {
    pub fn sample(&self) -> &'r DeviceSample {
        self.sample
    }

    pub fn layout(&self) -> &'r Layout {
        self.layout
    }

    pub fn kind(&self) -> BackdropKind {
        self.kind
    }

    pub fn style(&self) -> &PulseStyle {
        &self.style
    }

    pub fn events(&self) -> &[ShotEvent] {
        &self.events
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Number of frames the animation will have.
    pub fn frame_count(&self) -> usize {
        self.events.len()
    }
}

/// Runs counts → shots → frames → artifact.
#[derive(Debug, Clone)]
pub struct Animator<'r> {
    registry: &'r DeviceLayoutRegistry,
    assembler: AnimationAssembler,
}

impl<'r> Animator<'r> {
    pub fn new(registry: &'r DeviceLayoutRegistry) -> Self {
        Self {
            registry,
            assembler: AnimationAssembler::new(),
        }
    }

    pub fn registry(&self) -> &'r DeviceLayoutRegistry {
        self.registry
    }

    /// Validate every input and expand the shots.
    ///
    /// Checks run in this order: backdrop kind, frame rate, sample lookup,
    /// device capacity, style, then shot expansion.
    pub fn plan(
        &self,
        kind: &str,
        fps: u32,
        counts: &CountsTable,
        sample: &SampleSelector,
        options: &AnimationOptions,
    ) -> AnimResult<AnimationPlan<'r>> {
        let kind: BackdropKind = kind.parse()?;
        if fps == 0 {
            return Err(AnimError::InvalidRate(fps));
        }

        let compacted;
        let counts = match options.max_frames {
            Some(max) if counts.total_shots() > max => {
                compacted = counts.compact(max);
                info!(
                    "Compacted {} shots to {} frames",
                    counts.total_shots(),
                    compacted.total_shots()
                );
                &compacted
            }
            _ => counts,
        };

        let qubits = counts.num_qubits();
        let sample = match sample {
            SampleSelector::Named(name) => self.registry.resolve(name)?,
            SampleSelector::Auto { backend } => self
                .registry
                .auto_select(backend, &CircuitDescriptor::new(qubits))?,
        };
        let layout = sample.layout_for(kind, qubits)?;

        // Labels only exist on x-rays; on gate maps the flag is ignored.
        let labeled = options.labeled && kind == BackdropKind::Xray;
        let style = PulseStyle::validate(
            &options.color,
            options.intensity,
            labeled,
            layout.supports_labels(),
        )?;

        let events = ShotSequenceBuilder::new()
            .with_order(options.order)
            .with_bit_order(options.bit_order)
            .expand(counts)?;

        debug!(
            "Planned {} frames on {} ({}) at {} fps",
            events.len(),
            sample.name(),
            kind,
            fps
        );
        Ok(AnimationPlan {
            sample,
            layout,
            kind,
            style,
            events,
            fps,
        })
    }

    /// Render and assemble a plan.
    pub fn render(
        &self,
        plan: &AnimationPlan<'_>,
        compositor: &FrameCompositor,
        progress: &(dyn Fn() + Sync),
    ) -> AnimResult<AnimationArtifact> {
        let started = Instant::now();
        let frames =
            compositor.render_all_with_progress(&plan.events, plan.layout, &plan.style, progress)?;
        debug!("Rendered {} frames in {:?}", frames.len(), started.elapsed());
        self.assembler.assemble(frames, plan.fps)
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub path: PathBuf,
    pub sample: String,
    pub kind: BackdropKind,
    pub frames: usize,
    pub fps: u32,
    pub frame_delay: Duration,
    /// Pulse overlays drawn across all frames.
    pub pulses: usize,
    pub bytes: usize,
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} frames of {} ({}) at {} fps, {} pulses, {} bytes",
            self.path.display(),
            self.frames,
            self.sample,
            self.kind,
            self.fps,
            self.pulses,
            self.bytes
        )
    }
}

/// Build an animation and write it to `filename` as a looping GIF.
///
/// No file is created unless every step succeeds.
pub fn try_save_quantum_animation(
    registry: &DeviceLayoutRegistry,
    filename: impl AsRef<Path>,
    kind: &str,
    fps: u32,
    counts: &CountsTable,
    sample: &SampleSelector,
    options: &AnimationOptions,
) -> AnimResult<SaveReport> {
    save_with_progress(registry, filename, kind, fps, counts, sample, options, &|| {})
}

/// [`try_save_quantum_animation`] with a per-frame progress callback.
#[allow(clippy::too_many_arguments)]
pub fn save_with_progress(
    registry: &DeviceLayoutRegistry,
    filename: impl AsRef<Path>,
    kind: &str,
    fps: u32,
    counts: &CountsTable,
    sample: &SampleSelector,
    options: &AnimationOptions,
    progress: &(dyn Fn() + Sync),
) -> AnimResult<SaveReport> {
    let path = filename.as_ref();
    let animator = Animator::new(registry);
    let plan = animator.plan(kind, fps, counts, sample, options)?;
    let compositor = FrameCompositor::new()
        .with_glow(options.glow)
        .with_parallel(options.parallel);
    let artifact = animator.render(&plan, &compositor, progress)?;
    let bytes = artifact.write_gif(path)?;

    Ok(SaveReport {
        path: path.to_path_buf(),
        sample: plan.sample().name().to_string(),
        kind: plan.kind(),
        frames: artifact.frame_count(),
        fps: artifact.fps(),
        frame_delay: artifact.frame_delay(),
        pulses: artifact.frames().iter().map(Frame::pulse_count).sum(),
        bytes,
    })
}

/// Build an animation and write it to `filename`, reporting success.
///
/// Failures are logged; use [`try_save_quantum_animation`] to get the error.
pub fn save_quantum_animation(
    registry: &DeviceLayoutRegistry,
    filename: impl AsRef<Path>,
    kind: &str,
    fps: u32,
    counts: &CountsTable,
    sample: &SampleSelector,
    options: &AnimationOptions,
) -> bool {
    match try_save_quantum_animation(registry, &filename, kind, fps, counts, sample, options) {
        Ok(report) => {
            info!("{report}");
            true
        }
        Err(e) => {
            error!(
                "Failed to save {} ({} error): {e}",
                filename.as_ref().display(),
                e.category()
            );
            false
        }
    }
}

/// Names of every sample in the catalog, in priority order.
pub fn get_supported_samples(registry: &DeviceLayoutRegistry) -> SampleNames<'_> {
    registry.list_samples()
}

/// Name of the sample auto-selected for a backend/circuit pair.
pub fn get_sample<'r>(
    registry: &'r DeviceLayoutRegistry,
    backend: &BackendDescriptor,
    circuit: &CircuitDescriptor,
) -> AnimResult<&'r str> {
    Ok(registry.auto_select(backend, circuit)?.name())
}
