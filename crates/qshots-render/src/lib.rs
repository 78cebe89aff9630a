//! `qshots-render` - measurement counts as readout-pulse animations.
//!
//! Turns an aggregated counts table into a looping GIF in which every frame
//! is one shot: each qubit that read 1 flashes a microwave pulse over its
//! readout resonator on a device backdrop.
//!
//! The pipeline:
//!
//! - [`CountsTable`] validates the outcome histogram.
//! - [`ShotSequenceBuilder`] expands it into one [`ShotEvent`] per shot,
//!   shuffled (optionally seeded) or grouped.
//! - [`PulseStyle`] validates color, intensity and labels.
//! - [`FrameCompositor`] blends pulse overlays onto the backdrop, frames in
//!   parallel with order preserved.
//! - [`AnimationAssembler`] packs the frames into an [`AnimationArtifact`]
//!   with a constant `1 / fps` delay.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use qshots_device::DeviceLayoutRegistry;
//! use qshots_render::{AnimationOptions, CountsTable, save_quantum_animation};
//!
//! let registry = DeviceLayoutRegistry::builtin();
//! let counts = CountsTable::from_pairs([("000", 510), ("111", 514)]).unwrap();
//!
//! let ok = save_quantum_animation(
//!     &registry,
//!     "ghz.gif",
//!     "gate",
//!     3,
//!     &counts,
//!     &"sparrow".into(),
//!     &AnimationOptions::default(),
//! );
//! assert!(ok);
//! ```

pub mod animate;
pub mod assembler;
pub mod compositor;
pub mod counts;
pub mod error;
mod glyph;
pub mod shots;
pub mod style;

pub use animate::{
    AnimationOptions, AnimationPlan, Animator, SampleSelector, SaveReport, get_sample,
    get_supported_samples, save_quantum_animation, save_with_progress,
    try_save_quantum_animation,
};
pub use assembler::{AnimationArtifact, AnimationAssembler};
pub use compositor::{DEFAULT_GLOW, Frame, FrameCompositor, PulseMark};
pub use counts::{BitOrder, CountsTable};
pub use error::{AnimError, AnimResult, ErrorCategory};
pub use shots::{ShotEvent, ShotOrder, ShotSequenceBuilder};
pub use style::{PulseColor, PulseStyle};
