//! Assembling frames into a timed, looping animation.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame as GifFrame};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::compositor::Frame;
use crate::error::{AnimError, AnimResult};

/// Palette quantization speed passed to the GIF encoder (1 = best, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// A finished animation: ordered frames at a constant rate.
#[derive(Debug, Clone)]
pub struct AnimationArtifact {
    frames: Vec<Frame>,
    fps: u32,
}

impl AnimationArtifact {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Display time of one frame, `1 / fps`.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Play time of one loop, `frames / fps`.
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames.len() as f64 / f64::from(self.fps))
    }

    /// Per-frame delay as stored in the GIF, in hundredths of a second.
    ///
    /// GIF delays are whole centiseconds, so rates that do not divide 100 are
    /// rounded to the nearest representable delay.
    pub fn gif_delay_centis(&self) -> u16 {
        let centis = (100.0 / f64::from(self.fps)).round();
        centis.clamp(1.0, f64::from(u16::MAX)) as u16
    }

    /// Encode as an infinitely looping GIF into `writer`.
    pub fn encode_gif<W: Write>(&self, writer: W) -> AnimResult<()> {
        let delay = Delay::from_numer_denom_ms(u32::from(self.gif_delay_centis()) * 10, 1);
        let mut encoder = GifEncoder::new_with_speed(writer, GIF_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(
            self.frames
                .iter()
                .map(|frame| GifFrame::from_parts(frame.image().clone(), 0, 0, delay)),
        )?;
        Ok(())
    }

    /// Encode into an in-memory GIF.
    pub fn to_gif_bytes(&self) -> AnimResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_gif(&mut buf)?;
        Ok(buf)
    }

    /// Encode and write to `path`, returning the number of bytes written.
    ///
    /// The GIF is written to a temporary file next to `path` and renamed
    /// into place, so `path` either holds the complete animation or is left
    /// untouched.
    pub fn write_gif(&self, path: &Path) -> AnimResult<usize> {
        let bytes = self.to_gif_bytes()?;
        let io_err = |source: std::io::Error| AnimError::Io {
            path: path.display().to_string(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
        staged.write_all(&bytes).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged.persist(path).map_err(|e| io_err(e.error))?;

        info!(
            "Wrote {} ({} frames, {} bytes)",
            path.display(),
            self.frames.len(),
            bytes.len()
        );
        Ok(bytes.len())
    }
}

/// Packs rendered frames into an [`AnimationArtifact`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationAssembler;

impl AnimationAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Check the rate and frame list and build the artifact.
    ///
    /// Frames keep their order. `fps` must be at least 1.
    pub fn assemble(&self, frames: Vec<Frame>, fps: u32) -> AnimResult<AnimationArtifact> {
        if fps == 0 {
            return Err(AnimError::InvalidRate(fps));
        }
        if frames.is_empty() {
            return Err(AnimError::EmptyAnimation);
        }
        debug!("Assembled {} frames at {} fps", frames.len(), fps);
        Ok(AnimationArtifact { frames, fps })
    }
}
