//! Frame compositing.
//!
//! A frame is the layout's backdrop with a translucent glow drawn over every
//! resonator whose qubit read 1. Overlays are blended in ascending qubit
//! order onto a private copy of the backdrop.

use image::{Rgba, RgbaImage};
use qshots_device::{Layout, Point, PulseShape};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{AnimError, AnimResult};
use crate::glyph;
use crate::shots::ShotEvent;
use crate::style::PulseStyle;

/// Peak opacity of the halo just outside a marker, before intensity.
const HALO_PEAK: f32 = 0.35;
const LABEL_SCALE: u32 = 2;
/// Default halo width, in pixels.
pub const DEFAULT_GLOW: f32 = 6.0;
const DARK: Rgba<u8> = Rgba([16, 16, 16, 255]);
const LIGHT: Rgba<u8> = Rgba([245, 245, 245, 255]);

/// A pulse overlay that was drawn on a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseMark {
    pub qubit: usize,
    pub center: Point,
    pub label: Option<String>,
}

/// One rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
    pulses: Vec<PulseMark>,
}

impl Frame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Overlays in the order they were drawn.
    pub fn pulses(&self) -> &[PulseMark] {
        &self.pulses
    }

    pub fn pulse_count(&self) -> usize {
        self.pulses.len()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Draws [`ShotEvent`]s onto device layouts.
#[derive(Debug, Clone)]
pub struct FrameCompositor {
    /// Width of the soft halo around each marker, in pixels.
    glow: f32,
    parallel: bool,
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self {
            glow: DEFAULT_GLOW,
            parallel: true,
        }
    }
}

impl FrameCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow.max(0.0);
        self
    }

    /// Render frame batches on the rayon pool (default) or sequentially.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render one shot.
    pub fn render(
        &self,
        event: &ShotEvent,
        layout: &Layout,
        style: &PulseStyle,
    ) -> AnimResult<Frame> {
        let mut image = layout.backdrop().canvas();
        let mut pulses = Vec::new();
        let [r, g, b] = style.color().rgb();
        let draw_labels = style.labeled() && layout.supports_labels();

        for qubit in event.ones() {
            let resonator = layout
                .resonator(qubit)
                .ok_or(AnimError::LayoutMismatch {
                    qubit,
                    capacity: layout.capacity(),
                })?;
            self.blend_pulse(
                &mut image,
                resonator.anchor,
                &resonator.shape,
                [r, g, b],
                style.intensity(),
            );
            pulses.push(PulseMark {
                qubit,
                center: resonator.anchor,
                label: draw_labels.then(|| resonator.id.clone()),
            });
        }

        if draw_labels {
            let (fill, outline) = if style.color().luminance() > 0.5 {
                (DARK, LIGHT)
            } else {
                (LIGHT, DARK)
            };
            for mark in &pulses {
                if let Some(label) = &mark.label {
                    let (tw, th) = glyph::text_size(label, LABEL_SCALE);
                    let x = (mark.center.x - tw as f32 / 2.0).round() as i64;
                    let y = (mark.center.y - th as f32 / 2.0).round() as i64;
                    glyph::draw_text(&mut image, x, y, label, LABEL_SCALE, fill, outline);
                }
            }
        }

        Ok(Frame { image, pulses })
    }

    /// Render a sequence of shots. Output order equals input order.
    pub fn render_all(
        &self,
        events: &[ShotEvent],
        layout: &Layout,
        style: &PulseStyle,
    ) -> AnimResult<Vec<Frame>> {
        self.render_all_with_progress(events, layout, style, &|| {})
    }

    /// Like [`FrameCompositor::render_all`], calling `progress` once per
    /// finished frame (from worker threads when rendering in parallel).
    pub fn render_all_with_progress(
        &self,
        events: &[ShotEvent],
        layout: &Layout,
        style: &PulseStyle,
        progress: &(dyn Fn() + Sync),
    ) -> AnimResult<Vec<Frame>> {
        debug!(
            "Rendering {} frames ({})",
            events.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );
        let render_one = |event: &ShotEvent| {
            let frame = self.render(event, layout, style);
            progress();
            frame
        };
        if self.parallel {
            events.par_iter().map(render_one).collect()
        } else {
            events.iter().map(render_one).collect()
        }
    }

    fn blend_pulse(
        &self,
        img: &mut RgbaImage,
        anchor: Point,
        shape: &PulseShape,
        rgb: [u8; 3],
        intensity: f32,
    ) {
        let (w, h) = img.dimensions();
        let (hx, hy) = shape.half_extent();
        let reach_x = hx + self.glow + 1.0;
        let reach_y = hy + self.glow + 1.0;
        let x0 = (anchor.x - reach_x).floor().max(0.0) as u32;
        let y0 = (anchor.y - reach_y).floor().max(0.0) as u32;
        let x1 = ((anchor.x + reach_x).ceil().max(0.0) as u32).min(w);
        let y1 = ((anchor.y + reach_y).ceil().max(0.0) as u32).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                let sd = shape.signed_distance(
                    x as f32 + 0.5 - anchor.x,
                    y as f32 + 0.5 - anchor.y,
                );
                let weight = coverage(sd, self.glow) * intensity;
                if weight <= 0.0 {
                    continue;
                }
                let px = img.get_pixel_mut(x, y);
                for c in 0..3 {
                    let base = f32::from(px.0[c]);
                    px.0[c] = (base + (f32::from(rgb[c]) - base) * weight).round() as u8;
                }
                let alpha = f32::from(px.0[3]);
                px.0[3] = (alpha + (255.0 - alpha) * weight).round() as u8;
            }
        }
    }
}

/// Opacity of a marker at signed distance `sd` from its outline: solid
/// inside, one pixel of antialiasing, then a quadratic halo of width `glow`.
fn coverage(sd: f32, glow: f32) -> f32 {
    let core = (0.5 - sd).clamp(0.0, 1.0);
    let halo = if sd > 0.0 && sd < glow {
        let t = 1.0 - sd / glow;
        HALO_PEAK * t * t
    } else {
        0.0
    };
    core.max(halo)
}
