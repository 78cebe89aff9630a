//! Backdrop images.
//!
//! Backdrops are decoded (or synthesized) once when the registry is built and
//! are then shared read-only between every frame that is drawn on them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::{DeviceError, DeviceResult};
use crate::layout::{BackdropKind, Resonator};

const GATE_FIELD: Rgba<u8> = Rgba([24, 30, 44, 255]);
const GATE_NODE: Rgba<u8> = Rgba([92, 100, 118, 255]);
const GATE_RIM: Rgba<u8> = Rgba([150, 158, 172, 255]);

const XRAY_FIELD: Rgba<u8> = Rgba([28, 32, 28, 255]);
const XRAY_DIE: Rgba<u8> = Rgba([58, 72, 56, 255]);
const XRAY_DIE_EDGE: Rgba<u8> = Rgba([112, 122, 98, 255]);
const XRAY_RESONATOR: Rgba<u8> = Rgba([44, 56, 43, 255]);
const XRAY_RESONATOR_EDGE: Rgba<u8> = Rgba([172, 178, 150, 255]);

/// Where a backdrop's pixels came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackdropSource {
    /// Decoded from an image file.
    File(PathBuf),
    /// Drawn from the layout geometry.
    Synthesized,
}

/// Shared, immutable backdrop image.
#[derive(Debug, Clone)]
pub struct Backdrop {
    image: Arc<RgbaImage>,
    source: BackdropSource,
}

impl Backdrop {
    /// Decode a backdrop from disk, resizing it to `width` x `height` if the
    /// file has different dimensions.
    pub fn load(path: &Path, width: u32, height: u32) -> DeviceResult<Self> {
        let decoded = image::open(path).map_err(|source| DeviceError::Backdrop {
            path: path.display().to_string(),
            source,
        })?;
        let mut rgba = decoded.to_rgba8();
        if rgba.dimensions() != (width, height) {
            debug!(
                "Resizing backdrop {} from {:?} to {}x{}",
                path.display(),
                rgba.dimensions(),
                width,
                height
            );
            rgba = imageops::resize(&rgba, width, height, FilterType::Triangle);
        }
        Ok(Self {
            image: Arc::new(rgba),
            source: BackdropSource::File(path.to_path_buf()),
        })
    }

    /// Draw a schematic backdrop from the resonator geometry.
    pub fn synthesize(
        kind: BackdropKind,
        width: u32,
        height: u32,
        resonators: &[Resonator],
    ) -> Self {
        let image = match kind {
            BackdropKind::Gate => draw_gate_map(width, height, resonators),
            BackdropKind::Xray => draw_chip(width, height, resonators),
        };
        Self {
            image: Arc::new(image),
            source: BackdropSource::Synthesized,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn source(&self) -> &BackdropSource {
        &self.source
    }

    /// A fresh, independently owned copy to composite onto.
    pub fn canvas(&self) -> RgbaImage {
        (*self.image).clone()
    }
}

fn draw_gate_map(width: u32, height: u32, resonators: &[Resonator]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, GATE_FIELD);
    for r in resonators {
        // Nodes sit slightly inside the pulse disc so a flash covers them.
        paint_shape(&mut img, r, |sd| {
            if sd > -3.0 {
                None
            } else if sd > -4.5 {
                Some(GATE_RIM)
            } else {
                Some(GATE_NODE)
            }
        });
    }
    img
}

fn draw_chip(width: u32, height: u32, resonators: &[Resonator]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, XRAY_FIELD);
    let inset = 8u32.min(width / 4).min(height / 4);
    for y in inset..height.saturating_sub(inset) {
        for x in inset..width.saturating_sub(inset) {
            let edge = x < inset + 2
                || y < inset + 2
                || x + inset + 2 >= width
                || y + inset + 2 >= height;
            img.put_pixel(x, y, if edge { XRAY_DIE_EDGE } else { XRAY_DIE });
        }
    }
    for r in resonators {
        paint_shape(&mut img, r, |sd| {
            if sd > 0.0 {
                None
            } else if sd > -1.5 {
                Some(XRAY_RESONATOR_EDGE)
            } else {
                Some(XRAY_RESONATOR)
            }
        });
    }
    img
}

fn paint_shape<F>(img: &mut RgbaImage, resonator: &Resonator, color_at: F)
where
    F: Fn(f32) -> Option<Rgba<u8>>,
{
    let (w, h) = img.dimensions();
    let (hx, hy) = resonator.shape.half_extent();
    let x0 = (resonator.anchor.x - hx).floor().max(0.0) as u32;
    let y0 = (resonator.anchor.y - hy).floor().max(0.0) as u32;
    let x1 = ((resonator.anchor.x + hx).ceil().max(0.0) as u32).min(w);
    let y1 = ((resonator.anchor.y + hy).ceil().max(0.0) as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - resonator.anchor.x;
            let dy = y as f32 + 0.5 - resonator.anchor.y;
            if let Some(c) = color_at(resonator.shape.signed_distance(dx, dy)) {
                img.put_pixel(x, y, c);
            }
        }
    }
}
