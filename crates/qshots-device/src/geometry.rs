//! Pixel-space geometry for pulse markers.
//!
//! All coordinates are in backdrop pixels with the origin at the top-left
//! corner and `y` growing downwards.

use serde::{Deserialize, Serialize};

/// A point on the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Shape of the marker drawn when a resonator reflects a pulse.
///
/// Every shape is centred on its resonator's anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PulseShape {
    /// Filled circle, used on gate maps.
    Disc { radius: f32 },
    /// Rounded rectangle covering a readout resonator on a chip photo.
    ///
    /// `pad` grows the box on every side before the corners are rounded.
    RoundedBox {
        width: f32,
        height: f32,
        pad: f32,
        rounding: f32,
    },
}

impl PulseShape {
    /// Half-width and half-height of the shape's bounding box.
    pub fn half_extent(&self) -> (f32, f32) {
        match *self {
            PulseShape::Disc { radius } => (radius, radius),
            PulseShape::RoundedBox {
                width, height, pad, ..
            } => (width / 2.0 + pad, height / 2.0 + pad),
        }
    }

    /// Signed distance from an offset `(dx, dy)` relative to the anchor to
    /// the shape's outline. Negative inside, positive outside.
    pub fn signed_distance(&self, dx: f32, dy: f32) -> f32 {
        match *self {
            PulseShape::Disc { radius } => (dx * dx + dy * dy).sqrt() - radius,
            PulseShape::RoundedBox { rounding, .. } => {
                let (hx, hy) = self.half_extent();
                let r = rounding.min(hx).min(hy).max(0.0);
                let qx = dx.abs() - hx + r;
                let qy = dy.abs() - hy + r;
                let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
                let inside = qx.max(qy).min(0.0);
                outside + inside - r
            }
        }
    }
}
