//! Backdrop layouts: where each qubit's readout resonator sits on an image.
//!
//! A [`Layout`] is a tagged variant over the two backdrop families. Both
//! share the same coordinate contract; they differ in marker shape and in
//! whether per-resonator labels may be drawn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backdrop::Backdrop;
use crate::error::DeviceError;
use crate::geometry::{Point, PulseShape};

/// Which backdrop family an animation is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackdropKind {
    /// Schematic gate map of the processor.
    Gate,
    /// X-ray photograph of the chip with visible readout resonators.
    Xray,
}

impl BackdropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackdropKind::Gate => "gate",
            BackdropKind::Xray => "xray",
        }
    }
}

impl fmt::Display for BackdropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackdropKind {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gate" => Ok(BackdropKind::Gate),
            "xray" | "x-ray" => Ok(BackdropKind::Xray),
            _ => Err(DeviceError::UnknownKind(s.to_string())),
        }
    }
}

/// A qubit's readout element on the backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct Resonator {
    /// Display identifier used for labels (`Q3`, `R3`).
    pub id: String,
    /// Centre of the pulse marker.
    pub anchor: Point,
    /// Marker shape.
    pub shape: PulseShape,
}

/// Resonator positions and backdrop for one layout.
#[derive(Debug, Clone)]
pub struct Placement {
    width: u32,
    height: u32,
    resonators: Vec<Resonator>,
    backdrop: Backdrop,
}

impl Placement {
    pub fn new(width: u32, height: u32, resonators: Vec<Resonator>, backdrop: Backdrop) -> Self {
        Self {
            width,
            height,
            resonators,
            backdrop,
        }
    }

    pub fn resonators(&self) -> &[Resonator] {
        &self.resonators
    }
}

/// Device layout for a single backdrop kind.
#[derive(Debug, Clone)]
pub enum Layout {
    GateMap(Placement),
    Xray(Placement),
}

impl Layout {
    fn placement(&self) -> &Placement {
        match self {
            Layout::GateMap(p) | Layout::Xray(p) => p,
        }
    }

    pub fn kind(&self) -> BackdropKind {
        match self {
            Layout::GateMap(_) => BackdropKind::Gate,
            Layout::Xray(_) => BackdropKind::Xray,
        }
    }

    /// Number of qubits this layout can place.
    pub fn capacity(&self) -> usize {
        self.placement().resonators.len()
    }

    /// Marker centre for qubit `index`, if the layout has one.
    pub fn coordinate(&self, index: usize) -> Option<Point> {
        self.placement().resonators.get(index).map(|r| r.anchor)
    }

    /// Marker shape for qubit `index`.
    pub fn geometry(&self, index: usize) -> Option<PulseShape> {
        self.placement().resonators.get(index).map(|r| r.shape)
    }

    pub fn resonator(&self, index: usize) -> Option<&Resonator> {
        self.placement().resonators.get(index)
    }

    pub fn resonators(&self) -> &[Resonator] {
        self.placement().resonators()
    }

    /// Only chip photographs carry resonator labels.
    pub fn supports_labels(&self) -> bool {
        matches!(self, Layout::Xray(_))
    }

    /// Backdrop width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        let p = self.placement();
        (p.width, p.height)
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.placement().backdrop
    }
}
