//! Device samples: a named processor with one layout per backdrop kind.

use crate::error::{DeviceError, DeviceResult};
use crate::layout::{BackdropKind, Layout};

/// A named device in the catalog.
///
/// Built once when the registry is constructed and immutable afterwards.
#[derive(Debug, Clone)]
pub struct DeviceSample {
    name: String,
    aliases: Vec<String>,
    priority: usize,
    gate_map: Layout,
    xray: Option<Layout>,
}

impl DeviceSample {
    pub fn new(
        name: impl Into<String>,
        aliases: Vec<String>,
        priority: usize,
        gate_map: Layout,
        xray: Option<Layout>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases,
            priority,
            gate_map,
            xray,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backend names that map onto this sample.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Position in the catalog; lower wins auto-selection ties.
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Number of qubits the sample can display.
    pub fn capacity(&self) -> usize {
        self.gate_map.capacity()
    }

    pub fn supports(&self, kind: BackdropKind) -> bool {
        match kind {
            BackdropKind::Gate => true,
            BackdropKind::Xray => self.xray.is_some(),
        }
    }

    /// Whether pulses drawn on `kind` may carry labels.
    pub fn supports_labels(&self, kind: BackdropKind) -> bool {
        self.layout(kind).is_ok_and(Layout::supports_labels)
    }

    /// Layout for a backdrop kind.
    pub fn layout(&self, kind: BackdropKind) -> DeviceResult<&Layout> {
        match kind {
            BackdropKind::Gate => Ok(&self.gate_map),
            BackdropKind::Xray => self.xray.as_ref().ok_or_else(|| DeviceError::UnsupportedKind {
                sample: self.name.clone(),
                kind,
            }),
        }
    }

    /// Layout for `kind`, provided it can place `qubits` qubits.
    pub fn layout_for(&self, kind: BackdropKind, qubits: usize) -> DeviceResult<&Layout> {
        let layout = self.layout(kind)?;
        if layout.capacity() < qubits {
            return Err(DeviceError::InsufficientCapacity {
                sample: self.name.clone(),
                capacity: layout.capacity(),
                required: qubits,
            });
        }
        Ok(layout)
    }
}
