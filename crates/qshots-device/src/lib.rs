//! qshots device catalog
//!
//! This crate knows where every qubit's readout resonator sits on a device
//! backdrop, so that measurement outcomes can be drawn as microwave pulse
//! flashes at the right pixels.
//!
//! # Overview
//!
//! - [`DeviceLayoutRegistry`] holds the static catalog of [`DeviceSample`]s,
//!   resolves names and backend aliases, and auto-selects a sample for a
//!   backend/circuit pair.
//! - Each sample carries a [`Layout`] per [`BackdropKind`]: a schematic gate
//!   map for every sample, and an x-ray chip photograph where one exists.
//! - [`Backdrop`]s are decoded from PNG resources or synthesized from the
//!   layout geometry, once, when the registry is built.
//!
//! # Supported samples
//!
//! | Sample | Qubits | X-ray | Example backends |
//! |--------|--------|-------|------------------|
//! | `sparrow` | 5 | yes | ibmqx2, ibmq_yorktown |
//! | `snake` | 5 | no | ibmq_athens, ibmq_santiago |
//! | `giraffe` | 5 | no | ibmq_vigo, ibmq_ourense |
//! | `albatross` | 15 | no | ibmq_16_melbourne |
//! | `unknown20a` | 20 | no | ibmq_johannesburg |
//! | `unknown20b` | 20 | no | ibmq_almaden, ibmq_singapore |
//! | `unknown53a` | 53 | no | ibmq_rochester |
//!
//! # Example
//!
//! ```ignore
//! use qshots_device::{BackdropKind, BackendDescriptor, CircuitDescriptor, DeviceLayoutRegistry};
//!
//! let registry = DeviceLayoutRegistry::builtin();
//! let (sample, layout) = registry.resolve_layout("sparrow", BackdropKind::Gate, 3)?;
//! println!("{} places {} qubits", sample.name(), layout.capacity());
//!
//! let auto = registry.auto_select(
//!     &BackendDescriptor::simulator("qasm_simulator"),
//!     &CircuitDescriptor::new(12),
//! )?;
//! assert_eq!(auto.name(), "albatross");
//! ```

pub mod backdrop;
mod catalog;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod registry;
pub mod sample;

pub use backdrop::{Backdrop, BackdropSource};
pub use descriptor::{BackendDescriptor, CircuitDescriptor};
pub use error::{DeviceError, DeviceResult};
pub use geometry::{Point, PulseShape};
pub use layout::{BackdropKind, Layout, Placement, Resonator};
pub use registry::{DeviceLayoutRegistry, SampleNames};
pub use sample::DeviceSample;
