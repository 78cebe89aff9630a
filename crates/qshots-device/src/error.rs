//! Error types for the device crate.

use thiserror::Error;

use crate::layout::BackdropKind;

/// Errors raised while resolving device samples and their layouts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// No sample or alias with this name exists in the catalog.
    #[error("Unknown device sample '{name}'. Supported samples: {known}")]
    UnknownSample {
        /// The name that was looked up.
        name: String,
        /// Comma-separated list of catalog names.
        known: String,
    },

    /// No catalog entry can host the requested number of qubits.
    #[error("No device sample can host {qubits} qubits (largest supports {largest})")]
    NoMatch {
        /// Requested qubit count.
        qubits: usize,
        /// Capacity of the largest catalog entry.
        largest: usize,
    },

    /// The sample has fewer qubit positions than the counts require.
    #[error(
        "Sample '{sample}' supports {capacity} qubits but the counts need {required}; \
         use at least a {required}-qubit device"
    )]
    InsufficientCapacity {
        /// Sample name.
        sample: String,
        /// Number of positions the layout provides.
        capacity: usize,
        /// Bitstring length of the counts table.
        required: usize,
    },

    /// The sample has no layout for the requested backdrop kind.
    #[error("Sample '{sample}' has no {kind} backdrop")]
    UnsupportedKind {
        /// Sample name.
        sample: String,
        /// Requested kind.
        kind: BackdropKind,
    },

    /// Backdrop kind string was neither `gate` nor `xray`.
    #[error("Animation kind '{0}' not supported, use 'gate' or 'xray'")]
    UnknownKind(String),

    /// Backdrop image could not be decoded.
    #[error("Failed to load backdrop {path}: {source}")]
    Backdrop {
        /// File that failed to load.
        path: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Backend descriptor could not be parsed.
    #[error("Invalid backend descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
