//! Error types for the render crate.

use std::fmt;

use qshots_device::DeviceError;
use thiserror::Error;

/// Coarse classification of [`AnimError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed counts, bad style values, unknown animation kind.
    InputValidation,
    /// Device too small for the measured qubits.
    Capacity,
    /// Unknown sample name, no auto-select match, missing backdrop kind.
    Lookup,
    /// Internal invariant violation while drawing a frame.
    Render,
    /// Invalid frame rate or empty frame sequence.
    Assembly,
    /// Reading resources or writing the artifact failed.
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::InputValidation => "input validation",
            ErrorCategory::Capacity => "capacity",
            ErrorCategory::Lookup => "lookup",
            ErrorCategory::Render => "render",
            ErrorCategory::Assembly => "assembly",
            ErrorCategory::Io => "io",
        };
        f.write_str(s)
    }
}

/// Errors that can occur while building an animation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnimError {
    /// Counts keys have unequal lengths or invalid characters.
    #[error("Malformed counts: {0}")]
    MalformedCounts(String),

    /// Counts table holds no shots.
    #[error("Counts table is empty, there are no shots to animate")]
    EmptyInput,

    /// Pulse intensity outside the supported range.
    #[error("Pulse intensity {0} is outside [0.1, 1.0]")]
    OutOfRange(f32),

    /// Pulse color is not in the palette.
    #[error("Unknown pulse color '{name}'. Supported colors: {known}")]
    UnknownColor {
        /// The rejected color name.
        name: String,
        /// Comma-separated palette names.
        known: String,
    },

    /// A style option the backdrop cannot honour.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Device catalog error.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// A pulsed qubit has no position in the layout.
    #[error("Layout mismatch: qubit {qubit} has no position (layout places {capacity} qubits)")]
    LayoutMismatch {
        /// Qubit index whose lookup failed.
        qubit: usize,
        /// Number of positions in the layout.
        capacity: usize,
    },

    /// Frame rate must be at least one frame per second.
    #[error("Frame rate must be a positive integer, got {0}")]
    InvalidRate(u32),

    /// No frames to assemble.
    #[error("Cannot assemble an animation with no frames")]
    EmptyAnimation,

    /// GIF encoding failed.
    #[error("Failed to encode animation: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the artifact failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl AnimError {
    /// Map the error onto its category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnimError::MalformedCounts(_)
            | AnimError::EmptyInput
            | AnimError::OutOfRange(_)
            | AnimError::UnknownColor { .. }
            | AnimError::UnsupportedFeature(_) => ErrorCategory::InputValidation,
            AnimError::Device(e) => match e {
                DeviceError::InsufficientCapacity { .. } => ErrorCategory::Capacity,
                DeviceError::UnknownSample { .. }
                | DeviceError::NoMatch { .. }
                | DeviceError::UnsupportedKind { .. } => ErrorCategory::Lookup,
                DeviceError::Backdrop { .. } => ErrorCategory::Io,
                _ => ErrorCategory::InputValidation,
            },
            AnimError::LayoutMismatch { .. } => ErrorCategory::Render,
            AnimError::InvalidRate(_) | AnimError::EmptyAnimation => ErrorCategory::Assembly,
            AnimError::Encode(_) | AnimError::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Whether the error signals a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Render
    }
}

/// Result type for animation operations.
pub type AnimResult<T> = Result<T, AnimError>;
