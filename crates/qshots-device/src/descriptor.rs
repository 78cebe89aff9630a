//! Descriptions of the execution backend and circuit used for auto-selection.

use serde::{Deserialize, Serialize};

use crate::error::DeviceResult;

/// What the caller knows about the backend that produced the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Backend name, e.g. `ibmq_vigo` or `qasm_simulator`.
    pub name: String,
    /// Whether the backend is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Device sample name reported by the backend configuration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_name: Option<String>,
}

impl BackendDescriptor {
    /// A simulator backend; auto-selection falls back to capacity fitting.
    pub fn simulator(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            simulator: true,
            sample_name: None,
        }
    }

    /// A hardware backend reporting its sample name.
    pub fn hardware(name: impl Into<String>, sample_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            simulator: false,
            sample_name,
        }
    }

    /// Parse a descriptor from a JSON backend configuration.
    pub fn from_json(json: &str) -> DeviceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What the caller knows about the executed circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitDescriptor {
    pub num_qubits: usize,
}

impl CircuitDescriptor {
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits }
    }
}
