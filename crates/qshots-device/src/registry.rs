//! Registry of device samples.
//!
//! The [`DeviceLayoutRegistry`] is built once from the static catalog and is
//! read-only afterwards. Share it by reference (or behind an `Arc`) with every
//! component that needs layout lookups.

use std::convert::Infallible;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::backdrop::Backdrop;
use crate::catalog::{self, CATALOG, SampleSpec};
use crate::descriptor::{BackendDescriptor, CircuitDescriptor};
use crate::error::{DeviceError, DeviceResult};
use crate::geometry::{Point, PulseShape};
use crate::layout::{BackdropKind, Layout, Placement, Resonator};
use crate::sample::DeviceSample;

/// Catalog of device samples, indexed by name and alias.
#[derive(Debug, Clone)]
pub struct DeviceLayoutRegistry {
    /// Samples in catalog priority order.
    samples: Vec<DeviceSample>,
    /// Lower-cased names and aliases to sample index.
    index: FxHashMap<String, usize>,
}

impl DeviceLayoutRegistry {
    /// Registry over the built-in catalog with synthesized backdrops.
    pub fn builtin() -> Self {
        let samples = CATALOG
            .iter()
            .enumerate()
            .map(|(priority, spec)| {
                build_sample(spec, priority, |kind, w, h, res| {
                    Ok::<_, Infallible>(Backdrop::synthesize(kind, w, h, res))
                })
            })
            .collect::<Result<Vec<_>, Infallible>>();
        let samples = match samples {
            Ok(samples) => samples,
            Err(never) => match never {},
        };
        Self::from_samples(samples)
    }

    /// Registry over the built-in catalog, decoding backdrops from `dir`.
    ///
    /// Looks for `<sample>.png` (gate map) and `<sample>_xray.png` (chip
    /// photo). Missing files fall back to a synthesized backdrop; files that
    /// exist but fail to decode are an error.
    pub fn with_resources(dir: &Path) -> DeviceResult<Self> {
        info!("Loading device backdrops from {}", dir.display());
        let samples = CATALOG
            .iter()
            .enumerate()
            .map(|(priority, spec)| {
                build_sample(spec, priority, |kind, w, h, res| {
                    let file = match kind {
                        BackdropKind::Gate => format!("{}.png", spec.name),
                        BackdropKind::Xray => format!("{}_xray.png", spec.name),
                    };
                    let path = dir.join(file);
                    if path.is_file() {
                        debug!("Backdrop for {} ({}) from {}", spec.name, kind, path.display());
                        Backdrop::load(&path, w, h)
                    } else {
                        debug!("No {} backdrop file for {}, synthesizing", kind, spec.name);
                        Ok(Backdrop::synthesize(kind, w, h, res))
                    }
                })
            })
            .collect::<DeviceResult<Vec<_>>>()?;
        Ok(Self::from_samples(samples))
    }

    /// Registry over an explicit list of samples (priority = list order).
    pub fn from_samples(samples: Vec<DeviceSample>) -> Self {
        let mut index = FxHashMap::default();
        for (i, sample) in samples.iter().enumerate() {
            index.insert(sample.name().to_lowercase(), i);
            for alias in sample.aliases() {
                index.entry(alias.to_lowercase()).or_insert(i);
            }
        }
        debug!("Device registry initialised with {} samples", samples.len());
        Self { samples, index }
    }

    /// Look up a sample by name or alias (case-insensitive).
    pub fn resolve(&self, name_or_alias: &str) -> DeviceResult<&DeviceSample> {
        let key = name_or_alias.trim().to_lowercase();
        self.index
            .get(&key)
            .map(|&i| &self.samples[i])
            .ok_or_else(|| DeviceError::UnknownSample {
                name: name_or_alias.to_string(),
                known: self.list_samples().collect::<Vec<_>>().join(", "),
            })
    }

    /// Resolve a sample and the layout for `kind`, rejecting samples that
    /// cannot place `qubits` qubits.
    pub fn resolve_layout(
        &self,
        name_or_alias: &str,
        kind: BackdropKind,
        qubits: usize,
    ) -> DeviceResult<(&DeviceSample, &Layout)> {
        let sample = self.resolve(name_or_alias)?;
        let layout = sample.layout_for(kind, qubits)?;
        Ok((sample, layout))
    }

    /// Sample names in catalog order. Call again to restart.
    pub fn list_samples(&self) -> SampleNames<'_> {
        SampleNames {
            inner: self.samples.iter(),
        }
    }

    pub fn samples(&self) -> &[DeviceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Pick a sample for a backend/circuit pair.
    ///
    /// Hardware backends that name a known sample (via `sample_name`, or
    /// their own name as an alias) get that sample if it is large enough.
    /// Otherwise the smallest sample that fits the circuit is chosen, with
    /// catalog order breaking ties.
    pub fn auto_select(
        &self,
        backend: &BackendDescriptor,
        circuit: &CircuitDescriptor,
    ) -> DeviceResult<&DeviceSample> {
        let qubits = circuit.num_qubits;

        if !backend.simulator {
            let hint = backend
                .sample_name
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(&backend.name);
            match self.resolve(hint) {
                Ok(sample) if sample.capacity() >= qubits => {
                    info!("Backend {} maps to sample {}", backend.name, sample.name());
                    return Ok(sample);
                }
                Ok(sample) => warn!(
                    "Backend sample {} holds {} qubits, circuit needs {}; fitting instead",
                    sample.name(),
                    sample.capacity(),
                    qubits
                ),
                Err(_) => debug!("Backend hint '{}' is not in the catalog", hint),
            }
        }

        let chosen = self
            .samples
            .iter()
            .filter(|s| s.capacity() >= qubits)
            .min_by_key(|s| (s.capacity(), s.priority()))
            .ok_or_else(|| DeviceError::NoMatch {
                qubits,
                largest: self.samples.iter().map(DeviceSample::capacity).max().unwrap_or(0),
            })?;
        info!("Auto-selected sample {} for {} qubits", chosen.name(), qubits);
        Ok(chosen)
    }
}

impl Default for DeviceLayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Iterator over sample names, in catalog order.
#[derive(Debug, Clone)]
pub struct SampleNames<'a> {
    inner: std::slice::Iter<'a, DeviceSample>,
}

impl<'a> Iterator for SampleNames<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(DeviceSample::name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SampleNames<'_> {}

fn build_sample<F, E>(spec: &SampleSpec, priority: usize, backdrop: F) -> Result<DeviceSample, E>
where
    F: Fn(BackdropKind, u32, u32, &[Resonator]) -> Result<Backdrop, E>,
{
    let gate_resonators: Vec<Resonator> = spec
        .gate_qubits
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Resonator {
            id: format!("Q{i}"),
            anchor: Point::new(x, y),
            shape: PulseShape::Disc {
                radius: catalog::GATE_PULSE_RADIUS,
            },
        })
        .collect();
    let (gw, gh) = spec.gate_size;
    let gate_backdrop = backdrop(BackdropKind::Gate, gw, gh, &gate_resonators)?;
    let gate_map = Layout::GateMap(Placement::new(gw, gh, gate_resonators, gate_backdrop));

    let xray = match &spec.xray {
        Some(xspec) => {
            let resonators: Vec<Resonator> = xspec
                .boxes
                .iter()
                .enumerate()
                .map(|(i, &(left, top, width, height))| Resonator {
                    id: format!("R{i}"),
                    anchor: Point::new(left + width / 2.0, top + height / 2.0),
                    shape: PulseShape::RoundedBox {
                        width,
                        height,
                        pad: catalog::XRAY_PAD,
                        rounding: catalog::XRAY_ROUNDING,
                    },
                })
                .collect();
            let (xw, xh) = xspec.size;
            let xray_backdrop = backdrop(BackdropKind::Xray, xw, xh, &resonators)?;
            Some(Layout::Xray(Placement::new(xw, xh, resonators, xray_backdrop)))
        }
        None => None,
    };

    Ok(DeviceSample::new(
        spec.name,
        spec.aliases.iter().map(|a| (*a).to_string()).collect(),
        priority,
        gate_map,
        xray,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = DeviceLayoutRegistry::builtin();
        assert_eq!(registry.len(), 7);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_list_samples_restartable() {
        let registry = DeviceLayoutRegistry::builtin();
        let first: Vec<_> = registry.list_samples().collect();
        let second: Vec<_> = registry.list_samples().collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "sparrow");
        assert_eq!(first.last(), Some(&"unknown53a"));
        assert_eq!(registry.list_samples().len(), 7);
    }

    #[test]
    fn test_resolve_by_alias_case_insensitive() {
        let registry = DeviceLayoutRegistry::builtin();
        assert_eq!(registry.resolve("IBMQ_Vigo").unwrap().name(), "giraffe");
        assert_eq!(registry.resolve(" Sparrow ").unwrap().name(), "sparrow");
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = DeviceLayoutRegistry::builtin();
        let err = registry.resolve("condor").unwrap_err();
        assert!(matches!(err, DeviceError::UnknownSample { .. }));
        assert!(err.to_string().contains("sparrow"));
    }

    #[test]
    fn test_resolve_layout_capacity() {
        let registry = DeviceLayoutRegistry::builtin();
        let err = registry
            .resolve_layout("sparrow", BackdropKind::Gate, 20)
            .unwrap_err();
        assert!(matches!(
            err,
            DeviceError::InsufficientCapacity {
                capacity: 5,
                required: 20,
                ..
            }
        ));

        let (sample, layout) = registry
            .resolve_layout("albatross", BackdropKind::Gate, 15)
            .unwrap();
        assert_eq!(sample.name(), "albatross");
        assert_eq!(layout.capacity(), 15);
    }

    #[test]
    fn test_xray_only_on_sparrow() {
        let registry = DeviceLayoutRegistry::builtin();
        let sparrow = registry.resolve("sparrow").unwrap();
        assert!(sparrow.supports(BackdropKind::Xray));
        assert!(sparrow.supports_labels(BackdropKind::Xray));
        assert!(!sparrow.supports_labels(BackdropKind::Gate));
        assert_eq!(sparrow.layout(BackdropKind::Xray).unwrap().dimensions(), (300, 300));

        let snake = registry.resolve("snake").unwrap();
        assert!(matches!(
            snake.layout(BackdropKind::Xray),
            Err(DeviceError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn test_xray_anchor_is_box_centre() {
        let registry = DeviceLayoutRegistry::builtin();
        let layout = registry
            .resolve("sparrow")
            .unwrap()
            .layout(BackdropKind::Xray)
            .unwrap();
        assert_eq!(layout.coordinate(0), Some(Point::new(208.0, 258.5)));
        assert_eq!(layout.resonator(0).unwrap().id, "R0");
    }

    #[test]
    fn test_auto_select_smallest_fit() {
        let registry = DeviceLayoutRegistry::builtin();
        let sim = BackendDescriptor::simulator("qasm_simulator");
        let pick = |n| {
            registry
                .auto_select(&sim, &CircuitDescriptor::new(n))
                .map(|s| s.name().to_string())
        };
        assert_eq!(pick(3).unwrap(), "sparrow");
        assert_eq!(pick(5).unwrap(), "sparrow");
        assert_eq!(pick(6).unwrap(), "albatross");
        assert_eq!(pick(16).unwrap(), "unknown20a");
        assert_eq!(pick(53).unwrap(), "unknown53a");
        assert!(matches!(
            registry.auto_select(&sim, &CircuitDescriptor::new(54)),
            Err(DeviceError::NoMatch {
                qubits: 54,
                largest: 53
            })
        ));
    }

    #[test]
    fn test_auto_select_honours_hardware_sample() {
        let registry = DeviceLayoutRegistry::builtin();
        let backend = BackendDescriptor::hardware("ibmq_vigo", Some("Giraffe".into()));
        let chosen = registry
            .auto_select(&backend, &CircuitDescriptor::new(3))
            .unwrap();
        assert_eq!(chosen.name(), "giraffe");

        // Backend name alone acts as an alias
        let backend = BackendDescriptor::hardware("ibmq_athens", None);
        let chosen = registry
            .auto_select(&backend, &CircuitDescriptor::new(2))
            .unwrap();
        assert_eq!(chosen.name(), "snake");
    }

    #[test]
    fn test_auto_select_ignores_sample_for_simulator() {
        let registry = DeviceLayoutRegistry::builtin();
        let mut backend = BackendDescriptor::simulator("fake_sim");
        backend.sample_name = Some("giraffe".into());
        let chosen = registry
            .auto_select(&backend, &CircuitDescriptor::new(3))
            .unwrap();
        assert_eq!(chosen.name(), "sparrow");
    }

    #[test]
    fn test_auto_select_hint_too_small_falls_back() {
        let registry = DeviceLayoutRegistry::builtin();
        let backend = BackendDescriptor::hardware("ibmq_vigo", Some("giraffe".into()));
        let chosen = registry
            .auto_select(&backend, &CircuitDescriptor::new(12))
            .unwrap();
        assert_eq!(chosen.name(), "albatross");
    }
}
