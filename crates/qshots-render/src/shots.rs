//! Reconstructing individual shots from an aggregated counts table.
//!
//! The physical order of shots cannot be recovered from a histogram. The
//! builder emits every outcome `frequency` times and, by default, shuffles
//! the result so identical outcomes do not play back in long runs.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::counts::{BitOrder, CountsTable};
use crate::error::{AnimError, AnimResult};

/// One reconstructed measurement outcome, in qubit-index order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShotEvent {
    bits: Vec<bool>,
}

impl ShotEvent {
    /// Decode a counts key.
    ///
    /// Callers must pass a key that has already been validated by
    /// [`CountsTable`]; any character other than `1` reads as 0.
    pub fn from_key(key: &str, order: BitOrder) -> Self {
        let mut bits: Vec<bool> = key.chars().map(|c| c == '1').collect();
        if order == BitOrder::LittleEndian {
            bits.reverse();
        }
        Self { bits }
    }

    /// Build directly from qubit-ordered bits.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn num_qubits(&self) -> usize {
        self.bits.len()
    }

    /// Whether qubit `index` read 1. Out-of-range indices read 0.
    pub fn bit(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Indices of qubits that read 1, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    /// Re-encode as a counts key.
    pub fn to_key(&self, order: BitOrder) -> String {
        let chars = self.bits.iter().map(|&b| if b { '1' } else { '0' });
        match order {
            BitOrder::LittleEndian => chars.rev().collect(),
            BitOrder::QubitIndex => chars.collect(),
        }
    }
}

impl fmt::Display for ShotEvent {
    /// Qubit 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key(BitOrder::QubitIndex))
    }
}

/// Playback order of reconstructed shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOrder {
    /// Outcomes grouped together, in key order. Fully deterministic.
    Grouped,
    /// Grouped, then shuffled. A seed makes the permutation reproducible.
    Shuffled { seed: Option<u64> },
}

impl Default for ShotOrder {
    fn default() -> Self {
        ShotOrder::Shuffled { seed: None }
    }
}

/// Expands a [`CountsTable`] into a sequence of [`ShotEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct ShotSequenceBuilder {
    order: ShotOrder,
    bit_order: BitOrder,
}

impl ShotSequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffle with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.order = ShotOrder::Shuffled { seed: Some(seed) };
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: ShotOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    pub fn order(&self) -> ShotOrder {
        self.order
    }

    /// Expand `counts` into one event per shot.
    ///
    /// The returned sequence has exactly `counts.total_shots()` events and
    /// holds each outcome exactly as often as the table says.
    pub fn expand(&self, counts: &CountsTable) -> AnimResult<Vec<ShotEvent>> {
        let total = counts.total_shots();
        if total == 0 {
            return Err(AnimError::EmptyInput);
        }

        let too_large = || AnimError::MalformedCounts(format!("{total} shots do not fit in memory"));
        let capacity = usize::try_from(total).map_err(|_| too_large())?;
        let mut events = Vec::new();
        events.try_reserve_exact(capacity).map_err(|_| too_large())?;
        for (key, frequency) in counts.iter() {
            let event = ShotEvent::from_key(key, self.bit_order);
            for _ in 0..frequency {
                events.push(event.clone());
            }
        }

        if let ShotOrder::Shuffled { seed } = self.order {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            events.shuffle(&mut rng);
        }

        debug!(
            "Expanded {} outcomes into {} shots ({:?})",
            counts.len(),
            events.len(),
            self.order
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell() -> CountsTable {
        CountsTable::from_pairs([("00", 6), ("11", 4)]).unwrap()
    }

    #[test]
    fn test_event_little_endian() {
        let event = ShotEvent::from_key("001", BitOrder::LittleEndian);
        assert!(event.bit(0));
        assert!(!event.bit(2));
        assert_eq!(event.ones().collect::<Vec<_>>(), vec![0]);
        assert_eq!(event.to_key(BitOrder::LittleEndian), "001");
        assert_eq!(event.to_string(), "100");
    }

    #[test]
    fn test_event_qubit_index_order() {
        let event = ShotEvent::from_key("001", BitOrder::QubitIndex);
        assert_eq!(event.ones().collect::<Vec<_>>(), vec![2]);
        assert!(!event.bit(99));
    }

    #[test]
    fn test_grouped_expansion() {
        let events = ShotSequenceBuilder::new()
            .with_order(ShotOrder::Grouped)
            .expand(&bell())
            .unwrap();
        let keys: Vec<_> = events.iter().map(ShotEvent::to_string).collect();
        assert_eq!(keys[..6], ["00"; 6]);
        assert_eq!(keys[6..], ["11"; 4]);
    }

    #[test]
    fn test_seeded_shuffle_reproducible() {
        let counts = CountsTable::from_pairs([("000", 510), ("111", 514)]).unwrap();
        let a = ShotSequenceBuilder::new().with_seed(7).expand(&counts).unwrap();
        let b = ShotSequenceBuilder::new().with_seed(7).expand(&counts).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1024);

        // A shuffled run of 1024 shots is not left grouped
        let grouped = ShotSequenceBuilder::new()
            .with_order(ShotOrder::Grouped)
            .expand(&counts)
            .unwrap();
        assert_ne!(a, grouped);
    }

    #[test]
    fn test_single_outcome() {
        let counts = CountsTable::from_pairs([("101", 5)]).unwrap();
        let events = ShotSequenceBuilder::new().expand(&counts).unwrap();
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| e.to_key(BitOrder::LittleEndian) == "101"));
    }

    #[test]
    fn test_empty_input() {
        let empty = CountsTable::default();
        assert!(matches!(
            ShotSequenceBuilder::new().expand(&empty),
            Err(AnimError::EmptyInput)
        ));

        let zeros = CountsTable::from_pairs([("01", 0)]).unwrap();
        assert!(matches!(
            ShotSequenceBuilder::new().expand(&zeros),
            Err(AnimError::EmptyInput)
        ));
    }

    #[test]
    fn test_builder_order() {
        assert_eq!(
            ShotSequenceBuilder::new().order(),
            ShotOrder::Shuffled { seed: None }
        );
        assert_eq!(
            ShotSequenceBuilder::new().with_seed(3).order(),
            ShotOrder::Shuffled { seed: Some(3) }
        );
        assert_eq!(
            ShotSequenceBuilder::new()
                .with_seed(3)
                .with_order(ShotOrder::Grouped)
                .order(),
            ShotOrder::Grouped
        );
    }

    #[test]
    fn test_unallocatable_table_is_an_error() {
        let counts = CountsTable::from_pairs([("1", u64::MAX)]).unwrap();
        let err = ShotSequenceBuilder::new().expand(&counts).unwrap_err();
        assert!(matches!(err, AnimError::MalformedCounts(ref m) if m.contains("do not fit")));
    }
}
