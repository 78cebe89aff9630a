//! Aggregated measurement outcomes.
//!
//! A [`CountsTable`] maps fixed-length outcome bitstrings to the number of
//! shots that produced them. Keys are stored with register separators
//! (spaces) removed; iteration is in lexicographic key order, so nothing
//! downstream can depend on the order the table was built in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, AnimResult};

/// How characters of a counts key map onto qubit indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    /// Rightmost character is qubit 0 (the usual measurement convention).
    #[default]
    LittleEndian,
    /// Leftmost character is qubit 0.
    QubitIndex,
}

/// Outcome bitstring → shot frequency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct CountsTable {
    entries: BTreeMap<String, u64>,
    num_qubits: usize,
    total: u64,
}

impl CountsTable {
    /// Build a table, validating every key.
    ///
    /// Spaces inside keys are dropped. Keys that collapse onto the same
    /// bitstring have their frequencies summed.
    pub fn from_pairs<I, K>(pairs: I) -> AnimResult<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut entries: BTreeMap<String, u64> = BTreeMap::new();
        let mut width: Option<usize> = None;
        let mut total: u64 = 0;

        for (raw, count) in pairs {
            let raw = raw.as_ref();
            let key: String = raw.chars().filter(|c| *c != ' ').collect();

            if key.is_empty() {
                return Err(AnimError::MalformedCounts(format!(
                    "empty outcome key '{raw}'"
                )));
            }
            if let Some(bad) = key.chars().find(|c| *c != '0' && *c != '1') {
                return Err(AnimError::MalformedCounts(format!(
                    "outcome '{raw}' contains '{bad}', expected only 0 and 1"
                )));
            }
            match width {
                None => width = Some(key.len()),
                Some(w) if w != key.len() => {
                    return Err(AnimError::MalformedCounts(format!(
                        "outcome '{raw}' has {} bits, expected {w}",
                        key.len()
                    )));
                }
                Some(_) => {}
            }

            total = total.checked_add(count).ok_or_else(|| {
                AnimError::MalformedCounts("total shot count overflows".to_string())
            })?;
            // Bounded by `total`, which did not overflow.
            *entries.entry(key).or_insert(0) += count;
        }

        Ok(Self {
            entries,
            num_qubits: width.unwrap_or(0),
            total,
        })
    }

    /// Parse a JSON object such as `{"000": 510, "111": 514}`.
    pub fn from_json(json: &str) -> AnimResult<Self> {
        serde_json::from_str(json).map_err(|e| AnimError::MalformedCounts(e.to_string()))
    }

    /// Bitstring length shared by every key (0 for an empty table).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sum of all frequencies.
    pub fn total_shots(&self) -> u64 {
        self.total
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    /// Outcomes in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Scale the table down so it holds at most `max_shots` shots.
    ///
    /// Every frequency is scaled by the same factor and truncated; outcomes
    /// that reach zero are dropped. If every outcome would vanish the table
    /// is returned unchanged.
    pub fn compact(&self, max_shots: u64) -> Self {
        let total = self.total_shots();
        if max_shots == 0 || total <= max_shots {
            return self.clone();
        }

        let entries: BTreeMap<String, u64> = self
            .entries
            .iter()
            .filter_map(|(k, &v)| {
                let scaled = (u128::from(v) * u128::from(max_shots) / u128::from(total)) as u64;
                (scaled > 0).then(|| (k.clone(), scaled))
            })
            .collect();

        if entries.is_empty() {
            return self.clone();
        }
        // Each scaled value is at most v * max / total, so the sum stays <= max_shots.
        let total = entries.values().sum();
        Self {
            entries,
            num_qubits: self.num_qubits,
            total,
        }
    }
}

impl TryFrom<BTreeMap<String, u64>> for CountsTable {
    type Error = AnimError;

    fn try_from(map: BTreeMap<String, u64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<CountsTable> for BTreeMap<String, u64> {
    fn from(table: CountsTable) -> Self {
        table.entries
    }
}
