// src/simulation/results.rs
use crate::core::QubitId;
use std::collections::HashMap;
use std::fmt;

/// Holds the results of running a circuit.
/// Contains the measured bit for every qubit that was measured.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Maps measured qubits to their recorded classical bit.
    measured_bits: HashMap<QubitId, u8>,
}

impl SimulationResult {
    /// Creates a new, empty result set. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self {
            measured_bits: HashMap::new(),
        }
    }

    /// Records the measured bit for a qubit. (Internal visibility)
    pub(crate) fn record_bit(&mut self, qubit: QubitId, bit: u8) {
        self.measured_bits.insert(qubit, bit);
    }

    /// Gets the measured bit for a specific qubit.
    /// Returns `None` if the qubit was never measured.
    pub fn get_bit(&self, qubit: &QubitId) -> Option<u8> {
        self.measured_bits.get(qubit).copied()
    }

    /// Returns a reference to the map of all recorded bits.
    pub fn all_bits(&self) -> &HashMap<QubitId, u8> {
        &self.measured_bits
    }

    /// Whether any measurement was recorded.
    pub fn is_empty(&self) -> bool {
        self.measured_bits.is_empty()
    }

    /// Recorded bits sorted by qubit, for stable display and reporting.
    pub fn sorted_bits(&self) -> Vec<(QubitId, u8)> {
        let mut sorted: Vec<_> = self
            .measured_bits
            .iter()
            .map(|(qubit, bit)| (*qubit, *bit))
            .collect();
        sorted.sort_by_key(|(qubit, _)| *qubit);
        sorted
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Results:")?;
        if self.measured_bits.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            for (qubit, bit) in self.sorted_bits() {
                writeln!(f, "  {}: {}", qubit, bit)?;
            }
        }
        Ok(())
    }
}
