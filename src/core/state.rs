// src/core/state.rs

use crate::core::constants::tolerances;
use num_complex::Complex;
use std::fmt;

/// State vector of the arcade register.
///
/// Holds `2^n` complex amplitudes for an `n`-qubit register. Basis-state
/// indices follow the register's bit convention: qubit 0 is the most
/// significant bit, so index `k` labels the ket whose `n`-digit binary
/// rendering of `k` lists qubit 0 first.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct QuantumState {
    /// Complex amplitude per basis state. Manipulated only by the
    /// simulation engine; normalization is its responsibility.
    state_vector: Vec<Complex<f64>>,
}

impl QuantumState {
    /// Creates a state from a given amplitude vector.
    /// Callers guarantee the vector length is a power of two.
    pub(crate) fn new(initial_vector: Vec<Complex<f64>>) -> Self {
        Self { state_vector: initial_vector }
    }

    /// Creates the `|0…0⟩` state for an `n`-qubit register of dimension `dim`.
    pub(crate) fn ground(dim: usize) -> Self {
        let mut state_vector = vec![Complex::new(0.0, 0.0); dim];
        if dim > 0 {
            state_vector[0] = Complex::new(1.0, 0.0);
        }
        Self { state_vector }
    }

    /// Provides read-only access to the internal state vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.state_vector
    }

    /// Provides mutable access for the simulation engine to modify the state.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.state_vector
    }

    /// Gets the dimension (number of basis states).
    pub fn dim(&self) -> usize {
        self.state_vector.len()
    }

    /// Number of qubits this state describes. Dimension is always `2^n`.
    pub fn num_qubits(&self) -> usize {
        self.state_vector.len().trailing_zeros() as usize
    }

    /// Probability of observing basis state `index`, by the Born rule.
    pub fn probability(&self, index: usize) -> f64 {
        self.state_vector
            .get(index)
            .map(|amp| amp.norm_sqr())
            .unwrap_or(0.0)
    }

    /// Ket label for basis state `index`, e.g. `|0110⟩` on four qubits.
    pub fn basis_label(&self, index: usize) -> String {
        format!("|{:0width$b}⟩", index, width = self.num_qubits())
    }
}

impl fmt::Display for QuantumState {
    /// Prints only terms with non-negligible amplitude, as `a|bits⟩` sums.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.state_vector.iter().enumerate() {
            if c.norm_sqr() < tolerances::AMPLITUDE_EPSILON {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "({:.4}{:+.4}i){}", c.re, c.im, self.basis_label(i))?;
            first = false;
        }
        if first {
            write!(f, "(zero state)")?;
        }
        Ok(())
    }
}
