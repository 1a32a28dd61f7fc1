// src/simulation/engine.rs
use crate::circuits::Operation;
use crate::core::{ArcadeError, QuantumState, QubitId};
use crate::core::constants::tolerances;
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
// Import SimulationResult for the measure function signature
use crate::simulation::SimulationResult;

/// The core engine that evolves the register's state vector.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// The full state vector of the register, dimension `2^n`. Qubit `q`
    /// occupies bit position `n - 1 - q` of a basis index, so qubit 0 is
    /// the most significant bit and ket labels read left to right.
    state: QuantumState,
    /// Number of qubits in the register (n).
    num_qubits: usize,
    /// Randomness source for measurement outcomes. Seeded engines replay
    /// the same outcomes for the same operation sequence.
    rng: StdRng,
}

impl SimulationEngine {
    /// Initializes the engine with `num_qubits` qubits in `|0…0⟩`.
    ///
    /// `seed` fixes the measurement RNG; `None` draws from OS entropy.
    pub(crate) fn init(num_qubits: usize, seed: Option<u64>) -> Result<Self, ArcadeError> {
        if num_qubits == 0 {
            return Err(ArcadeError::InvalidOperation {
                message: "cannot initialize simulation engine with zero qubits".to_string(),
            });
        }

        // Dimension of the state vector (2^n), guarded against overflow.
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| ArcadeError::Simulation {
            message: "register too large, state vector dimension overflows usize".to_string(),
        })?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            state: QuantumState::ground(dim),
            num_qubits,
            rng,
        })
    }

    /// Read access to the live state for displays and analysis.
    pub(crate) fn state(&self) -> &QuantumState {
        &self.state
    }

    /// Register size.
    pub(crate) fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns the register to `|0…0⟩` without touching the RNG stream.
    pub(crate) fn reset_state(&mut self) {
        self.state = QuantumState::ground(self.state.dim());
    }

    // Crate-visible method to set the state directly for testing
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: QuantumState) -> Result<(), ArcadeError> {
        if state.dim() != self.state.dim() {
            Err(ArcadeError::Simulation {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// Applies a single non-measurement operation to the state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), ArcadeError> {
        match op {
            Operation::Gate { gate, target } => {
                let target_idx = self.get_index(target)?;
                self.apply_single_qubit(target_idx, &gate.matrix())?;
            }
            Operation::ControlledNot { control, target } => {
                let control_idx = self.get_index(control)?;
                let target_idx = self.get_index(target)?;

                if control_idx == target_idx {
                    return Err(ArcadeError::InvalidTarget {
                        qubit: *control,
                        message: "control and target of a CNOT must differ".to_string(),
                    });
                }

                // Construct the 4x4 controlled-X matrix.
                // Basis order: |control, target> -> |00>, |01>, |10>, |11>.
                // Control |0> block is identity, control |1> block flips the target.
                let one = Complex::new(1.0, 0.0);
                let controlled_x: [[Complex<f64>; 4]; 4] = [
                    [one, Complex::zero(), Complex::zero(), Complex::zero()],
                    [Complex::zero(), one, Complex::zero(), Complex::zero()],
                    [Complex::zero(), Complex::zero(), Complex::zero(), one],
                    [Complex::zero(), Complex::zero(), one, Complex::zero()],
                ];

                self.apply_two_qubit(control_idx, target_idx, &controlled_x)?;
            }
            Operation::Measure { .. } => {
                return Err(ArcadeError::InvalidOperation {
                    message: "measurement must go through measure, not apply_operation".to_string(),
                });
            }
        };
        Ok(())
    }

    /// Measures the listed qubits in the computational basis.
    ///
    /// Marginal probabilities are accumulated per joint outcome of the
    /// targets, one outcome is sampled with the engine RNG, amplitudes
    /// disagreeing with it are zeroed, and the survivors are renormalized.
    /// Outcome bits are recorded into `result` per target.
    pub(crate) fn measure(
        &mut self,
        targets: &[QubitId],
        result: &mut SimulationResult,
    ) -> Result<(), ArcadeError> {
        if targets.is_empty() {
            return Ok(()); // Nothing to measure
        }

        // Bit position of each target within a basis index, in listed order.
        let mut bit_positions = Vec::with_capacity(targets.len());
        for target in targets {
            let idx = self.get_index(target)?;
            bit_positions.push(self.num_qubits - 1 - idx);
        }

        let state_vector = self.state.vector();

        // Joint outcome pattern of basis state k: target bits packed in
        // listed order, first target as the highest packed bit.
        let pattern_of = |k: usize| -> usize {
            bit_positions
                .iter()
                .fold(0usize, |acc, bit_pos| (acc << 1) | ((k >> bit_pos) & 1))
        };

        // 1. Accumulate probability mass per joint outcome.
        let num_patterns = 1usize << targets.len();
        let mut outcome_mass = vec![0.0f64; num_patterns];
        let mut total_mass = 0.0;
        for (k, amp) in state_vector.iter().enumerate() {
            let amplitude_sq = amp.norm_sqr();
            if amplitude_sq > tolerances::AMPLITUDE_EPSILON {
                outcome_mass[pattern_of(k)] += amplitude_sq;
                total_mass += amplitude_sq;
            }
        }

        if total_mass < tolerances::AMPLITUDE_EPSILON {
            return Err(ArcadeError::Simulation {
                message: "measurement failed: state carries no probability mass".to_string(),
            });
        }

        // 2. Sample one outcome in [0, total_mass).
        let p_sample: f64 = self.rng.random::<f64>() * total_mass;
        let mut cumulative = 0.0;
        let mut chosen_pattern = num_patterns - 1;
        for (pattern, mass) in outcome_mass.iter().enumerate() {
            cumulative += *mass;
            if p_sample < cumulative {
                chosen_pattern = pattern;
                break;
            }
        }
        // Floating-point edge: p_sample may land on an empty trailing
        // pattern. Fall back to the heaviest outcome.
        if outcome_mass[chosen_pattern] <= 0.0 {
            chosen_pattern = outcome_mass
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(pattern, _)| pattern)
                .unwrap_or(0);
        }

        // 3. Project onto the chosen outcome and renormalize survivors.
        let norm_factor = 1.0 / outcome_mass[chosen_pattern].sqrt();
        for (k, amp) in self.state.vector_mut().iter_mut().enumerate() {
            if pattern_of(k) == chosen_pattern {
                *amp *= norm_factor;
            } else {
                *amp = Complex::zero();
            }
        }

        // 4. Record the measured bit for each target, in listed order.
        for (slot, target) in targets.iter().enumerate() {
            let packed_pos = targets.len() - 1 - slot;
            let outcome_bit = ((chosen_pattern >> packed_pos) & 1) as u8;
            result.record_bit(*target, outcome_bit);
        }

        Ok(())
    }

    /// Maps a qubit to its register index, rejecting out-of-range ids.
    fn get_index(&self, qubit: &QubitId) -> Result<usize, ArcadeError> {
        let idx = qubit.index();
        if idx >= self.num_qubits {
            return Err(ArcadeError::InvalidTarget {
                qubit: *qubit,
                message: format!("outside the {}-qubit register", self.num_qubits),
            });
        }
        Ok(idx)
    }

    // --- State manipulation helpers ---

    /// Applies a 2x2 matrix to a single qubit within the global state vector.
    /// Assumes standard tensor product structure for the state vector.
    fn apply_single_qubit(
        &mut self,
        target_idx: usize,
        matrix: &[[Complex<f64>; 2]; 2],
    ) -> Result<(), ArcadeError> {
        let k = self.num_qubits - 1 - target_idx; // Bit position (from right, 0-based)
        let k_mask = 1 << k; // Mask for the target bit
        let lower_mask = k_mask - 1; // Mask for bits to the right

        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim]; // Store results temporarily

        // Iterate over pairs of basis states differing only at the target bit
        for i in 0..dim / 2 {
            // Shifts the bits of i at and above k up one place, inserting a
            // 0 at position k; every pair is visited exactly once.
            let i0_raw = ((i >> k) << (k + 1)) | (i & lower_mask);
            let i1_raw = i0_raw | k_mask;

            if i0_raw >= dim || i1_raw >= dim {
                return Err(ArcadeError::Simulation {
                    message: format!(
                        "calculated index out of bounds during single-qubit gate application. i0={}, i1={}, dim={}",
                        i0_raw, i1_raw, dim
                    ),
                });
            }

            let psi_0 = self.state.vector()[i0_raw]; // Amplitude for |...target=0...>
            let psi_1 = self.state.vector()[i1_raw]; // Amplitude for |...target=1...>

            // Apply the 2x2 matrix: [psi_0', psi_1'] = matrix * [psi_0, psi_1]
            new_vec[i0_raw] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1_raw] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state = QuantumState::new(new_vec);
        Ok(())
    }

    /// Applies a 4x4 matrix to two distinct qubits within the global state
    /// vector. Assumes standard tensor product structure.
    fn apply_two_qubit(
        &mut self,
        idx1: usize, // First qubit, the high bit of the 4x4 basis |b1 b2>
        idx2: usize, // Second qubit, the low bit of the 4x4 basis
        matrix: &[[Complex<f64>; 4]; 4],
    ) -> Result<(), ArcadeError> {
        if idx1 == idx2 {
            return Err(ArcadeError::InvalidOperation {
                message: "target indices for a two-qubit gate cannot be the same".to_string(),
            });
        }

        let n = self.num_qubits;
        let dim = self.state.dim(); // 2^n
        let mut new_vec = vec![Complex::zero(); dim];

        // Bit positions for the two qubits; k1 is the higher-order position
        // so the other-bit reconstruction below stays consistent.
        let k1_raw = n - 1 - idx1;
        let k2_raw = n - 1 - idx2;
        let (k1, k2) = (k1_raw.max(k2_raw), k1_raw.min(k2_raw)); // k1 > k2

        // Iterate through all combinations of the other (n-2) qubits
        for i_other in 0..(dim / 4) {
            // Rebuild a base index with zeros at positions k1 and k2
            let lower_mask = (1 << k2) - 1;
            let i_upper = (i_other >> (k1 - 1)) << (k1 + 1);
            let i_middle = ((i_other >> k2) & ((1 << (k1 - k2 - 1)) - 1)) << (k2 + 1);
            let i_lower = i_other & lower_mask;

            let i_base = i_upper | i_middle | i_lower;

            // Four indices of the {00, 01, 10, 11} subspace for (idx1, idx2).
            // Matrix rows/cols follow |b1, b2> with b1 at k1_raw, b2 at k2_raw.
            let indices = [
                i_base,                                 // 00
                i_base | (1 << k2_raw),                 // 01
                i_base | (1 << k1_raw),                 // 10
                i_base | (1 << k1_raw) | (1 << k2_raw), // 11
            ];

            // Extract the four amplitudes
            let mut psi = [Complex::zero(); 4];
            for j in 0..4 {
                if indices[j] < dim {
                    psi[j] = self.state.vector()[indices[j]];
                } else {
                    return Err(ArcadeError::Simulation {
                        message: format!(
                            "calculated index out of bounds during two-qubit gate application. index={}, dim={}",
                            indices[j], dim
                        ),
                    });
                }
            }

            // Apply the 4x4 matrix: psi' = matrix * psi
            let mut psi_prime = [Complex::zero(); 4];
            for row in 0..4 {
                for (col, _) in psi.iter().enumerate() {
                    psi_prime[row] += matrix[row][col] * psi[col];
                }
            }

            // Write the results back into the new vector
            for j in 0..4 {
                new_vec[indices[j]] = psi_prime[j];
            }
        }

        self.state = QuantumState::new(new_vec);
        Ok(())
    }
}
