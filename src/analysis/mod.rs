// src/analysis/mod.rs

//! Read-only inspection of a `QuantumState`: Bloch vectors from reduced
//! density matrices, Bell and basis-state fidelities, and normalization
//! checks. Nothing here mutates the state; these feed the arcade's
//! displays and mission checks.

pub mod truth_table;

pub use truth_table::{truth_table, TruthTable, TruthTableRow};

use crate::core::constants::tolerances;
use crate::core::{ArcadeError, QuantumState, QubitId};
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// The Bloch-sphere coordinates of one qubit.
///
/// Pure unentangled qubits sit on the sphere surface (`length() ≈ 1`);
/// entangled or measured-away qubits fall inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlochVector {
    /// X component, `2·Re(ρ01)`.
    pub x: f64,
    /// Y component, `−2·Im(ρ01)`.
    pub y: f64,
    /// Z component, `ρ00 − ρ11`. `+1` is `|0⟩`, `−1` is `|1⟩`.
    pub z: f64,
}

impl BlochVector {
    /// Euclidean length. At most 1 for physical states.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Spherical angles `(theta, phi)`: `theta` from the +Z pole,
    /// `phi` from +X towards +Y. The zero vector reports `(0, 0)`.
    pub fn polar(&self) -> (f64, f64) {
        let r = self.length();
        if r < tolerances::AMPLITUDE_EPSILON {
            return (0.0, 0.0);
        }
        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let phi = self.y.atan2(self.x);
        (theta, phi)
    }

    /// Whether the qubit is noticeably inside the sphere, the signature
    /// of entanglement with the rest of the register.
    pub fn is_mixed(&self, tolerance: Option<f64>) -> bool {
        let effective_tolerance = tolerance.unwrap_or(1e-6);
        self.length() < 1.0 - effective_tolerance
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+.3}, {:+.3}, {:+.3})", self.x, self.y, self.z)
    }
}

/// Computes the single-qubit reduced density matrix of `qubit`, tracing
/// out the rest of the register.
///
/// # Arguments
/// * `state` - The register state to reduce.
/// * `qubit` - The qubit to keep.
///
/// # Returns
/// * `Ok(rho)` - 2x2 matrix in the `{|0⟩, |1⟩}` basis of `qubit`.
/// * `Err(ArcadeError::InvalidTarget)` if the qubit is out of range.
pub fn reduced_single(
    state: &QuantumState,
    qubit: QubitId,
) -> Result<[[Complex<f64>; 2]; 2], ArcadeError> {
    let n = state.num_qubits();
    let idx = qubit.index();
    if idx >= n {
        return Err(ArcadeError::InvalidTarget {
            qubit,
            message: format!("outside the {}-qubit state", n),
        });
    }
    let bit_pos = n - 1 - idx;
    let bit_mask = 1usize << bit_pos;

    let vector = state.vector();
    let mut rho = [[Complex::zero(); 2]; 2];
    // rho[a][b] = sum over rest of psi(a, rest) * conj(psi(b, rest))
    for (k, amp) in vector.iter().enumerate() {
        let a = (k >> bit_pos) & 1;
        for b in 0..2 {
            let j = (k & !bit_mask) | (b << bit_pos);
            rho[a][b] += amp * vector[j].conj();
        }
    }
    Ok(rho)
}

/// Computes the Bloch vector of one qubit from its reduced density matrix.
///
/// # Arguments
/// * `state` - The register state.
/// * `qubit` - The qubit to project onto the Bloch sphere.
///
/// # Returns
/// * `Ok(BlochVector)` with `x = 2·Re(ρ01)`, `y = −2·Im(ρ01)`,
///   `z = ρ00 − ρ11`.
/// * `Err(ArcadeError::InvalidTarget)` if the qubit is out of range.
pub fn bloch_vector(state: &QuantumState, qubit: QubitId) -> Result<BlochVector, ArcadeError> {
    let rho = reduced_single(state, qubit)?;
    Ok(BlochVector {
        x: 2.0 * rho[0][1].re,
        y: -2.0 * rho[0][1].im,
        z: rho[0][0].re - rho[1][1].re,
    })
}

/// Computes the Bloch vector of every qubit in register order.
pub fn bloch_vectors(state: &QuantumState) -> Result<Vec<BlochVector>, ArcadeError> {
    (0..state.num_qubits())
        .map(|idx| bloch_vector(state, QubitId(idx as u8)))
        .collect()
}

/// Computes the two-qubit reduced density matrix of `(first, second)`,
/// tracing out the rest of the register. Basis order is
/// `|first second⟩` -> `|00⟩, |01⟩, |10⟩, |11⟩`.
///
/// # Returns
/// * `Ok(rho)` - the 4x4 reduced matrix.
/// * `Err(ArcadeError::InvalidTarget)` for out-of-range or equal qubits.
pub fn reduced_pair(
    state: &QuantumState,
    first: QubitId,
    second: QubitId,
) -> Result<[[Complex<f64>; 4]; 4], ArcadeError> {
    let n = state.num_qubits();
    for qubit in [first, second] {
        if qubit.index() >= n {
            return Err(ArcadeError::InvalidTarget {
                qubit,
                message: format!("outside the {}-qubit state", n),
            });
        }
    }
    if first == second {
        return Err(ArcadeError::InvalidTarget {
            qubit: first,
            message: "pair reduction needs two distinct qubits".to_string(),
        });
    }

    let pos_1 = n - 1 - first.index();
    let pos_2 = n - 1 - second.index();
    let mask_1 = 1usize << pos_1;
    let mask_2 = 1usize << pos_2;

    let vector = state.vector();
    let mut rho = [[Complex::zero(); 4]; 4];
    for (k, amp) in vector.iter().enumerate() {
        let row = (((k >> pos_1) & 1) << 1) | ((k >> pos_2) & 1);
        for col in 0..4 {
            let b1 = (col >> 1) & 1;
            let b2 = col & 1;
            let j = (k & !mask_1 & !mask_2) | (b1 << pos_1) | (b2 << pos_2);
            rho[row][col] += amp * vector[j].conj();
        }
    }
    Ok(rho)
}

/// Fidelity of a qubit pair with its nearest Bell state.
///
/// Evaluates `⟨B|ρ|B⟩` for all four Bell states over the pair's reduced
/// density matrix and returns the maximum. A perfectly entangled pair
/// scores 1; a product state scores at most 0.5.
pub fn bell_fidelity(
    state: &QuantumState,
    first: QubitId,
    second: QubitId,
) -> Result<f64, ArcadeError> {
    let rho = reduced_pair(state, first, second)?;

    let h = 1.0 / 2.0_f64.sqrt();
    let plus = Complex::new(h, 0.0);
    let minus = Complex::new(-h, 0.0);
    let zero = Complex::zero();
    // |Φ+⟩, |Φ−⟩, |Ψ+⟩, |Ψ−⟩ in the |00⟩..|11⟩ basis.
    let bell_states: [[Complex<f64>; 4]; 4] = [
        [plus, zero, zero, plus],
        [plus, zero, zero, minus],
        [zero, plus, plus, zero],
        [zero, plus, minus, zero],
    ];

    let mut best = 0.0f64;
    for bell in &bell_states {
        // ⟨B|ρ|B⟩ = sum_ij conj(B_i) ρ_ij B_j, real for Hermitian ρ.
        let mut fidelity = Complex::zero();
        for (i, bra) in bell.iter().enumerate() {
            for (j, ket) in bell.iter().enumerate() {
                fidelity += bra.conj() * rho[i][j] * ket;
            }
        }
        best = best.max(fidelity.re);
    }
    Ok(best.clamp(0.0, 1.0))
}

/// Probability of finding the register in basis state `index`.
pub fn basis_fidelity(state: &QuantumState, index: usize) -> f64 {
    state.probability(index)
}

/// Whether the register is, up to `threshold`, exactly the basis state
/// `index`. Defaults to the arcade's fidelity threshold.
pub fn is_basis_state(state: &QuantumState, index: usize, threshold: Option<f64>) -> bool {
    let effective_threshold = threshold.unwrap_or(tolerances::FIDELITY_THRESHOLD);
    basis_fidelity(state, index) >= effective_threshold
}

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `QuantumState` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults are available.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(ArcadeError::Simulation)` if normalization fails.
pub fn check_normalization(state: &QuantumState, tolerance: Option<f64>) -> Result<(), ArcadeError> {
    let effective_tolerance = tolerance.unwrap_or(tolerances::NORM_EPSILON);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(ArcadeError::Simulation {
            message: format!(
                "state vector normalization failed. Sum(|c_i|^2) = {} (deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}
