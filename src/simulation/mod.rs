// src/simulation/mod.rs

//! Simulates the execution of `quarcade::circuits::Circuit`.
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` responsible for evolving the register state and
//! resolving measurements.

// Make engine module crate visible for the game session
pub(crate) mod engine;
mod results;

// Re-export the main public interface types
pub use results::SimulationResult;

// Import necessary types for the Simulator struct and its methods
use crate::circuits::{Circuit, Operation};
use crate::core::ArcadeError;
use engine::SimulationEngine;

/// Batch simulator for complete circuits.
///
/// Builds an engine sized to the circuit, applies every operation in
/// order, and returns the bits recorded by measurement operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Simulator {
    /// Fixed RNG seed for reproducible measurement outcomes.
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator whose measurements draw from OS entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator with a fixed measurement seed. Identical
    /// circuits run under the same seed produce identical outcomes.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Runs the provided circuit from `|0…0⟩`.
    ///
    /// The register is sized from the highest qubit the circuit touches.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` containing the bits recorded by `Measure`
    ///   operations (empty if the circuit never measures).
    /// * `Err(ArcadeError)` on invalid targets or engine failures.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, ArcadeError> {
        // Handle empty circuit case
        if circuit.is_empty() {
            return Ok(SimulationResult::new());
        }

        // 1. Size the engine from the circuit and set up |0…0>.
        let mut engine = SimulationEngine::init(circuit.qubit_count(), self.seed)?;

        // 2. Results container for measured bits.
        let mut result = SimulationResult::new();

        // 3. Apply the ordered sequence of operations.
        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => {
                    engine.measure(targets, &mut result)?;
                }
                _ => {
                    engine.apply_operation(op)?;
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::{QuantumState, QubitId};
    use crate::gates::Gate;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    // --- Helper Functions ---
    fn qid(id: u8) -> QubitId {
        QubitId(id)
    }

    fn check_bit(result: &SimulationResult, qubit: QubitId, expected_bit: u8) {
        match result.get_bit(&qubit) {
            Some(bit) => assert_eq!(bit, expected_bit, "Mismatch for {}", qubit),
            None => panic!("{} was not measured", qubit),
        }
    }

    /// Asserts that two complex state vectors are approximately equal
    /// component-wise.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        tolerance: f64,
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let diff = actual[i] - expected[i];
            let dist_sq = diff.norm_sqr();
            assert!(
                dist_sq < tolerance * tolerance,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i, actual[i], expected[i], dist_sq, context
            );
        }
    }

    #[test]
    fn test_x_on_each_qubit_prepares_all_ones() -> Result<(), ArcadeError> {
        // Walks the target bit through the high, middle, and low positions
        // of a 3-qubit register; every amplitude must land on |111>.
        let mut engine = SimulationEngine::init(3, None)?;
        for id in 0..3 {
            engine.apply_operation(&Operation::Gate { gate: Gate::X, target: qid(id) })?;
        }

        let mut expected = vec![Complex::zero(); 8];
        expected[7] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(
            engine.state().vector(),
            &expected,
            TEST_TOLERANCE,
            "X applied to every qubit of |000>",
        );
        Ok(())
    }

    #[test]
    fn test_hadamard_on_every_qubit_spreads_evenly() -> Result<(), ArcadeError> {
        // H on both qubits of |00> gives amplitude 1/2 on all four basis
        // states, keeping the norm at one.
        let mut engine = SimulationEngine::init(2, None)?;
        engine.apply_operation(&Operation::Gate { gate: Gate::H, target: qid(0) })?;
        engine.apply_operation(&Operation::Gate { gate: Gate::H, target: qid(1) })?;

        let expected = vec![Complex::new(0.5, 0.0); 4];
        assert_complex_vec_approx_equal(
            engine.state().vector(),
            &expected,
            TEST_TOLERANCE,
            "H applied to every qubit of |00>",
        );
        Ok(())
    }

    #[test]
    fn test_measure_basis_state() -> Result<(), ArcadeError> {
        // Measuring a basis state always yields that state, whatever the seed.
        let q0 = qid(0);
        let q1 = qid(1);
        let mut engine = SimulationEngine::init(2, Some(42))?;

        // |01> is index 1: q0 (high bit) = 0, q1 (low bit) = 1.
        let state_vec_01 = vec![
            Complex::zero(),
            Complex::new(1.0, 0.0),
            Complex::zero(),
            Complex::zero(),
        ];
        engine.set_state(QuantumState::new(state_vec_01))?;
        let mut result = SimulationResult::new();
        engine.measure(&[q0, q1], &mut result)?;

        check_bit(&result, q0, 0);
        check_bit(&result, q1, 1);

        // |10> is index 2.
        let state_vec_10 = vec![
            Complex::zero(),
            Complex::zero(),
            Complex::new(1.0, 0.0),
            Complex::zero(),
        ];
        engine.set_state(QuantumState::new(state_vec_10))?;
        let mut result = SimulationResult::new();
        engine.measure(&[q0, q1], &mut result)?;

        check_bit(&result, q0, 1);
        check_bit(&result, q1, 0);

        Ok(())
    }

    #[test]
    fn test_partial_measure_leaves_spectator_untouched() -> Result<(), ArcadeError> {
        // State (|00> + |01>)/sqrt(2): q0 is definitely 0, q1 superposed.
        // Measuring q0 alone must return 0 and leave q1's amplitudes alone.
        let q0 = qid(0);
        let mut engine = SimulationEngine::init(2, Some(7))?;

        let sqrt2_inv = Complex::new(FRAC_1_SQRT_2, 0.0);
        let state_vec = vec![sqrt2_inv, sqrt2_inv, Complex::zero(), Complex::zero()];
        engine.set_state(QuantumState::new(state_vec.clone()))?;

        let mut result = SimulationResult::new();
        engine.measure(&[q0], &mut result)?;

        check_bit(&result, q0, 0);
        assert_complex_vec_approx_equal(
            engine.state().vector(),
            &state_vec,
            TEST_TOLERANCE,
            "measuring the definite qubit of (|00> + |01>)/sqrt(2)",
        );
        Ok(())
    }

    #[test]
    fn test_measure_collapses_bell_pair() -> Result<(), ArcadeError> {
        // H on q0 then CNOT(q0, q1) prepares (|00> + |11>)/sqrt(2).
        // Measuring q0 must collapse the pair to a matching basis state.
        let q0 = qid(0);
        let q1 = qid(1);
        let mut engine = SimulationEngine::init(2, Some(99))?;

        engine.apply_operation(&Operation::Gate { gate: Gate::H, target: q0 })?;
        engine.apply_operation(&Operation::ControlledNot { control: q0, target: q1 })?;

        let mut result = SimulationResult::new();
        engine.measure(&[q0], &mut result)?;

        let bit = result.get_bit(&q0).expect("q0 was measured");
        let surviving_index = if bit == 0 { 0 } else { 3 }; // |00> or |11>
        let mut expected = vec![Complex::zero(); 4];
        expected[surviving_index] = Complex::new(1.0, 0.0);

        assert_complex_vec_approx_equal(
            engine.state().vector(),
            &expected,
            TEST_TOLERANCE,
            "collapse after measuring half of a Bell pair",
        );
        Ok(())
    }

    #[test]
    fn test_seeded_runs_are_deterministic() -> Result<(), ArcadeError> {
        let circuit = CircuitBuilder::new()
            .gate(Gate::H, qid(0))
            .gate(Gate::H, qid(1))
            .measure([qid(0), qid(1)])
            .build();

        let first = Simulator::with_seed(2024).run(&circuit)?;
        let second = Simulator::with_seed(2024).run(&circuit)?;
        assert_eq!(first, second, "same seed and circuit must reproduce outcomes");
        Ok(())
    }

    #[test]
    fn test_empty_circuit_yields_empty_result() -> Result<(), ArcadeError> {
        let result = Simulator::new().run(&Circuit::new())?;
        assert!(result.is_empty(), "no measurements expected from an empty circuit");
        Ok(())
    }
}
