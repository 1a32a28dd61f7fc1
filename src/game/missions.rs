// src/game/missions.rs

//! The mission catalog: seven objectives cycled in fixed order.
//!
//! Each mission carries a machine-checkable goal evaluated against the
//! player's circuit and live state. Completion is detected by the session
//! after every action; the manual `next` command still cycles freely.

use crate::analysis;
use crate::circuits::Circuit;
use crate::core::{QuantumState, QubitId};

/// What a mission asks the player to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionGoal {
    /// The labelled single-qubit gate has been applied to every qubit.
    GateOnEveryQubit(&'static str),
    /// The circuit contains at least one operation with this label.
    UseLabel(&'static str),
    /// Qubits 0 and 1 form a Bell pair (fidelity at threshold or above).
    BellPair,
    /// At least this many distinct operation labels appear in the circuit.
    Variety(usize),
    /// A non-empty circuit shorter than the limit whose live state is
    /// back at `|0…0⟩`.
    RoundTrip(usize),
}

/// One entry of the mission catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mission {
    /// Short name shown on the scoreboard.
    pub title: &'static str,
    /// Player-facing instruction.
    pub brief: &'static str,
    /// The checkable goal.
    pub goal: MissionGoal,
}

impl Mission {
    /// Evaluates the goal against the current circuit and state.
    pub fn is_met(&self, circuit: &Circuit, state: &QuantumState, num_qubits: usize) -> bool {
        match self.goal {
            MissionGoal::GateOnEveryQubit(label) => {
                let touched = circuit.qubits_with_gate(label);
                (0..num_qubits).all(|idx| touched.contains(&QubitId(idx as u8)))
            }
            MissionGoal::UseLabel(label) => circuit.labels_used().contains(label),
            MissionGoal::BellPair => {
                num_qubits >= 2
                    && analysis::bell_fidelity(state, QubitId(0), QubitId(1))
                        .map(|fidelity| fidelity >= crate::core::tolerances::FIDELITY_THRESHOLD)
                        .unwrap_or(false)
            }
            MissionGoal::Variety(distinct) => circuit.labels_used().len() >= distinct,
            MissionGoal::RoundTrip(max_ops) => {
                !circuit.is_empty()
                    && circuit.len() < max_ops
                    && analysis::is_basis_state(state, 0, None)
            }
        }
    }
}

/// The catalog, cycled in order.
pub static MISSIONS: [Mission; 7] = [
    Mission {
        title: "Superposition everywhere",
        brief: "Put every qubit into superposition with H.",
        goal: MissionGoal::GateOnEveryQubit("H"),
    },
    Mission {
        title: "Entangle",
        brief: "Link two qubits with a CNOT.",
        goal: MissionGoal::UseLabel("CNOT"),
    },
    Mission {
        title: "Phase flip",
        brief: "Flip a phase with the Z gate.",
        goal: MissionGoal::UseLabel("Z"),
    },
    Mission {
        title: "Bell pair",
        brief: "Build a Bell pair on q0 and q1.",
        goal: MissionGoal::BellPair,
    },
    Mission {
        title: "Flip everything",
        brief: "Hit every qubit with an X.",
        goal: MissionGoal::GateOnEveryQubit("X"),
    },
    Mission {
        title: "Variety",
        brief: "Use three different gate types in one circuit.",
        goal: MissionGoal::Variety(3),
    },
    Mission {
        title: "Round trip",
        brief: "Return to |0…0⟩ in fewer than five moves.",
        goal: MissionGoal::RoundTrip(5),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::ArcadeError;
    use crate::gates::Gate;
    use crate::simulation::engine::SimulationEngine;

    fn qid(id: u8) -> QubitId {
        QubitId(id)
    }

    fn ground(num_qubits: usize) -> QuantumState {
        QuantumState::ground(1 << num_qubits)
    }

    #[test]
    fn hadamard_everywhere_needs_full_coverage() {
        let mission = &MISSIONS[0];
        let partial = CircuitBuilder::new().gate(Gate::H, qid(0)).build();
        assert!(!mission.is_met(&partial, &ground(2), 2));

        let full = CircuitBuilder::new()
            .gate(Gate::H, qid(0))
            .gate(Gate::H, qid(1))
            .build();
        assert!(mission.is_met(&full, &ground(2), 2));
    }

    #[test]
    fn label_missions_scan_the_circuit() {
        let circuit = CircuitBuilder::new()
            .cnot(qid(0), qid(1))
            .gate(Gate::Z, qid(1))
            .build();
        assert!(MISSIONS[1].is_met(&circuit, &ground(2), 2)); // CNOT
        assert!(MISSIONS[2].is_met(&circuit, &ground(2), 2)); // Z
        assert!(!MISSIONS[1].is_met(&Circuit::new(), &ground(2), 2));
    }

    #[test]
    fn bell_pair_mission_tracks_the_live_state() -> Result<(), ArcadeError> {
        let mission = &MISSIONS[3];
        let mut engine = SimulationEngine::init(2, Some(5))?;
        assert!(!mission.is_met(&Circuit::new(), engine.state(), 2));

        engine.apply_operation(&crate::circuits::Operation::Gate {
            gate: Gate::H,
            target: qid(0),
        })?;
        engine.apply_operation(&crate::circuits::Operation::ControlledNot {
            control: qid(0),
            target: qid(1),
        })?;
        assert!(mission.is_met(&Circuit::new(), engine.state(), 2));
        Ok(())
    }

    #[test]
    fn bell_pair_needs_two_qubits() {
        assert!(!MISSIONS[3].is_met(&Circuit::new(), &ground(1), 1));
    }

    #[test]
    fn variety_counts_distinct_labels() {
        let two = CircuitBuilder::new()
            .gate(Gate::H, qid(0))
            .gate(Gate::H, qid(1))
            .gate(Gate::X, qid(0))
            .build();
        assert!(!MISSIONS[5].is_met(&two, &ground(2), 2));

        let three = CircuitBuilder::new()
            .gate(Gate::H, qid(0))
            .gate(Gate::X, qid(0))
            .cnot(qid(0), qid(1))
            .build();
        assert!(MISSIONS[5].is_met(&three, &ground(2), 2));
    }

    #[test]
    fn round_trip_needs_a_short_circuit_back_at_ground() {
        let mission = &MISSIONS[6];
        // Empty circuit does not count even though the state is |00>.
        assert!(!mission.is_met(&Circuit::new(), &ground(2), 2));

        // X then X returns to ground in two moves.
        let circuit = CircuitBuilder::new()
            .gate(Gate::X, qid(0))
            .gate(Gate::X, qid(0))
            .build();
        assert!(mission.is_met(&circuit, &ground(2), 2));

        // Five moves is one too many.
        let long = CircuitBuilder::new()
            .gate(Gate::X, qid(0))
            .gate(Gate::X, qid(0))
            .gate(Gate::X, qid(0))
            .gate(Gate::X, qid(0))
            .gate(Gate::X, qid(0))
            .build();
        assert!(!mission.is_met(&long, &ground(2), 2));
    }
}
