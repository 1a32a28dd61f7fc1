// src/game/session.rs

//! Live game state: the player's circuit, the register it drives, and the
//! scoring and mission bookkeeping around both.
//!
//! Every player action funnels through [`GameSession`], which validates it,
//! applies it to the engine, appends it to the circuit history, pays out
//! points, and reports what happened as [`ArcadeEvent`]s.

use crate::circuits::{Circuit, Operation};
use crate::core::{ArcadeError, QuantumState, QubitId};
use crate::game::config::ArcadeConfig;
use crate::game::missions::{Mission, MISSIONS};
use crate::gates::Gate;
use crate::simulation::engine::SimulationEngine;
use std::collections::HashSet;
use tracing::debug;

/// Something the session did in response to a player action.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcadeEvent {
    /// A gate or CNOT was applied and paid out.
    GateApplied {
        /// Operation label, e.g. `H` or `CNOT`.
        label: &'static str,
        /// The qubits it touched, in application order.
        targets: Vec<QubitId>,
        /// Points paid for the press.
        points: u32,
    },
    /// Qubits were measured; the recorded bits, sorted by qubit.
    Measured {
        /// Collapsed bits per measured qubit.
        bits: Vec<(QubitId, u8)>,
    },
    /// The active mission's goal was reached.
    MissionComplete {
        /// Catalog index of the finished mission.
        index: usize,
        /// Its title.
        title: &'static str,
        /// Bonus points paid.
        bonus: u32,
    },
    /// The point total crossed the current level's threshold.
    LevelUp {
        /// The level just reached.
        level: u32,
    },
}

/// One playthrough: circuit, live state, score, and mission progress.
pub struct GameSession {
    config: ArcadeConfig,
    circuit: Circuit,
    engine: SimulationEngine,
    points: u32,
    level: u32,
    mission_idx: usize,
    completed: HashSet<usize>,
}

impl GameSession {
    /// Starts a session from validated settings.
    pub fn new(config: ArcadeConfig) -> Result<Self, ArcadeError> {
        config.validate()?;
        let engine = SimulationEngine::init(config.qubits as usize, config.seed)?;
        Ok(Self {
            config,
            circuit: Circuit::new(),
            engine,
            points: 0,
            level: 1,
            mission_idx: 0,
            completed: HashSet::new(),
        })
    }

    /// Applies a single-qubit gate to each listed target, in order.
    ///
    /// The whole batch is validated before anything touches the state;
    /// points are paid once per press, not per qubit.
    pub fn apply_gate(
        &mut self,
        gate: Gate,
        targets: &[QubitId],
    ) -> Result<Vec<ArcadeEvent>, ArcadeError> {
        if targets.is_empty() {
            return Err(ArcadeError::InvalidOperation {
                message: format!("{} needs at least one target qubit", gate.label()),
            });
        }
        self.validate_targets(targets)?;

        for target in targets {
            let op = Operation::Gate { gate, target: *target };
            self.engine.apply_operation(&op)?;
            self.circuit.add_operation(op);
        }
        debug!(gate = gate.label(), ?targets, "applied gate batch");

        let mut events = vec![ArcadeEvent::GateApplied {
            label: gate.label(),
            targets: targets.to_vec(),
            points: self.config.points_per_gate,
        }];
        events.extend(self.award(self.config.points_per_gate));
        events.extend(self.detect_missions());
        Ok(events)
    }

    /// Applies a CNOT between two distinct qubits.
    pub fn apply_cnot(
        &mut self,
        control: QubitId,
        target: QubitId,
    ) -> Result<Vec<ArcadeEvent>, ArcadeError> {
        if control == target {
            return Err(ArcadeError::InvalidTarget {
                qubit: control,
                message: "control and target of a CNOT must differ".to_string(),
            });
        }
        self.validate_targets(&[control, target])?;

        let op = Operation::ControlledNot { control, target };
        self.engine.apply_operation(&op)?;
        self.circuit.add_operation(op);
        debug!(%control, %target, "applied CNOT");

        let mut events = vec![ArcadeEvent::GateApplied {
            label: "CNOT",
            targets: vec![control, target],
            points: self.config.points_per_gate,
        }];
        events.extend(self.award(self.config.points_per_gate));
        events.extend(self.detect_missions());
        Ok(events)
    }

    /// Measures the listed qubits, or the whole register when the list is
    /// empty. Collapses the live state and records the operation in the
    /// circuit. Measurement pays no points.
    pub fn measure(&mut self, targets: &[QubitId]) -> Result<Vec<ArcadeEvent>, ArcadeError> {
        let targets: Vec<QubitId> = if targets.is_empty() {
            (0..self.config.qubits).map(QubitId).collect()
        } else {
            targets.to_vec()
        };
        self.validate_targets(&targets)?;

        let mut result = crate::simulation::SimulationResult::new();
        self.engine.measure(&targets, &mut result)?;
        self.circuit.add_operation(Operation::Measure {
            targets: targets.clone(),
        });
        debug!(?targets, "measured");

        let mut events = vec![ArcadeEvent::Measured {
            bits: result.sorted_bits(),
        }];
        events.extend(self.detect_missions());
        Ok(events)
    }

    /// Clears the circuit and returns the register to `|0…0⟩`.
    /// Points, level, and mission progress survive.
    pub fn reset(&mut self) {
        self.circuit = Circuit::new();
        self.engine.reset_state();
        debug!("reset circuit and state");
    }

    /// Manually cycles to the next mission in catalog order, completed or
    /// not. Pays nothing.
    pub fn advance_mission(&mut self) {
        self.mission_idx = (self.mission_idx + 1) % MISSIONS.len();
    }

    /// Fraction of the base level step covered by the current point total.
    pub fn progress(&self) -> f64 {
        (self.points % self.config.level_step) as f64 / self.config.level_step as f64
    }

    /// Current point total.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Current level, starting at 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Catalog index of the active mission.
    pub fn mission_index(&self) -> usize {
        self.mission_idx
    }

    /// The active mission.
    pub fn active_mission(&self) -> &'static Mission {
        &MISSIONS[self.mission_idx]
    }

    /// Whether the mission at `index` has been completed this session.
    pub fn is_mission_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    /// Number of completed missions.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// The live register state.
    pub fn state(&self) -> &QuantumState {
        self.engine.state()
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Register size for this session.
    pub fn num_qubits(&self) -> usize {
        self.config.qubits as usize
    }

    /// The settings this session runs under.
    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    /// Rejects empty-range and duplicate targets before any state change.
    fn validate_targets(&self, targets: &[QubitId]) -> Result<(), ArcadeError> {
        let mut seen = HashSet::new();
        for target in targets {
            if target.index() >= self.config.qubits as usize {
                return Err(ArcadeError::InvalidTarget {
                    qubit: *target,
                    message: format!("outside the {}-qubit register", self.config.qubits),
                });
            }
            if !seen.insert(*target) {
                return Err(ArcadeError::InvalidTarget {
                    qubit: *target,
                    message: "listed more than once".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Adds points and applies the level rule: one level per award at most.
    fn award(&mut self, amount: u32) -> Vec<ArcadeEvent> {
        self.points += amount;
        let mut events = Vec::new();
        if self.points >= self.config.level_step * self.level {
            self.level += 1;
            debug!(level = self.level, points = self.points, "level up");
            events.push(ArcadeEvent::LevelUp { level: self.level });
        }
        events
    }

    /// Checks the active mission after a state change, paying the bonus and
    /// advancing on completion. Cascades while newly active missions are
    /// already satisfied.
    fn detect_missions(&mut self) -> Vec<ArcadeEvent> {
        let mut events = Vec::new();
        loop {
            if self.completed.len() == MISSIONS.len() {
                break;
            }
            let idx = self.mission_idx;
            if self.completed.contains(&idx) {
                // Player parked on a finished mission via `next`.
                break;
            }
            let mission = &MISSIONS[idx];
            if !mission.is_met(&self.circuit, self.engine.state(), self.num_qubits()) {
                break;
            }
            self.completed.insert(idx);
            debug!(index = idx, title = mission.title, "mission complete");
            events.push(ArcadeEvent::MissionComplete {
                index: idx,
                title: mission.title,
                bonus: self.config.mission_bonus,
            });
            events.extend(self.award(self.config.mission_bonus));
            self.advance_to_next_open();
        }
        events
    }

    /// Moves the active mission pointer to the next uncompleted mission.
    fn advance_to_next_open(&mut self) {
        let mut idx = (self.mission_idx + 1) % MISSIONS.len();
        while self.completed.contains(&idx) && self.completed.len() < MISSIONS.len() {
            idx = (idx + 1) % MISSIONS.len();
        }
        self.mission_idx = idx;
    }
}
