// src/game/command.rs

//! The arcade's line grammar. Parsing lives here, in the library, so the
//! REPL stays a thin loop and the grammar is testable on its own.

use crate::core::{ArcadeError, QubitId};
use crate::gates::{parse_angle, Gate};

/// A parsed player command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply a single-qubit gate to the listed qubits.
    Gate {
        /// The gate, angle included for rotations.
        gate: Gate,
        /// Targets, in press order.
        targets: Vec<QubitId>,
    },
    /// Apply a CNOT.
    Cnot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Measure the listed qubits; empty means the whole register.
    Measure {
        /// Qubits to collapse.
        targets: Vec<QubitId>,
    },
    /// Full dashboard: state, Bloch panels, circuit, scoreboard.
    Show,
    /// Amplitude table of the live state.
    State,
    /// Bloch panels only.
    Bloch,
    /// Circuit diagram only.
    CircuitView,
    /// Logical truth table.
    Table,
    /// Active mission and catalog progress.
    Mission,
    /// Cycle to the next mission.
    Next,
    /// Points, level, and progress bar.
    Score,
    /// Clear the circuit and state, keeping the score.
    Reset,
    /// Gate reference and command list.
    Help,
    /// Leave the arcade.
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ArcadeError> {
        let mut words = line.split_whitespace();
        let head = match words.next() {
            Some(head) => head.to_ascii_lowercase(),
            None => return Ok(None),
        };
        let args: Vec<&str> = words.collect();

        let command = match head.as_str() {
            "h" | "x" | "z" | "s" | "t" => {
                let gate = Gate::from_name(&head, None)?;
                let targets = parse_qubits(&args)?;
                if targets.is_empty() {
                    return Err(usage(&format!("{} <qubit…>", head)));
                }
                Command::Gate { gate, targets }
            }
            "rx" | "ry" | "rz" => {
                let (angle_text, qubit_args) = args
                    .split_first()
                    .ok_or_else(|| usage(&format!("{} <angle> <qubit…>", head)))?;
                let angle = parse_angle(angle_text)?;
                let gate = Gate::from_name(&head, Some(angle))?;
                let targets = parse_qubits(qubit_args)?;
                if targets.is_empty() {
                    return Err(usage(&format!("{} <angle> <qubit…>", head)));
                }
                Command::Gate { gate, targets }
            }
            "cnot" | "cx" => {
                if args.len() != 2 {
                    return Err(usage("cnot <control> <target>"));
                }
                Command::Cnot {
                    control: parse_qubit(args[0])?,
                    target: parse_qubit(args[1])?,
                }
            }
            "measure" | "m" | "flip" => Command::Measure {
                targets: parse_qubits(&args)?,
            },
            "show" | "dashboard" => Command::Show,
            "state" | "amplitudes" => Command::State,
            "bloch" => Command::Bloch,
            "circuit" | "draw" => Command::CircuitView,
            "table" | "truth" => Command::Table,
            "mission" | "missions" => Command::Mission,
            "next" => Command::Next,
            "score" => Command::Score,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(ArcadeError::InvalidOperation {
                    message: format!("unknown command '{}', try help", other),
                });
            }
        };
        Ok(Some(command))
    }
}

fn usage(pattern: &str) -> ArcadeError {
    ArcadeError::InvalidOperation {
        message: format!("usage: {}", pattern),
    }
}

/// Parses a qubit token: `2` or `q2`.
fn parse_qubit(token: &str) -> Result<QubitId, ArcadeError> {
    let digits = token.strip_prefix('q').unwrap_or(token);
    digits
        .parse::<u8>()
        .map(QubitId)
        .map_err(|_| ArcadeError::InvalidOperation {
            message: format!("'{}' is not a qubit index", token),
        })
}

fn parse_qubits(tokens: &[&str]) -> Result<Vec<QubitId>, ArcadeError> {
    tokens.iter().map(|token| parse_qubit(token)).collect()
}
