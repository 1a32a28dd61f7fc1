// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! arcade operations.
//!
//! This module provides the `Circuit` structure: the ordered list of gate
//! presses, CNOTs, and measurements a player has made, plus the queries the
//! truth table and missions ask of it.

use crate::core::QubitId;
use crate::gates::Gate;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// One step in a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A single-qubit gate applied to one target.
    Gate {
        /// The gate from the menu.
        gate: Gate,
        /// The qubit it acts on.
        target: QubitId,
    },
    /// Controlled-NOT between two distinct qubits.
    ControlledNot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit, flipped when the control reads 1.
        target: QubitId,
    },
    /// Measurement of the listed qubits in the computational basis.
    Measure {
        /// Qubits to collapse and record.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Lists every qubit this operation touches.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::ControlledNot { control, target } => vec![*control, *target],
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Label used for usage tracking and diagrams. Measurements have none.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Operation::Gate { gate, .. } => Some(gate.label()),
            Operation::ControlledNot { .. } => Some("CNOT"),
            Operation::Measure { .. } => None,
        }
    }
}

/// An ordered sequence of operations applied to the register.
///
/// Order is exactly application order. The set of touched qubits is kept
/// alongside so displays and missions can ask about coverage cheaply.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of qubits involved across all operations.
    qubits: HashSet<QubitId>,

    /// The ordered sequence of operations defining the circuit's logic.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit's sequence.
    ///
    /// The qubits the operation touches are registered automatically.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Returns a reference to the set of unique qubits involved.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Returns a slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the total number of operations in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Register size implied by the touched qubits: highest index plus one.
    pub fn qubit_count(&self) -> usize {
        self.qubits
            .iter()
            .map(|q| q.index())
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Whether any X gate appears anywhere in the circuit.
    pub fn uses_x(&self) -> bool {
        self.uses_label("X")
    }

    /// Whether any Hadamard appears anywhere in the circuit.
    pub fn uses_h(&self) -> bool {
        self.uses_label("H")
    }

    /// Whether any CNOT appears anywhere in the circuit.
    pub fn uses_cnot(&self) -> bool {
        self.uses_label("CNOT")
    }

    fn uses_label(&self, label: &str) -> bool {
        self.operations
            .iter()
            .any(|op| op.label() == Some(label))
    }

    /// Distinct operation labels used so far, sorted. Measurements are not
    /// counted as gates.
    pub fn labels_used(&self) -> BTreeSet<&'static str> {
        self.operations.iter().filter_map(|op| op.label()).collect()
    }

    /// Qubits that have received the labelled single-qubit gate.
    pub fn qubits_with_gate(&self, label: &str) -> HashSet<QubitId> {
        self.operations
            .iter()
            .filter_map(|op| match op {
                Operation::Gate { gate, target } if gate.label() == label => Some(*target),
                _ => None,
            })
            .collect()
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances
/// using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single operation to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Appends a single-qubit gate on `target`.
    pub fn gate(self, gate: Gate, target: QubitId) -> Self {
        self.add_op(Operation::Gate { gate, target })
    }

    /// Appends a CNOT with the given control and target.
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.add_op(Operation::ControlledNot { control, target })
    }

    /// Appends a measurement of the listed qubits.
    pub fn measure<I>(self, targets: I) -> Self
    where
        I: IntoIterator<Item = QubitId>,
    {
        self.add_op(Operation::Measure {
            targets: targets.into_iter().collect(),
        })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "quarcade::Circuit[0 operations on 0 qubits]");
        }

        // --- Setup ---
        let ops = &self.operations;
        let num_ops = ops.len();

        // Get sorted list of unique qubits and create row map
        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort(); // Sort numerically for consistent row order
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> = sorted_qubits
            .iter()
            .enumerate()
            .map(|(i, q)| (*q, i))
            .collect();

        // Determine label width
        let max_label_width = sorted_qubits
            .iter()
            .map(|q| format!("{}", q).len())
            .max()
            .unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        // Grid dimensions and padding
        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // Initialize grids
        // op_grid[row][time] stores the gate/wire segment string
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time] stores the vertical connector char below this row at this time
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        // Helper to format a gate symbol
        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        // --- Populate Grids ---
        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate { gate, target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate(gate.label());
                    }
                }
                Operation::ControlledNot { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) =
                        (qubit_to_row.get(control), qubit_to_row.get(target))
                    {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate("X");

                        // Add vertical connection lines
                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            op_grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(
            f,
            "quarcade::Circuit[{} operations on {} qubits]",
            num_ops, num_qubits
        )?;
        for r in 0..num_qubits {
            // Print qubit label row
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            // Print vertical connector row (if not the last qubit)
            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
