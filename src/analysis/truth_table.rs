// src/analysis/truth_table.rs

//! The arcade's logical truth table.
//!
//! This is a classical reading of the circuit, not a simulation: any X in
//! the circuit flips every input bitwise, otherwise any H marks all rows
//! "Superposed", otherwise any CNOT marks them "Entangled", otherwise
//! inputs pass through unchanged. That precedence is the whole rule.

use crate::circuits::Circuit;
use std::fmt;

/// One row of the table: a basis input ket and its logical outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    /// Input basis state, e.g. `|01⟩`.
    pub input: String,
    /// Output ket, or the annotation `|Superposed⟩` / `|Entangled⟩`.
    pub output: String,
}

impl TruthTableRow {
    /// Whether the output is one of the annotation kets rather than a
    /// basis state.
    pub fn is_annotation(&self) -> bool {
        matches!(self.output.as_str(), "|Superposed⟩" | "|Entangled⟩")
    }
}

/// Logical truth table over every basis input of the register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    rows: Vec<TruthTableRow>,
}

impl TruthTable {
    /// The rows, one per basis input, in ascending index order.
    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    /// Caption shown under the table.
    pub fn caption() -> &'static str {
        "Logical mapping only. Superposition and entanglement appear as annotations."
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input_width = self
            .rows
            .iter()
            .map(|row| row.input.chars().count())
            .max()
            .unwrap_or(0)
            .max("Input".len());
        writeln!(f, "{:<width$}  Output", "Input", width = input_width)?;
        for row in &self.rows {
            writeln!(f, "{:<width$}  {}", row.input, row.output, width = input_width)?;
        }
        Ok(())
    }
}

/// Builds the logical truth table for `circuit` over `num_qubits` inputs.
pub fn truth_table(circuit: &Circuit, num_qubits: usize) -> TruthTable {
    let flips = circuit.uses_x();
    let superposes = circuit.uses_h();
    let entangles = circuit.uses_cnot();

    let dim = 1usize << num_qubits;
    let mut rows = Vec::with_capacity(dim);
    for i in 0..dim {
        let input = format!("|{:0width$b}⟩", i, width = num_qubits);
        let output = if flips {
            let flipped = !i & (dim - 1);
            format!("|{:0width$b}⟩", flipped, width = num_qubits)
        } else if superposes {
            "|Superposed⟩".to_string()
        } else if entangles {
            "|Entangled⟩".to_string()
        } else {
            input.clone()
        };
        rows.push(TruthTableRow { input, output });
    }
    TruthTable { rows }
}
