//! Example demonstrating Bell pair preparation, analysis readouts, and
//! the measurement coin flip.

use quarcade::analysis::{bell_fidelity, bloch_vector};
use quarcade::{
    ArcadeConfig, ArcadeError, CircuitBuilder, GameSession, Gate, QubitId, Simulator,
};

// Helper for QubitId creation
fn qid(id: u8) -> QubitId { QubitId(id) }

fn main() -> Result<(), ArcadeError> {
    println!("--- quarcade Example: Bell Pair ---");

    let q0 = qid(0);
    let q1 = qid(1);

    // --- Build Circuit ---
    // 1. Hadamard puts q0 into (|0> + |1>)/sqrt(2).
    // 2. CNOT copies the superposition onto q1, entangling the pair.
    // 3. Measure both qubits.
    let circuit = CircuitBuilder::new()
        .gate(Gate::H, q0)
        .cnot(q0, q1)
        .measure([q0, q1])
        .build();

    // Print the circuit diagram
    println!("\nCircuit Definition:\n{}", circuit);

    // --- Analyze Expected Intermediate State (Conceptual) ---
    // After H:    (|00> + |10>)/sqrt(2)   (qubit 0 is the high bit)
    // After CNOT: (|00> + |11>)/sqrt(2)   the Bell pair
    // Measurement yields 00 or 11, each with probability 0.5; the two
    // bits can never disagree.
    println!("Conceptual State Before Measurement: ~ [0.707, 0, 0, 0.707]");
    println!("  (Equal potentiality for |00> and |11>, nothing on the mixed faces)");

    // --- Peek at the State Through a Session ---
    // The session applies the same gates without the final measurement, so
    // the analysis readouts can see the live entangled state.
    let config = ArcadeConfig {
        qubits: 2,
        seed: Some(7),
        ..ArcadeConfig::default()
    };
    let mut session = GameSession::new(config)?;
    session.apply_gate(Gate::H, &[q0])?;
    session.apply_cnot(q0, q1)?;

    let fidelity = bell_fidelity(session.state(), q0, q1)?;
    println!("\nBell fidelity of the live state: {:.6}", fidelity);

    for qubit in [q0, q1] {
        let bloch = bloch_vector(session.state(), qubit)?;
        println!(
            "Bloch vector for {}: {} (length {:.3}, mixed: {})",
            qubit,
            bloch,
            bloch.length(),
            bloch.is_mixed(None)
        );
    }
    println!("  (Zero-length arrows are the signature of entanglement:");
    println!("   neither qubit has a direction of its own anymore.)");

    // --- Run Simulation ---
    let simulator = Simulator::with_seed(7);
    println!("\nRunning the seeded simulation (one coin flip)...");

    match simulator.run(&circuit) {
        Ok(result) => {
            println!("Simulation finished successfully.");
            println!("\n{}", result); // Uses the Display impl for SimulationResult

            let bit0 = result.get_bit(&q0);
            let bit1 = result.get_bit(&q1);
            println!("Recorded bits: {} -> {:?}, {} -> {:?}", q0, bit0, q1, bit1);
            assert_eq!(bit0, bit1, "Bell pair bits must agree");
            println!("The two bits agree, as entanglement demands.");
            println!("Re-running under seed 7 reproduces this exact outcome;");
            println!("dropping the seed gives a fresh 50/50 flip every run.");
        }
        Err(e) => {
            eprintln!("\n--- Simulation Failed ---");
            eprintln!("Error: {}", e);
            return Err(e); // Propagate error
        }
    }

    Ok(())
}
