// tests/game_tests.rs

// Integration tests for the scored session layer: points, levels, missions,
// and the analysis readouts a session feeds the terminal views.

use quarcade::analysis::{bell_fidelity, bloch_vector, check_normalization, truth_table};
use quarcade::game::ArcadeEvent;
use quarcade::{ArcadeConfig, ArcadeError, GameSession, Gate, QubitId};

use std::fs;

// Helper function to create QubitId for tests
fn qid(id: u8) -> QubitId {
    QubitId(id)
}

// Two-qubit session with a fixed seed. The active mission starts at
// "Superposition everywhere", which X-only play never satisfies, so
// scoring tests built on X presses see pure gate points.
fn small_session() -> GameSession {
    let config = ArcadeConfig {
        qubits: 2,
        seed: Some(11),
        ..ArcadeConfig::default()
    };
    GameSession::new(config).expect("config is valid")
}

fn count_events(events: &[ArcadeEvent], f: impl Fn(&ArcadeEvent) -> bool) -> usize {
    events.iter().filter(|event| f(event)).count()
}

#[test]
fn test_gate_press_pays_once_per_batch() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // One press covering both qubits still pays a single 30.
    let events = session.apply_gate(Gate::X, &[qid(0), qid(1)])?;
    assert_eq!(session.points(), 30);
    assert_eq!(session.circuit().len(), 2, "one operation recorded per target");
    assert_eq!(
        count_events(&events, |e| matches!(e, ArcadeEvent::GateApplied { .. })),
        1
    );

    // The press really landed: all amplitude now sits on |11>.
    assert!((session.state().probability(3) - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_full_superposition_spreads_mass_evenly() -> Result<(), ArcadeError> {
    // H on all four qubits of the default register: every basis state
    // carries probability 1/16 and the norm stays at one.
    let config = ArcadeConfig {
        seed: Some(11),
        ..ArcadeConfig::default()
    };
    let mut session = GameSession::new(config)?;
    session.apply_gate(Gate::H, &[qid(0), qid(1), qid(2), qid(3)])?;

    check_normalization(session.state(), None)?;
    for index in 0..16 {
        let p = session.state().probability(index);
        assert!((p - 1.0 / 16.0).abs() < 1e-9, "basis {} carries {}", index, p);
    }
    Ok(())
}

#[test]
fn test_level_up_on_crossing_the_step() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // Eight presses leave the total just under the first threshold.
    for _ in 0..8 {
        session.apply_gate(Gate::X, &[qid(0)])?;
    }
    assert_eq!(session.points(), 240);
    assert_eq!(session.level(), 1);

    // The ninth press crosses 250 and levels up inside the same batch.
    let events = session.apply_gate(Gate::X, &[qid(0)])?;
    assert_eq!(session.points(), 270);
    assert_eq!(session.level(), 2);
    assert_eq!(
        count_events(&events, |e| matches!(e, ArcadeEvent::LevelUp { level: 2 })),
        1
    );

    // Progress tracks the remainder over the base step, so a fresh level
    // restarts near the bottom of the bar.
    assert!((session.progress() - 20.0 / 250.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_progress_wraps_to_zero_at_exact_step() -> Result<(), ArcadeError> {
    // Tuned payout: five presses land exactly on the step boundary.
    let config = ArcadeConfig {
        qubits: 2,
        seed: Some(3),
        points_per_gate: 50,
        ..ArcadeConfig::default()
    };
    let mut session = GameSession::new(config)?;

    for _ in 0..5 {
        session.apply_gate(Gate::X, &[qid(0)])?;
    }
    assert_eq!(session.points(), 250);
    assert_eq!(session.level(), 2);
    assert_eq!(session.progress(), 0.0, "bar empties exactly on the boundary");
    Ok(())
}

#[test]
fn test_mission_completion_pays_and_advances() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // H on q0 alone leaves the opening mission unmet.
    session.apply_gate(Gate::H, &[qid(0)])?;
    assert_eq!(session.points(), 30);
    assert_eq!(session.mission_index(), 0);
    assert!(!session.is_mission_completed(0));

    // H on q1 finishes "Superposition everywhere": press + bonus.
    let events = session.apply_gate(Gate::H, &[qid(1)])?;
    assert_eq!(session.points(), 30 + 30 + 100);
    assert!(session.is_mission_completed(0));
    assert_eq!(session.mission_index(), 1, "pointer moves to the next mission");
    assert_eq!(
        count_events(&events, |e| matches!(
            e,
            ArcadeEvent::MissionComplete { index: 0, .. }
        )),
        1
    );
    Ok(())
}

#[test]
fn test_mission_cascade_detects_earlier_goals() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // Lay the groundwork for missions 2 and 3 while mission 1 is unmet.
    session.apply_gate(Gate::Z, &[qid(0)])?;
    session.apply_cnot(qid(0), qid(1))?;
    session.apply_gate(Gate::H, &[qid(0)])?;
    assert_eq!(session.points(), 90);
    assert_eq!(session.completed_count(), 0, "parked on the unmet opener");

    // The final H completes the opener, then the cascade picks up the
    // already-satisfied CNOT and Z missions in order.
    let events = session.apply_gate(Gate::H, &[qid(1)])?;
    assert_eq!(session.completed_count(), 3);
    assert!(session.is_mission_completed(0));
    assert!(session.is_mission_completed(1));
    assert!(session.is_mission_completed(2));
    assert_eq!(session.mission_index(), 3, "Bell pair mission is up next");

    // 4 presses + 3 bonuses, with one level crossed along the way.
    assert_eq!(session.points(), 120 + 300);
    assert_eq!(session.level(), 2);
    assert_eq!(
        count_events(&events, |e| matches!(e, ArcadeEvent::MissionComplete { .. })),
        3
    );
    assert_eq!(
        count_events(&events, |e| matches!(e, ArcadeEvent::LevelUp { .. })),
        1
    );
    Ok(())
}

#[test]
fn test_bell_mission_checks_the_live_state() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // Park on the Bell pair mission via the manual cycle.
    session.advance_mission();
    session.advance_mission();
    session.advance_mission();
    assert_eq!(session.mission_index(), 3);

    session.apply_gate(Gate::H, &[qid(0)])?;
    assert!(!session.is_mission_completed(3), "half a Bell pair is not enough");

    let events = session.apply_cnot(qid(0), qid(1))?;
    assert!(session.is_mission_completed(3));
    assert_eq!(session.mission_index(), 4);
    assert_eq!(
        count_events(&events, |e| matches!(
            e,
            ArcadeEvent::MissionComplete { index: 3, .. }
        )),
        1
    );

    // The live state really is a Bell pair.
    let fidelity = bell_fidelity(session.state(), qid(0), qid(1))?;
    assert!(fidelity > 0.999, "fidelity was {}", fidelity);
    Ok(())
}

#[test]
fn test_manual_cycle_wraps_around() {
    let mut session = small_session();
    for _ in 0..7 {
        session.advance_mission();
    }
    assert_eq!(session.mission_index(), 0, "seven steps return to the start");
}

#[test]
fn test_measurement_pays_no_points() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // An empty target list measures the whole register. From |00> the
    // bits are certain.
    let events = session.measure(&[])?;
    assert_eq!(session.points(), 0);
    assert_eq!(session.circuit().len(), 1, "the measurement is recorded");

    match &events[0] {
        ArcadeEvent::Measured { bits } => {
            assert_eq!(bits, &vec![(qid(0), 0), (qid(1), 0)]);
        }
        other => panic!("Expected Measured event, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_reset_keeps_score_and_clears_the_board() -> Result<(), ArcadeError> {
    let mut session = small_session();

    session.apply_gate(Gate::X, &[qid(0)])?;
    session.apply_gate(Gate::X, &[qid(0)])?;
    assert_eq!(session.points(), 60);
    assert!((session.state().probability(0) - 1.0).abs() < 1e-9, "X X is back at |00>");

    session.reset();
    assert_eq!(session.points(), 60, "points survive a reset");
    assert_eq!(session.level(), 1);
    assert!(session.circuit().is_empty());
    assert!((session.state().probability(0) - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_rejected_presses_leave_the_session_untouched() {
    let mut session = small_session();

    // Outside the register.
    let result = session.apply_gate(Gate::H, &[qid(5)]);
    match result {
        Err(ArcadeError::InvalidTarget { qubit, message }) => {
            assert_eq!(qubit, qid(5));
            assert!(message.contains("2-qubit register"), "got: {}", message);
        }
        other => panic!("Expected InvalidTarget error, got {:?}", other),
    }

    // Duplicate target in one batch.
    let result = session.apply_gate(Gate::H, &[qid(0), qid(0)]);
    assert!(matches!(result, Err(ArcadeError::InvalidTarget { .. })));

    // Self-targeting CNOT.
    let result = session.apply_cnot(qid(1), qid(1));
    assert!(matches!(result, Err(ArcadeError::InvalidTarget { .. })));

    // Empty batch.
    let result = session.apply_gate(Gate::H, &[]);
    assert!(matches!(result, Err(ArcadeError::InvalidOperation { .. })));

    // Nothing was paid and nothing was recorded.
    assert_eq!(session.points(), 0);
    assert!(session.circuit().is_empty());
}

#[test]
fn test_bloch_readout_follows_the_session() -> Result<(), ArcadeError> {
    let mut session = small_session();

    // Fresh register: both qubits at the north pole.
    let bloch = bloch_vector(session.state(), qid(0))?;
    assert!((bloch.z - 1.0).abs() < 1e-9);

    // H moves q0 to the equator while q1 stays put.
    session.apply_gate(Gate::H, &[qid(0)])?;
    let bloch0 = bloch_vector(session.state(), qid(0))?;
    let bloch1 = bloch_vector(session.state(), qid(1))?;
    assert!((bloch0.x - 1.0).abs() < 1e-9);
    assert!(bloch0.z.abs() < 1e-9);
    assert!((bloch1.z - 1.0).abs() < 1e-9);
    assert!(!bloch0.is_mixed(None));

    // Entangling collapses both arrows to the center.
    session.apply_cnot(qid(0), qid(1))?;
    let bloch0 = bloch_vector(session.state(), qid(0))?;
    let bloch1 = bloch_vector(session.state(), qid(1))?;
    assert!(bloch0.length() < 1e-6, "length was {}", bloch0.length());
    assert!(bloch1.length() < 1e-6);
    assert!(bloch0.is_mixed(None));
    assert!(bloch1.is_mixed(None));

    // Measurement pins each arrow back to a pole.
    session.measure(&[])?;
    let bloch0 = bloch_vector(session.state(), qid(0))?;
    assert!((bloch0.z.abs() - 1.0).abs() < 1e-9);
    assert!(!bloch0.is_mixed(None));
    Ok(())
}

#[test]
fn test_truth_table_reflects_the_circuit() -> Result<(), ArcadeError> {
    let mut session = small_session();
    session.apply_gate(Gate::X, &[qid(1)])?;
    session.apply_gate(Gate::H, &[qid(0)])?;

    // X wins the annotation precedence, so every row reads as a flip.
    let table = truth_table(session.circuit(), session.num_qubits());
    let outputs: Vec<&str> = table.rows().iter().map(|row| row.output.as_str()).collect();
    assert_eq!(outputs, vec!["|11⟩", "|10⟩", "|01⟩", "|00⟩"]);
    Ok(())
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("arcade.toml");
    fs::write(&path, "qubits = 3\nseed = 11\npoints_per_gate = 40\n").expect("write config");

    let config = ArcadeConfig::load(&path).expect("config loads");
    assert_eq!(config.qubits, 3);
    assert_eq!(config.seed, Some(11));
    assert_eq!(config.points_per_gate, 40);
    assert_eq!(config.level_step, 250, "missing keys fall back to defaults");

    let session = GameSession::new(config).expect("session starts");
    assert_eq!(session.num_qubits(), 3);
}

#[test]
fn test_config_file_rejects_bad_register() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("arcade.toml");
    fs::write(&path, "qubits = 9\n").expect("write config");

    match ArcadeConfig::load(&path) {
        Err(ArcadeError::Config { message }) => {
            assert!(message.contains("between 1 and 4"), "got: {}", message);
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_config_load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("does_not_exist.toml");
    assert!(matches!(
        ArcadeConfig::load(&path),
        Err(ArcadeError::Config { .. })
    ));
}
