// src/terminal/render.rs

//! All player-facing drawing: banner, dashboard panels, scoreboard, Bloch
//! discs, tables, and event lines. Everything prints directly; tracing is
//! reserved for diagnostics.

use crate::analysis::{self, BlochVector, TruthTable};
use crate::core::constants::tolerances;
use crate::core::QubitId;
use crate::game::{ArcadeEvent, GameSession, MISSIONS};
use crate::gates::{self, Gate};
use crate::terminal::colors;
use colored::Colorize;

/// Fixed width of rules and headers.
pub const TOTAL_WIDTH: usize = 64;

const BAR_WIDTH: usize = 20;

const BANNER_ART: &str = r#"
  ██████  ██    ██  █████  ██████   ██████  █████  ██████  ███████
 ██    ██ ██    ██ ██   ██ ██   ██ ██      ██   ██ ██   ██ ██
 ██    ██ ██    ██ ███████ ██████  ██      ███████ ██   ██ █████
 ██ ▄▄ ██ ██    ██ ██   ██ ██   ██ ██      ██   ██ ██   ██ ██
  ██████   ██████  ██   ██ ██   ██  ██████ ██   ██ ██████  ███████
     ▀▀
"#;

/// Prints the title art and version rule.
pub fn banner() {
    println!("{}", BANNER_ART.color(colors::QUANTUM).bold());
    let text = format!("⟦ QUARCADE v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width = text.chars().count();
    let fill = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2);
    println!(
        "{}{}{}",
        fill.color(colors::SEPARATOR),
        text.color(colors::GOOD).bold(),
        fill.color(colors::SEPARATOR)
    );
    println!(
        "{}",
        "insert coin: type a gate, `help` lists the moves".color(colors::SEPARATOR)
    );
}

/// Prints a section header: the title centered in a dashed rule.
pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len = formatted.chars().count();

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    println!(
        "{}{}{}",
        "─".repeat(left).color(colors::SEPARATOR),
        formatted.color(colors::GOOD),
        "─".repeat(right).color(colors::SEPARATOR)
    );
}

/// Prints a `> `-prefixed status line.
pub fn print_status(msg: &str) {
    println!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.color(colors::TEXT_DEFAULT)
    );
}

/// Prints an error in the arcade's error color.
pub fn print_error(err: &crate::core::ArcadeError) {
    println!("{} {}", "[-]".color(colors::BAD).bold(), err.to_string().color(colors::BAD));
}

fn filled_bar(fraction: f64, width: usize) -> String {
    let clamped = fraction.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Prints what the session just did, one line per event.
pub fn events(events: &[ArcadeEvent]) {
    for event in events {
        match event {
            ArcadeEvent::GateApplied { label, targets, points } => {
                let target_list = targets
                    .iter()
                    .map(|q| q.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{} {} on {} {}",
                    "[+]".color(colors::GOOD).bold(),
                    label.color(colors::PRIMARY).bold(),
                    target_list.color(colors::TEXT_DEFAULT),
                    format!("(+{} pts)", points).color(colors::ACCENT)
                );
            }
            ArcadeEvent::Measured { bits } => {
                measurement_report(bits);
            }
            ArcadeEvent::MissionComplete { index, title, bonus } => {
                println!(
                    "{} mission {} complete: {} {}",
                    "[★]".color(colors::ACCENT).bold(),
                    index + 1,
                    title.color(colors::GOOD).bold(),
                    format!("(+{} pts)", bonus).color(colors::ACCENT)
                );
            }
            ArcadeEvent::LevelUp { level } => {
                let line = format!("★ LEVEL UP! welcome to level {} ★", level);
                let pad = TOTAL_WIDTH.saturating_sub(line.chars().count()) / 2;
                println!(
                    "{}{}",
                    " ".repeat(pad),
                    line.color(colors::ACCENT).bold()
                );
            }
        }
    }
}

/// Prints the coin-flip outcome for measured qubits.
pub fn measurement_report(bits: &[(QubitId, u8)]) {
    let rendered = bits
        .iter()
        .map(|(qubit, bit)| format!("{}={}", qubit, bit))
        .collect::<Vec<_>>()
        .join("  ");
    println!(
        "{} the coin lands: {}",
        "[+]".color(colors::GOOD).bold(),
        rendered.color(colors::QUANTUM).bold()
    );
}

/// Prints the live amplitudes with probability bars, skipping negligible
/// terms.
pub fn state_table(session: &GameSession) {
    header("state");
    let state = session.state();
    let mut any = false;
    for (index, amp) in state.vector().iter().enumerate() {
        let probability = amp.norm_sqr();
        if probability < tolerances::AMPLITUDE_EPSILON {
            continue;
        }
        any = true;
        println!(
            "  {}  {}  {} {}",
            state.basis_label(index).color(colors::PRIMARY).bold(),
            format!("{:+.4}{:+.4}i", amp.re, amp.im).color(colors::TEXT_DEFAULT),
            filled_bar(probability, BAR_WIDTH).color(colors::QUANTUM),
            format!("{:5.1}%", probability * 100.0).color(colors::ACCENT)
        );
    }
    if !any {
        print_status("state vector is numerically zero");
    }
}

/// Builds one ASCII Bloch panel: a disc with the (x, z) projection marked,
/// plus the numeric readout.
fn bloch_panel(qubit: QubitId, vector: &BlochVector) -> Vec<String> {
    // 9x5 disc template; row 2/col 4 is the origin.
    let mut disc: Vec<Vec<char>> = vec![
        "  .---.  ".chars().collect(),
        " /     \\ ".chars().collect(),
        "|   +   |".chars().collect(),
        " \\     / ".chars().collect(),
        "  '---'  ".chars().collect(),
    ];
    let col = (4.0 + vector.x * 3.0).round().clamp(1.0, 7.0) as usize;
    let row = (2.0 - vector.z * 2.0).round().clamp(0.0, 4.0) as usize;
    disc[row][col] = '●';

    let (theta, phi) = vector.polar();
    let mut lines = vec![format!("    {:<5}", qubit.to_string())];
    lines.extend(disc.into_iter().map(|row| row.into_iter().collect()));
    lines.push(format!("x {:+.2}   ", vector.x));
    lines.push(format!("y {:+.2}   ", vector.y));
    lines.push(format!("z {:+.2}   ", vector.z));
    lines.push(format!("r {:.2} ", vector.length()));
    lines.push(format!("θ {:+.2}   ", theta));
    lines.push(format!("φ {:+.2}   ", phi));
    lines
}

/// Prints one Bloch disc per qubit, side by side, with entangled qubits
/// flagged under their panel.
pub fn bloch_panels(session: &GameSession) {
    header("bloch spheres");
    let vectors = match analysis::bloch_vectors(session.state()) {
        Ok(vectors) => vectors,
        Err(err) => {
            print_error(&err);
            return;
        }
    };

    let panels: Vec<Vec<String>> = vectors
        .iter()
        .enumerate()
        .map(|(idx, vector)| bloch_panel(QubitId(idx as u8), vector))
        .collect();

    let rows = panels.iter().map(|panel| panel.len()).max().unwrap_or(0);
    for row in 0..rows {
        let mut line = String::new();
        for panel in &panels {
            line.push_str(panel.get(row).map(String::as_str).unwrap_or("         "));
            line.push_str("  ");
        }
        println!("  {}", line.color(colors::TEXT_DEFAULT));
    }

    let mixed: Vec<String> = vectors
        .iter()
        .enumerate()
        .filter(|(_, vector)| vector.is_mixed(None))
        .map(|(idx, _)| QubitId(idx as u8).to_string())
        .collect();
    if !mixed.is_empty() {
        println!(
            "  {} {}",
            "entangled (inside the sphere):".color(colors::SEPARATOR),
            mixed.join(" ").color(colors::QUANTUM).bold()
        );
    }
}

/// Prints the circuit diagram.
pub fn circuit_view(session: &GameSession) {
    header("circuit");
    if session.circuit().is_empty() {
        print_status("no operations yet, the wires are clean");
        return;
    }
    for line in session.circuit().to_string().lines() {
        println!("  {}", line.color(colors::TEXT_DEFAULT));
    }
}

/// Prints the logical truth table with annotated outcomes highlighted.
pub fn truth_table_view(session: &GameSession) {
    header("truth table");
    let table = analysis::truth_table(session.circuit(), session.num_qubits());
    for row in table.rows() {
        let output = if row.is_annotation() {
            row.output.as_str().color(colors::ACCENT).italic()
        } else {
            row.output.as_str().color(colors::TEXT_DEFAULT)
        };
        println!(
            "  {}  {}  {}",
            row.input.as_str().color(colors::PRIMARY),
            "→".color(colors::SEPARATOR),
            output
        );
    }
    println!("  {}", TruthTable::caption().color(colors::SEPARATOR).italic());
}

/// Prints points, level, progress, and the active mission.
pub fn scoreboard(session: &GameSession) {
    header("scoreboard");
    aligned_line("points", &session.points().to_string());
    aligned_line("level", &session.level().to_string());
    println!(
        "  {}{} {}",
        pad_key("progress"),
        ":".color(colors::SEPARATOR),
        filled_bar(session.progress(), BAR_WIDTH).color(colors::GOOD)
    );
    let mission = session.active_mission();
    aligned_line(
        "mission",
        &format!(
            "{}/{} {}",
            session.mission_index() + 1,
            MISSIONS.len(),
            mission.title
        ),
    );
    aligned_line("goal", mission.brief);
    aligned_line(
        "completed",
        &format!("{}/{}", session.completed_count(), MISSIONS.len()),
    );
}

fn pad_key(key: &str) -> String {
    let dots = ".".repeat(10usize.saturating_sub(key.len()));
    format!(
        "{}{}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR)
    )
}

fn aligned_line(key: &str, value: &str) {
    println!(
        "  {}{} {}",
        pad_key(key),
        ":".color(colors::SEPARATOR),
        value.color(colors::TEXT_DEFAULT)
    );
}

/// Prints the whole mission catalog with completion markers.
pub fn mission_list(session: &GameSession) {
    header("missions");
    for (index, mission) in MISSIONS.iter().enumerate() {
        let marker = if session.is_mission_completed(index) {
            "[x]".color(colors::GOOD).bold()
        } else {
            "[ ]".color(colors::SEPARATOR)
        };
        let active = if index == session.mission_index() {
            "◀ active".color(colors::ACCENT).bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}. {} {}",
            marker,
            index + 1,
            format!("{:<26}", mission.title).color(colors::PRIMARY),
            active
        );
        println!("        {}", mission.brief.color(colors::SEPARATOR));
    }
}

/// Prints the gate menu with one-line explanations.
pub fn gate_reference() {
    header("gate reference");
    for gate in Gate::menu() {
        println!(
            "  {}  {}",
            format!("{:<4}", gate.label()).color(colors::PRIMARY).bold(),
            gate.summary().color(colors::TEXT_DEFAULT)
        );
    }
    println!(
        "  {}  {}",
        "CNOT".color(colors::PRIMARY).bold(),
        gates::cnot_summary().color(colors::TEXT_DEFAULT)
    );
}

/// Prints the command list.
pub fn help_screen() {
    header("commands");
    let entries: [(&str, &str); 12] = [
        ("h|x|z|s|t <q…>", "apply a fixed gate to the listed qubits"),
        ("rx|ry|rz <angle> <q…>", "rotate; angle in radians or pi forms (pi/2)"),
        ("cnot <control> <target>", "entangle two qubits"),
        ("measure [q…] (flip)", "collapse the coin; empty list means all"),
        ("show", "full dashboard"),
        ("state | bloch | circuit | table", "single panels"),
        ("mission", "mission catalog and the active goal"),
        ("next", "cycle to the next mission"),
        ("score", "points, level, and progress"),
        ("reset", "clear the circuit, keep your score"),
        ("gates via `help`", "this screen includes the gate menu below"),
        ("quit", "leave the arcade"),
    ];
    for (command, explanation) in entries {
        println!(
            "  {}  {}",
            format!("{:<32}", command).color(colors::ACCENT),
            explanation.color(colors::TEXT_DEFAULT)
        );
    }
    gate_reference();
}

/// Prints the full dashboard: state, Bloch panels, circuit, scoreboard.
pub fn dashboard(session: &GameSession) {
    state_table(session);
    bloch_panels(session);
    circuit_view(session);
    scoreboard(session);
}

/// Prints the closing rule.
pub fn goodbye(session: &GameSession) {
    header("game over");
    print_status(&format!(
        "final score {} at level {}, {} of {} missions complete",
        session.points(),
        session.level(),
        session.completed_count(),
        MISSIONS.len()
    ));
    println!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
}
