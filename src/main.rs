// src/main.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quarcade::core::{ArcadeError, QubitId};
use quarcade::game::{ArcadeConfig, ArcadeEvent, Command, GameSession};
use quarcade::gates::Gate;
use quarcade::terminal::{logging, render};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

#[derive(Parser)]
#[command(name = "quarcade")]
#[command(about = "Gamified quantum circuit arcade for the terminal.", version)]
struct CommandLine {
    /// Raise diagnostic logging to debug
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive arcade session
    #[command(alias = "p")]
    Play {
        /// Register size, 1 through 4
        #[arg(long)]
        qubits: Option<u8>,
        /// Fixed measurement seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// TOML config file with arcade settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the gate reference
    #[command(alias = "g")]
    Gates,
    /// Run a scripted showcase round
    #[command(alias = "d")]
    Demo {
        /// Fixed measurement seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse();

    logging::init(commands.verbose);

    match commands.command {
        Commands::Play { qubits, seed, config } => play(qubits, seed, config),
        Commands::Gates => {
            render::gate_reference();
            Ok(())
        }
        Commands::Demo { seed } => demo(seed),
    }
}

/// Builds the session config from file and flag overrides, then runs the
/// arcade loop until the player quits.
fn play(
    qubits: Option<u8>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match config_path {
        Some(path) => ArcadeConfig::load(&path)?,
        None => ArcadeConfig::default(),
    };
    if let Some(qubits) = qubits {
        config.qubits = qubits;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }

    let mut session = GameSession::new(config)?;

    render::banner();
    render::scoreboard(&session);

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("quarcade> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match Command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => {
                        if execute(&mut session, command) {
                            break;
                        }
                    }
                    Err(err) => render::print_error(&err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                warn!("line editor failed: {err}");
                break;
            }
        }
    }

    render::goodbye(&session);
    Ok(())
}

/// Runs one parsed command against the session. Returns `true` when the
/// player asked to leave.
fn execute(session: &mut GameSession, command: Command) -> bool {
    match command {
        Command::Gate { gate, targets } => report(session.apply_gate(gate, &targets)),
        Command::Cnot { control, target } => report(session.apply_cnot(control, target)),
        Command::Measure { targets } => report(session.measure(&targets)),
        Command::Show => render::dashboard(session),
        Command::State => render::state_table(session),
        Command::Bloch => render::bloch_panels(session),
        Command::CircuitView => render::circuit_view(session),
        Command::Table => render::truth_table_view(session),
        Command::Mission => render::mission_list(session),
        Command::Next => {
            session.advance_mission();
            let mission = session.active_mission();
            render::print_status(&format!(
                "mission {}: {} ({})",
                session.mission_index() + 1,
                mission.title,
                mission.brief
            ));
        }
        Command::Score => render::scoreboard(session),
        Command::Reset => {
            session.reset();
            render::print_status("circuit cleared, score and missions kept");
        }
        Command::Help => render::help_screen(),
        Command::Quit => return true,
    }
    false
}

fn report(outcome: Result<Vec<ArcadeEvent>, ArcadeError>) {
    match outcome {
        Ok(events) => render::events(&events),
        Err(err) => render::print_error(&err),
    }
}

/// Scripted, non-interactive round that exercises every panel: Bell pair
/// preparation, dashboard, truth table, and a measurement.
fn demo(seed: Option<u64>) -> anyhow::Result<()> {
    let config = ArcadeConfig {
        qubits: 2,
        seed: seed.or(Some(7)),
        ..ArcadeConfig::default()
    };
    let mut session = GameSession::new(config)?;

    render::banner();
    render::header("demo round");

    render::print_status("putting q0 into superposition");
    render::events(&session.apply_gate(Gate::H, &[QubitId(0)])?);

    render::print_status("entangling q0 with q1");
    render::events(&session.apply_cnot(QubitId(0), QubitId(1))?);

    render::dashboard(&session);
    render::truth_table_view(&session);

    render::print_status("flipping the coin");
    render::events(&session.measure(&[])?);
    render::state_table(&session);

    render::goodbye(&session);
    Ok(())
}
