// src/game/mod.rs

//! The arcade layer: configuration, missions, the live session, and the
//! REPL command grammar.

pub mod command;
pub mod config;
pub mod missions;
pub mod session;

pub use command::Command;
pub use config::ArcadeConfig;
pub use missions::{Mission, MissionGoal, MISSIONS};
pub use session::{ArcadeEvent, GameSession};
