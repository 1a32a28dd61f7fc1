// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod state;

// Re-export public types for convenient access via `quarcade::core::TypeName`
pub use error::{ArcadeError, QubitId};
pub use state::QuantumState;

pub mod constants;
pub use constants::{angles, register, scoring, tolerances}; // Re-export
