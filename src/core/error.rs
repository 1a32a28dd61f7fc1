//! Error handling logic

use std::fmt;

/// Identifies one qubit in the arcade register.
///
/// Indices count from zero; qubit 0 maps to the most significant bit of a
/// basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u8);

impl QubitId {
    /// Zero-based register index as a usize.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types for circuit construction, simulation, and the game layer.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum ArcadeError {
    /// A gate name or gate argument could not be understood.
    InvalidGate {
        /// InvalidGate failure message
        message: String
    },

    /// A qubit reference is outside the register or conflicts with another.
    InvalidTarget {
        /// Offending qubit
        qubit: QubitId,
        /// InvalidTarget failure message
        message: String
    },

    /// A request is inconsistent with the current session or register shape.
    InvalidOperation {
        /// InvalidOperation failure message
        message: String
    },

    /// General error encountered during the simulation process itself.
    Simulation {
        /// Simulation failure message
        message: String
    },

    /// Configuration file could not be read, parsed, or validated.
    Config {
        /// Config failure message
        message: String
    },
}

impl fmt::Display for ArcadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcadeError::InvalidGate { message } => write!(f, "Invalid Gate: {}", message),
            ArcadeError::InvalidTarget { qubit, message } => write!(f, "Invalid Target ({}): {}", qubit, message),
            ArcadeError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            ArcadeError::Simulation { message } => write!(f, "Simulation Process Error: {}", message),
            ArcadeError::Config { message } => write!(f, "Configuration Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for ArcadeError {}
