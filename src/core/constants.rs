//! Fixed rules of the arcade: scoring, register bounds, numeric tolerances.

/// Scoring rules. Points accrue per gate press; levels gate on multiples
/// of `LEVEL_STEP`; completed missions pay `MISSION_BONUS` once.
pub mod scoring {
    /// Points awarded for each successful gate press.
    pub const POINTS_PER_GATE: u32 = 30;
    /// Level `L` is reached once total points pass `LEVEL_STEP * L`.
    pub const LEVEL_STEP: u32 = 250;
    /// One-time reward for finishing a mission.
    pub const MISSION_BONUS: u32 = 100;
}

/// Register size limits for the arcade.
pub mod register {
    /// Smallest playable register.
    pub const MIN_QUBITS: u8 = 1;
    /// Largest playable register.
    pub const MAX_QUBITS: u8 = 4;
    /// Register size when none is configured.
    pub const DEFAULT_QUBITS: u8 = 4;
}

/// Rotation-gate defaults.
pub mod angles {
    /// Angle used when a rotation gate is requested without one.
    pub const DEFAULT_ROTATION: f64 = std::f64::consts::FRAC_PI_2;
}

/// Numeric tolerances for state inspection.
pub mod tolerances {
    /// Amplitudes below this squared magnitude are treated as zero.
    pub const AMPLITUDE_EPSILON: f64 = 1e-12;
    /// Allowed deviation of the state norm from 1.
    pub const NORM_EPSILON: f64 = 1e-9;
    /// Fidelity at or above this counts as "reached the target state".
    pub const FIDELITY_THRESHOLD: f64 = 0.99;
}
