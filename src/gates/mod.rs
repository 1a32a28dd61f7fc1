// src/gates/mod.rs

//! The arcade gate menu: single-qubit unitaries and their metadata.
//!
//! Each [`Gate`] knows its 2x2 matrix, its display label, and a one-line
//! player-facing summary. CNOT is not a `Gate`; it takes a control/target
//! pair and lives as its own circuit operation.

use crate::core::ArcadeError;
use num_complex::Complex;
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt;

/// A single-qubit gate from the arcade menu.
///
/// Rotation gates carry their angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Z.
    Z,
    /// Quarter phase turn.
    S,
    /// Eighth phase turn.
    T,
    /// Rotation about the X axis.
    Rx(f64),
    /// Rotation about the Y axis.
    Ry(f64),
    /// Rotation about the Z axis.
    Rz(f64),
}

impl Gate {
    /// The gate's unitary matrix, row-major.
    pub fn matrix(&self) -> [[Complex<f64>; 2]; 2] {
        let zero = Complex::new(0.0, 0.0);
        let one = Complex::new(1.0, 0.0);
        match self {
            Gate::H => {
                let h = Complex::new(1.0 / 2.0_f64.sqrt(), 0.0);
                [[h, h], [h, -h]]
            }
            Gate::X => [[zero, one], [one, zero]],
            Gate::Z => [[one, zero], [zero, -one]],
            Gate::S => [[one, zero], [zero, Complex::new(0.0, 1.0)]],
            Gate::T => [[one, zero], [zero, Complex::from_polar(1.0, FRAC_PI_4)]],
            Gate::Rx(theta) => {
                let half = theta / 2.0;
                let c = Complex::new(half.cos(), 0.0);
                let s = Complex::new(0.0, -half.sin());
                [[c, s], [s, c]]
            }
            Gate::Ry(theta) => {
                let half = theta / 2.0;
                let c = Complex::new(half.cos(), 0.0);
                let s = Complex::new(half.sin(), 0.0);
                [[c, -s], [s, c]]
            }
            Gate::Rz(theta) => {
                let half = theta / 2.0;
                [
                    [Complex::from_polar(1.0, -half), zero],
                    [zero, Complex::from_polar(1.0, half)],
                ]
            }
        }
    }

    /// Short label used in diagrams, usage tracking, and the scoreboard.
    pub fn label(&self) -> &'static str {
        match self {
            Gate::H => "H",
            Gate::X => "X",
            Gate::Z => "Z",
            Gate::S => "S",
            Gate::T => "T",
            Gate::Rx(_) => "RX",
            Gate::Ry(_) => "RY",
            Gate::Rz(_) => "RZ",
        }
    }

    /// Whether this gate carries a rotation angle.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_))
    }

    /// One-line explanation shown in the gate reference and tooltips.
    pub fn summary(&self) -> &'static str {
        match self {
            Gate::H => "Puts a qubit into an equal superposition of 0 and 1.",
            Gate::X => "Flips a qubit: 0 becomes 1 and 1 becomes 0.",
            Gate::Z => "Flips the phase of the 1 component.",
            Gate::S => "Quarter turn of phase on the 1 component.",
            Gate::T => "Eighth turn of phase on the 1 component.",
            Gate::Rx(_) => "Rotates the qubit about the X axis by a chosen angle.",
            Gate::Ry(_) => "Rotates the qubit about the Y axis by a chosen angle.",
            Gate::Rz(_) => "Rotates the qubit about the Z axis by a chosen angle.",
        }
    }

    /// Builds a gate from its menu name, case-insensitive.
    ///
    /// Rotation gates require `angle`; fixed gates reject one.
    pub fn from_name(name: &str, angle: Option<f64>) -> Result<Gate, ArcadeError> {
        let upper = name.trim().to_ascii_uppercase();
        let gate = match (upper.as_str(), angle) {
            ("H", None) => Gate::H,
            ("X", None) => Gate::X,
            ("Z", None) => Gate::Z,
            ("S", None) => Gate::S,
            ("T", None) => Gate::T,
            ("RX", Some(theta)) => Gate::Rx(theta),
            ("RY", Some(theta)) => Gate::Ry(theta),
            ("RZ", Some(theta)) => Gate::Rz(theta),
            ("RX" | "RY" | "RZ", None) => {
                return Err(ArcadeError::InvalidGate {
                    message: format!("{} requires an angle in radians", upper),
                });
            }
            ("H" | "X" | "Z" | "S" | "T", Some(_)) => {
                return Err(ArcadeError::InvalidGate {
                    message: format!("{} does not take an angle", upper),
                });
            }
            _ => {
                return Err(ArcadeError::InvalidGate {
                    message: format!("unknown gate '{}'", name.trim()),
                });
            }
        };
        Ok(gate)
    }

    /// The full menu, rotations at the default angle. Used by the gate
    /// reference screen.
    pub fn menu() -> [Gate; 8] {
        let theta = crate::core::angles::DEFAULT_ROTATION;
        [
            Gate::H,
            Gate::X,
            Gate::Z,
            Gate::S,
            Gate::T,
            Gate::Rx(theta),
            Gate::Ry(theta),
            Gate::Rz(theta),
        ]
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Rx(theta) => write!(f, "RX({:.3})", theta),
            Gate::Ry(theta) => write!(f, "RY({:.3})", theta),
            Gate::Rz(theta) => write!(f, "RZ({:.3})", theta),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// One-line explanation for CNOT, which sits outside [`Gate`].
pub fn cnot_summary() -> &'static str {
    "Flips the target qubit when the control qubit is 1. Entangles pairs."
}

/// Parses an angle in radians, accepting decimals and `pi` forms such as
/// `pi`, `pi/2`, `2pi`, `-pi/4`, `3pi/2`. Non-finite angles are rejected.
pub fn parse_angle(text: &str) -> Result<f64, ArcadeError> {
    let trimmed = text.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(ArcadeError::InvalidGate {
            message: "missing angle".to_string(),
        });
    }
    let invalid = || ArcadeError::InvalidGate {
        message: format!("cannot parse angle '{}'", text.trim()),
    };
    if let Ok(value) = trimmed.parse::<f64>() {
        // f64 parsing admits "nan", "inf", and overflowed literals.
        return if value.is_finite() { Ok(value) } else { Err(invalid()) };
    }
    let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (-1.0, stripped)
    } else {
        (1.0, trimmed.as_str())
    };
    let (coeff_text, tail) = rest.split_once("pi").ok_or_else(invalid)?;
    let coeff = if coeff_text.is_empty() {
        1.0
    } else {
        coeff_text.parse::<f64>().map_err(|_| invalid())?
    };
    let divisor = if tail.is_empty() {
        1.0
    } else {
        let d = tail
            .strip_prefix('/')
            .ok_or_else(invalid)?
            .parse::<f64>()
            .map_err(|_| invalid())?;
        if d == 0.0 {
            return Err(invalid());
        }
        d
    };
    let angle = sign * coeff * PI / divisor;
    if angle.is_finite() { Ok(angle) } else { Err(invalid()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn parses_pi_forms() -> Result<(), ArcadeError> {
        assert_close(parse_angle("pi")?, PI);
        assert_close(parse_angle("pi/2")?, PI / 2.0);
        assert_close(parse_angle("2pi")?, 2.0 * PI);
        assert_close(parse_angle("-pi/4")?, -PI / 4.0);
        assert_close(parse_angle("3pi/2")?, 1.5 * PI);
        assert_close(parse_angle("1.5")?, 1.5);
        Ok(())
    }

    #[test]
    fn rejects_bad_angles() {
        assert!(parse_angle("").is_err());
        assert!(parse_angle("tau").is_err());
        assert!(parse_angle("pi/0").is_err());
        assert!(parse_angle("pi/x").is_err());
    }

    #[test]
    fn rejects_non_finite_angles() {
        // A NaN rotation would poison every amplitude it touches.
        for text in ["nan", "inf", "-inf", "infinity", "1e400", "nanpi", "infpi"] {
            assert!(parse_angle(text).is_err(), "'{}' must not parse", text);
        }
    }

    #[test]
    fn name_lookup_respects_angles() {
        assert_eq!(Gate::from_name("h", None), Ok(Gate::H));
        assert_eq!(Gate::from_name("RX", Some(1.0)), Ok(Gate::Rx(1.0)));
        assert!(Gate::from_name("rx", None).is_err());
        assert!(Gate::from_name("h", Some(1.0)).is_err());
        assert!(Gate::from_name("q", None).is_err());
    }

    #[test]
    fn hadamard_matrix_is_symmetric() {
        let m = Gate::H.matrix();
        let h = 1.0 / 2.0_f64.sqrt();
        assert_close(m[0][0].re, h);
        assert_close(m[0][1].re, h);
        assert_close(m[1][0].re, h);
        assert_close(m[1][1].re, -h);
    }

    #[test]
    fn rx_pi_matches_x_up_to_phase() {
        // Rx(pi) = -i X; off-diagonal entries are -i, diagonal vanishes.
        let m = Gate::Rx(PI).matrix();
        assert_close(m[0][0].re, 0.0);
        assert_close(m[0][1].im, -1.0);
        assert_close(m[1][0].im, -1.0);
        assert_close(m[1][1].re, 0.0);
    }
}
