// src/terminal/colors.rs

//! The arcade palette. Every colored element picks from here so the look
//! stays consistent across screens.

use colored::Color;

/// Labels and keys.
pub const PRIMARY: Color = Color::BrightCyan;
/// Highlights: points, annotations, the active mission.
pub const ACCENT: Color = Color::BrightYellow;
/// Rules, padding dots, and frame characters.
pub const SEPARATOR: Color = Color::BrightBlack;
/// Plain values.
pub const TEXT_DEFAULT: Color = Color::White;
/// Rewards and completed goals.
pub const GOOD: Color = Color::BrightGreen;
/// Errors and failed checks.
pub const BAD: Color = Color::BrightRed;
/// Probability bars and Bloch markers.
pub const QUANTUM: Color = Color::BrightMagenta;
