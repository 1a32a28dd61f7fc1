// src/terminal/mod.rs

//! Terminal presentation: palette, diagnostic logging, and all drawing.

pub mod colors;
pub mod logging;
pub mod render;
