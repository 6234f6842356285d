//! Core types and definitions for the NORAD display.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geographic and screen types, palettes, tuning constants, control
//! commands and display events. It has no dependency on any windowing
//! or rendering backend.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;

pub use error::ConfigError;

#[cfg(test)]
mod tests;
