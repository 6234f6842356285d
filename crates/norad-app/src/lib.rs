//! NORAD display application.
//!
//! Wires the simulation and renderer crates to a minifb window: command-line
//! configuration, keyboard input and the frame loop.

pub mod cli;
pub mod display;
pub mod game_loop;
pub mod input;

pub use norad_core as core;
