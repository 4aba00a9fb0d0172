//! Bastion runner.
//!
//! Wires the simulation crates to a game loop thread, a small control
//! surface over shared state, and the headless command-line front end.

pub mod cli;
pub mod control;
pub mod game_loop;
pub mod state;

pub use bastion_core as core;
