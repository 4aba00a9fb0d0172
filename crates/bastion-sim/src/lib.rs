//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod collaborators;
pub mod combat;
pub mod engine;
pub mod registry;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use collaborators::Collaborators;
pub use engine::{SimConfig, SimulationEngine};
