//! Enemy behavior for BASTION.
//!
//! Pure functions over the enemy components: path stepping, status-effect
//! timers, damage mitigation, and the tower-attack decision cycle. No ECS
//! dependency; the simulation systems call these per entity.

pub mod assault;
pub mod damage;
pub mod movement;
pub mod status;

pub use bastion_core as core;

#[cfg(test)]
mod tests;
