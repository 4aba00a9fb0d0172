//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are functions over `&mut World` (or `&World` for read-only).
//! They hold no state of their own; the one exception is the wave
//! scheduler, whose timeline is owned by the engine and passed in.

pub mod cleanup;
pub mod enemy_behavior;
pub mod enemy_movement;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod wave_spawner;
