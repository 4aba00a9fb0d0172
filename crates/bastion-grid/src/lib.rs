//! Grid and path resolution for BASTION.
//!
//! Builds the cell map from a level configuration, tracks tower occupancy,
//! and computes the walkable polyline from each spawn point to its nearest
//! exit.

pub use bastion_core as core;

pub mod grid;
pub mod path;

pub use grid::{Cell, Grid};

#[cfg(test)]
mod tests;
