//! Fundamental geometric, timing, and identity types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DT, TICK_RATE};

/// World-space position (world units, y = up). Everything on the board
/// lives on the y = 0 plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Squared distance, for comparisons that do not need the root.
    pub fn range_squared_to(&self, other: &Position) -> f64 {
        self.0.distance_squared(other.0)
    }
}

/// Integer grid coordinates. Signed so that callers can ask about cells
/// outside the board and get a safe default back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance between two cells, in cells.
    pub fn distance_to(&self, other: &CellCoord) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dz = (other.z - self.z) as f64;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Generation-tagged reference to an enemy entity.
///
/// Wraps the bit pattern of the underlying ECS entity, so a handle to a
/// destroyed enemy never resolves to whatever reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyHandle(u64);

impl EnemyHandle {
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

/// Generation-tagged reference to a tower entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerHandle(u64);

impl TowerHandle {
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Convert seconds of game time into whole ticks (rounded, never negative).
pub fn secs_to_ticks(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * TICK_RATE as f64).round() as u64
    } else {
        0
    }
}

/// A delay measured in whole ticks, advanced once per tick.
///
/// Every timer in the simulation (spawn delays, slows, stuns, cooldowns,
/// lifetimes) is one of these rather than a suspended task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ticks: u64,
}

impl Countdown {
    pub const fn from_ticks(ticks: u64) -> Self {
        Self {
            remaining_ticks: ticks,
        }
    }

    pub fn from_secs(secs: f64) -> Self {
        Self::from_ticks(secs_to_ticks(secs))
    }

    /// An already-expired countdown.
    pub const fn expired() -> Self {
        Self::from_ticks(0)
    }

    /// Advance by one tick. Returns true once the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }

    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ticks as f64 * DT
    }
}
