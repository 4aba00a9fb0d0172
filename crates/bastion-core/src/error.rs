//! Error types.
//!
//! Only configuration loading and player-initiated actions are fallible.
//! Stale handles and out-of-bounds grid access are handled by returning
//! defaults, not errors.

use thiserror::Error;

use crate::enums::{EnemyKind, TowerKind};
use crate::types::{CellCoord, TowerHandle};

/// Problems with level or catalog data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no stats for enemy kind {0:?}")]
    UnknownEnemyKind(EnemyKind),
    #[error("no stats for tower kind {0:?}")]
    UnknownTowerKind(TowerKind),
    #[error("level has no spawn points")]
    NoSpawnPoints,
    #[error("cell array has {actual} entries, grid needs {expected}")]
    GridSizeMismatch { expected: usize, actual: usize },
    #[error("invalid stat: {0}")]
    InvalidStat(String),
    #[error("malformed level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read level: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an enemy could not be spawned. Logged and counted as resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("level has no spawn points")]
    NoSpawnPoints,
    #[error("no path from spawn point {0:?}")]
    NoPath(CellCoord),
    #[error("no stats for enemy kind {0:?}")]
    UnknownEnemyKind(EnemyKind),
}

/// Why a tower could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0:?} is outside the grid")]
    OutOfBounds(CellCoord),
    #[error("cell {0:?} is not buildable")]
    NotBuildable(CellCoord),
    #[error("cell {0:?} already holds a tower")]
    Occupied(CellCoord),
    #[error("no stats for tower kind {0:?}")]
    UnknownTowerKind(TowerKind),
    #[error("tower costs {cost}, balance is {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },
    #[error("no level is active")]
    NoActiveLevel,
}

/// Why a tower could not be repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("tower {0:?} does not exist")]
    NoSuchTower(TowerHandle),
    #[error("tower {0:?} is not destroyed")]
    NotDestroyed(TowerHandle),
    #[error("tower {0:?} cannot be repaired")]
    NotRepairable(TowerHandle),
    #[error("repair costs {cost}, balance is {balance}")]
    InsufficientFunds { cost: u32, balance: u32 },
}
