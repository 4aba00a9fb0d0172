//! Events emitted by the simulation for UI, audio and VFX observers.
//!
//! Fire-and-forget: the simulation collects them during a tick and hands
//! them out with that tick's snapshot.

use serde::{Deserialize, Serialize};

use crate::config::WaveDefinition;
use crate::enums::*;
use crate::types::{CellCoord, EnemyHandle, TowerHandle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Waves ---
    /// Inter-wave countdown progress.
    CountdownTick { remaining_secs: f64 },
    WaveStarted {
        index: u32,
        definition: WaveDefinition,
    },
    WaveCompleted { index: u32 },
    AllWavesCompleted,

    // --- Enemies ---
    EnemySpawned { enemy: EnemyHandle, kind: EnemyKind },
    EnemyHealthChanged {
        enemy: EnemyHandle,
        current: u32,
        max: u32,
    },
    EnemyDefeated { enemy: EnemyHandle, kind: EnemyKind },
    EnemyReachedExit { enemy: EnemyHandle, damage: u32 },
    EnemyAttackedTower {
        enemy: EnemyHandle,
        tower: TowerHandle,
    },

    // --- Towers ---
    TowerPlaced {
        tower: TowerHandle,
        kind: TowerKind,
        cell: CellCoord,
    },
    TowerFired {
        tower: TowerHandle,
        target: EnemyHandle,
    },
    TowerStunned {
        tower: TowerHandle,
        duration_secs: f64,
    },
    TowerUnstunned { tower: TowerHandle },
    TowerHealthChanged {
        tower: TowerHandle,
        current: u32,
        max: u32,
    },
    TowerDestroyed { tower: TowerHandle },
    TowerRepaired { tower: TowerHandle },

    // --- Player ---
    CurrencyChanged { balance: u32 },
    LivesChanged { remaining: u32 },
    LevelCompleted { victory: bool },
}
